//! In-memory store implementing every repository port.
//!
//! Used when no database URL is configured and by scenario tests. All tables
//! sit behind one mutex so each port call is a single critical section; the
//! unique constraints and cascades mirror the PostgreSQL schema.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    AssessmentRepository, CourseRepository, EnrollmentRepository, GradeRepository,
    LearningOutcomeRepository, RepositoryError, UserAccount, UserRepository,
};
use crate::domain::{
    Assessment, AssessmentDetails, AssessmentId, AssessmentOutcome, Course, CourseDetails,
    CourseId, Enrollment, Grade, LearningOutcome, LearningOutcomeId, OutcomeDetails, Role, User,
    UserId,
};

#[derive(Default)]
struct Tables {
    accounts: Vec<UserAccount>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    assessments: Vec<Assessment>,
    outcomes: Vec<LearningOutcome>,
    links: Vec<AssessmentOutcome>,
    grades: Vec<Grade>,
}

impl Tables {
    fn drop_assessments(&mut self, doomed: &HashSet<AssessmentId>) {
        self.assessments.retain(|row| !doomed.contains(&row.id));
        self.grades
            .retain(|grade| !doomed.contains(&grade.assessment_id()));
        self.links
            .retain(|link| !doomed.contains(&link.assessment_id));
    }

    fn drop_outcomes(&mut self, doomed: &HashSet<LearningOutcomeId>) {
        self.outcomes.retain(|row| !doomed.contains(&row.id));
        self.links
            .retain(|link| !doomed.contains(&link.learning_outcome_id));
    }
}

/// Process-local store for every entity.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::connection("in-memory store lock poisoned"))
    }
}

fn id_set<T: Copy + Eq + Hash>(ids: &[T]) -> HashSet<T> {
    ids.iter().copied().collect()
}

/// Clone the matching rows, oldest first. The sort is stable, so rows with
/// equal timestamps keep insertion order.
fn select_oldest_first<T, K>(
    rows: &[T],
    keep: impl Fn(&T) -> bool,
    created_at: impl Fn(&T) -> K,
) -> Vec<T>
where
    T: Clone,
    K: Ord,
{
    let mut selected: Vec<T> = rows.iter().filter(|row| keep(row)).cloned().collect();
    selected.sort_by_key(|row| created_at(row));
    selected
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, account: &UserAccount) -> Result<User, RepositoryError> {
        let mut tables = self.tables()?;
        let user = &account.user;
        if tables
            .accounts
            .iter()
            .any(|row| row.user.username == user.username)
        {
            return Err(RepositoryError::duplicate_key("users_username_key"));
        }
        if tables.accounts.iter().any(|row| row.user.email == user.email) {
            return Err(RepositoryError::duplicate_key("users_email_key"));
        }
        tables.accounts.push(account.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables()?;
        Ok(tables
            .accounts
            .iter()
            .find(|row| row.user.id == *id)
            .map(|row| row.user.clone()))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        let wanted = id_set(ids);
        let tables = self.tables()?;
        Ok(tables
            .accounts
            .iter()
            .filter(|row| wanted.contains(&row.user.id))
            .map(|row| row.user.clone())
            .collect())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, RepositoryError> {
        let tables = self.tables()?;
        Ok(tables
            .accounts
            .iter()
            .filter(|row| row.user.role == role)
            .map(|row| row.user.clone())
            .collect())
    }

    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, RepositoryError> {
        let tables = self.tables()?;
        Ok(tables
            .accounts
            .iter()
            .find(|row| row.user.username == username)
            .cloned())
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, RepositoryError> {
        let tables = self.tables()?;
        Ok(tables
            .accounts
            .iter()
            .find(|row| row.user.email == email)
            .cloned())
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn insert(&self, course: &Course) -> Result<Course, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.courses.iter().any(|row| row.code == course.code) {
            return Err(RepositoryError::duplicate_key("courses_code_key"));
        }
        tables.courses.push(course.clone());
        Ok(course.clone())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        let tables = self.tables()?;
        Ok(tables.courses.iter().find(|row| row.id == *id).cloned())
    }

    async fn find_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>, RepositoryError> {
        let wanted = id_set(ids);
        let tables = self.tables()?;
        Ok(tables
            .courses
            .iter()
            .filter(|row| wanted.contains(&row.id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Course>, RepositoryError> {
        let tables = self.tables()?;
        Ok(select_oldest_first(&tables.courses, |_| true, |row| row.created_at))
    }

    async fn list_by_teacher(&self, teacher_id: &UserId) -> Result<Vec<Course>, RepositoryError> {
        let tables = self.tables()?;
        Ok(select_oldest_first(
            &tables.courses,
            |row| row.teacher_id == *teacher_id,
            |row| row.created_at,
        ))
    }

    async fn update(
        &self,
        id: &CourseId,
        details: &CourseDetails,
    ) -> Result<Option<Course>, RepositoryError> {
        let mut tables = self.tables()?;
        if !tables.courses.iter().any(|row| row.id == *id) {
            return Ok(None);
        }
        if tables
            .courses
            .iter()
            .any(|row| row.id != *id && row.code == details.code())
        {
            return Err(RepositoryError::duplicate_key("courses_code_key"));
        }
        let Some(course) = tables.courses.iter_mut().find(|row| row.id == *id) else {
            return Ok(None);
        };
        details.name().clone_into(&mut course.name);
        details.code().clone_into(&mut course.code);
        course.description = details.description().map(str::to_owned);
        Ok(Some(course.clone()))
    }

    async fn delete(&self, id: &CourseId) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        tables.courses.retain(|row| row.id != *id);
        tables.enrollments.retain(|row| row.course_id != *id);
        let assessments: HashSet<AssessmentId> = tables
            .assessments
            .iter()
            .filter(|row| row.course_id == *id)
            .map(|row| row.id)
            .collect();
        tables.drop_assessments(&assessments);
        let outcomes: HashSet<LearningOutcomeId> = tables
            .outcomes
            .iter()
            .filter(|row| row.course_id == *id)
            .map(|row| row.id)
            .collect();
        tables.drop_outcomes(&outcomes);
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn insert(&self, enrollment: &Enrollment) -> Result<Enrollment, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.enrollments.iter().any(|row| {
            row.student_id == enrollment.student_id && row.course_id == enrollment.course_id
        }) {
            return Err(RepositoryError::duplicate_key("course_enrollments_pkey"));
        }
        tables.enrollments.push(enrollment.clone());
        Ok(enrollment.clone())
    }

    async fn delete(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        tables
            .enrollments
            .retain(|row| !(row.student_id == *student_id && row.course_id == *course_id));
        Ok(())
    }

    async fn find(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, RepositoryError> {
        let tables = self.tables()?;
        Ok(tables
            .enrollments
            .iter()
            .find(|row| row.student_id == *student_id && row.course_id == *course_id)
            .cloned())
    }

    async fn list_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<Enrollment>, RepositoryError> {
        let tables = self.tables()?;
        Ok(select_oldest_first(
            &tables.enrollments,
            |row| row.course_id == *course_id,
            |row| row.enrolled_at,
        ))
    }

    async fn list_by_courses(
        &self,
        course_ids: &[CourseId],
    ) -> Result<Vec<Enrollment>, RepositoryError> {
        let wanted = id_set(course_ids);
        let tables = self.tables()?;
        Ok(select_oldest_first(
            &tables.enrollments,
            |row| wanted.contains(&row.course_id),
            |row| row.enrolled_at,
        ))
    }

    async fn list_by_student(
        &self,
        student_id: &UserId,
    ) -> Result<Vec<Enrollment>, RepositoryError> {
        let tables = self.tables()?;
        Ok(select_oldest_first(
            &tables.enrollments,
            |row| row.student_id == *student_id,
            |row| row.enrolled_at,
        ))
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryStore {
    async fn insert(&self, assessment: &Assessment) -> Result<Assessment, RepositoryError> {
        let mut tables = self.tables()?;
        tables.assessments.push(assessment.clone());
        Ok(assessment.clone())
    }

    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let tables = self.tables()?;
        Ok(tables.assessments.iter().find(|row| row.id == *id).cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &[AssessmentId],
    ) -> Result<Vec<Assessment>, RepositoryError> {
        let wanted = id_set(ids);
        let tables = self.tables()?;
        Ok(tables
            .assessments
            .iter()
            .filter(|row| wanted.contains(&row.id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Assessment>, RepositoryError> {
        let tables = self.tables()?;
        Ok(select_oldest_first(
            &tables.assessments,
            |_| true,
            |row| row.created_at,
        ))
    }

    async fn list_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<Assessment>, RepositoryError> {
        let tables = self.tables()?;
        Ok(select_oldest_first(
            &tables.assessments,
            |row| row.course_id == *course_id,
            |row| row.created_at,
        ))
    }

    async fn list_by_courses(
        &self,
        course_ids: &[CourseId],
    ) -> Result<Vec<Assessment>, RepositoryError> {
        let wanted = id_set(course_ids);
        let tables = self.tables()?;
        Ok(select_oldest_first(
            &tables.assessments,
            |row| wanted.contains(&row.course_id),
            |row| row.created_at,
        ))
    }

    async fn update(
        &self,
        id: &AssessmentId,
        details: &AssessmentDetails,
    ) -> Result<Option<Assessment>, RepositoryError> {
        let mut tables = self.tables()?;
        let Some(assessment) = tables.assessments.iter_mut().find(|row| row.id == *id) else {
            return Ok(None);
        };
        details.title().clone_into(&mut assessment.title);
        assessment.description = details.description().map(str::to_owned);
        details
            .assessment_type()
            .clone_into(&mut assessment.assessment_type);
        assessment.max_score = details.max_score();
        assessment.due_date = details.due_date();
        Ok(Some(assessment.clone()))
    }

    async fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        tables.drop_assessments(&HashSet::from([*id]));
        Ok(())
    }
}

#[async_trait]
impl LearningOutcomeRepository for InMemoryStore {
    async fn insert(&self, outcome: &LearningOutcome) -> Result<LearningOutcome, RepositoryError> {
        let mut tables = self.tables()?;
        tables.outcomes.push(outcome.clone());
        Ok(outcome.clone())
    }

    async fn find_by_ids(
        &self,
        ids: &[LearningOutcomeId],
    ) -> Result<Vec<LearningOutcome>, RepositoryError> {
        let wanted = id_set(ids);
        let tables = self.tables()?;
        Ok(tables
            .outcomes
            .iter()
            .filter(|row| wanted.contains(&row.id))
            .cloned()
            .collect())
    }

    async fn list_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<LearningOutcome>, RepositoryError> {
        let tables = self.tables()?;
        Ok(select_oldest_first(
            &tables.outcomes,
            |row| row.course_id == *course_id,
            |row| row.created_at,
        ))
    }

    async fn update(
        &self,
        id: &LearningOutcomeId,
        details: &OutcomeDetails,
    ) -> Result<Option<LearningOutcome>, RepositoryError> {
        let mut tables = self.tables()?;
        let Some(outcome) = tables.outcomes.iter_mut().find(|row| row.id == *id) else {
            return Ok(None);
        };
        details.title().clone_into(&mut outcome.title);
        outcome.description = details.description().map(str::to_owned);
        Ok(Some(outcome.clone()))
    }

    async fn delete(&self, id: &LearningOutcomeId) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        tables.drop_outcomes(&HashSet::from([*id]));
        Ok(())
    }

    async fn link(&self, links: &[AssessmentOutcome]) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        let taken = |link: &AssessmentOutcome, existing: &[AssessmentOutcome]| {
            existing.iter().any(|row| {
                row.assessment_id == link.assessment_id
                    && row.learning_outcome_id == link.learning_outcome_id
            })
        };
        let mut accepted: Vec<AssessmentOutcome> = Vec::with_capacity(links.len());
        for link in links {
            if taken(link, &tables.links) || taken(link, &accepted) {
                return Err(RepositoryError::duplicate_key("assessment_outcomes_pkey"));
            }
            accepted.push(link.clone());
        }
        tables.links.extend(accepted);
        Ok(())
    }

    async fn links_for_assessment(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Vec<AssessmentOutcome>, RepositoryError> {
        let tables = self.tables()?;
        Ok(tables
            .links
            .iter()
            .filter(|link| link.assessment_id == *assessment_id)
            .cloned()
            .collect())
    }

    async fn links_for_outcomes(
        &self,
        outcome_ids: &[LearningOutcomeId],
    ) -> Result<Vec<AssessmentOutcome>, RepositoryError> {
        let wanted = id_set(outcome_ids);
        let tables = self.tables()?;
        Ok(tables
            .links
            .iter()
            .filter(|link| wanted.contains(&link.learning_outcome_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GradeRepository for InMemoryStore {
    async fn upsert(&self, grade: &Grade) -> Result<Grade, RepositoryError> {
        let mut tables = self.tables()?;
        let known_user = |id: UserId| tables.accounts.iter().any(|row| row.user.id == id);
        let missing_reference = if !known_user(grade.student_id()) {
            Some("student_assessments_student_id_fkey")
        } else if !tables.assessments.iter().any(|row| row.id == grade.assessment_id()) {
            Some("student_assessments_assessment_id_fkey")
        } else if grade.graded_by().is_some_and(|id| !known_user(id)) {
            Some("student_assessments_graded_by_fkey")
        } else {
            None
        };
        if let Some(constraint) = missing_reference {
            return Err(RepositoryError::query(format!(
                "grade violates foreign key constraint {constraint}"
            )));
        }
        let existing = tables.grades.iter_mut().find(|row| {
            row.student_id() == grade.student_id() && row.assessment_id() == grade.assessment_id()
        });
        match existing {
            Some(row) => grade.clone_into(row),
            None => tables.grades.push(grade.clone()),
        }
        Ok(grade.clone())
    }

    async fn list_by_assessments(
        &self,
        assessment_ids: &[AssessmentId],
    ) -> Result<Vec<Grade>, RepositoryError> {
        let wanted = id_set(assessment_ids);
        let tables = self.tables()?;
        Ok(tables
            .grades
            .iter()
            .filter(|grade| wanted.contains(&grade.assessment_id()))
            .cloned()
            .collect())
    }

    async fn list_for_student(
        &self,
        student_id: &UserId,
        assessment_ids: &[AssessmentId],
    ) -> Result<Vec<Grade>, RepositoryError> {
        let wanted = id_set(assessment_ids);
        let tables = self.tables()?;
        Ok(tables
            .grades
            .iter()
            .filter(|grade| {
                grade.student_id() == *student_id && wanted.contains(&grade.assessment_id())
            })
            .cloned()
            .collect())
    }
}
