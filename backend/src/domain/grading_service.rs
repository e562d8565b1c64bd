//! Grade recording and per-assessment rosters.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::try_join;
use mockable::Clock;
use tracing::info;

use crate::domain::course::non_blank;
use crate::domain::ports::{
    AssessmentRepository, EnrollmentRepository, GradeRepository, GradeSubmission, GradebookQuery,
    GradingCommand, UserRepository,
};
use crate::domain::reporting::{RosterEntry, build_grade_roster, distinct_ids};
use crate::domain::service_support::map_store_error;
use crate::domain::{
    Assessment, AssessmentId, Error, Grade, GradeAnnotations, PersonName, RecordedGrade,
};

/// Grading service implementing [`GradingCommand`] and [`GradebookQuery`].
#[derive(Clone)]
pub struct GradingService<A, E, U, G> {
    assessments: Arc<A>,
    enrollments: Arc<E>,
    users: Arc<U>,
    grades: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<A, E, U, G> GradingService<A, E, U, G> {
    pub fn new(
        assessments: Arc<A>,
        enrollments: Arc<E>,
        users: Arc<U>,
        grades: Arc<G>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            assessments,
            enrollments,
            users,
            grades,
            clock,
        }
    }
}

impl<A, E, U, G> GradingService<A, E, U, G>
where
    A: AssessmentRepository,
{
    async fn assessment(&self, assessment_id: &AssessmentId) -> Result<Assessment, Error> {
        self.assessments
            .find_by_id(assessment_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("Assessment not found"))
    }
}

#[async_trait]
impl<A, E, U, G> GradingCommand for GradingService<A, E, U, G>
where
    A: AssessmentRepository,
    E: EnrollmentRepository,
    U: UserRepository,
    G: GradeRepository,
{
    async fn record_grade(&self, submission: GradeSubmission) -> Result<RecordedGrade, Error> {
        let GradeSubmission {
            student_id,
            assessment_id,
            score,
            feedback,
            graded_by,
        } = submission;
        let assessment = self.assessment(&assessment_id).await?;

        let grade = Grade::record(
            student_id,
            assessment.id,
            score,
            assessment.max_score,
            GradeAnnotations {
                feedback: non_blank(feedback.as_deref()),
                graded_by,
            },
            self.clock.utc(),
        );
        let grade = self.grades.upsert(&grade).await.map_err(map_store_error)?;
        info!(%student_id, %assessment_id, "grade recorded");

        let student = self
            .users
            .find_by_id(&student_id)
            .await
            .map_err(map_store_error)?;
        Ok(RecordedGrade {
            grade,
            student: student.as_ref().map(PersonName::from),
        })
    }
}

#[async_trait]
impl<A, E, U, G> GradebookQuery for GradingService<A, E, U, G>
where
    A: AssessmentRepository,
    E: EnrollmentRepository,
    U: UserRepository,
    G: GradeRepository,
{
    async fn grade_roster(&self, assessment_id: &AssessmentId) -> Result<Vec<RosterEntry>, Error> {
        let assessment = self.assessment(assessment_id).await?;
        let assessment_ids = [assessment.id];
        let (enrollments, grades) = try_join!(
            self.enrollments.list_by_course(&assessment.course_id),
            self.grades.list_by_assessments(&assessment_ids),
        )
        .map_err(map_store_error)?;

        let student_ids = distinct_ids(enrollments.iter().map(|row| row.student_id));
        let students = if student_ids.is_empty() {
            Vec::new()
        } else {
            self.users
                .find_by_ids(&student_ids)
                .await
                .map_err(map_store_error)?
        };

        Ok(build_grade_roster(
            &assessment,
            &enrollments,
            students,
            &grades,
        ))
    }
}

#[cfg(test)]
#[path = "grading_service_tests.rs"]
mod tests;
