//! Course catalogue and enrollment services.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::try_join;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CourseCommand, CourseFilter, CourseQuery, CourseRepository, EnrollmentRepository,
    LearningOutcomeRepository, NewCourse, UserRepository,
};
use crate::domain::service_support::{
    map_repository_error, map_store_error, newest_first, users_by_id,
};
use crate::domain::{
    Course, CourseDetail, CourseDetails, CourseId, CourseSummary, CourseWithTeacher,
    EnrolledStudent, Enrollment, Error, PersonName, UserId,
};

const COURSE_CODE_TAKEN: &str = "Course code already exists";
const ALREADY_ENROLLED: &str = "Student already enrolled";

fn course_not_found() -> Error {
    Error::not_found("Course not found")
}

/// Course service implementing [`CourseQuery`] and [`CourseCommand`].
#[derive(Clone)]
pub struct CourseService<C, E, U, O> {
    courses: Arc<C>,
    enrollments: Arc<E>,
    users: Arc<U>,
    outcomes: Arc<O>,
    clock: Arc<dyn Clock>,
}

impl<C, E, U, O> CourseService<C, E, U, O> {
    pub fn new(
        courses: Arc<C>,
        enrollments: Arc<E>,
        users: Arc<U>,
        outcomes: Arc<O>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            courses,
            enrollments,
            users,
            outcomes,
            clock,
        }
    }
}

impl<C, E, U, O> CourseService<C, E, U, O>
where
    C: CourseRepository,
    E: EnrollmentRepository,
    U: UserRepository,
    O: LearningOutcomeRepository,
{
    async fn filtered_courses(&self, filter: CourseFilter) -> Result<Vec<Course>, Error> {
        match filter {
            CourseFilter::All => self.courses.list_all().await.map_err(map_store_error),
            CourseFilter::Teacher(teacher_id) => self
                .courses
                .list_by_teacher(&teacher_id)
                .await
                .map_err(map_store_error),
            CourseFilter::Student(student_id) => {
                let enrollments = self
                    .enrollments
                    .list_by_student(&student_id)
                    .await
                    .map_err(map_store_error)?;
                if enrollments.is_empty() {
                    return Ok(Vec::new());
                }
                let ids: Vec<CourseId> = enrollments.iter().map(|row| row.course_id).collect();
                self.courses.find_by_ids(&ids).await.map_err(map_store_error)
            }
        }
    }

    async fn enrollment_counts(&self, ids: &[CourseId]) -> Result<HashMap<CourseId, usize>, Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = self
            .enrollments
            .list_by_courses(ids)
            .await
            .map_err(map_store_error)?;
        let mut counts = HashMap::new();
        for row in rows {
            *counts.entry(row.course_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn teacher_name(&self, teacher_id: &UserId) -> Result<Option<PersonName>, Error> {
        let teacher = self
            .users
            .find_by_id(teacher_id)
            .await
            .map_err(map_store_error)?;
        Ok(teacher.as_ref().map(PersonName::from))
    }

    async fn with_teacher(&self, course: Course) -> Result<CourseWithTeacher, Error> {
        let teacher = self.teacher_name(&course.teacher_id).await?;
        Ok(CourseWithTeacher { course, teacher })
    }
}

#[async_trait]
impl<C, E, U, O> CourseQuery for CourseService<C, E, U, O>
where
    C: CourseRepository,
    E: EnrollmentRepository,
    U: UserRepository,
    O: LearningOutcomeRepository,
{
    async fn list_courses(&self, filter: CourseFilter) -> Result<Vec<CourseSummary>, Error> {
        let mut courses = self.filtered_courses(filter).await?;
        newest_first(&mut courses, |course| course.created_at);

        let ids: Vec<CourseId> = courses.iter().map(|course| course.id).collect();
        let (teachers, counts) = try_join!(
            users_by_id(
                self.users.as_ref(),
                courses.iter().map(|course| course.teacher_id)
            ),
            self.enrollment_counts(&ids),
        )?;

        Ok(courses
            .into_iter()
            .map(|course| CourseSummary {
                teacher: teachers.get(&course.teacher_id).map(PersonName::from),
                enrolled_students: counts.get(&course.id).copied().unwrap_or(0),
                course,
            })
            .collect())
    }

    async fn course_detail(&self, course_id: &CourseId) -> Result<CourseDetail, Error> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(course_not_found)?;

        let (teacher, enrollments, mut learning_outcomes) = try_join!(
            self.teacher_name(&course.teacher_id),
            async {
                self.enrollments
                    .list_by_course(course_id)
                    .await
                    .map_err(map_store_error)
            },
            async {
                self.outcomes
                    .list_by_course(course_id)
                    .await
                    .map_err(map_store_error)
            },
        )?;
        learning_outcomes.sort_by_key(|outcome| outcome.created_at);

        let mut accounts = users_by_id(
            self.users.as_ref(),
            enrollments.iter().map(|row| row.student_id),
        )
        .await?;
        let students = enrollments
            .iter()
            .filter_map(|row| {
                accounts.remove(&row.student_id).map(|student| EnrolledStudent {
                    student,
                    enrolled_at: row.enrolled_at,
                })
            })
            .collect();

        Ok(CourseDetail {
            course,
            teacher,
            students,
            learning_outcomes,
        })
    }
}

#[async_trait]
impl<C, E, U, O> CourseCommand for CourseService<C, E, U, O>
where
    C: CourseRepository,
    E: EnrollmentRepository,
    U: UserRepository,
    O: LearningOutcomeRepository,
{
    async fn create_course(&self, request: NewCourse) -> Result<CourseWithTeacher, Error> {
        let NewCourse {
            details,
            teacher_id,
        } = request;
        let course = Course {
            id: CourseId::random(),
            name: details.name().to_owned(),
            code: details.code().to_owned(),
            description: details.description().map(str::to_owned),
            teacher_id,
            created_at: self.clock.utc(),
        };
        let course = self
            .courses
            .insert(&course)
            .await
            .map_err(map_repository_error(COURSE_CODE_TAKEN))?;
        info!(course_id = %course.id, code = %course.code, "course created");
        self.with_teacher(course).await
    }

    async fn update_course(
        &self,
        course_id: &CourseId,
        details: CourseDetails,
    ) -> Result<CourseWithTeacher, Error> {
        let course = self
            .courses
            .update(course_id, &details)
            .await
            .map_err(map_repository_error(COURSE_CODE_TAKEN))?
            .ok_or_else(course_not_found)?;
        self.with_teacher(course).await
    }

    async fn delete_course(&self, course_id: &CourseId) -> Result<(), Error> {
        self.courses.delete(course_id).await.map_err(map_store_error)
    }

    async fn enroll(&self, course_id: &CourseId, student_id: &UserId) -> Result<Enrollment, Error> {
        let (course, student) = try_join!(
            self.courses.find_by_id(course_id),
            self.users.find_by_id(student_id),
        )
        .map_err(map_store_error)?;
        if course.is_none() {
            return Err(course_not_found());
        }
        if !student.is_some_and(|user| user.is_student()) {
            return Err(Error::not_found("Student not found"));
        }

        let enrollment = Enrollment {
            student_id: *student_id,
            course_id: *course_id,
            enrolled_at: self.clock.utc(),
        };
        let enrollment = self
            .enrollments
            .insert(&enrollment)
            .await
            .map_err(map_repository_error(ALREADY_ENROLLED))?;
        info!(%course_id, %student_id, "student enrolled");
        Ok(enrollment)
    }

    async fn unenroll(&self, course_id: &CourseId, student_id: &UserId) -> Result<(), Error> {
        self.enrollments
            .delete(student_id, course_id)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
