//! Report assembly over the repository ports.
//!
//! Each report is fetched in at most three round trips: independent lookups
//! run concurrently and everything else is handed to
//! [`crate::domain::reporting`].

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::try_join;

use crate::domain::ports::{
    AssessmentRepository, CourseRepository, EnrollmentRepository, GradeRepository,
    LearningOutcomeRepository, ReportQuery, UserRepository,
};
use crate::domain::reporting::{
    CourseProgress, CourseReport, StudentReport, assemble_course_progress, assemble_course_report,
    assemble_student_report, distinct_ids,
};
use crate::domain::service_support::map_store_error;
use crate::domain::student_service::find_student;
use crate::domain::{
    AssessmentId, Course, CourseId, Error, LearningOutcomeId, User, UserId,
};

/// Report service implementing [`ReportQuery`].
#[derive(Clone)]
pub struct ReportService<U, C, E, A, O, G> {
    users: Arc<U>,
    courses: Arc<C>,
    enrollments: Arc<E>,
    assessments: Arc<A>,
    outcomes: Arc<O>,
    grades: Arc<G>,
}

impl<U, C, E, A, O, G> ReportService<U, C, E, A, O, G> {
    pub fn new(
        users: Arc<U>,
        courses: Arc<C>,
        enrollments: Arc<E>,
        assessments: Arc<A>,
        outcomes: Arc<O>,
        grades: Arc<G>,
    ) -> Self {
        Self {
            users,
            courses,
            enrollments,
            assessments,
            outcomes,
            grades,
        }
    }
}

impl<U, C, E, A, O, G> ReportService<U, C, E, A, O, G>
where
    U: UserRepository,
    C: CourseRepository,
{
    async fn course(&self, course_id: &CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(course_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("Course not found"))
    }

    async fn accounts(&self, ids: &[UserId]) -> Result<Vec<User>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.users.find_by_ids(ids).await.map_err(map_store_error)
    }
}

#[async_trait]
impl<U, C, E, A, O, G> ReportQuery for ReportService<U, C, E, A, O, G>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
    A: AssessmentRepository,
    O: LearningOutcomeRepository,
    G: GradeRepository,
{
    async fn course_report(&self, course_id: &CourseId) -> Result<CourseReport, Error> {
        let course = self.course(course_id).await?;
        let (enrollments, assessments) = try_join!(
            self.enrollments.list_by_course(course_id),
            self.assessments.list_by_course(course_id),
        )
        .map_err(map_store_error)?;

        let student_ids: Vec<UserId> = distinct_ids(enrollments.iter().map(|row| row.student_id));
        let assessment_ids: Vec<AssessmentId> = assessments.iter().map(|row| row.id).collect();
        let (students, grades) = try_join!(self.accounts(&student_ids), async {
            self.grades
                .list_by_assessments(&assessment_ids)
                .await
                .map_err(map_store_error)
        })?;

        Ok(assemble_course_report(
            course,
            assessments,
            &enrollments,
            students,
            &grades,
        ))
    }

    async fn student_report(&self, student_id: &UserId) -> Result<StudentReport, Error> {
        let student = find_student(self.users.as_ref(), student_id).await?;
        let enrollments = self
            .enrollments
            .list_by_student(student_id)
            .await
            .map_err(map_store_error)?;
        let course_ids: Vec<CourseId> = distinct_ids(enrollments.iter().map(|row| row.course_id));

        let (courses, assessments) = if course_ids.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            try_join!(
                self.courses.find_by_ids(&course_ids),
                self.assessments.list_by_courses(&course_ids),
            )
            .map_err(map_store_error)?
        };
        let assessment_ids: Vec<AssessmentId> = assessments.iter().map(|row| row.id).collect();
        let grades = self
            .grades
            .list_for_student(student_id, &assessment_ids)
            .await
            .map_err(map_store_error)?;

        Ok(assemble_student_report(
            student,
            &enrollments,
            courses,
            assessments,
            &grades,
        ))
    }

    async fn student_course_progress(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<CourseProgress, Error> {
        self.enrollments
            .find(student_id, course_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("Student not enrolled in this course"))?;
        let course = self.course(course_id).await?;
        let (assessments, outcomes) = try_join!(
            self.assessments.list_by_course(course_id),
            self.outcomes.list_by_course(course_id),
        )
        .map_err(map_store_error)?;

        let assessment_ids: Vec<AssessmentId> = assessments.iter().map(|row| row.id).collect();
        let outcome_ids: Vec<LearningOutcomeId> = outcomes.iter().map(|row| row.id).collect();
        let (grades, links) = try_join!(
            self.grades.list_for_student(student_id, &assessment_ids),
            self.outcomes.links_for_outcomes(&outcome_ids),
        )
        .map_err(map_store_error)?;

        Ok(assemble_course_progress(
            course,
            assessments,
            outcomes,
            &links,
            &grades,
        ))
    }
}

#[cfg(test)]
#[path = "report_service_tests.rs"]
mod tests;
