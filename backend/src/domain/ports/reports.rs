//! Driving port for the reporting endpoints.

use async_trait::async_trait;

use crate::domain::reporting::{CourseProgress, CourseReport, StudentReport};
use crate::domain::{CourseId, Error, UserId};

/// Read-only reports assembled by the aggregation engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportQuery: Send + Sync {
    async fn course_report(&self, course_id: &CourseId) -> Result<CourseReport, Error>;

    async fn student_report(&self, student_id: &UserId) -> Result<StudentReport, Error>;

    /// `not_found` when the student is not enrolled in the course.
    async fn student_course_progress(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<CourseProgress, Error>;
}
