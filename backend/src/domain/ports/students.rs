//! Driving port for student listings and overviews.

use async_trait::async_trait;

use crate::domain::{Error, StudentOverview, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentQuery: Send + Sync {
    /// Every student, ordered by last then first name.
    async fn list_students(&self) -> Result<Vec<User>, Error>;

    /// Courses, merged assessments and statistics for one student.
    /// `not_found` when the id does not belong to a student.
    async fn student_overview(&self, student_id: &UserId) -> Result<StudentOverview, Error>;
}
