//! Ports for courses and enrollments.

use async_trait::async_trait;

use crate::domain::{Course, CourseDetails, CourseId, Enrollment, UserId};

use super::RepositoryError;

/// Port for course persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a course. Duplicate codes fail with
    /// [`RepositoryError::DuplicateKey`].
    async fn insert(&self, course: &Course) -> Result<Course, RepositoryError>;

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError>;

    /// Batched lookup; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Course>, RepositoryError>;

    async fn list_by_teacher(&self, teacher_id: &UserId) -> Result<Vec<Course>, RepositoryError>;

    /// Overwrite the editable fields. Returns `None` when the course is absent.
    async fn update(
        &self,
        id: &CourseId,
        details: &CourseDetails,
    ) -> Result<Option<Course>, RepositoryError>;

    async fn delete(&self, id: &CourseId) -> Result<(), RepositoryError>;
}

/// Port for enrollment persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Insert an enrollment. A second enrollment for the same pair fails with
    /// [`RepositoryError::DuplicateKey`].
    async fn insert(&self, enrollment: &Enrollment) -> Result<Enrollment, RepositoryError>;

    async fn delete(&self, student_id: &UserId, course_id: &CourseId)
    -> Result<(), RepositoryError>;

    async fn find(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, RepositoryError>;

    /// Enrollments of one course, oldest first.
    async fn list_by_course(&self, course_id: &CourseId)
    -> Result<Vec<Enrollment>, RepositoryError>;

    /// Enrollments across several courses, oldest first.
    async fn list_by_courses(
        &self,
        course_ids: &[CourseId],
    ) -> Result<Vec<Enrollment>, RepositoryError>;

    /// Enrollments of one student, oldest first.
    async fn list_by_student(&self, student_id: &UserId)
    -> Result<Vec<Enrollment>, RepositoryError>;
}
