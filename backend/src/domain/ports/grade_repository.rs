//! Port for grade persistence.

use async_trait::async_trait;

use crate::domain::{AssessmentId, Grade, UserId};

use super::RepositoryError;

/// Port for grade persistence.
///
/// Grades are keyed by `(student_id, assessment_id)`; the store holds at most
/// one per pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GradeRepository: Send + Sync {
    /// Insert or overwrite the grade for its `(student, assessment)` pair in
    /// one atomic operation. Last write wins.
    async fn upsert(&self, grade: &Grade) -> Result<Grade, RepositoryError>;

    /// Grades for any of `assessment_ids`, all students.
    async fn list_by_assessments(
        &self,
        assessment_ids: &[AssessmentId],
    ) -> Result<Vec<Grade>, RepositoryError>;

    /// One student's grades for any of `assessment_ids`.
    async fn list_for_student(
        &self,
        student_id: &UserId,
        assessment_ids: &[AssessmentId],
    ) -> Result<Vec<Grade>, RepositoryError>;
}
