//! Port for assessment persistence.

use async_trait::async_trait;

use crate::domain::{Assessment, AssessmentDetails, AssessmentId, CourseId};

use super::RepositoryError;

/// Port for assessment persistence.
///
/// List operations return rows oldest first (creation time ascending).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    async fn insert(&self, assessment: &Assessment) -> Result<Assessment, RepositoryError>;

    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError>;

    /// Batched lookup; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[AssessmentId])
    -> Result<Vec<Assessment>, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Assessment>, RepositoryError>;

    async fn list_by_course(&self, course_id: &CourseId)
    -> Result<Vec<Assessment>, RepositoryError>;

    async fn list_by_courses(
        &self,
        course_ids: &[CourseId],
    ) -> Result<Vec<Assessment>, RepositoryError>;

    /// Overwrite the editable fields. Returns `None` when the assessment is
    /// absent. Existing grades keep their max-score snapshot.
    async fn update(
        &self,
        id: &AssessmentId,
        details: &AssessmentDetails,
    ) -> Result<Option<Assessment>, RepositoryError>;

    async fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError>;
}
