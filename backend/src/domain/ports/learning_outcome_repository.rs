//! Port for learning outcomes and their assessment links.

use async_trait::async_trait;

use crate::domain::{
    AssessmentId, AssessmentOutcome, CourseId, LearningOutcome, LearningOutcomeId, OutcomeDetails,
};

use super::RepositoryError;

/// Port for learning outcome persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LearningOutcomeRepository: Send + Sync {
    async fn insert(&self, outcome: &LearningOutcome) -> Result<LearningOutcome, RepositoryError>;

    /// Batched lookup; unknown ids are skipped.
    async fn find_by_ids(
        &self,
        ids: &[LearningOutcomeId],
    ) -> Result<Vec<LearningOutcome>, RepositoryError>;

    /// Outcomes of a course, oldest first.
    async fn list_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<LearningOutcome>, RepositoryError>;

    async fn update(
        &self,
        id: &LearningOutcomeId,
        details: &OutcomeDetails,
    ) -> Result<Option<LearningOutcome>, RepositoryError>;

    async fn delete(&self, id: &LearningOutcomeId) -> Result<(), RepositoryError>;

    /// Insert assessment/outcome links.
    async fn link(&self, links: &[AssessmentOutcome]) -> Result<(), RepositoryError>;

    async fn links_for_assessment(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Vec<AssessmentOutcome>, RepositoryError>;

    async fn links_for_outcomes(
        &self,
        outcome_ids: &[LearningOutcomeId],
    ) -> Result<Vec<AssessmentOutcome>, RepositoryError>;
}
