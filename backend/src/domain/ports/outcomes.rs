//! Driving ports for learning outcomes.

use async_trait::async_trait;

use crate::domain::{CourseId, Error, LearningOutcome, LearningOutcomeId, OutcomeDetails};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutcomeQuery: Send + Sync {
    /// Outcomes of a course, oldest first.
    async fn list_outcomes(&self, course_id: &CourseId) -> Result<Vec<LearningOutcome>, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutcomeCommand: Send + Sync {
    async fn create_outcome(
        &self,
        course_id: &CourseId,
        details: OutcomeDetails,
    ) -> Result<LearningOutcome, Error>;

    async fn update_outcome(
        &self,
        outcome_id: &LearningOutcomeId,
        details: OutcomeDetails,
    ) -> Result<LearningOutcome, Error>;

    async fn delete_outcome(&self, outcome_id: &LearningOutcomeId) -> Result<(), Error>;
}
