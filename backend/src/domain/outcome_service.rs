//! Learning outcome service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    CourseRepository, LearningOutcomeRepository, OutcomeCommand, OutcomeQuery,
};
use crate::domain::service_support::map_store_error;
use crate::domain::{CourseId, Error, LearningOutcome, LearningOutcomeId, OutcomeDetails};

/// Learning outcome service implementing [`OutcomeQuery`] and
/// [`OutcomeCommand`].
#[derive(Clone)]
pub struct OutcomeService<O, C> {
    outcomes: Arc<O>,
    courses: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<O, C> OutcomeService<O, C> {
    pub fn new(outcomes: Arc<O>, courses: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            outcomes,
            courses,
            clock,
        }
    }
}

#[async_trait]
impl<O, C> OutcomeQuery for OutcomeService<O, C>
where
    O: LearningOutcomeRepository,
    C: CourseRepository,
{
    async fn list_outcomes(&self, course_id: &CourseId) -> Result<Vec<LearningOutcome>, Error> {
        let mut outcomes = self
            .outcomes
            .list_by_course(course_id)
            .await
            .map_err(map_store_error)?;
        outcomes.sort_by_key(|outcome| outcome.created_at);
        Ok(outcomes)
    }
}

#[async_trait]
impl<O, C> OutcomeCommand for OutcomeService<O, C>
where
    O: LearningOutcomeRepository,
    C: CourseRepository,
{
    async fn create_outcome(
        &self,
        course_id: &CourseId,
        details: OutcomeDetails,
    ) -> Result<LearningOutcome, Error> {
        self.courses
            .find_by_id(course_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("Course not found"))?;

        let outcome = LearningOutcome {
            id: LearningOutcomeId::random(),
            course_id: *course_id,
            title: details.title().to_owned(),
            description: details.description().map(str::to_owned),
            created_at: self.clock.utc(),
        };
        self.outcomes.insert(&outcome).await.map_err(map_store_error)
    }

    async fn update_outcome(
        &self,
        outcome_id: &LearningOutcomeId,
        details: OutcomeDetails,
    ) -> Result<LearningOutcome, Error> {
        self.outcomes
            .update(outcome_id, &details)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("Learning outcome not found"))
    }

    async fn delete_outcome(&self, outcome_id: &LearningOutcomeId) -> Result<(), Error> {
        self.outcomes.delete(outcome_id).await.map_err(map_store_error)
    }
}
