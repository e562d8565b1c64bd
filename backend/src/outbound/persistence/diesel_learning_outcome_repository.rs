//! PostgreSQL-backed `LearningOutcomeRepository`, including the weighted
//! assessment links.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LearningOutcomeRepository, RepositoryError};
use crate::domain::{
    AssessmentId, AssessmentOutcome, CourseId, LearningOutcome, LearningOutcomeId, OutcomeDetails,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    AssessmentOutcomeRow, LearningOutcomeChanges, LearningOutcomeRow, NewLearningOutcomeRow,
};
use super::pool::DbPool;
use super::schema::{assessment_outcomes, learning_outcomes};

#[derive(Clone)]
pub struct DieselLearningOutcomeRepository {
    pool: DbPool,
}

impl DieselLearningOutcomeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_outcome(row: LearningOutcomeRow) -> LearningOutcome {
    LearningOutcome {
        id: LearningOutcomeId::from_uuid(row.id),
        course_id: CourseId::from_uuid(row.course_id),
        title: row.title,
        description: row.description,
        created_at: row.created_at,
    }
}

fn row_to_link(row: AssessmentOutcomeRow) -> AssessmentOutcome {
    AssessmentOutcome {
        assessment_id: AssessmentId::from_uuid(row.assessment_id),
        learning_outcome_id: LearningOutcomeId::from_uuid(row.learning_outcome_id),
        weight: row.weight,
    }
}

#[async_trait]
impl LearningOutcomeRepository for DieselLearningOutcomeRepository {
    async fn insert(&self, outcome: &LearningOutcome) -> Result<LearningOutcome, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewLearningOutcomeRow {
            id: *outcome.id.as_uuid(),
            course_id: *outcome.course_id.as_uuid(),
            title: &outcome.title,
            description: outcome.description.as_deref(),
            created_at: outcome.created_at,
        };
        diesel::insert_into(learning_outcomes::table)
            .values(&row)
            .returning(LearningOutcomeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_outcome)
            .map_err(map_diesel_error)
    }

    async fn find_by_ids(
        &self,
        ids: &[LearningOutcomeId],
    ) -> Result<Vec<LearningOutcome>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<_> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<LearningOutcomeRow> = learning_outcomes::table
            .filter(learning_outcomes::id.eq_any(uuids))
            .select(LearningOutcomeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_outcome).collect())
    }

    async fn list_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<LearningOutcome>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<LearningOutcomeRow> = learning_outcomes::table
            .filter(learning_outcomes::course_id.eq(*course_id.as_uuid()))
            .order(learning_outcomes::created_at.asc())
            .select(LearningOutcomeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_outcome).collect())
    }

    async fn update(
        &self,
        id: &LearningOutcomeId,
        details: &OutcomeDetails,
    ) -> Result<Option<LearningOutcome>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = LearningOutcomeChanges {
            title: details.title(),
            description: details.description(),
        };
        diesel::update(learning_outcomes::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(LearningOutcomeRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_outcome))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &LearningOutcomeId) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(learning_outcomes::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    /// One multi-row insert; a duplicate pair rejects the whole batch.
    async fn link(&self, links: &[AssessmentOutcome]) -> Result<(), RepositoryError> {
        if links.is_empty() {
            return Ok(());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AssessmentOutcomeRow> = links
            .iter()
            .map(|link| AssessmentOutcomeRow {
                assessment_id: *link.assessment_id.as_uuid(),
                learning_outcome_id: *link.learning_outcome_id.as_uuid(),
                weight: link.weight,
            })
            .collect();
        diesel::insert_into(assessment_outcomes::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn links_for_assessment(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Vec<AssessmentOutcome>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AssessmentOutcomeRow> = assessment_outcomes::table
            .filter(assessment_outcomes::assessment_id.eq(*assessment_id.as_uuid()))
            .select(AssessmentOutcomeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_link).collect())
    }

    async fn links_for_outcomes(
        &self,
        outcome_ids: &[LearningOutcomeId],
    ) -> Result<Vec<AssessmentOutcome>, RepositoryError> {
        if outcome_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<_> = outcome_ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<AssessmentOutcomeRow> = assessment_outcomes::table
            .filter(assessment_outcomes::learning_outcome_id.eq_any(uuids))
            .select(AssessmentOutcomeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_link).collect())
    }
}
