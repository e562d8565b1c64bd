//! PostgreSQL-backed `AssessmentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AssessmentRepository, RepositoryError};
use crate::domain::{Assessment, AssessmentDetails, AssessmentId, CourseId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AssessmentChanges, AssessmentRow, NewAssessmentRow};
use super::pool::DbPool;
use super::schema::assessments;

#[derive(Clone)]
pub struct DieselAssessmentRepository {
    pool: DbPool,
}

impl DieselAssessmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_assessment(row: AssessmentRow) -> Assessment {
    Assessment {
        id: AssessmentId::from_uuid(row.id),
        course_id: CourseId::from_uuid(row.course_id),
        title: row.title,
        description: row.description,
        assessment_type: row.assessment_type,
        max_score: row.max_score,
        due_date: row.due_date,
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
    }
}

fn into_assessments(rows: Vec<AssessmentRow>) -> Vec<Assessment> {
    rows.into_iter().map(row_to_assessment).collect()
}

#[async_trait]
impl AssessmentRepository for DieselAssessmentRepository {
    async fn insert(&self, assessment: &Assessment) -> Result<Assessment, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAssessmentRow {
            id: *assessment.id.as_uuid(),
            course_id: *assessment.course_id.as_uuid(),
            title: &assessment.title,
            description: assessment.description.as_deref(),
            assessment_type: &assessment.assessment_type,
            max_score: assessment.max_score,
            due_date: assessment.due_date,
            created_by: *assessment.created_by.as_uuid(),
            created_at: assessment.created_at,
        };
        diesel::insert_into(assessments::table)
            .values(&row)
            .returning(AssessmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_assessment)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        assessments::table
            .find(*id.as_uuid())
            .select(AssessmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_assessment))
            .map_err(map_diesel_error)
    }

    async fn find_by_ids(
        &self,
        ids: &[AssessmentId],
    ) -> Result<Vec<Assessment>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<_> = ids.iter().map(|id| *id.as_uuid()).collect();
        assessments::table
            .filter(assessments::id.eq_any(uuids))
            .select(AssessmentRow::as_select())
            .load(&mut conn)
            .await
            .map(into_assessments)
            .map_err(map_diesel_error)
    }

    async fn list_all(&self) -> Result<Vec<Assessment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        assessments::table
            .order(assessments::created_at.asc())
            .select(AssessmentRow::as_select())
            .load(&mut conn)
            .await
            .map(into_assessments)
            .map_err(map_diesel_error)
    }

    async fn list_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<Assessment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        assessments::table
            .filter(assessments::course_id.eq(*course_id.as_uuid()))
            .order(assessments::created_at.asc())
            .select(AssessmentRow::as_select())
            .load(&mut conn)
            .await
            .map(into_assessments)
            .map_err(map_diesel_error)
    }

    async fn list_by_courses(
        &self,
        course_ids: &[CourseId],
    ) -> Result<Vec<Assessment>, RepositoryError> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<_> = course_ids.iter().map(|id| *id.as_uuid()).collect();
        assessments::table
            .filter(assessments::course_id.eq_any(uuids))
            .order(assessments::created_at.asc())
            .select(AssessmentRow::as_select())
            .load(&mut conn)
            .await
            .map(into_assessments)
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: &AssessmentId,
        details: &AssessmentDetails,
    ) -> Result<Option<Assessment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = AssessmentChanges {
            title: details.title(),
            description: details.description(),
            assessment_type: details.assessment_type(),
            max_score: details.max_score(),
            due_date: details.due_date(),
        };
        diesel::update(assessments::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(AssessmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_assessment))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(assessments::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
