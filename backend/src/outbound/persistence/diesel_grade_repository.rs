//! PostgreSQL-backed `GradeRepository`.
//!
//! Re-grading is a single `INSERT ... ON CONFLICT (student_id, assessment_id)
//! DO UPDATE`, so concurrent writers for one pair never leave two rows.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GradeRepository, RepositoryError};
use crate::domain::{AssessmentId, Grade, GradeAnnotations, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{GradeChanges, GradeRow};
use super::pool::DbPool;
use super::schema::student_assessments;

#[derive(Clone)]
pub struct DieselGradeRepository {
    pool: DbPool,
}

impl DieselGradeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// The stored percentage column is ignored; [`Grade::restore`] recomputes it.
fn row_to_grade(row: GradeRow) -> Grade {
    Grade::restore(
        UserId::from_uuid(row.student_id),
        AssessmentId::from_uuid(row.assessment_id),
        row.score,
        row.max_score,
        GradeAnnotations {
            feedback: row.feedback,
            graded_by: row.graded_by.map(UserId::from_uuid),
        },
        row.graded_at,
    )
}

fn grade_to_row(grade: &Grade) -> GradeRow {
    GradeRow {
        student_id: *grade.student_id().as_uuid(),
        assessment_id: *grade.assessment_id().as_uuid(),
        score: grade.score(),
        max_score: grade.max_score(),
        percentage: grade.percentage(),
        feedback: grade.feedback().map(str::to_owned),
        graded_by: grade.graded_by().map(|id| *id.as_uuid()),
        graded_at: grade.graded_at(),
    }
}

fn into_grades(rows: Vec<GradeRow>) -> Vec<Grade> {
    rows.into_iter().map(row_to_grade).collect()
}

#[async_trait]
impl GradeRepository for DieselGradeRepository {
    async fn upsert(&self, grade: &Grade) -> Result<Grade, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = grade_to_row(grade);
        let changes = GradeChanges {
            score: row.score,
            max_score: row.max_score,
            percentage: row.percentage,
            feedback: row.feedback.as_deref(),
            graded_by: row.graded_by,
            graded_at: row.graded_at,
        };
        diesel::insert_into(student_assessments::table)
            .values(&row)
            .on_conflict((
                student_assessments::student_id,
                student_assessments::assessment_id,
            ))
            .do_update()
            .set(&changes)
            .returning(GradeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_grade)
            .map_err(map_diesel_error)
    }

    async fn list_by_assessments(
        &self,
        assessment_ids: &[AssessmentId],
    ) -> Result<Vec<Grade>, RepositoryError> {
        if assessment_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<_> = assessment_ids.iter().map(|id| *id.as_uuid()).collect();
        student_assessments::table
            .filter(student_assessments::assessment_id.eq_any(uuids))
            .select(GradeRow::as_select())
            .load(&mut conn)
            .await
            .map(into_grades)
            .map_err(map_diesel_error)
    }

    async fn list_for_student(
        &self,
        student_id: &UserId,
        assessment_ids: &[AssessmentId],
    ) -> Result<Vec<Grade>, RepositoryError> {
        if assessment_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<_> = assessment_ids.iter().map(|id| *id.as_uuid()).collect();
        student_assessments::table
            .filter(student_assessments::student_id.eq(*student_id.as_uuid()))
            .filter(student_assessments::assessment_id.eq_any(uuids))
            .select(GradeRow::as_select())
            .load(&mut conn)
            .await
            .map(into_grades)
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn stored_percentage_is_recomputed_on_read() {
        let row = GradeRow {
            student_id: Uuid::new_v4(),
            assessment_id: Uuid::new_v4(),
            score: Some(15.0),
            max_score: 20.0,
            percentage: Some(12.0),
            feedback: None,
            graded_by: None,
            graded_at: Utc.timestamp_opt(0, 0).single().expect("epoch"),
        };
        assert_eq!(row_to_grade(row).percentage(), Some(75.0));
    }

    #[rstest]
    fn legacy_rows_without_score_are_incomplete() {
        let row = GradeRow {
            student_id: Uuid::new_v4(),
            assessment_id: Uuid::new_v4(),
            score: None,
            max_score: 20.0,
            percentage: None,
            feedback: Some("absent".to_owned()),
            graded_by: Some(Uuid::new_v4()),
            graded_at: Utc.timestamp_opt(0, 0).single().expect("epoch"),
        };
        let grade = row_to_grade(row);
        assert!(!grade.is_completed());
        assert_eq!(grade.percentage(), None);
        assert_eq!(grade.feedback(), Some("absent"));
    }

    #[rstest]
    fn row_conversion_keeps_annotations() {
        let grader = UserId::random();
        let grade = Grade::restore(
            UserId::random(),
            AssessmentId::random(),
            Some(8.0),
            10.0,
            GradeAnnotations {
                feedback: Some("Tidy".to_owned()),
                graded_by: Some(grader),
            },
            Utc.timestamp_opt(0, 0).single().expect("epoch"),
        );
        let row = grade_to_row(&grade);
        assert_eq!(row.percentage, Some(80.0));
        assert_eq!(row.graded_by, Some(*grader.as_uuid()));
        assert_eq!(row_to_grade(row), grade);
    }
}
