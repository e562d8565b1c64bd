//! PostgreSQL-backed `CourseRepository` and `EnrollmentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CourseRepository, EnrollmentRepository, RepositoryError};
use crate::domain::{Course, CourseDetails, CourseId, Enrollment, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CourseChanges, CourseRow, EnrollmentRow, NewCourseRow};
use super::pool::DbPool;
use super::schema::{course_enrollments, courses};

#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_course(row: CourseRow) -> Course {
    Course {
        id: CourseId::from_uuid(row.id),
        name: row.name,
        code: row.code,
        description: row.description,
        teacher_id: UserId::from_uuid(row.teacher_id),
        created_at: row.created_at,
    }
}

fn course_uuids(ids: &[CourseId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, course: &Course) -> Result<Course, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCourseRow {
            id: *course.id.as_uuid(),
            name: &course.name,
            code: &course.code,
            description: course.description.as_deref(),
            teacher_id: *course.teacher_id.as_uuid(),
            created_at: course.created_at,
        };
        diesel::insert_into(courses::table)
            .values(&row)
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_course)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        courses::table
            .find(*id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_course))
            .map_err(map_diesel_error)
    }

    async fn find_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseRow> = courses::table
            .filter(courses::id.eq_any(course_uuids(ids)))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_course).collect())
    }

    async fn list_all(&self) -> Result<Vec<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseRow> = courses::table
            .order(courses::created_at.asc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_course).collect())
    }

    async fn list_by_teacher(&self, teacher_id: &UserId) -> Result<Vec<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseRow> = courses::table
            .filter(courses::teacher_id.eq(*teacher_id.as_uuid()))
            .order(courses::created_at.asc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_course).collect())
    }

    async fn update(
        &self,
        id: &CourseId,
        details: &CourseDetails,
    ) -> Result<Option<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = CourseChanges {
            name: details.name(),
            code: details.code(),
            description: details.description(),
        };
        diesel::update(courses::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_course))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &CourseId) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(courses::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_enrollment(row: EnrollmentRow) -> Enrollment {
    Enrollment {
        student_id: UserId::from_uuid(row.student_id),
        course_id: CourseId::from_uuid(row.course_id),
        enrolled_at: row.enrolled_at,
    }
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn insert(&self, enrollment: &Enrollment) -> Result<Enrollment, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = EnrollmentRow {
            student_id: *enrollment.student_id.as_uuid(),
            course_id: *enrollment.course_id.as_uuid(),
            enrolled_at: enrollment.enrolled_at,
        };
        diesel::insert_into(course_enrollments::table)
            .values(&row)
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_enrollment)
            .map_err(map_diesel_error)
    }

    async fn delete(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let key = (*student_id.as_uuid(), *course_id.as_uuid());
        diesel::delete(course_enrollments::table.find(key))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        course_enrollments::table
            .find((*student_id.as_uuid(), *course_id.as_uuid()))
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_enrollment))
            .map_err(map_diesel_error)
    }

    async fn list_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<Enrollment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EnrollmentRow> = course_enrollments::table
            .filter(course_enrollments::course_id.eq(*course_id.as_uuid()))
            .order(course_enrollments::enrolled_at.asc())
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_enrollment).collect())
    }

    async fn list_by_courses(
        &self,
        course_ids: &[CourseId],
    ) -> Result<Vec<Enrollment>, RepositoryError> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EnrollmentRow> = course_enrollments::table
            .filter(course_enrollments::course_id.eq_any(course_uuids(course_ids)))
            .order(course_enrollments::enrolled_at.asc())
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_enrollment).collect())
    }

    async fn list_by_student(
        &self,
        student_id: &UserId,
    ) -> Result<Vec<Enrollment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EnrollmentRow> = course_enrollments::table
            .filter(course_enrollments::student_id.eq(*student_id.as_uuid()))
            .order(course_enrollments::enrolled_at.asc())
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_enrollment).collect())
    }
}
