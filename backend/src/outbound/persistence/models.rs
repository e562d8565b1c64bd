//! Internal Diesel row structs. Never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    assessment_outcomes, assessments, course_enrollments, courses, learning_outcomes,
    student_assessments, users,
};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Public account columns, without the digest.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Account columns including the password digest, for login.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    #[diesel(embed)]
    pub user: UserRow,
    pub password_digest: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_digest: &'a str,
    pub role: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Courses and enrollments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub teacher_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub code: &'a str,
    pub description: Option<&'a str>,
    pub teacher_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Editable course columns. `None` clears the description.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseChanges<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = course_enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Assessments and learning outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assessments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssessmentRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub assessment_type: String,
    pub max_score: f64,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assessments)]
pub(crate) struct NewAssessmentRow<'a> {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub assessment_type: &'a str,
    pub max_score: f64,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = assessments)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AssessmentChanges<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub assessment_type: &'a str,
    pub max_score: f64,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = learning_outcomes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LearningOutcomeRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = learning_outcomes)]
pub(crate) struct NewLearningOutcomeRow<'a> {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = learning_outcomes)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct LearningOutcomeChanges<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = assessment_outcomes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssessmentOutcomeRow {
    pub assessment_id: Uuid,
    pub learning_outcome_id: Uuid,
    pub weight: f64,
}

// ---------------------------------------------------------------------------
// Grades
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = student_assessments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GradeRow {
    pub student_id: Uuid,
    pub assessment_id: Uuid,
    pub score: Option<f64>,
    pub max_score: f64,
    pub percentage: Option<f64>,
    pub feedback: Option<String>,
    pub graded_by: Option<Uuid>,
    pub graded_at: DateTime<Utc>,
}

/// Columns overwritten when a pair is graded again.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = student_assessments)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct GradeChanges<'a> {
    pub score: Option<f64>,
    pub max_score: f64,
    pub percentage: Option<f64>,
    pub feedback: Option<&'a str>,
    pub graded_by: Option<Uuid>,
    pub graded_at: DateTime<Utc>,
}
