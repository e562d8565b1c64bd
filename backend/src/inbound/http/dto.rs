//! Wire representations shared by several resources.
//!
//! Ids are rendered as UUID strings and instants as RFC 3339 strings. Related
//! labels (teacher names, course code) sit beside the entity fields, so most
//! responses flatten an entity DTO and append a few optional columns.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::reporting::GradedAssessment;
use crate::domain::{
    Assessment, Course, CourseLabel, Grade, LearningOutcome, PersonName, User,
};

pub(crate) fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

pub(crate) fn optional_timestamp(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(timestamp)
}

/// Public account fields. Never carries credential material.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[schema(example = "student")]
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_owned(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: timestamp(user.created_at),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: String,
    pub name: String,
    #[schema(example = "MATH101")]
    pub code: String,
    pub description: Option<String>,
    pub teacher_id: String,
    pub created_at: String,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.to_string(),
            name: course.name.clone(),
            code: course.code.clone(),
            description: course.description.clone(),
            teacher_id: course.teacher_id.to_string(),
            created_at: timestamp(course.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssessmentResponse {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "quiz")]
    pub assessment_type: String,
    pub max_score: f64,
    pub due_date: Option<String>,
    pub created_by: String,
    pub created_at: String,
}

impl From<&Assessment> for AssessmentResponse {
    fn from(assessment: &Assessment) -> Self {
        Self {
            id: assessment.id.to_string(),
            course_id: assessment.course_id.to_string(),
            title: assessment.title.clone(),
            description: assessment.description.clone(),
            assessment_type: assessment.assessment_type.clone(),
            max_score: assessment.max_score,
            due_date: optional_timestamp(assessment.due_date),
            created_by: assessment.created_by.to_string(),
            created_at: timestamp(assessment.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OutcomeResponse {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<&LearningOutcome> for OutcomeResponse {
    fn from(outcome: &LearningOutcome) -> Self {
        Self {
            id: outcome.id.to_string(),
            course_id: outcome.course_id.to_string(),
            title: outcome.title.clone(),
            description: outcome.description.clone(),
            created_at: timestamp(outcome.created_at),
        }
    }
}

/// Stored grade for one (student, assessment) pair.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GradeResponse {
    pub student_id: String,
    pub assessment_id: String,
    pub score: Option<f64>,
    /// Max score snapshot taken when the grade was recorded.
    pub max_score: f64,
    pub percentage: Option<f64>,
    pub feedback: Option<String>,
    pub graded_by: Option<String>,
    pub graded_at: String,
}

impl From<&Grade> for GradeResponse {
    fn from(grade: &Grade) -> Self {
        Self {
            student_id: grade.student_id().to_string(),
            assessment_id: grade.assessment_id().to_string(),
            score: grade.score(),
            max_score: grade.max_score(),
            percentage: grade.percentage(),
            feedback: grade.feedback().map(str::to_owned),
            graded_by: grade.graded_by().map(|id| id.to_string()),
            graded_at: timestamp(grade.graded_at()),
        }
    }
}

/// An assessment left-joined with one student's grade.
///
/// `max_score` is the grade's snapshot and is `null` while ungraded; the
/// assessment's own maximum is `assessment_max_score`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GradedAssessmentResponse {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assessment_type: String,
    pub assessment_max_score: f64,
    pub due_date: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    pub percentage: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: Option<String>,
}

impl From<&GradedAssessment> for GradedAssessmentResponse {
    fn from(graded: &GradedAssessment) -> Self {
        let assessment = &graded.assessment;
        Self {
            id: assessment.id.to_string(),
            course_id: assessment.course_id.to_string(),
            title: assessment.title.clone(),
            description: assessment.description.clone(),
            assessment_type: assessment.assessment_type.clone(),
            assessment_max_score: assessment.max_score,
            due_date: optional_timestamp(assessment.due_date),
            created_by: assessment.created_by.to_string(),
            created_at: timestamp(assessment.created_at),
            score: graded.score,
            max_score: graded.max_score,
            percentage: graded.percentage,
            feedback: graded.feedback.clone(),
            graded_at: optional_timestamp(graded.graded_at),
        }
    }
}

/// Split an optional related name into the two nullable wire columns.
pub(crate) fn name_columns(name: Option<&PersonName>) -> (Option<String>, Option<String>) {
    match name {
        Some(name) => (Some(name.first_name.clone()), Some(name.last_name.clone())),
        None => (None, None),
    }
}

/// Split an optional course label into `course_name` and `course_code`.
pub(crate) fn course_columns(label: Option<&CourseLabel>) -> (Option<String>, Option<String>) {
    match label {
        Some(label) => (Some(label.name.clone()), Some(label.code.clone())),
        None => (None, None),
    }
}

/// Body returned by delete and unenroll endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub(crate) const fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reporting::test_fixtures::{assessment, grade_for, student};
    use crate::domain::CourseId;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    fn ungraded_assessment_renders_null_grade_columns() {
        let quiz = assessment(CourseId::random(), "Quiz", 20.0, 0);
        let graded = GradedAssessment {
            assessment: quiz,
            score: None,
            max_score: None,
            percentage: None,
            feedback: None,
            graded_at: None,
        };

        let body = serde_json::to_value(GradedAssessmentResponse::from(&graded))
            .expect("serialises");
        assert_eq!(body["assessment_max_score"], json!(20.0));
        assert_eq!(body["max_score"], Value::Null);
        assert_eq!(body["percentage"], Value::Null);
    }

    #[rstest]
    fn grade_response_exposes_computed_percentage() {
        let ann = student("Ann", "Able");
        let quiz = assessment(CourseId::random(), "Quiz", 40.0, 0);
        let grade = grade_for(ann.id, &quiz, Some(30.0));

        let body = serde_json::to_value(GradeResponse::from(&grade)).expect("serialises");
        assert_eq!(body["percentage"], json!(75.0));
        assert_eq!(body["student_id"], json!(ann.id.to_string()));
    }

    #[rstest]
    fn user_response_uses_role_label() {
        let body = serde_json::to_value(UserResponse::from(student("Ann", "Able")))
            .expect("serialises");
        assert_eq!(body["role"], "student");
        assert!(body.get("password_digest").is_none());
    }
}
