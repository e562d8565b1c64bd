//! Assessment, grading and grade roster handlers.
//!
//! ```text
//! GET    /api/assessments?course_id&student_id
//! GET    /api/assessments/{id}
//! POST   /api/assessments
//! PUT    /api/assessments/{id}
//! DELETE /api/assessments/{id}
//! POST   /api/assessments/{id}/grade
//! GET    /api/assessments/{id}/grades
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    AssessmentFilter, GradeSubmission, NewAssessment, OutcomeLinkRequest,
};
use crate::domain::reporting::RosterEntry;
use crate::domain::{
    AssessmentDetail, AssessmentDetails, AssessmentSummary, AssessmentValidationError,
    AssessmentWithCourse, Error, RecordedGrade, Score, WeightedOutcome,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    AssessmentResponse, GradeResponse, OutcomeResponse, SuccessResponse, course_columns,
    name_columns, optional_timestamp,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, parse_assessment_id, parse_course_id,
    parse_optional_rfc3339_timestamp, parse_outcome_id, parse_user_id, require,
};

const ID: FieldName = FieldName::new("id");
const COURSE_ID: FieldName = FieldName::new("course_id");
const STUDENT_ID: FieldName = FieldName::new("student_id");
const CREATED_BY: FieldName = FieldName::new("created_by");
const GRADED_BY: FieldName = FieldName::new("graded_by");
const MAX_SCORE: FieldName = FieldName::new("max_score");
const SCORE: FieldName = FieldName::new("score");
const DUE_DATE: FieldName = FieldName::new("due_date");
const LEARNING_OUTCOMES: FieldName = FieldName::new("learning_outcomes");

/// Listing filters. `course_id` wins when both are supplied.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AssessmentListQuery {
    pub course_id: Option<String>,
    pub student_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct OutcomeLinkPayload {
    pub id: Option<String>,
    /// Defaults to 1.00.
    pub weight: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AssessmentRequest {
    /// Required on create, ignored on update.
    pub course_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(example = "quiz")]
    pub assessment_type: Option<String>,
    pub max_score: Option<f64>,
    /// RFC 3339 timestamp.
    pub due_date: Option<String>,
    /// Required on create, ignored on update.
    pub created_by: Option<String>,
    /// Outcomes to link on create.
    pub learning_outcomes: Option<Vec<OutcomeLinkPayload>>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct GradeRequest {
    pub student_id: Option<String>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub graded_by: Option<String>,
}

/// Assessment with its course label.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssessmentWithCourseResponse {
    #[serde(flatten)]
    pub assessment: AssessmentResponse,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
}

impl From<AssessmentWithCourse> for AssessmentWithCourseResponse {
    fn from(value: AssessmentWithCourse) -> Self {
        let (course_name, course_code) = course_columns(value.course.as_ref());
        Self {
            assessment: AssessmentResponse::from(&value.assessment),
            course_name,
            course_code,
        }
    }
}

/// Assessment list row.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssessmentSummaryResponse {
    #[serde(flatten)]
    pub assessment: AssessmentResponse,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub creator_first_name: Option<String>,
    pub creator_last_name: Option<String>,
}

impl From<AssessmentSummary> for AssessmentSummaryResponse {
    fn from(value: AssessmentSummary) -> Self {
        let (course_name, course_code) = course_columns(value.course.as_ref());
        let (creator_first_name, creator_last_name) = name_columns(value.creator.as_ref());
        Self {
            assessment: AssessmentResponse::from(&value.assessment),
            course_name,
            course_code,
            creator_first_name,
            creator_last_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeightedOutcomeResponse {
    #[serde(flatten)]
    pub outcome: OutcomeResponse,
    pub weight: f64,
}

impl From<WeightedOutcome> for WeightedOutcomeResponse {
    fn from(value: WeightedOutcome) -> Self {
        Self {
            outcome: OutcomeResponse::from(&value.outcome),
            weight: value.weight,
        }
    }
}

/// Assessment with linked learning outcomes.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssessmentDetailResponse {
    #[serde(flatten)]
    pub assessment: AssessmentResponse,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub creator_first_name: Option<String>,
    pub creator_last_name: Option<String>,
    pub learning_outcomes: Vec<WeightedOutcomeResponse>,
}

impl From<AssessmentDetail> for AssessmentDetailResponse {
    fn from(value: AssessmentDetail) -> Self {
        let (course_name, course_code) = course_columns(value.course.as_ref());
        let (creator_first_name, creator_last_name) = name_columns(value.creator.as_ref());
        Self {
            assessment: AssessmentResponse::from(&value.assessment),
            course_name,
            course_code,
            creator_first_name,
            creator_last_name,
            learning_outcomes: value
                .learning_outcomes
                .into_iter()
                .map(WeightedOutcomeResponse::from)
                .collect(),
        }
    }
}

/// Stored grade with the student's name.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordedGradeResponse {
    #[serde(flatten)]
    pub grade: GradeResponse,
    pub student_first_name: Option<String>,
    pub student_last_name: Option<String>,
}

impl From<RecordedGrade> for RecordedGradeResponse {
    fn from(value: RecordedGrade) -> Self {
        let (student_first_name, student_last_name) = name_columns(value.student.as_ref());
        Self {
            grade: GradeResponse::from(&value.grade),
            student_first_name,
            student_last_name,
        }
    }
}

/// One enrolled student's line on the grade roster.
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterEntryResponse {
    pub student_id: String,
    pub student_first_name: String,
    pub student_last_name: String,
    pub student_email: String,
    pub score: Option<f64>,
    /// Grade snapshot, or the assessment's maximum when ungraded.
    pub max_score: f64,
    pub percentage: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: Option<String>,
    pub graded_by: Option<String>,
}

impl From<RosterEntry> for RosterEntryResponse {
    fn from(value: RosterEntry) -> Self {
        Self {
            student_id: value.student.id.to_string(),
            student_first_name: value.student.first_name,
            student_last_name: value.student.last_name,
            student_email: value.student.email,
            score: value.score,
            max_score: value.max_score,
            percentage: value.percentage,
            feedback: value.feedback,
            graded_at: optional_timestamp(value.graded_at),
            graded_by: value.graded_by.map(|id| id.to_string()),
        }
    }
}

fn map_assessment_validation(err: AssessmentValidationError) -> Error {
    invalid_field_error(FieldName::new(err.field()), err.to_string())
}

fn parse_details(payload: &AssessmentRequest) -> Result<AssessmentDetails, Error> {
    let max_score = require(payload.max_score, MAX_SCORE)?;
    let due_date = parse_optional_rfc3339_timestamp(payload.due_date.as_deref(), DUE_DATE)?;
    AssessmentDetails::try_new(
        payload.title.as_deref().unwrap_or_default(),
        payload.description.as_deref(),
        payload.assessment_type.as_deref().unwrap_or_default(),
        max_score,
        due_date,
    )
    .map_err(map_assessment_validation)
}

/// Links without a usable outcome id are dropped with a warning; the
/// assessment itself is still created.
fn parse_outcome_links(links: &[OutcomeLinkPayload]) -> Vec<OutcomeLinkRequest> {
    links
        .iter()
        .filter_map(|link| {
            let raw = link.id.as_deref().unwrap_or_default();
            match parse_outcome_id(raw, LEARNING_OUTCOMES) {
                Ok(outcome_id) => Some(OutcomeLinkRequest {
                    outcome_id,
                    weight: link.weight,
                }),
                Err(error) => {
                    warn!(outcome_id = raw, %error, "skipping learning outcome link");
                    None
                }
            }
        })
        .collect()
}

fn parse_new_assessment(payload: &AssessmentRequest) -> Result<NewAssessment, Error> {
    let course_id = parse_course_id(
        require(payload.course_id.as_deref(), COURSE_ID)?,
        COURSE_ID,
    )?;
    let created_by = parse_user_id(
        require(payload.created_by.as_deref(), CREATED_BY)?,
        CREATED_BY,
    )?;
    let details = parse_details(payload)?;
    let outcome_links =
        parse_outcome_links(payload.learning_outcomes.as_deref().unwrap_or_default());
    Ok(NewAssessment {
        course_id,
        details,
        created_by,
        outcome_links,
    })
}

fn parse_filter(query: &AssessmentListQuery) -> Result<AssessmentFilter, Error> {
    if let Some(course_id) = query.course_id.as_deref() {
        return parse_course_id(course_id, COURSE_ID).map(AssessmentFilter::Course);
    }
    if let Some(student_id) = query.student_id.as_deref() {
        return parse_user_id(student_id, STUDENT_ID).map(AssessmentFilter::Student);
    }
    Ok(AssessmentFilter::All)
}

fn parse_submission(path: &str, payload: &GradeRequest) -> Result<GradeSubmission, Error> {
    let assessment_id = parse_assessment_id(path, ID)?;
    let student_id = parse_user_id(
        require(payload.student_id.as_deref(), STUDENT_ID)?,
        STUDENT_ID,
    )?;
    let score = Score::new(require(payload.score, SCORE)?)
        .map_err(|err| invalid_field_error(SCORE, err.to_string()))?;
    let graded_by = payload
        .graded_by
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_user_id(raw, GRADED_BY))
        .transpose()?;
    Ok(GradeSubmission {
        student_id,
        assessment_id,
        score,
        feedback: payload.feedback.clone(),
        graded_by,
    })
}

/// List assessments, newest first.
#[utoipa::path(
    get,
    path = "/api/assessments",
    params(AssessmentListQuery),
    responses(
        (status = 200, description = "Assessments", body = [AssessmentSummaryResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema)
    ),
    tags = ["assessments"],
    operation_id = "listAssessments"
)]
#[get("/assessments")]
pub async fn list_assessments(
    state: web::Data<HttpState>,
    query: web::Query<AssessmentListQuery>,
) -> ApiResult<web::Json<Vec<AssessmentSummaryResponse>>> {
    let filter = parse_filter(&query)?;
    let assessments = state.assessments_query.list_assessments(filter).await?;
    Ok(web::Json(
        assessments
            .into_iter()
            .map(AssessmentSummaryResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/assessments/{id}",
    params(("id" = String, Path, description = "Assessment id")),
    responses(
        (status = 200, description = "Assessment detail", body = AssessmentDetailResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Assessment not found", body = ErrorSchema)
    ),
    tags = ["assessments"],
    operation_id = "getAssessment"
)]
#[get("/assessments/{id}")]
pub async fn get_assessment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AssessmentDetailResponse>> {
    let assessment_id = parse_assessment_id(&path, ID)?;
    let detail = state
        .assessments_query
        .assessment_detail(&assessment_id)
        .await?;
    Ok(web::Json(AssessmentDetailResponse::from(detail)))
}

/// Create an assessment, optionally linking learning outcomes.
#[utoipa::path(
    post,
    path = "/api/assessments",
    request_body = AssessmentRequest,
    responses(
        (status = 201, description = "Assessment created", body = AssessmentWithCourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["assessments"],
    operation_id = "createAssessment"
)]
#[post("/assessments")]
pub async fn create_assessment(
    state: web::Data<HttpState>,
    payload: web::Json<AssessmentRequest>,
) -> ApiResult<HttpResponse> {
    let request = parse_new_assessment(&payload)?;
    let created = state.assessments.create_assessment(request).await?;
    Ok(HttpResponse::Created().json(AssessmentWithCourseResponse::from(created)))
}

#[utoipa::path(
    put,
    path = "/api/assessments/{id}",
    params(("id" = String, Path, description = "Assessment id")),
    request_body = AssessmentRequest,
    responses(
        (status = 200, description = "Assessment updated", body = AssessmentWithCourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Assessment not found", body = ErrorSchema)
    ),
    tags = ["assessments"],
    operation_id = "updateAssessment"
)]
#[put("/assessments/{id}")]
pub async fn update_assessment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AssessmentRequest>,
) -> ApiResult<web::Json<AssessmentWithCourseResponse>> {
    let assessment_id = parse_assessment_id(&path, ID)?;
    let details = parse_details(&payload)?;
    let updated = state
        .assessments
        .update_assessment(&assessment_id, details)
        .await?;
    Ok(web::Json(AssessmentWithCourseResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/assessments/{id}",
    params(("id" = String, Path, description = "Assessment id")),
    responses(
        (status = 200, description = "Assessment deleted", body = SuccessResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["assessments"],
    operation_id = "deleteAssessment"
)]
#[delete("/assessments/{id}")]
pub async fn delete_assessment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let assessment_id = parse_assessment_id(&path, ID)?;
    state.assessments.delete_assessment(&assessment_id).await?;
    Ok(web::Json(SuccessResponse::ok()))
}

/// Record (or overwrite) a student's grade. The percentage is derived from
/// the assessment's max score; any client-supplied percentage is ignored.
#[utoipa::path(
    post,
    path = "/api/assessments/{id}/grade",
    params(("id" = String, Path, description = "Assessment id")),
    request_body = GradeRequest,
    responses(
        (status = 200, description = "Grade recorded", body = RecordedGradeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Assessment not found", body = ErrorSchema)
    ),
    tags = ["assessments"],
    operation_id = "gradeAssessment"
)]
#[post("/assessments/{id}/grade")]
pub async fn grade_assessment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<GradeRequest>,
) -> ApiResult<web::Json<RecordedGradeResponse>> {
    let submission = parse_submission(&path, &payload)?;
    let recorded = state.grading.record_grade(submission).await?;
    Ok(web::Json(RecordedGradeResponse::from(recorded)))
}

/// Grade roster: every enrolled student, graded or not, sorted by name.
#[utoipa::path(
    get,
    path = "/api/assessments/{id}/grades",
    params(("id" = String, Path, description = "Assessment id")),
    responses(
        (status = 200, description = "Roster", body = [RosterEntryResponse]),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Assessment not found", body = ErrorSchema)
    ),
    tags = ["assessments"],
    operation_id = "listAssessmentGrades"
)]
#[get("/assessments/{id}/grades")]
pub async fn list_grades(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RosterEntryResponse>>> {
    let assessment_id = parse_assessment_id(&path, ID)?;
    let roster = state.gradebook.grade_roster(&assessment_id).await?;
    Ok(web::Json(
        roster.into_iter().map(RosterEntryResponse::from).collect(),
    ))
}

#[cfg(test)]
#[path = "assessments_tests.rs"]
mod tests;
