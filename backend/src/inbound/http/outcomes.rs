//! Learning outcome handlers.
//!
//! ```text
//! GET    /api/outcomes/course/{course_id}
//! POST   /api/outcomes
//! PUT    /api/outcomes/{id}
//! DELETE /api/outcomes/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, OutcomeDetails};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{OutcomeResponse, SuccessResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, parse_course_id, parse_outcome_id, require,
};

const ID: FieldName = FieldName::new("id");
const COURSE_ID: FieldName = FieldName::new("course_id");
const TITLE: FieldName = FieldName::new("title");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct OutcomeRequest {
    /// Required on create, ignored on update.
    pub course_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

fn parse_details(payload: &OutcomeRequest) -> Result<OutcomeDetails, Error> {
    OutcomeDetails::try_new(
        payload.title.as_deref().unwrap_or_default(),
        payload.description.as_deref(),
    )
    .map_err(|err| invalid_field_error(TITLE, err.to_string()))
}

#[utoipa::path(
    get,
    path = "/api/outcomes/course/{course_id}",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Outcomes, oldest first", body = [OutcomeResponse]),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["outcomes"],
    operation_id = "listCourseOutcomes"
)]
#[get("/outcomes/course/{course_id}")]
pub async fn list_course_outcomes(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<OutcomeResponse>>> {
    let course_id = parse_course_id(&path, COURSE_ID)?;
    let outcomes = state.outcomes_query.list_outcomes(&course_id).await?;
    Ok(web::Json(outcomes.iter().map(OutcomeResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/outcomes",
    request_body = OutcomeRequest,
    responses(
        (status = 201, description = "Outcome created", body = OutcomeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["outcomes"],
    operation_id = "createOutcome"
)]
#[post("/outcomes")]
pub async fn create_outcome(
    state: web::Data<HttpState>,
    payload: web::Json<OutcomeRequest>,
) -> ApiResult<HttpResponse> {
    let course_id = parse_course_id(require(payload.course_id.as_deref(), COURSE_ID)?, COURSE_ID)?;
    let details = parse_details(&payload)?;
    let outcome = state.outcomes.create_outcome(&course_id, details).await?;
    Ok(HttpResponse::Created().json(OutcomeResponse::from(&outcome)))
}

#[utoipa::path(
    put,
    path = "/api/outcomes/{id}",
    params(("id" = String, Path, description = "Learning outcome id")),
    request_body = OutcomeRequest,
    responses(
        (status = 200, description = "Outcome updated", body = OutcomeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Learning outcome not found", body = ErrorSchema)
    ),
    tags = ["outcomes"],
    operation_id = "updateOutcome"
)]
#[put("/outcomes/{id}")]
pub async fn update_outcome(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<OutcomeRequest>,
) -> ApiResult<web::Json<OutcomeResponse>> {
    let outcome_id = parse_outcome_id(&path, ID)?;
    let details = parse_details(&payload)?;
    let outcome = state.outcomes.update_outcome(&outcome_id, details).await?;
    Ok(web::Json(OutcomeResponse::from(&outcome)))
}

/// Delete an outcome along with its assessment links.
#[utoipa::path(
    delete,
    path = "/api/outcomes/{id}",
    params(("id" = String, Path, description = "Learning outcome id")),
    responses(
        (status = 200, description = "Outcome deleted", body = SuccessResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["outcomes"],
    operation_id = "deleteOutcome"
)]
#[delete("/outcomes/{id}")]
pub async fn delete_outcome(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let outcome_id = parse_outcome_id(&path, ID)?;
    state.outcomes.delete_outcome(&outcome_id).await?;
    Ok(web::Json(SuccessResponse::ok()))
}
