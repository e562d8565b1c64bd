//! HTTP adapter mapping for domain errors.
//!
//! The domain error stays transport agnostic; this module decides status
//! codes and scrubs internal messages before they reach a client. It also
//! turns body extraction failures into the same JSON error shape.

use std::borrow::Cow;

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// Uniqueness violations are client mistakes and share 400 with validation.
fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::DuplicateKey => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Payload sent to the client. Internal failures keep only their trace id.
fn client_body(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    error!(
        trace_id = error.trace_id(),
        message = error.message(),
        "internal error returned to client"
    );
    let generic = Error::internal(GENERIC_INTERNAL_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(id) => generic.with_trace_id(id.to_owned()),
        None => generic,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_body(self))
    }
}

fn payload_error(err: &JsonPayloadError) -> Error {
    debug!(error = %err, "rejected request body");
    let message = match err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("Invalid JSON body: {inner}"),
        other => format!("Invalid request body: {other}"),
    };
    Error::invalid_request(message).with_details(json!({ "code": "invalid_body" }))
}

/// JSON extractor settings for `/api`: malformed bodies answer with the
/// standard error payload instead of actix's plain-text response.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req: &HttpRequest| payload_error(&err).into())
}
