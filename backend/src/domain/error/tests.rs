//! Tests for the domain error payload and its serialisation contract.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> DomainError {
    DomainError::invalid_request("bad")
}

#[rstest]
#[case(DomainError::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(DomainError::duplicate_key("x"), ErrorCode::DuplicateKey)]
#[case(DomainError::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(DomainError::not_found("x"), ErrorCode::NotFound)]
#[case(DomainError::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(DomainError::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: DomainError) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = DomainError::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { DomainError::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_with_camel_case_trace_id(expected_trace_id: String) {
    let error = DomainError::duplicate_key("course code already exists")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"field": "code"}));

    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(value["code"], "duplicate_key");
    assert_eq!(value["traceId"], TRACE_ID);
    assert_eq!(value["details"]["field"], "code");
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(DomainError::not_found("missing")).expect("serialise error");
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let payload = json!({"code": "not_found", "message": "missing"});

    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<DomainError>(payload).expect("valid payload")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn deserialising_rejects_blank_messages() {
    let payload = json!({"code": "not_found", "message": "  "});
    assert!(serde_json::from_value::<DomainError>(payload).is_err());
}
