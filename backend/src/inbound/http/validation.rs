//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose `details` name the
//! offending field and a machine-readable code, so clients can highlight the
//! right input.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{AssessmentId, CourseId, Error, LearningOutcomeId, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidField,
    InvalidUuid,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidField => "invalid_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} is required")).with_code(ErrorCode::MissingField)
}

/// Wrap a domain validation message for `field`.
pub(crate) fn invalid_field_error(field: FieldName, message: impl Into<String>) -> Error {
    ValidationError::new(field, message).with_code(ErrorCode::InvalidField)
}

/// Require an optional payload field to be present.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    parse_uuid(value, field).map(UserId::from_uuid)
}

pub(crate) fn parse_course_id(value: &str, field: FieldName) -> Result<CourseId, Error> {
    parse_uuid(value, field).map(CourseId::from_uuid)
}

pub(crate) fn parse_assessment_id(value: &str, field: FieldName) -> Result<AssessmentId, Error> {
    parse_uuid(value, field).map(AssessmentId::from_uuid)
}

pub(crate) fn parse_outcome_id(value: &str, field: FieldName) -> Result<LearningOutcomeId, Error> {
    parse_uuid(value, field).map(LearningOutcomeId::from_uuid)
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be an RFC 3339 timestamp"))
        .with_value(ErrorCode::InvalidTimestamp, value)
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| invalid_timestamp_error(field, raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    const COURSE_ID: FieldName = FieldName::new("course_id");

    #[rstest]
    fn malformed_uuids_name_field_and_value() {
        let err = parse_course_id("not-a-uuid", COURSE_ID).expect_err("rejected");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "course_id");
        assert_eq!(details["value"], "not-a-uuid");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[rstest]
    fn well_formed_uuids_parse() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id = parse_course_id(raw, COURSE_ID).expect("valid id");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    fn absent_timestamps_are_none(#[case] raw: Option<&str>, #[case] expected: Option<i64>) {
        let parsed =
            parse_optional_rfc3339_timestamp(raw, FieldName::new("due_date")).expect("accepted");
        assert_eq!(parsed.map(|ts| ts.timestamp()), expected);
    }

    #[rstest]
    fn timestamps_must_be_rfc3339() {
        let err = parse_optional_rfc3339_timestamp(Some("next week"), FieldName::new("due_date"))
            .expect_err("rejected");
        let details = err.details().expect("details present");
        assert_eq!(details["code"], "invalid_timestamp");
    }

    #[rstest]
    fn require_reports_missing_field() {
        let err = require::<String>(None, FieldName::new("title")).expect_err("missing");
        assert_eq!(err.message(), "title is required");
        assert_eq!(err.details().expect("details")["code"], "missing_field");
    }
}
