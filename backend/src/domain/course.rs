//! Courses and student enrollments.

use chrono::{DateTime, Utc};

use super::{CourseId, UserId};

/// A course owned by a teacher. `code` is unique across the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub teacher_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Validation failures for course payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseValidationError {
    EmptyName,
    EmptyCode,
}

impl CourseValidationError {
    /// Wire name of the offending field.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyCode => "code",
        }
    }
}

impl std::fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is required", self.field())
    }
}

impl std::error::Error for CourseValidationError {}

/// Editable course fields, validated.
///
/// ## Invariants
/// - `name` and `code` are trimmed and non-empty.
/// - a blank description collapses to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    name: String,
    code: String,
    description: Option<String>,
}

impl CourseDetails {
    /// Validate raw course fields.
    pub fn try_new(
        name: &str,
        code: &str,
        description: Option<&str>,
    ) -> Result<Self, CourseValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CourseValidationError::EmptyName);
        }
        let code = code.trim();
        if code.is_empty() {
            return Err(CourseValidationError::EmptyCode);
        }
        Ok(Self {
            name: name.to_owned(),
            code: code.to_owned(),
            description: non_blank(description),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Collapse blank optional text to `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// Membership of a student in a course. At most one per pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub student_id: UserId,
    pub course_id: CourseId,
    pub enrolled_at: DateTime<Utc>,
}
