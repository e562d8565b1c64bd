//! Strongly typed entity identifiers.
//!
//! Every identifier is a UUID on the wire and in storage. Wrapping each in its
//! own newtype keeps a course id from being passed where a student id is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when an identifier string is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdError {
    kind: &'static str,
}

impl InvalidIdError {
    /// Entity kind whose identifier failed to parse.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Display for InvalidIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} id must be a valid UUID", self.kind)
    }
}

impl std::error::Error for InvalidIdError {}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its textual UUID form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, InvalidIdError> {
                let raw = id.as_ref();
                if raw.trim() != raw {
                    return Err(InvalidIdError { kind: $kind });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| InvalidIdError { kind: $kind })
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id! {
    /// Identifier of a teacher or student account.
    UserId => "user"
}

define_id! {
    /// Identifier of a course.
    CourseId => "course"
}

define_id! {
    /// Identifier of an assessment.
    AssessmentId => "assessment"
}

define_id! {
    /// Identifier of a learning outcome.
    LearningOutcomeId => "learning outcome"
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("not-a-uuid")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn rejects_malformed_identifiers(#[case] raw: &str) {
        let err = CourseId::new(raw).expect_err("malformed id");
        assert_eq!(err.kind(), "course");
        assert_eq!(err.to_string(), "course id must be a valid UUID");
    }

    #[rstest]
    fn serialises_as_bare_uuid_string() {
        let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        let value = serde_json::to_value(id).expect("serialise id");
        assert_eq!(value, "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }
}
