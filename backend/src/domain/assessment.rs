//! Assessments: gradable course activities with a maximum score.

use chrono::{DateTime, Utc};

use super::course::non_blank;
use super::{AssessmentId, CourseId, UserId};

/// A gradable course activity.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub id: AssessmentId,
    pub course_id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub assessment_type: String,
    pub max_score: f64,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Validation failures for assessment payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentValidationError {
    EmptyTitle,
    EmptyAssessmentType,
    NonPositiveMaxScore,
}

impl AssessmentValidationError {
    /// Wire name of the offending field.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyAssessmentType => "assessment_type",
            Self::NonPositiveMaxScore => "max_score",
        }
    }
}

impl std::fmt::Display for AssessmentValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
            Self::EmptyAssessmentType => write!(f, "assessment_type is required"),
            Self::NonPositiveMaxScore => write!(f, "max_score must be a positive number"),
        }
    }
}

impl std::error::Error for AssessmentValidationError {}

/// Editable assessment fields, validated.
///
/// ## Invariants
/// - `title` and `assessment_type` are trimmed and non-empty.
/// - `max_score` is finite and strictly positive, so percentages never divide
///   by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentDetails {
    title: String,
    description: Option<String>,
    assessment_type: String,
    max_score: f64,
    due_date: Option<DateTime<Utc>>,
}

impl AssessmentDetails {
    /// Validate raw assessment fields.
    pub fn try_new(
        title: &str,
        description: Option<&str>,
        assessment_type: &str,
        max_score: f64,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Self, AssessmentValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AssessmentValidationError::EmptyTitle);
        }
        let assessment_type = assessment_type.trim();
        if assessment_type.is_empty() {
            return Err(AssessmentValidationError::EmptyAssessmentType);
        }
        if !max_score.is_finite() || max_score <= 0.0 {
            return Err(AssessmentValidationError::NonPositiveMaxScore);
        }
        Ok(Self {
            title: title.to_owned(),
            description: non_blank(description),
            assessment_type: assessment_type.to_owned(),
            max_score,
            due_date,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn assessment_type(&self) -> &str {
        &self.assessment_type
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_unusable_max_scores(#[case] max_score: f64) {
        let result = AssessmentDetails::try_new("Quiz", None, "quiz", max_score, None);
        assert_eq!(result, Err(AssessmentValidationError::NonPositiveMaxScore));
    }

    #[rstest]
    fn rejects_blank_type() {
        let result = AssessmentDetails::try_new("Quiz", None, " ", 10.0, None);
        assert_eq!(
            result.map_err(AssessmentValidationError::field),
            Err("assessment_type")
        );
    }

    #[rstest]
    fn accepts_fractional_max_score() {
        let details =
            AssessmentDetails::try_new(" Lab 1 ", Some("bring goggles"), "lab", 12.5, None)
                .expect("valid details");
        assert_eq!(details.title(), "Lab 1");
        assert_eq!(details.description(), Some("bring goggles"));
        assert!((details.max_score() - 12.5).abs() < f64::EPSILON);
    }
}
