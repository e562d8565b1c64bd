//! Learning outcomes and their weighted links to assessments.

use chrono::{DateTime, Utc};

use super::course::non_blank;
use super::{AssessmentId, CourseId, LearningOutcomeId};

/// Weight applied to an assessment/outcome link when none is given.
pub const DEFAULT_OUTCOME_WEIGHT: f64 = 1.0;

/// A competency goal tracked across one or more assessments of a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningOutcome {
    pub id: LearningOutcomeId,
    pub course_id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Weighted link between an assessment and a learning outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentOutcome {
    pub assessment_id: AssessmentId,
    pub learning_outcome_id: LearningOutcomeId,
    pub weight: f64,
}

impl AssessmentOutcome {
    /// Link with the supplied weight, or [`DEFAULT_OUTCOME_WEIGHT`].
    pub fn new(
        assessment_id: AssessmentId,
        learning_outcome_id: LearningOutcomeId,
        weight: Option<f64>,
    ) -> Self {
        Self {
            assessment_id,
            learning_outcome_id,
            weight: weight
                .filter(|value| value.is_finite() && *value > 0.0)
                .unwrap_or(DEFAULT_OUTCOME_WEIGHT),
        }
    }
}

/// Validation failure for learning outcome payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyOutcomeTitle;

impl std::fmt::Display for EmptyOutcomeTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "title is required")
    }
}

impl std::error::Error for EmptyOutcomeTitle {}

/// Editable learning outcome fields, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeDetails {
    title: String,
    description: Option<String>,
}

impl OutcomeDetails {
    pub fn try_new(title: &str, description: Option<&str>) -> Result<Self, EmptyOutcomeTitle> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EmptyOutcomeTitle);
        }
        Ok(Self {
            title: title.to_owned(),
            description: non_blank(description),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
