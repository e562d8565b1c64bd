//! Grade records: one per (student, assessment) pair.
//!
//! A [`Grade`] can only be built through [`Grade::record`] or
//! [`Grade::restore`], both of which derive the percentage from the score and
//! the max-score snapshot. Callers never choose the percentage.

use chrono::{DateTime, Utc};

use super::{AssessmentId, UserId};

/// Validation failure for a submitted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidScore;

impl std::fmt::Display for InvalidScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "score must be a non-negative number")
    }
}

impl std::error::Error for InvalidScore {}

/// A finite, non-negative score.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Score(f64);

impl Score {
    pub fn new(value: f64) -> Result<Self, InvalidScore> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(InvalidScore)
        }
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Optional grading metadata carried alongside a score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeAnnotations {
    pub feedback: Option<String>,
    pub graded_by: Option<UserId>,
}

/// A student's scored outcome for one assessment.
///
/// ## Invariants
/// - `percentage == 100 * score / max_score` whenever both are present.
/// - `score == None` only for legacy rows read back from storage; such a grade
///   counts as not completed.
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    student_id: UserId,
    assessment_id: AssessmentId,
    score: Option<f64>,
    max_score: f64,
    percentage: Option<f64>,
    feedback: Option<String>,
    graded_by: Option<UserId>,
    graded_at: DateTime<Utc>,
}

fn percentage_of(score: Option<f64>, max_score: f64) -> Option<f64> {
    // Legacy rows may hold a zero max; no percentage is better than infinity.
    score
        .filter(|_| max_score > 0.0)
        .map(|value| 100.0 * value / max_score)
}

impl Grade {
    /// Record a fresh grade against the assessment's current max score.
    pub fn record(
        student_id: UserId,
        assessment_id: AssessmentId,
        score: Score,
        max_score: f64,
        annotations: GradeAnnotations,
        graded_at: DateTime<Utc>,
    ) -> Self {
        Self::restore(
            student_id,
            assessment_id,
            Some(score.value()),
            max_score,
            annotations,
            graded_at,
        )
    }

    /// Rebuild a grade from stored columns, recomputing the percentage.
    pub fn restore(
        student_id: UserId,
        assessment_id: AssessmentId,
        score: Option<f64>,
        max_score: f64,
        annotations: GradeAnnotations,
        graded_at: DateTime<Utc>,
    ) -> Self {
        let GradeAnnotations {
            feedback,
            graded_by,
        } = annotations;
        Self {
            student_id,
            assessment_id,
            score,
            max_score,
            percentage: percentage_of(score, max_score),
            feedback,
            graded_by,
            graded_at,
        }
    }

    pub fn student_id(&self) -> UserId {
        self.student_id
    }

    pub fn assessment_id(&self) -> AssessmentId {
        self.assessment_id
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Max score snapshot taken when the grade was recorded.
    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn percentage(&self) -> Option<f64> {
        self.percentage
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn graded_by(&self) -> Option<UserId> {
        self.graded_by
    }

    pub fn graded_at(&self) -> DateTime<Utc> {
        self.graded_at
    }

    /// Whether the grade counts towards completion and averages.
    pub fn is_completed(&self) -> bool {
        self.score.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn grade(score: Option<f64>, max_score: f64) -> Grade {
        Grade::restore(
            UserId::random(),
            AssessmentId::random(),
            score,
            max_score,
            GradeAnnotations::default(),
            Utc::now(),
        )
    }

    #[rstest]
    #[case(80.0, 100.0, 80.0)]
    #[case(7.0, 8.0, 87.5)]
    #[case(0.0, 20.0, 0.0)]
    #[case(30.0, 20.0, 150.0)]
    fn percentage_is_derived_from_score_and_max(
        #[case] score: f64,
        #[case] max_score: f64,
        #[case] expected: f64,
    ) {
        let grade = Grade::record(
            UserId::random(),
            AssessmentId::random(),
            Score::new(score).expect("valid score"),
            max_score,
            GradeAnnotations::default(),
            Utc::now(),
        );
        let percentage = grade.percentage().expect("percentage present");
        assert!((percentage - expected).abs() < 1e-9);
        assert!(grade.is_completed());
    }

    #[rstest]
    fn missing_score_has_no_percentage() {
        let grade = grade(None, 100.0);
        assert_eq!(grade.percentage(), None);
        assert!(!grade.is_completed());
    }

    #[rstest]
    fn zero_max_score_yields_no_percentage() {
        assert_eq!(grade(Some(5.0), 0.0).percentage(), None);
    }

    #[rstest]
    #[case(-0.5)]
    #[case(f64::NAN)]
    #[case(f64::NEG_INFINITY)]
    fn score_rejects_negative_or_non_finite(#[case] raw: f64) {
        assert_eq!(Score::new(raw), Err(InvalidScore));
    }
}
