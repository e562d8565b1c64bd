//! Driving ports for recording grades and reading rosters.

use async_trait::async_trait;

use crate::domain::reporting::RosterEntry;
use crate::domain::{AssessmentId, Error, RecordedGrade, Score, UserId};

/// A validated grade submission.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeSubmission {
    pub student_id: UserId,
    pub assessment_id: AssessmentId,
    pub score: Score,
    pub feedback: Option<String>,
    pub graded_by: Option<UserId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GradingCommand: Send + Sync {
    /// Upsert the grade for the submission's pair. `not_found` when the
    /// assessment is missing, in which case nothing is written.
    async fn record_grade(&self, submission: GradeSubmission) -> Result<RecordedGrade, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GradebookQuery: Send + Sync {
    /// One entry per enrolled student, sorted by name.
    async fn grade_roster(&self, assessment_id: &AssessmentId) -> Result<Vec<RosterEntry>, Error>;
}
