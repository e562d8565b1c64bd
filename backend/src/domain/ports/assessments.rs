//! Driving ports for assessments.

use async_trait::async_trait;

use crate::domain::{
    AssessmentDetail, AssessmentDetails, AssessmentId, AssessmentSummary, AssessmentWithCourse,
    CourseId, Error, LearningOutcomeId, UserId,
};

/// Which assessments a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssessmentFilter {
    #[default]
    All,
    Course(CourseId),
    /// Assessments of every course the student is enrolled in.
    Student(UserId),
}

/// Requested link to a learning outcome. A missing weight falls back to the
/// default weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeLinkRequest {
    pub outcome_id: LearningOutcomeId,
    pub weight: Option<f64>,
}

/// Validated input for a new assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssessment {
    pub course_id: CourseId,
    pub details: AssessmentDetails,
    pub created_by: UserId,
    pub outcome_links: Vec<OutcomeLinkRequest>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentQuery: Send + Sync {
    /// Assessments matching `filter`, newest first.
    async fn list_assessments(
        &self,
        filter: AssessmentFilter,
    ) -> Result<Vec<AssessmentSummary>, Error>;

    async fn assessment_detail(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentDetail, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentCommand: Send + Sync {
    /// Create an assessment and link it to outcomes. Link failures are
    /// logged; the assessment is still returned.
    async fn create_assessment(
        &self,
        assessment: NewAssessment,
    ) -> Result<AssessmentWithCourse, Error>;

    /// Replace editable fields. Existing grades keep their max-score snapshot.
    async fn update_assessment(
        &self,
        assessment_id: &AssessmentId,
        details: AssessmentDetails,
    ) -> Result<AssessmentWithCourse, Error>;

    async fn delete_assessment(&self, assessment_id: &AssessmentId) -> Result<(), Error>;
}
