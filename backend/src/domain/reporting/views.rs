//! Typed report shapes produced by the aggregation engine.
//!
//! Each report is a plain struct assembled field by field. Adapters translate
//! them into wire DTOs.

use chrono::{DateTime, Utc};

use crate::domain::{Assessment, Course, LearningOutcome, User, UserId};

/// An assessment left-joined with (at most) one student's grade.
///
/// Every grade field is `None` when the student has no grade. `max_score` is
/// the grade's snapshot; the assessment's own maximum stays on
/// `assessment.max_score`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedAssessment {
    pub assessment: Assessment,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    pub percentage: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: Option<DateTime<Utc>>,
}

/// Summary of one student's grades over a set of assessments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssessmentStats {
    pub total_score: f64,
    pub total_max_score: f64,
    /// Mean percentage over completed grades; `None` when nothing is graded.
    pub average_percentage: Option<f64>,
    pub completed_count: usize,
}

/// Per-student block of the course report.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentCourseStats {
    pub student: User,
    pub grades: Vec<GradedAssessment>,
    pub total_score: f64,
    pub total_max_score: f64,
    pub average_percentage: Option<f64>,
    pub completed_assessments: usize,
    pub total_assessments: usize,
}

/// Course-wide statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseStatistics {
    pub total_students: usize,
    pub total_assessments: usize,
    /// Mean of all completed percentages across enrolled students; 0 if none.
    pub course_average: f64,
    pub completion_rate: f64,
}

/// Course performance report.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseReport {
    pub course: Course,
    /// Creation time ascending.
    pub assessments: Vec<Assessment>,
    pub students: Vec<StudentCourseStats>,
    pub statistics: CourseStatistics,
}

/// One student's performance within one course.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoursePerformance {
    pub total_assessments: usize,
    pub completed: usize,
    pub average_percentage: Option<f64>,
    pub total_score: f64,
    pub total_max_score: f64,
}

/// Per-course block of the student report.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentCourseReport {
    pub course: Course,
    pub enrolled_at: DateTime<Utc>,
    pub assessments: Vec<GradedAssessment>,
    pub performance: CoursePerformance,
}

/// Totals across every course of the student report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallStatistics {
    pub total_courses: usize,
    pub total_assessments: usize,
    pub completed_assessments: usize,
    pub overall_average: Option<f64>,
}

/// Student performance report.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentReport {
    pub student: User,
    /// Enrollment order.
    pub courses: Vec<StudentCourseReport>,
    pub overall_statistics: OverallStatistics,
}

/// Progress against a single learning outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeProgress {
    pub outcome: LearningOutcome,
    pub average_percentage: Option<f64>,
    /// Distinct assessments linked to the outcome.
    pub assessments_count: usize,
}

/// A student's progress view for one course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseProgress {
    pub course: Course,
    /// Newest first.
    pub assessments: Vec<GradedAssessment>,
    pub learning_outcomes: Vec<OutcomeProgress>,
}

/// One line of an assessment's grade roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub student: User,
    pub score: Option<f64>,
    /// Grade snapshot, or the assessment's maximum when ungraded.
    pub max_score: f64,
    pub percentage: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: Option<DateTime<Utc>>,
    pub graded_by: Option<UserId>,
}

/// Totals shown on a student's overview page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverviewStatistics {
    pub total_assessments: usize,
    pub graded_assessments: usize,
    /// `100 * sum(score) / sum(max_score)` over graded entries.
    pub average_score: Option<f64>,
    pub average_percentage: Option<f64>,
}
