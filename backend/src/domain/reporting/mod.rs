//! Aggregation engine: pure statistics and report assembly.
//!
//! Nothing in this module performs I/O. Services fetch rows through the
//! repository ports, then call into here to merge, summarise and shape them.

mod assemble;
mod lookup;
mod merge;
mod outcomes;
mod roster;
mod stats;
#[cfg(test)]
pub(crate) mod test_fixtures;
mod views;

pub use assemble::{assemble_course_progress, assemble_course_report, assemble_student_report};
pub use lookup::{distinct_ids, group_by, index_by};
pub use merge::{merge_assessment_with_grade, merge_assessments_with_grades};
pub use outcomes::compute_outcome_progress;
pub use roster::{build_grade_roster, compare_names, sort_roster};
pub use stats::{
    compute_course_performance, compute_overview_statistics, compute_student_assessment_stats,
    course_completion_rate, mean,
};
pub use views::{
    AssessmentStats, CoursePerformance, CourseProgress, CourseReport, CourseStatistics,
    GradedAssessment, OutcomeProgress, OverallStatistics, OverviewStatistics, RosterEntry,
    StudentCourseReport, StudentCourseStats, StudentReport,
};
