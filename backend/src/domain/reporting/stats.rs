//! Score, average and completion arithmetic.

use crate::domain::Grade;

use super::{AssessmentStats, CoursePerformance, GradedAssessment, OverviewStatistics};

/// Convert a row count for use in averages.
#[expect(
    clippy::cast_precision_loss,
    reason = "row counts stay far below 2^52"
)]
pub(crate) fn count_as_f64(count: usize) -> f64 {
    count as f64
}

/// Arithmetic mean, or `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count_as_f64(count))
}

/// Summarise one student's grades.
///
/// A grade without a score adds 0 to `total_score` and is excluded from both
/// `completed_count` and `average_percentage`. Its max score still counts.
pub fn compute_student_assessment_stats<'a>(
    grades: impl IntoIterator<Item = &'a Grade>,
) -> AssessmentStats {
    let mut total_score = 0.0;
    let mut total_max_score = 0.0;
    let mut percentages = Vec::new();

    for grade in grades {
        total_score += grade.score().unwrap_or(0.0);
        total_max_score += grade.max_score();
        if grade.is_completed() {
            percentages.push(grade.percentage().unwrap_or(0.0));
        }
    }

    AssessmentStats {
        total_score,
        total_max_score,
        completed_count: percentages.len(),
        average_percentage: mean(percentages),
    }
}

/// Share of (assessment, student) slots that hold a completed grade, as a
/// percentage. Zero when there are no slots.
pub fn course_completion_rate(
    assessments_count: usize,
    students_count: usize,
    total_completed: usize,
) -> f64 {
    let slots = assessments_count.saturating_mul(students_count);
    if slots == 0 {
        return 0.0;
    }
    100.0 * count_as_f64(total_completed) / count_as_f64(slots)
}

/// Performance over merged entries. Only entries with a score contribute to
/// the totals and the average.
pub fn compute_course_performance(entries: &[GradedAssessment]) -> CoursePerformance {
    let graded: Vec<_> = entries.iter().filter(|entry| entry.score.is_some()).collect();
    CoursePerformance {
        total_assessments: entries.len(),
        completed: graded.len(),
        average_percentage: mean(graded.iter().map(|entry| entry.percentage.unwrap_or(0.0))),
        total_score: graded.iter().filter_map(|entry| entry.score).sum(),
        total_max_score: graded.iter().filter_map(|entry| entry.max_score).sum(),
    }
}

/// Overview statistics over merged entries.
pub fn compute_overview_statistics(entries: &[GradedAssessment]) -> OverviewStatistics {
    let performance = compute_course_performance(entries);
    OverviewStatistics {
        total_assessments: performance.total_assessments,
        graded_assessments: performance.completed,
        average_score: (performance.total_max_score > 0.0)
            .then(|| 100.0 * performance.total_score / performance.total_max_score),
        average_percentage: performance.average_percentage,
    }
}
