//! Learning-outcome progress.
//!
//! Path: outcome -> assessment links -> assessments -> grades. Only the
//! percentage of each grade is used.

use std::collections::HashSet;

use crate::domain::{AssessmentOutcome, Grade, LearningOutcome};

use super::OutcomeProgress;
use super::stats::mean;

/// Progress for `outcome`.
///
/// `links` may contain links for other outcomes; they are filtered out.
/// `grades` decides the scope: pass one student's grades for a personal view
/// or every grade for a course-wide view.
pub fn compute_outcome_progress(
    outcome: &LearningOutcome,
    links: &[AssessmentOutcome],
    grades: &[Grade],
) -> OutcomeProgress {
    let linked: HashSet<_> = links
        .iter()
        .filter(|link| link.learning_outcome_id == outcome.id)
        .map(|link| link.assessment_id)
        .collect();

    let related = grades
        .iter()
        .filter(|grade| linked.contains(&grade.assessment_id()))
        .filter_map(Grade::percentage);

    OutcomeProgress {
        outcome: outcome.clone(),
        average_percentage: mean(related),
        assessments_count: linked.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reporting::test_fixtures::{assessment, grade_for, outcome};
    use crate::domain::{CourseId, UserId};
    use rstest::rstest;

    #[rstest]
    fn outcome_without_links_has_no_progress() {
        let course = CourseId::random();
        let progress = compute_outcome_progress(&outcome(course, "Reasoning"), &[], &[]);
        assert_eq!(progress.average_percentage, None);
        assert_eq!(progress.assessments_count, 0);
    }

    #[rstest]
    fn averages_percentages_of_linked_assessments_only() {
        let course = CourseId::random();
        let student = UserId::random();
        let target = outcome(course, "Reasoning");
        let other = outcome(course, "Writing");
        let quiz = assessment(course, "Quiz", 10.0, 0);
        let exam = assessment(course, "Exam", 50.0, 1);
        let essay = assessment(course, "Essay", 20.0, 2);
        let links = [
            AssessmentOutcome::new(quiz.id, target.id, None),
            AssessmentOutcome::new(exam.id, target.id, Some(2.0)),
            AssessmentOutcome::new(exam.id, target.id, Some(2.0)),
            AssessmentOutcome::new(essay.id, other.id, None),
        ];
        let grades = [
            grade_for(student, &quiz, Some(8.0)),
            grade_for(student, &exam, Some(30.0)),
            grade_for(student, &essay, Some(20.0)),
        ];

        let progress = compute_outcome_progress(&target, &links, &grades);

        assert_eq!(progress.assessments_count, 2);
        let average = progress.average_percentage.expect("average");
        assert!((average - 70.0).abs() < 1e-9);
    }

    #[rstest]
    fn ungraded_links_count_but_do_not_average() {
        let course = CourseId::random();
        let target = outcome(course, "Reasoning");
        let quiz = assessment(course, "Quiz", 10.0, 0);
        let links = [AssessmentOutcome::new(quiz.id, target.id, None)];
        let grades = [grade_for(UserId::random(), &quiz, None)];

        let progress = compute_outcome_progress(&target, &links, &grades);

        assert_eq!(progress.assessments_count, 1);
        assert_eq!(progress.average_percentage, None);
    }
}
