//! Left join of assessments with a student's grades.

use crate::domain::{Assessment, Grade};

use super::GradedAssessment;
use super::lookup::index_by;

/// Attach `grade` (if any) to `assessment`.
pub fn merge_assessment_with_grade(
    assessment: &Assessment,
    grade: Option<&Grade>,
) -> GradedAssessment {
    GradedAssessment {
        assessment: assessment.clone(),
        score: grade.and_then(Grade::score),
        max_score: grade.map(Grade::max_score),
        percentage: grade.and_then(Grade::percentage),
        feedback: grade.and_then(Grade::feedback).map(str::to_owned),
        graded_at: grade.map(Grade::graded_at),
    }
}

/// Left join: one entry per assessment, in `assessments` order.
///
/// `grades` should belong to a single student; grades for assessments not in
/// the list are ignored.
pub fn merge_assessments_with_grades<'a>(
    assessments: &[Assessment],
    grades: impl IntoIterator<Item = &'a Grade>,
) -> Vec<GradedAssessment> {
    let by_assessment = index_by(grades, |grade| grade.assessment_id());
    assessments
        .iter()
        .map(|assessment| {
            merge_assessment_with_grade(assessment, by_assessment.get(&assessment.id).copied())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reporting::test_fixtures::{assessment, grade_for};
    use crate::domain::{CourseId, UserId};
    use rstest::rstest;

    #[rstest]
    fn ungraded_assessment_has_no_grade_fields() {
        let quiz = assessment(CourseId::random(), "Quiz", 20.0, 0);
        let merged = merge_assessment_with_grade(&quiz, None);

        assert_eq!(merged.assessment, quiz);
        assert_eq!(merged.score, None);
        assert_eq!(merged.max_score, None);
        assert_eq!(merged.percentage, None);
        assert_eq!(merged.feedback, None);
        assert_eq!(merged.graded_at, None);
    }

    #[rstest]
    fn every_assessment_appears_exactly_once() {
        let course = CourseId::random();
        let student = UserId::random();
        let assessments: Vec<_> = (0..4)
            .map(|n| assessment(course, &format!("A{n}"), 10.0, n))
            .collect();
        let stray = assessment(CourseId::random(), "elsewhere", 10.0, 9);
        let grades = [
            grade_for(student, &assessments[1], Some(5.0)),
            grade_for(student, &assessments[3], Some(10.0)),
            grade_for(student, &stray, Some(1.0)),
        ];

        let merged = merge_assessments_with_grades(&assessments, &grades);

        assert_eq!(merged.len(), 4);
        let percentages: Vec<_> = merged.iter().map(|entry| entry.percentage).collect();
        assert_eq!(percentages, vec![None, Some(50.0), None, Some(100.0)]);
        assert_eq!(merged[1].max_score, Some(10.0));
    }
}
