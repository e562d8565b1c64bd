//! Roster ordering and the per-assessment grade roster.

use std::cmp::Ordering;

use crate::domain::{Assessment, Enrollment, Grade, User};

use super::RosterEntry;
use super::lookup::index_by;

/// Case-insensitive comparison of `(last_name, first_name)`. Empty names sort
/// before any non-empty name.
pub fn compare_names(a: &User, b: &User) -> Ordering {
    let key = |user: &User| {
        (
            user.last_name.to_lowercase(),
            user.first_name.to_lowercase(),
        )
    };
    key(a).cmp(&key(b))
}

/// Stable roster sort by `(last_name, first_name)`.
pub fn sort_roster<T>(entries: &mut [T], student: impl Fn(&T) -> &User) {
    entries.sort_by(|a, b| compare_names(student(a), student(b)));
}

/// Grade roster for `assessment`.
///
/// Enrollment drives the join: every enrolled student with a known account
/// appears exactly once, graded or not. Grades of students who are no longer
/// enrolled are dropped. Ungraded entries report the assessment's max score.
pub fn build_grade_roster(
    assessment: &Assessment,
    enrollments: &[Enrollment],
    students: Vec<User>,
    grades: &[Grade],
) -> Vec<RosterEntry> {
    let grades_by_student = index_by(
        grades
            .iter()
            .filter(|grade| grade.assessment_id() == assessment.id),
        |grade| grade.student_id(),
    );
    let mut students_by_id = index_by(students, |student| student.id);

    let mut roster: Vec<RosterEntry> = enrollments
        .iter()
        .filter(|enrollment| enrollment.course_id == assessment.course_id)
        .filter_map(|enrollment| students_by_id.remove(&enrollment.student_id))
        .map(|student| {
            let grade = grades_by_student.get(&student.id).copied();
            RosterEntry {
                score: grade.and_then(Grade::score),
                max_score: grade.map_or(assessment.max_score, Grade::max_score),
                percentage: grade.and_then(Grade::percentage),
                feedback: grade.and_then(Grade::feedback).map(str::to_owned),
                graded_at: grade.map(Grade::graded_at),
                graded_by: grade.and_then(Grade::graded_by),
                student,
            }
        })
        .collect();

    sort_roster(&mut roster, |entry| &entry.student);
    roster
}
