//! Report assembly over rows already fetched from the repositories.
//!
//! Every function here is pure: services fetch each table once (concurrently
//! where independent) and hand the rows over. Rows that do not belong to the
//! report (another course, another student) are filtered out, so callers may
//! pass batched fetches without trimming them first.

use std::collections::HashSet;

use crate::domain::{
    Assessment, AssessmentOutcome, Course, Enrollment, Grade, LearningOutcome, User,
};

use super::lookup::{group_by, index_by};
use super::merge::merge_assessments_with_grades;
use super::outcomes::compute_outcome_progress;
use super::stats::{
    compute_course_performance, compute_student_assessment_stats, course_completion_rate, mean,
};
use super::{
    CourseProgress, CourseReport, CourseStatistics, OverallStatistics, StudentCourseReport,
    StudentCourseStats, StudentReport,
};

fn oldest_first(assessments: &mut [Assessment]) {
    assessments.sort_by_key(|assessment| assessment.created_at);
}

/// Course performance report.
///
/// Students follow enrollment order; enrollments whose account is missing are
/// skipped. Each student gets one merged entry per course assessment.
/// `course_average` spans every grade recorded on the course's assessments,
/// while completion is counted over enrolled students only.
pub fn assemble_course_report(
    course: Course,
    mut assessments: Vec<Assessment>,
    enrollments: &[Enrollment],
    students: Vec<User>,
    grades: &[Grade],
) -> CourseReport {
    assessments.retain(|assessment| assessment.course_id == course.id);
    oldest_first(&mut assessments);

    let course_assessments: HashSet<_> =
        assessments.iter().map(|assessment| assessment.id).collect();
    let course_grades: Vec<&Grade> = grades
        .iter()
        .filter(|grade| course_assessments.contains(&grade.assessment_id()))
        .collect();
    let mut grades_by_student = group_by(course_grades.iter().copied(), |grade| grade.student_id());
    let mut students_by_id = index_by(students, |student| student.id);

    let students: Vec<StudentCourseStats> = enrollments
        .iter()
        .filter(|enrollment| enrollment.course_id == course.id)
        .filter_map(|enrollment| students_by_id.remove(&enrollment.student_id))
        .map(|student| {
            let own = grades_by_student.remove(&student.id).unwrap_or_default();
            let stats = compute_student_assessment_stats(own.iter().copied());
            StudentCourseStats {
                grades: merge_assessments_with_grades(&assessments, own.iter().copied()),
                total_score: stats.total_score,
                total_max_score: stats.total_max_score,
                average_percentage: stats.average_percentage,
                completed_assessments: stats.completed_count,
                total_assessments: assessments.len(),
                student,
            }
        })
        .collect();

    let total_completed = students
        .iter()
        .map(|entry| entry.completed_assessments)
        .sum();
    // Every grade on the course's assessments counts, enrolled or not.
    let course_average =
        mean(course_grades.iter().filter_map(|grade| grade.percentage())).unwrap_or(0.0);

    let statistics = CourseStatistics {
        total_students: students.len(),
        total_assessments: assessments.len(),
        course_average,
        completion_rate: course_completion_rate(assessments.len(), students.len(), total_completed),
    };

    CourseReport {
        course,
        assessments,
        students,
        statistics,
    }
}

/// Student performance report.
///
/// Courses follow enrollment order; enrollments whose course is missing are
/// skipped. `grades` are the student's own grades.
pub fn assemble_student_report(
    student: User,
    enrollments: &[Enrollment],
    courses: Vec<Course>,
    assessments: Vec<Assessment>,
    grades: &[Grade],
) -> StudentReport {
    let own: Vec<&Grade> = grades
        .iter()
        .filter(|grade| grade.student_id() == student.id)
        .collect();
    let mut courses_by_id = index_by(courses, |course| course.id);
    let mut assessments_by_course = group_by(assessments, |assessment| assessment.course_id);

    let courses: Vec<StudentCourseReport> = enrollments
        .iter()
        .filter(|enrollment| enrollment.student_id == student.id)
        .filter_map(|enrollment| {
            let course = courses_by_id.remove(&enrollment.course_id)?;
            let mut course_assessments = assessments_by_course
                .remove(&course.id)
                .unwrap_or_default();
            oldest_first(&mut course_assessments);
            let merged = merge_assessments_with_grades(&course_assessments, own.iter().copied());
            Some(StudentCourseReport {
                performance: compute_course_performance(&merged),
                enrolled_at: enrollment.enrolled_at,
                assessments: merged,
                course,
            })
        })
        .collect();

    let completed_percentages: Vec<f64> = courses
        .iter()
        .flat_map(|report| report.assessments.iter())
        .filter(|merged| merged.score.is_some())
        .map(|merged| merged.percentage.unwrap_or(0.0))
        .collect();

    let overall_statistics = OverallStatistics {
        total_courses: courses.len(),
        total_assessments: courses
            .iter()
            .map(|report| report.performance.total_assessments)
            .sum(),
        completed_assessments: completed_percentages.len(),
        overall_average: mean(completed_percentages),
    };

    StudentReport {
        student,
        courses,
        overall_statistics,
    }
}

/// A student's progress view for one course.
///
/// Assessments are listed newest first. Outcome progress only uses `grades`,
/// which should be the student's own.
pub fn assemble_course_progress(
    course: Course,
    mut assessments: Vec<Assessment>,
    mut outcomes: Vec<LearningOutcome>,
    links: &[AssessmentOutcome],
    grades: &[Grade],
) -> CourseProgress {
    assessments.retain(|assessment| assessment.course_id == course.id);
    assessments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    outcomes.retain(|outcome| outcome.course_id == course.id);
    outcomes.sort_by_key(|outcome| outcome.created_at);

    let learning_outcomes = outcomes
        .iter()
        .map(|outcome| compute_outcome_progress(outcome, links, grades))
        .collect();

    CourseProgress {
        assessments: merge_assessments_with_grades(&assessments, grades),
        learning_outcomes,
        course,
    }
}
