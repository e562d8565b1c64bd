//! End-to-end term over the in-memory store: accounts, a course, graded
//! assessments and the reports built from them.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use slo_backend::domain::ports::{
    AssessmentFilter, CourseFilter, GradeSubmission, NewAssessment, NewCourse, OutcomeLinkRequest,
};
use slo_backend::domain::{
    AssessmentDetails, AssessmentId, CourseDetails, CourseId, ErrorCode, LoginCredentials,
    OutcomeDetails, Registration, RegistrationParts, Score, User, UserId,
};
use slo_backend::inbound::http::state::{HttpState, Repositories};
use slo_backend::outbound::memory::InMemoryStore;

#[fixture]
fn state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::from_repositories(
        Repositories {
            users: store.clone(),
            courses: store.clone(),
            enrollments: store.clone(),
            assessments: store.clone(),
            outcomes: store.clone(),
            grades: store,
        },
        Arc::new(DefaultClock),
    )
}

async fn register(state: &HttpState, role: &str, first_name: &str, last_name: &str) -> User {
    let username = format!("{first_name}.{last_name}").to_lowercase();
    let email = format!("{username}@school.test");
    let registration = Registration::try_from_parts(RegistrationParts {
        username: &username,
        email: &email,
        password: "correct horse",
        role,
        first_name,
        last_name,
    })
    .expect("valid registration");
    state.accounts.register(registration).await.expect("registered")
}

fn assessment(course_id: CourseId, teacher: UserId, title: &str) -> NewAssessment {
    NewAssessment {
        course_id,
        details: AssessmentDetails::try_new(title, None, "exam", 100.0, None)
            .expect("valid details"),
        created_by: teacher,
        outcome_links: Vec::new(),
    }
}

async fn grade(state: &HttpState, student: UserId, assessment: AssessmentId, score: f64) {
    state
        .grading
        .record_grade(GradeSubmission {
            student_id: student,
            assessment_id: assessment,
            score: Score::new(score).expect("valid score"),
            feedback: None,
            graded_by: None,
        })
        .await
        .expect("grade recorded");
}

#[rstest]
#[actix_rt::test]
async fn a_term_produces_consistent_reports(state: HttpState) {
    let teacher = register(&state, "teacher", "Grace", "Hopper").await;
    let ann = register(&state, "student", "Ann", "Able").await;
    let bob = register(&state, "student", "Bob", "Baker").await;

    let course = state
        .courses
        .create_course(NewCourse {
            details: CourseDetails::try_new("Algorithms", "CS201", None).expect("valid course"),
            teacher_id: teacher.id,
        })
        .await
        .expect("course created")
        .course;
    state.courses.enroll(&course.id, &ann.id).await.expect("ann enrolled");
    state.courses.enroll(&course.id, &bob.id).await.expect("bob enrolled");

    let outcome = state
        .outcomes
        .create_outcome(
            &course.id,
            OutcomeDetails::try_new("Sorting", None).expect("valid outcome"),
        )
        .await
        .expect("outcome created");
    let mut midterm = assessment(course.id, teacher.id, "Midterm");
    midterm.outcome_links.push(OutcomeLinkRequest {
        outcome_id: outcome.id,
        weight: None,
    });
    let midterm = state
        .assessments
        .create_assessment(midterm)
        .await
        .expect("midterm created")
        .assessment;
    let final_exam = state
        .assessments
        .create_assessment(assessment(course.id, teacher.id, "Final"))
        .await
        .expect("final created")
        .assessment;

    grade(&state, ann.id, midterm.id, 80.0).await;
    grade(&state, ann.id, final_exam.id, 50.0).await;

    let report = state.reports.course_report(&course.id).await.expect("course report");
    assert_eq!(report.statistics.total_students, 2);
    assert_eq!(report.statistics.course_average, 65.0);
    assert_eq!(report.statistics.completion_rate, 50.0);
    let ann_stats = report
        .students
        .iter()
        .find(|row| row.student.id == ann.id)
        .expect("ann in report");
    assert_eq!(ann_stats.average_percentage, Some(65.0));
    let bob_stats = report
        .students
        .iter()
        .find(|row| row.student.id == bob.id)
        .expect("bob in report");
    assert_eq!(bob_stats.average_percentage, None);
    assert_eq!(bob_stats.grades.len(), 2);

    let roster = state
        .gradebook
        .grade_roster(&final_exam.id)
        .await
        .expect("roster");
    let names: Vec<&str> = roster.iter().map(|row| row.student.last_name.as_str()).collect();
    assert_eq!(names, vec!["Able", "Baker"]);

    let progress = state
        .reports
        .student_course_progress(&ann.id, &course.id)
        .await
        .expect("progress");
    assert_eq!(progress.learning_outcomes.len(), 1);
    assert_eq!(
        progress.learning_outcomes.first().and_then(|row| row.average_percentage),
        Some(80.0)
    );

    let ann_report = state.reports.student_report(&ann.id).await.expect("student report");
    assert_eq!(ann_report.overall_statistics.completed_assessments, 2);
    assert_eq!(ann_report.overall_statistics.overall_average, Some(65.0));

    let bobs_work = state
        .assessments_query
        .list_assessments(AssessmentFilter::Student(bob.id))
        .await
        .expect("bob's assessments");
    assert_eq!(bobs_work.len(), 2);
}

#[rstest]
#[actix_rt::test]
async fn deleting_a_course_removes_its_dependents(state: HttpState) {
    let teacher = register(&state, "teacher", "Grace", "Hopper").await;
    let ann = register(&state, "student", "Ann", "Able").await;
    let course = state
        .courses
        .create_course(NewCourse {
            details: CourseDetails::try_new("Algorithms", "CS201", None).expect("valid course"),
            teacher_id: teacher.id,
        })
        .await
        .expect("course created")
        .course;
    state.courses.enroll(&course.id, &ann.id).await.expect("enrolled");
    let quiz = state
        .assessments
        .create_assessment(assessment(course.id, teacher.id, "Quiz"))
        .await
        .expect("quiz created")
        .assessment;
    grade(&state, ann.id, quiz.id, 40.0).await;

    state.courses.delete_course(&course.id).await.expect("deleted");

    let mine = state
        .courses_query
        .list_courses(CourseFilter::Student(ann.id))
        .await
        .expect("listing");
    assert!(mine.is_empty());
    let err = state
        .assessments_query
        .assessment_detail(&quiz.id)
        .await
        .expect_err("assessment removed");
    assert_eq!(err.code(), ErrorCode::NotFound);
    let overview = state.students.student_overview(&ann.id).await.expect("overview");
    assert!(overview.assessments.is_empty());
}

#[rstest]
#[actix_rt::test]
async fn login_accepts_username_or_email(state: HttpState) {
    let ann = register(&state, "student", "Ann", "Able").await;

    for login in ["ann.able", "ann.able@school.test"] {
        let credentials =
            LoginCredentials::try_from_parts(login, "correct horse").expect("credentials shape");
        let user = state.accounts.login(credentials).await.expect("login");
        assert_eq!(user.id, ann.id);
    }

    let wrong = LoginCredentials::try_from_parts("ann.able", "battery staple")
        .expect("credentials shape");
    let err = state.accounts.login(wrong).await.expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}
