//! Tests for the grading service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MockAssessmentRepository, MockEnrollmentRepository, MockGradeRepository, MockUserRepository,
    RepositoryError,
};
use crate::domain::reporting::test_fixtures::{assessment, course, enroll, grade_for, student};
use crate::domain::{ErrorCode, Score, UserId};
use crate::test_support::{fixture_clock, fixture_timestamp};

type TestService<G> =
    GradingService<MockAssessmentRepository, MockEnrollmentRepository, MockUserRepository, G>;

fn service<G>(
    assessments: MockAssessmentRepository,
    enrollments: MockEnrollmentRepository,
    users: MockUserRepository,
    grades: G,
) -> TestService<G> {
    GradingService::new(
        Arc::new(assessments),
        Arc::new(enrollments),
        Arc::new(users),
        Arc::new(grades),
        fixture_clock(),
    )
}

fn submission(student_id: UserId, assessment_id: AssessmentId, score: f64) -> GradeSubmission {
    GradeSubmission {
        student_id,
        assessment_id,
        score: Score::new(score).expect("valid score"),
        feedback: None,
        graded_by: None,
    }
}

/// Grade store keyed by pair, mirroring the upsert contract.
#[derive(Default)]
struct PairStore(Mutex<Vec<Grade>>);

impl PairStore {
    fn rows(&self) -> Vec<Grade> {
        self.0.lock().expect("grade store lock").clone()
    }
}

#[async_trait]
impl GradeRepository for PairStore {
    async fn upsert(&self, grade: &Grade) -> Result<Grade, RepositoryError> {
        let mut rows = self.0.lock().expect("grade store lock");
        rows.retain(|row| {
            (row.student_id(), row.assessment_id()) != (grade.student_id(), grade.assessment_id())
        });
        rows.push(grade.clone());
        Ok(grade.clone())
    }

    async fn list_by_assessments(
        &self,
        assessment_ids: &[AssessmentId],
    ) -> Result<Vec<Grade>, RepositoryError> {
        Ok(self
            .rows()
            .into_iter()
            .filter(|row| assessment_ids.contains(&row.assessment_id()))
            .collect())
    }

    async fn list_for_student(
        &self,
        student_id: &UserId,
        assessment_ids: &[AssessmentId],
    ) -> Result<Vec<Grade>, RepositoryError> {
        Ok(self
            .rows()
            .into_iter()
            .filter(|row| {
                row.student_id() == *student_id && assessment_ids.contains(&row.assessment_id())
            })
            .collect())
    }
}

#[rstest]
#[tokio::test]
async fn missing_assessment_is_not_found_and_writes_nothing() {
    let mut assessments = MockAssessmentRepository::new();
    assessments.expect_find_by_id().return_once(|_| Ok(None));
    let mut grades = MockGradeRepository::new();
    grades.expect_upsert().times(0);

    let error = service(
        assessments,
        MockEnrollmentRepository::new(),
        MockUserRepository::new(),
        grades,
    )
    .record_grade(submission(UserId::random(), AssessmentId::random(), 5.0))
    .await
    .expect_err("missing assessment");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn percentage_comes_from_the_assessment_max_score() {
    let quiz = assessment(course("MATH101").id, "Quiz", 40.0, 0);
    let ann = student("Ann", "Able");
    let mut assessments = MockAssessmentRepository::new();
    let found = quiz.clone();
    assessments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    let mut users = MockUserRepository::new();
    let account = ann.clone();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(account)));
    let mut grades = MockGradeRepository::new();
    grades
        .expect_upsert()
        .withf(|grade: &Grade| {
            grade.percentage() == Some(75.0)
                && grade.max_score() == 40.0
                && grade.graded_at() == fixture_timestamp()
        })
        .times(1)
        .returning(|grade| Ok(grade.clone()));

    let recorded = service(assessments, MockEnrollmentRepository::new(), users, grades)
        .record_grade(GradeSubmission {
            feedback: Some("  Well argued ".to_owned()),
            ..submission(ann.id, quiz.id, 30.0)
        })
        .await
        .expect("recorded");

    assert_eq!(recorded.grade.feedback(), Some("Well argued"));
    assert_eq!(
        recorded.student.map(|name| name.last_name),
        Some("Able".to_owned())
    );
}

#[rstest]
#[tokio::test]
async fn regrading_leaves_one_grade_reflecting_the_last_call() {
    let quiz = assessment(course("MATH101").id, "Quiz", 10.0, 0);
    let student_id = UserId::random();
    let mut assessments = MockAssessmentRepository::new();
    let found = quiz.clone();
    assessments
        .expect_find_by_id()
        .returning(move |_| Ok(Some(found.clone())));
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));
    let store = Arc::new(PairStore::default());
    let grading = GradingService::new(
        Arc::new(assessments),
        Arc::new(MockEnrollmentRepository::new()),
        Arc::new(users),
        Arc::clone(&store),
        fixture_clock(),
    );

    grading
        .record_grade(GradeSubmission {
            feedback: Some("first".to_owned()),
            graded_by: Some(UserId::random()),
            ..submission(student_id, quiz.id, 4.0)
        })
        .await
        .expect("first grade");
    let second = grading
        .record_grade(submission(student_id, quiz.id, 9.0))
        .await
        .expect("second grade");

    let rows = store.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].score(), Some(9.0));
    assert_eq!(rows[0].feedback(), None);
    assert_eq!(rows[0].graded_by(), None);
    assert_eq!(second.student, None);
}

#[rstest]
#[tokio::test]
async fn roster_covers_every_enrolled_student() {
    let algebra = course("MATH101");
    let quiz = assessment(algebra.id, "Quiz", 20.0, 0);
    let ann = student("Ann", "Young");
    let ben = student("Ben", "Adams");
    let enrollments = vec![enroll(&ann, algebra.id, 0), enroll(&ben, algebra.id, 1)];
    let grades = vec![grade_for(ann.id, &quiz, Some(10.0))];

    let mut assessment_repo = MockAssessmentRepository::new();
    let found = quiz.clone();
    assessment_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    let mut enrollment_repo = MockEnrollmentRepository::new();
    enrollment_repo
        .expect_list_by_course()
        .return_once(move |_| Ok(enrollments));
    let mut users = MockUserRepository::new();
    let accounts = vec![ann.clone(), ben.clone()];
    users
        .expect_find_by_ids()
        .times(1)
        .return_once(move |_| Ok(accounts));
    let mut grade_repo = MockGradeRepository::new();
    grade_repo
        .expect_list_by_assessments()
        .return_once(move |_| Ok(grades));

    let roster = service(assessment_repo, enrollment_repo, users, grade_repo)
        .grade_roster(&quiz.id)
        .await
        .expect("roster");

    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].student.id, ben.id);
    assert_eq!(roster[0].score, None);
    assert!((roster[0].max_score - 20.0).abs() < f64::EPSILON);
    assert_eq!(roster[1].percentage, Some(50.0));
}
