//! Tests for assessment, grading and roster handlers.

use super::*;
use crate::inbound::http::test_utils::{
    call_json, create_assessment as seed_assessment, create_course, enroll, grade, in_memory_app,
    register, text,
};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
fn filter_prefers_course_over_student() {
    let query = AssessmentListQuery {
        course_id: Some("3fa85f64-5717-4562-b3fc-2c963f66afa6".into()),
        student_id: Some("not even parsed".into()),
    };

    let filter = parse_filter(&query).expect("course filter");
    assert!(matches!(filter, AssessmentFilter::Course(_)));
}

#[rstest]
#[case(json!({"student_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}), "score")]
#[case(json!({"score": 4.0}), "student_id")]
#[case(json!({"student_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "score": -1.0}), "score")]
#[case(
    json!({"student_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "score": 1.0, "graded_by": "x"}),
    "graded_by"
)]
fn grade_submission_is_validated(#[case] body: Value, #[case] field: &str) {
    let payload: GradeRequest = serde_json::from_value(body).expect("payload shape");

    let err = parse_submission("3fa85f64-5717-4562-b3fc-2c963f66afa6", &payload)
        .expect_err("rejected");
    assert_eq!(err.details().expect("details")["field"], field);
}

#[rstest]
#[actix_web::test]
async fn create_links_outcomes_and_detail_lists_them() {
    let app = actix_test::init_service(in_memory_app()).await;
    let teacher = register(&app, "teacher", "Grace", "Hopper").await;
    let course = create_course(&app, text(&teacher, "id"), "CS101").await;
    let course_id = text(&course, "id");
    let (_, outcome) = call_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/outcomes")
            .set_json(json!({"course_id": course_id, "title": "Recursion"})),
    )
    .await;

    let (status, created) = call_json(
        &app,
        actix_test::TestRequest::post().uri("/api/assessments").set_json(json!({
            "course_id": course_id,
            "title": "Midterm",
            "assessment_type": "exam",
            "max_score": 50,
            "due_date": "2026-11-01T09:00:00Z",
            "created_by": text(&teacher, "id"),
            "learning_outcomes": [
                {"id": text(&outcome, "id"), "weight": 0.5}
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["course_code"], "CS101");
    assert_eq!(created["max_score"], json!(50.0));

    let (status, detail) = call_json(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/assessments/{}", text(&created, "id"))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["creator_last_name"], "Hopper");
    assert_eq!(detail["learning_outcomes"][0]["title"], "Recursion");
    assert_eq!(detail["learning_outcomes"][0]["weight"], json!(0.5));
}

#[rstest]
#[actix_web::test]
async fn unusable_outcome_links_are_skipped_on_create() {
    let app = actix_test::init_service(in_memory_app()).await;
    let teacher = register(&app, "teacher", "Grace", "Hopper").await;
    let course = create_course(&app, text(&teacher, "id"), "CS101").await;

    let (status, created) = call_json(
        &app,
        actix_test::TestRequest::post().uri("/api/assessments").set_json(json!({
            "course_id": text(&course, "id"),
            "title": "Quiz",
            "assessment_type": "quiz",
            "max_score": 10,
            "created_by": text(&teacher, "id"),
            "learning_outcomes": [{"id": "not-a-uuid"}, {"weight": 2.0}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, detail) = call_json(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/assessments/{}", text(&created, "id"))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["learning_outcomes"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn create_for_unknown_course_is_not_found() {
    let app = actix_test::init_service(in_memory_app()).await;
    let teacher = register(&app, "teacher", "Grace", "Hopper").await;

    let (status, body) = call_json(
        &app,
        actix_test::TestRequest::post().uri("/api/assessments").set_json(json!({
            "course_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "title": "Quiz",
            "assessment_type": "quiz",
            "max_score": 10,
            "created_by": text(&teacher, "id"),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Course not found");
}

#[rstest]
#[case(json!({"title": "Quiz", "assessment_type": "quiz"}), "max_score")]
#[case(json!({"title": "Quiz", "assessment_type": "quiz", "max_score": 0}), "max_score")]
#[case(json!({"title": " ", "assessment_type": "quiz", "max_score": 5}), "title")]
#[case(
    json!({"title": "Quiz", "assessment_type": "quiz", "max_score": 5, "due_date": "soon"}),
    "due_date"
)]
#[actix_web::test]
async fn update_rejects_invalid_details(#[case] payload: Value, #[case] field: &str) {
    let app = actix_test::init_service(in_memory_app()).await;

    let (status, body) = call_json(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/assessments/3fa85f64-5717-4562-b3fc-2c963f66afa6")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn student_filter_lists_only_enrolled_courses() {
    let app = actix_test::init_service(in_memory_app()).await;
    let teacher = register(&app, "teacher", "Grace", "Hopper").await;
    let student = register(&app, "student", "Alan", "Turing").await;
    let teacher_id = text(&teacher, "id");
    let mine = create_course(&app, teacher_id, "CS101").await;
    let other = create_course(&app, teacher_id, "CS102").await;
    enroll(&app, text(&mine, "id"), text(&student, "id")).await;
    seed_assessment(&app, text(&mine, "id"), teacher_id, "Quiz 1", 10.0).await;
    seed_assessment(&app, text(&other, "id"), teacher_id, "Quiz 2", 10.0).await;

    let (status, listed) = call_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/assessments?student_id={}", text(&student, "id"))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["title"], "Quiz 1");
    assert_eq!(listed[0]["creator_first_name"], "Grace");
}

#[rstest]
#[actix_web::test]
async fn regrading_overwrites_and_roster_keeps_ungraded_students() {
    let app = actix_test::init_service(in_memory_app()).await;
    let teacher = register(&app, "teacher", "Grace", "Hopper").await;
    let ann = register(&app, "student", "Ann", "Able").await;
    let bob = register(&app, "student", "Bob", "Baker").await;
    let course = create_course(&app, text(&teacher, "id"), "CS101").await;
    let course_id = text(&course, "id");
    enroll(&app, course_id, text(&ann, "id")).await;
    enroll(&app, course_id, text(&bob, "id")).await;
    let quiz = seed_assessment(&app, course_id, text(&teacher, "id"), "Quiz", 40.0).await;
    let quiz_id = text(&quiz, "id");

    grade(&app, quiz_id, text(&ann, "id"), 20.0).await;
    let regraded = grade(&app, quiz_id, text(&ann, "id"), 30.0).await;
    assert_eq!(regraded["percentage"], json!(75.0));
    assert_eq!(regraded["student_first_name"], "Ann");

    let (status, roster) = call_json(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/assessments/{quiz_id}/grades")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(roster.as_array().map(Vec::len), Some(2));
    assert_eq!(roster[0]["student_last_name"], "Able");
    assert_eq!(roster[0]["score"], json!(30.0));
    assert_eq!(roster[1]["student_last_name"], "Baker");
    assert_eq!(roster[1]["score"], Value::Null);
    assert_eq!(roster[1]["max_score"], json!(40.0));
}

#[rstest]
#[actix_web::test]
async fn grading_a_missing_assessment_is_not_found() {
    let app = actix_test::init_service(in_memory_app()).await;
    let student = register(&app, "student", "Alan", "Turing").await;

    let (status, body) = call_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/assessments/3fa85f64-5717-4562-b3fc-2c963f66afa6/grade")
            .set_json(json!({"student_id": text(&student, "id"), "score": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Assessment not found");
}

#[rstest]
#[actix_web::test]
async fn deleted_assessment_is_gone() {
    let app = actix_test::init_service(in_memory_app()).await;
    let teacher = register(&app, "teacher", "Grace", "Hopper").await;
    let course = create_course(&app, text(&teacher, "id"), "CS101").await;
    let quiz = seed_assessment(&app, text(&course, "id"), text(&teacher, "id"), "Quiz", 10.0).await;
    let uri = format!("/api/assessments/{}", text(&quiz, "id"));

    let (status, body) = call_json(&app, actix_test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, _) = call_json(&app, actix_test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
