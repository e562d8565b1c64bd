//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use serde_json::Value;

use crate::Trace;
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, Repositories};
use crate::outbound::memory::InMemoryStore;

/// HTTP state wired to a fresh in-memory store.
pub fn in_memory_state(store: Arc<InMemoryStore>) -> HttpState {
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

/// Every `/api` route over an empty in-memory store.
pub fn in_memory_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = in_memory_state(Arc::new(InMemoryStore::new()));
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(api_scope())
}

/// Send `request` and decode the JSON body; an empty body decodes to `null`.
pub async fn call_json<S, B>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, body)
}

/// Read a string field that must be present.
pub fn text<'a>(value: &'a Value, field: &str) -> &'a str {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("{field} missing from {value}"))
}

/// Register an account through the API and return its JSON body.
pub async fn register<S, B>(app: &S, role: &str, first_name: &str, last_name: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let username = format!("{first_name}.{last_name}").to_lowercase();
    let (status, body) = call_json(
        app,
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({
                "username": username,
                "email": format!("{username}@school.test"),
                "password": "correct horse",
                "role": role,
                "first_name": first_name,
                "last_name": last_name,
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register {username}: {body}");
    body
}

/// Create a course owned by `teacher_id` and return its JSON body.
pub async fn create_course<S, B>(app: &S, teacher_id: &str, code: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = call_json(
        app,
        actix_test::TestRequest::post()
            .uri("/api/courses")
            .set_json(serde_json::json!({
                "name": format!("Course {code}"),
                "code": code,
                "teacher_id": teacher_id,
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create course {code}: {body}");
    body
}

/// Enrol `student_id` in `course_id`.
pub async fn enroll<S, B>(app: &S, course_id: &str, student_id: &str)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = call_json(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/courses/{course_id}/enroll"))
            .set_json(serde_json::json!({ "student_id": student_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "enroll: {body}");
}

/// Create an assessment and return its JSON body.
pub async fn create_assessment<S, B>(
    app: &S,
    course_id: &str,
    created_by: &str,
    title: &str,
    max_score: f64,
) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = call_json(
        app,
        actix_test::TestRequest::post()
            .uri("/api/assessments")
            .set_json(serde_json::json!({
                "course_id": course_id,
                "title": title,
                "assessment_type": "quiz",
                "max_score": max_score,
                "created_by": created_by,
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create assessment {title}: {body}");
    body
}

/// Record a grade and return the response body.
pub async fn grade<S, B>(app: &S, assessment_id: &str, student_id: &str, score: f64) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = call_json(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/assessments/{assessment_id}/grade"))
            .set_json(serde_json::json!({ "student_id": student_id, "score": score })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "grade: {body}");
    body
}
