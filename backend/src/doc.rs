//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler plus the health probes, and the
//! error schemas shared by all of them. Request and response bodies are
//! collected from the handlers' `utoipa::path` annotations.
//!
//! The document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student learning outcomes API",
        description = "Courses, enrollments, assessments, grades and learning outcome reports.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::courses::enroll_student,
        crate::inbound::http::courses::unenroll_student,
        crate::inbound::http::assessments::list_assessments,
        crate::inbound::http::assessments::get_assessment,
        crate::inbound::http::assessments::create_assessment,
        crate::inbound::http::assessments::update_assessment,
        crate::inbound::http::assessments::delete_assessment,
        crate::inbound::http::assessments::grade_assessment,
        crate::inbound::http::assessments::list_grades,
        crate::inbound::http::outcomes::list_course_outcomes,
        crate::inbound::http::outcomes::create_outcome,
        crate::inbound::http::outcomes::update_outcome,
        crate::inbound::http::outcomes::delete_outcome,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::get_student_course_progress,
        crate::inbound::http::reports::course_report,
        crate::inbound::http::reports::student_report,
        crate::inbound::http::health::banner,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "auth", description = "Registration and credential checks"),
        (name = "courses", description = "Courses and enrollments"),
        (name = "assessments", description = "Assessments, grading and rosters"),
        (name = "outcomes", description = "Learning outcomes"),
        (name = "students", description = "Student overviews and progress"),
        (name = "reports", description = "Course and student reports"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
