//! HTTP inbound adapter exposing the REST endpoints under `/api`.

pub mod assessments;
pub mod auth;
pub mod courses;
pub mod dto;
pub mod error;
pub mod health;
pub mod outcomes;
pub mod reports;
pub mod schemas;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// Every resource handler mounted under `/api`.
///
/// Handlers expect a `web::Data<state::HttpState>` registered on the app.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(error::json_config())
        .service(auth::register)
        .service(auth::login)
        .service(courses::list_courses)
        .service(courses::create_course)
        .service(courses::get_course)
        .service(courses::update_course)
        .service(courses::delete_course)
        .service(courses::enroll_student)
        .service(courses::unenroll_student)
        .service(assessments::list_assessments)
        .service(assessments::create_assessment)
        .service(assessments::get_assessment)
        .service(assessments::update_assessment)
        .service(assessments::delete_assessment)
        .service(assessments::grade_assessment)
        .service(assessments::list_grades)
        .service(outcomes::list_course_outcomes)
        .service(outcomes::create_outcome)
        .service(outcomes::update_outcome)
        .service(outcomes::delete_outcome)
        .service(students::list_students)
        .service(students::get_student)
        .service(students::get_student_course_progress)
        .service(reports::course_report)
        .service(reports::student_report)
}
