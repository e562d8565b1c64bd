//! Course catalogue and enrollment handlers.
//!
//! ```text
//! GET    /api/courses?teacher_id&student_id
//! GET    /api/courses/{id}
//! POST   /api/courses
//! PUT    /api/courses/{id}
//! DELETE /api/courses/{id}
//! POST   /api/courses/{id}/enroll
//! DELETE /api/courses/{id}/enroll/{student_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CourseFilter, NewCourse};
use crate::domain::{
    CourseDetail, CourseDetails, CourseSummary, CourseValidationError, CourseWithTeacher,
    EnrolledStudent, Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    CourseResponse, OutcomeResponse, SuccessResponse, UserResponse, name_columns, timestamp,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, parse_course_id, parse_user_id, require,
};

const ID: FieldName = FieldName::new("id");
const TEACHER_ID: FieldName = FieldName::new("teacher_id");
const STUDENT_ID: FieldName = FieldName::new("student_id");

/// Listing filters. `teacher_id` wins when both are supplied.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CourseListQuery {
    pub teacher_id: Option<String>,
    pub student_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CourseRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    /// Owner; required on create, ignored on update.
    pub teacher_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct EnrollRequest {
    pub student_id: Option<String>,
}

/// Course with its owner's name.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseWithTeacherResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub teacher_first_name: Option<String>,
    pub teacher_last_name: Option<String>,
}

impl From<CourseWithTeacher> for CourseWithTeacherResponse {
    fn from(value: CourseWithTeacher) -> Self {
        let (teacher_first_name, teacher_last_name) = name_columns(value.teacher.as_ref());
        Self {
            course: CourseResponse::from(&value.course),
            teacher_first_name,
            teacher_last_name,
        }
    }
}

/// Course list row.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseSummaryResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub teacher_first_name: Option<String>,
    pub teacher_last_name: Option<String>,
    pub enrolled_students: usize,
}

impl From<CourseSummary> for CourseSummaryResponse {
    fn from(value: CourseSummary) -> Self {
        let (teacher_first_name, teacher_last_name) = name_columns(value.teacher.as_ref());
        Self {
            course: CourseResponse::from(&value.course),
            teacher_first_name,
            teacher_last_name,
            enrolled_students: value.enrolled_students,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrolledStudentResponse {
    #[serde(flatten)]
    pub student: UserResponse,
    pub enrolled_at: String,
}

impl From<EnrolledStudent> for EnrolledStudentResponse {
    fn from(value: EnrolledStudent) -> Self {
        Self {
            student: UserResponse::from(value.student),
            enrolled_at: timestamp(value.enrolled_at),
        }
    }
}

/// Course with roster and learning outcomes.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub teacher_first_name: Option<String>,
    pub teacher_last_name: Option<String>,
    pub students: Vec<EnrolledStudentResponse>,
    pub learning_outcomes: Vec<OutcomeResponse>,
}

impl From<CourseDetail> for CourseDetailResponse {
    fn from(value: CourseDetail) -> Self {
        let (teacher_first_name, teacher_last_name) = name_columns(value.teacher.as_ref());
        Self {
            course: CourseResponse::from(&value.course),
            teacher_first_name,
            teacher_last_name,
            students: value
                .students
                .into_iter()
                .map(EnrolledStudentResponse::from)
                .collect(),
            learning_outcomes: value.learning_outcomes.iter().map(OutcomeResponse::from).collect(),
        }
    }
}

fn map_course_validation(err: CourseValidationError) -> Error {
    invalid_field_error(FieldName::new(err.field()), err.to_string())
}

fn parse_details(payload: &CourseRequest) -> Result<CourseDetails, Error> {
    CourseDetails::try_new(
        payload.name.as_deref().unwrap_or_default(),
        payload.code.as_deref().unwrap_or_default(),
        payload.description.as_deref(),
    )
    .map_err(map_course_validation)
}

fn parse_filter(query: &CourseListQuery) -> Result<CourseFilter, Error> {
    if let Some(teacher_id) = query.teacher_id.as_deref() {
        return parse_user_id(teacher_id, TEACHER_ID).map(CourseFilter::Teacher);
    }
    if let Some(student_id) = query.student_id.as_deref() {
        return parse_user_id(student_id, STUDENT_ID).map(CourseFilter::Student);
    }
    Ok(CourseFilter::All)
}

/// List courses, newest first.
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseListQuery),
    responses(
        (status = 200, description = "Courses", body = [CourseSummaryResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    query: web::Query<CourseListQuery>,
) -> ApiResult<web::Json<Vec<CourseSummaryResponse>>> {
    let filter = parse_filter(&query)?;
    let courses = state.courses_query.list_courses(filter).await?;
    Ok(web::Json(
        courses.into_iter().map(CourseSummaryResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course detail", body = CourseDetailResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseDetailResponse>> {
    let course_id = parse_course_id(&path, ID)?;
    let detail = state.courses_query.course_detail(&course_id).await?;
    Ok(web::Json(CourseDetailResponse::from(detail)))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseWithTeacherResponse),
        (status = 400, description = "Invalid request or duplicate code", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let details = parse_details(&payload)?;
    let teacher_id = parse_user_id(
        require(payload.teacher_id.as_deref(), TEACHER_ID)?,
        TEACHER_ID,
    )?;
    let created = state
        .courses
        .create_course(NewCourse {
            details,
            teacher_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(CourseWithTeacherResponse::from(created)))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseWithTeacherResponse),
        (status = 400, description = "Invalid request or duplicate code", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<web::Json<CourseWithTeacherResponse>> {
    let course_id = parse_course_id(&path, ID)?;
    let details = parse_details(&payload)?;
    let updated = state.courses.update_course(&course_id, details).await?;
    Ok(web::Json(CourseWithTeacherResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course deleted", body = SuccessResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let course_id = parse_course_id(&path, ID)?;
    state.courses.delete_course(&course_id).await?;
    Ok(web::Json(SuccessResponse::ok()))
}

/// Enrol a student in a course.
#[utoipa::path(
    post,
    path = "/api/courses/{id}/enroll",
    params(("id" = String, Path, description = "Course id")),
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Student enrolled", body = SuccessResponse),
        (status = 400, description = "Invalid request or already enrolled", body = ErrorSchema),
        (status = 404, description = "Course or student not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "enrollStudent"
)]
#[post("/courses/{id}/enroll")]
pub async fn enroll_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<EnrollRequest>,
) -> ApiResult<HttpResponse> {
    let course_id = parse_course_id(&path, ID)?;
    let student_id =
        parse_user_id(require(payload.student_id.as_deref(), STUDENT_ID)?, STUDENT_ID)?;
    state.courses.enroll(&course_id, &student_id).await?;
    Ok(HttpResponse::Created().json(SuccessResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}/enroll/{student_id}",
    params(
        ("id" = String, Path, description = "Course id"),
        ("student_id" = String, Path, description = "Student id")
    ),
    responses(
        (status = 200, description = "Student unenrolled", body = SuccessResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "unenrollStudent"
)]
#[delete("/courses/{id}/enroll/{student_id}")]
pub async fn unenroll_student(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let (raw_course, raw_student) = path.into_inner();
    let course_id = parse_course_id(&raw_course, ID)?;
    let student_id = parse_user_id(&raw_student, STUDENT_ID)?;
    state.courses.unenroll(&course_id, &student_id).await?;
    Ok(web::Json(SuccessResponse::ok()))
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
