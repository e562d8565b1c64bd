//! Student listing, overview and per-course progress.
//!
//! ```text
//! GET /api/students
//! GET /api/students/{id}
//! GET /api/students/{id}/courses/{course_id}
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::reporting::{CourseProgress, OutcomeProgress, OverviewStatistics};
use crate::domain::{CourseGradedAssessment, EnrolledCourse, StudentOverview};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    CourseResponse, GradedAssessmentResponse, OutcomeResponse, UserResponse, course_columns,
    timestamp,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_course_id, parse_user_id};

const ID: FieldName = FieldName::new("id");
const COURSE_ID: FieldName = FieldName::new("course_id");

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrolledCourseResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub enrolled_at: String,
}

impl From<EnrolledCourse> for EnrolledCourseResponse {
    fn from(value: EnrolledCourse) -> Self {
        Self {
            course: CourseResponse::from(&value.course),
            enrolled_at: timestamp(value.enrolled_at),
        }
    }
}

/// Graded assessment labelled with its course.
#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewAssessmentResponse {
    #[serde(flatten)]
    pub graded: GradedAssessmentResponse,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
}

impl From<CourseGradedAssessment> for OverviewAssessmentResponse {
    fn from(value: CourseGradedAssessment) -> Self {
        let (course_name, course_code) = course_columns(value.course.as_ref());
        Self {
            graded: GradedAssessmentResponse::from(&value.graded),
            course_name,
            course_code,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewStatisticsResponse {
    pub total_assessments: usize,
    pub graded_assessments: usize,
    pub average_score: Option<f64>,
    pub average_percentage: Option<f64>,
}

impl From<OverviewStatistics> for OverviewStatisticsResponse {
    fn from(value: OverviewStatistics) -> Self {
        Self {
            total_assessments: value.total_assessments,
            graded_assessments: value.graded_assessments,
            average_score: value.average_score,
            average_percentage: value.average_percentage,
        }
    }
}

/// A student's courses, graded assessments and totals.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentOverviewResponse {
    #[serde(flatten)]
    pub student: UserResponse,
    pub courses: Vec<EnrolledCourseResponse>,
    pub assessments: Vec<OverviewAssessmentResponse>,
    pub statistics: OverviewStatisticsResponse,
}

impl From<StudentOverview> for StudentOverviewResponse {
    fn from(value: StudentOverview) -> Self {
        Self {
            student: UserResponse::from(value.student),
            courses: value
                .courses
                .into_iter()
                .map(EnrolledCourseResponse::from)
                .collect(),
            assessments: value
                .assessments
                .into_iter()
                .map(OverviewAssessmentResponse::from)
                .collect(),
            statistics: value.statistics.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OutcomeProgressResponse {
    #[serde(flatten)]
    pub outcome: OutcomeResponse,
    pub average_percentage: Option<f64>,
    pub assessments_count: usize,
}

impl From<&OutcomeProgress> for OutcomeProgressResponse {
    fn from(value: &OutcomeProgress) -> Self {
        Self {
            outcome: OutcomeResponse::from(&value.outcome),
            average_percentage: value.average_percentage,
            assessments_count: value.assessments_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseProgressResponse {
    pub course: CourseResponse,
    pub assessments: Vec<GradedAssessmentResponse>,
    pub learning_outcomes: Vec<OutcomeProgressResponse>,
}

impl From<CourseProgress> for CourseProgressResponse {
    fn from(value: CourseProgress) -> Self {
        Self {
            course: CourseResponse::from(&value.course),
            assessments: value
                .assessments
                .iter()
                .map(GradedAssessmentResponse::from)
                .collect(),
            learning_outcomes: value
                .learning_outcomes
                .iter()
                .map(OutcomeProgressResponse::from)
                .collect(),
        }
    }
}

/// Every student account, ordered by last then first name.
#[utoipa::path(
    get,
    path = "/api/students",
    responses((status = 200, description = "Students", body = [UserResponse])),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let students = state.students.list_students().await?;
    Ok(web::Json(students.iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student overview", body = StudentOverviewResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentOverviewResponse>> {
    let student_id = parse_user_id(&path, ID)?;
    let overview = state.students.student_overview(&student_id).await?;
    Ok(web::Json(StudentOverviewResponse::from(overview)))
}

/// Grades and learning outcome progress for one enrolled course.
#[utoipa::path(
    get,
    path = "/api/students/{id}/courses/{course_id}",
    params(
        ("id" = String, Path, description = "Student id"),
        ("course_id" = String, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Course progress", body = CourseProgressResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Not enrolled or course not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudentCourseProgress"
)]
#[get("/students/{id}/courses/{course_id}")]
pub async fn get_student_course_progress(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<CourseProgressResponse>> {
    let (raw_student, raw_course) = path.into_inner();
    let student_id = parse_user_id(&raw_student, ID)?;
    let course_id = parse_course_id(&raw_course, COURSE_ID)?;
    let progress = state
        .reports
        .student_course_progress(&student_id, &course_id)
        .await?;
    Ok(web::Json(CourseProgressResponse::from(progress)))
}
