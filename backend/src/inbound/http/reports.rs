//! Course and student performance reports.
//!
//! ```text
//! GET /api/reports/course/{course_id}
//! GET /api/reports/student/{student_id}
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::reporting::{
    CoursePerformance, CourseReport, CourseStatistics, OverallStatistics, StudentCourseReport,
    StudentCourseStats, StudentReport,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    AssessmentResponse, CourseResponse, GradedAssessmentResponse, UserResponse, timestamp,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_course_id, parse_user_id};

const COURSE_ID: FieldName = FieldName::new("course_id");
const STUDENT_ID: FieldName = FieldName::new("student_id");

fn graded_rows<'a>(
    rows: impl IntoIterator<Item = &'a crate::domain::reporting::GradedAssessment>,
) -> Vec<GradedAssessmentResponse> {
    rows.into_iter().map(GradedAssessmentResponse::from).collect()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentCourseStatsResponse {
    #[serde(flatten)]
    pub student: UserResponse,
    /// One entry per course assessment; ungraded entries carry nulls.
    pub grades: Vec<GradedAssessmentResponse>,
    pub total_score: f64,
    pub total_max_score: f64,
    pub average_percentage: Option<f64>,
    pub completed_assessments: usize,
    pub total_assessments: usize,
}

impl From<&StudentCourseStats> for StudentCourseStatsResponse {
    fn from(value: &StudentCourseStats) -> Self {
        Self {
            student: UserResponse::from(&value.student),
            grades: graded_rows(&value.grades),
            total_score: value.total_score,
            total_max_score: value.total_max_score,
            average_percentage: value.average_percentage,
            completed_assessments: value.completed_assessments,
            total_assessments: value.total_assessments,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseStatisticsResponse {
    pub total_students: usize,
    pub total_assessments: usize,
    pub course_average: f64,
    /// Percent of (student, assessment) pairs with a score.
    pub completion_rate: f64,
}

impl From<CourseStatistics> for CourseStatisticsResponse {
    fn from(value: CourseStatistics) -> Self {
        Self {
            total_students: value.total_students,
            total_assessments: value.total_assessments,
            course_average: value.course_average,
            completion_rate: value.completion_rate,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseReportResponse {
    pub course: CourseResponse,
    pub assessments: Vec<AssessmentResponse>,
    pub students: Vec<StudentCourseStatsResponse>,
    pub statistics: CourseStatisticsResponse,
}

impl From<CourseReport> for CourseReportResponse {
    fn from(value: CourseReport) -> Self {
        Self {
            course: CourseResponse::from(&value.course),
            assessments: value.assessments.iter().map(AssessmentResponse::from).collect(),
            students: value
                .students
                .iter()
                .map(StudentCourseStatsResponse::from)
                .collect(),
            statistics: value.statistics.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoursePerformanceResponse {
    pub total_assessments: usize,
    pub completed: usize,
    pub average_percentage: Option<f64>,
    pub total_score: f64,
    pub total_max_score: f64,
}

impl From<CoursePerformance> for CoursePerformanceResponse {
    fn from(value: CoursePerformance) -> Self {
        Self {
            total_assessments: value.total_assessments,
            completed: value.completed,
            average_percentage: value.average_percentage,
            total_score: value.total_score,
            total_max_score: value.total_max_score,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentCourseReportResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub enrolled_at: String,
    pub assessments: Vec<GradedAssessmentResponse>,
    pub performance: CoursePerformanceResponse,
}

impl From<&StudentCourseReport> for StudentCourseReportResponse {
    fn from(value: &StudentCourseReport) -> Self {
        Self {
            course: CourseResponse::from(&value.course),
            enrolled_at: timestamp(value.enrolled_at),
            assessments: graded_rows(&value.assessments),
            performance: value.performance.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverallStatisticsResponse {
    pub total_courses: usize,
    pub total_assessments: usize,
    pub completed_assessments: usize,
    pub overall_average: Option<f64>,
}

impl From<OverallStatistics> for OverallStatisticsResponse {
    fn from(value: OverallStatistics) -> Self {
        Self {
            total_courses: value.total_courses,
            total_assessments: value.total_assessments,
            completed_assessments: value.completed_assessments,
            overall_average: value.overall_average,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentReportResponse {
    pub student: UserResponse,
    pub courses: Vec<StudentCourseReportResponse>,
    pub overall_statistics: OverallStatisticsResponse,
}

impl From<StudentReport> for StudentReportResponse {
    fn from(value: StudentReport) -> Self {
        Self {
            student: UserResponse::from(&value.student),
            courses: value
                .courses
                .iter()
                .map(StudentCourseReportResponse::from)
                .collect(),
            overall_statistics: value.overall_statistics.into(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/reports/course/{course_id}",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course report", body = CourseReportResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "courseReport"
)]
#[get("/reports/course/{course_id}")]
pub async fn course_report(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseReportResponse>> {
    let course_id = parse_course_id(&path, COURSE_ID)?;
    let report = state.reports.course_report(&course_id).await?;
    Ok(web::Json(CourseReportResponse::from(report)))
}

#[utoipa::path(
    get,
    path = "/api/reports/student/{student_id}",
    params(("student_id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student report", body = StudentReportResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "studentReport"
)]
#[get("/reports/student/{student_id}")]
pub async fn student_report(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentReportResponse>> {
    let student_id = parse_user_id(&path, STUDENT_ID)?;
    let report = state.reports.student_report(&student_id).await?;
    Ok(web::Json(StudentReportResponse::from(report)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{
        call_json, create_assessment, create_course, enroll, grade, in_memory_app, register, text,
    };
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn student_row<'a>(report: &'a Value, last_name: &str) -> &'a Value {
        report["students"]
            .as_array()
            .and_then(|rows| rows.iter().find(|row| row["last_name"] == last_name))
            .unwrap_or_else(|| panic!("{last_name} missing from report"))
    }

    #[rstest]
    #[actix_web::test]
    async fn course_report_averages_completed_grades_only() {
        let app = actix_test::init_service(in_memory_app()).await;
        let teacher = register(&app, "teacher", "Grace", "Hopper").await;
        let ann = register(&app, "student", "Ann", "Able").await;
        let bob = register(&app, "student", "Bob", "Baker").await;
        let course = create_course(&app, text(&teacher, "id"), "CS101").await;
        let course_id = text(&course, "id");
        enroll(&app, course_id, text(&ann, "id")).await;
        enroll(&app, course_id, text(&bob, "id")).await;
        let first = create_assessment(&app, course_id, text(&teacher, "id"), "One", 100.0).await;
        let second = create_assessment(&app, course_id, text(&teacher, "id"), "Two", 100.0).await;
        grade(&app, text(&first, "id"), text(&ann, "id"), 80.0).await;
        grade(&app, text(&second, "id"), text(&ann, "id"), 50.0).await;

        let (status, report) = call_json(
            &app,
            actix_test::TestRequest::get().uri(&format!("/api/reports/course/{course_id}")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["assessments"][0]["title"], "One");
        let ann_row = student_row(&report, "Able");
        assert_eq!(ann_row["average_percentage"], json!(65.0));
        assert_eq!(ann_row["completed_assessments"], json!(2));
        assert_eq!(ann_row["total_score"], json!(130.0));
        let bob_row = student_row(&report, "Baker");
        assert_eq!(bob_row["average_percentage"], Value::Null);
        assert_eq!(bob_row["grades"].as_array().map(Vec::len), Some(2));
        assert_eq!(report["statistics"]["course_average"], json!(65.0));
        assert_eq!(report["statistics"]["completion_rate"], json!(50.0));
        assert_eq!(report["statistics"]["total_students"], json!(2));
    }

    #[rstest]
    #[actix_web::test]
    async fn student_report_sums_across_courses() {
        let app = actix_test::init_service(in_memory_app()).await;
        let teacher = register(&app, "teacher", "Grace", "Hopper").await;
        let ann = register(&app, "student", "Ann", "Able").await;
        let ann_id = text(&ann, "id");
        let teacher_id = text(&teacher, "id");
        let maths = create_course(&app, teacher_id, "MATH1").await;
        let art = create_course(&app, teacher_id, "ART1").await;
        enroll(&app, text(&maths, "id"), ann_id).await;
        enroll(&app, text(&art, "id"), ann_id).await;
        let proof = create_assessment(&app, text(&maths, "id"), teacher_id, "Proof", 10.0).await;
        create_assessment(&app, text(&art, "id"), teacher_id, "Sketch", 10.0).await;
        grade(&app, text(&proof, "id"), ann_id, 9.0).await;

        let (status, report) = call_json(
            &app,
            actix_test::TestRequest::get().uri(&format!("/api/reports/student/{ann_id}")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["student"]["id"], ann_id);
        assert_eq!(report["overall_statistics"]["total_courses"], json!(2));
        assert_eq!(report["overall_statistics"]["total_assessments"], json!(2));
        assert_eq!(report["overall_statistics"]["completed_assessments"], json!(1));
        assert_eq!(report["overall_statistics"]["overall_average"], json!(90.0));
        assert!(report["courses"][0]["enrolled_at"].is_string());
    }

    #[rstest]
    #[case("/api/reports/course/3fa85f64-5717-4562-b3fc-2c963f66afa6", StatusCode::NOT_FOUND)]
    #[case("/api/reports/student/3fa85f64-5717-4562-b3fc-2c963f66afa6", StatusCode::NOT_FOUND)]
    #[case("/api/reports/course/nope", StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn missing_subjects_are_reported(#[case] uri: &str, #[case] expected: StatusCode) {
        let app = actix_test::init_service(in_memory_app()).await;

        let (status, _) = call_json(&app, actix_test::TestRequest::get().uri(uri)).await;

        assert_eq!(status, expected);
    }
}
