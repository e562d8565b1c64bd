//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities of the learning-outcomes
//! backend, the ports that connect it to adapters, the pure aggregation
//! engine, and the services implementing the driving ports.
//!
//! Public surface:
//! - Error (alias to `error::DomainError`): transport-agnostic error payload.
//! - Entities: `User`, `Course`, `Enrollment`, `Assessment`,
//!   `LearningOutcome`, `AssessmentOutcome`, `Grade`.
//! - `reporting`: statistics and report assembly.
//! - Services: one per driving port family.

pub mod assessment;
mod assessment_service;
pub mod auth;
mod account_service;
pub mod course;
mod course_service;
pub mod error;
pub mod grade;
mod grading_service;
pub mod ids;
pub mod outcome;
mod outcome_service;
pub mod ports;
mod report_service;
pub mod reporting;
mod service_support;
mod student_service;
pub mod trace_id;
pub mod user;
pub mod views;

pub use self::account_service::AccountService;
pub use self::assessment::{Assessment, AssessmentDetails, AssessmentValidationError};
pub use self::assessment_service::AssessmentService;
pub use self::auth::{
    CredentialsValidationError, LoginCredentials, PasswordDigest, Registration,
    RegistrationParts,
};
pub use self::course::{Course, CourseDetails, CourseValidationError, Enrollment};
pub use self::course_service::CourseService;
pub use self::error::{DomainError, DomainError as Error, ErrorCode, ErrorValidationError};
pub use self::grade::{Grade, GradeAnnotations, InvalidScore, Score};
pub use self::grading_service::GradingService;
pub use self::ids::{AssessmentId, CourseId, InvalidIdError, LearningOutcomeId, UserId};
pub use self::outcome::{
    AssessmentOutcome, DEFAULT_OUTCOME_WEIGHT, EmptyOutcomeTitle, LearningOutcome,
    OutcomeDetails,
};
pub use self::outcome_service::OutcomeService;
pub use self::report_service::ReportService;
pub use self::student_service::StudentService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{ParseRoleError, Role, User};
pub use self::views::{
    AssessmentDetail, AssessmentSummary, AssessmentWithCourse, CourseDetail,
    CourseGradedAssessment, CourseLabel, CourseSummary, CourseWithTeacher, EnrolledCourse,
    EnrolledStudent, PersonName, RecordedGrade, StudentOverview, WeightedOutcome,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use slo_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("course not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
