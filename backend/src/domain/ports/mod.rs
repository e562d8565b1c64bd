//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories) are implemented by the outbound adapters.
//! Driving ports (queries and commands) are implemented by the domain
//! services and called by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts;
mod assessment_repository;
mod assessments;
mod course_repository;
mod courses;
mod grade_repository;
mod grading;
mod learning_outcome_repository;
mod outcomes;
mod reports;
mod repository_error;
mod students;
mod user_repository;

#[cfg(test)]
pub use accounts::MockAccountCommand;
pub use accounts::AccountCommand;
#[cfg(test)]
pub use assessment_repository::MockAssessmentRepository;
pub use assessment_repository::AssessmentRepository;
#[cfg(test)]
pub use assessments::{MockAssessmentCommand, MockAssessmentQuery};
pub use assessments::{
    AssessmentCommand, AssessmentFilter, AssessmentQuery, NewAssessment, OutcomeLinkRequest,
};
#[cfg(test)]
pub use course_repository::{MockCourseRepository, MockEnrollmentRepository};
pub use course_repository::{CourseRepository, EnrollmentRepository};
#[cfg(test)]
pub use courses::{MockCourseCommand, MockCourseQuery};
pub use courses::{CourseCommand, CourseFilter, CourseQuery, NewCourse};
#[cfg(test)]
pub use grade_repository::MockGradeRepository;
pub use grade_repository::GradeRepository;
#[cfg(test)]
pub use grading::{MockGradebookQuery, MockGradingCommand};
pub use grading::{GradeSubmission, GradebookQuery, GradingCommand};
#[cfg(test)]
pub use learning_outcome_repository::MockLearningOutcomeRepository;
pub use learning_outcome_repository::LearningOutcomeRepository;
#[cfg(test)]
pub use outcomes::{MockOutcomeCommand, MockOutcomeQuery};
pub use outcomes::{OutcomeCommand, OutcomeQuery};
#[cfg(test)]
pub use reports::MockReportQuery;
pub use reports::ReportQuery;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use students::MockStudentQuery;
pub use students::StudentQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserAccount, UserRepository};
