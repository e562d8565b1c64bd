//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, AssessmentCommand, AssessmentQuery, AssessmentRepository, CourseCommand,
    CourseQuery, CourseRepository, EnrollmentRepository, GradeRepository, GradebookQuery,
    GradingCommand, LearningOutcomeRepository, OutcomeCommand, OutcomeQuery, ReportQuery,
    StudentQuery, UserRepository,
};
use crate::domain::{
    AccountService, AssessmentService, CourseService, GradingService, OutcomeService,
    ReportService, StudentService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub courses: Arc<dyn CourseCommand>,
    pub courses_query: Arc<dyn CourseQuery>,
    pub assessments: Arc<dyn AssessmentCommand>,
    pub assessments_query: Arc<dyn AssessmentQuery>,
    pub outcomes: Arc<dyn OutcomeCommand>,
    pub outcomes_query: Arc<dyn OutcomeQuery>,
    pub students: Arc<dyn StudentQuery>,
    pub grading: Arc<dyn GradingCommand>,
    pub gradebook: Arc<dyn GradebookQuery>,
    pub reports: Arc<dyn ReportQuery>,
}

/// Driven adapters the services are built over, one per table family.
pub struct Repositories<U, C, E, A, O, G> {
    pub users: Arc<U>,
    pub courses: Arc<C>,
    pub enrollments: Arc<E>,
    pub assessments: Arc<A>,
    pub outcomes: Arc<O>,
    pub grades: Arc<G>,
}

impl HttpState {
    /// Build every domain service over one set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use slo_backend::inbound::http::state::{HttpState, Repositories};
    /// use slo_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_repositories(
    ///     Repositories {
    ///         users: store.clone(),
    ///         courses: store.clone(),
    ///         enrollments: store.clone(),
    ///         assessments: store.clone(),
    ///         outcomes: store.clone(),
    ///         grades: store,
    ///     },
    ///     Arc::new(DefaultClock),
    /// );
    /// let _reports = state.reports.clone();
    /// ```
    pub fn from_repositories<U, C, E, A, O, G>(
        repositories: Repositories<U, C, E, A, O, G>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        C: CourseRepository + 'static,
        E: EnrollmentRepository + 'static,
        A: AssessmentRepository + 'static,
        O: LearningOutcomeRepository + 'static,
        G: GradeRepository + 'static,
    {
        let Repositories {
            users,
            courses,
            enrollments,
            assessments,
            outcomes,
            grades,
        } = repositories;

        let accounts = Arc::new(AccountService::new(users.clone(), clock.clone()));
        let course_service = Arc::new(CourseService::new(
            courses.clone(),
            enrollments.clone(),
            users.clone(),
            outcomes.clone(),
            clock.clone(),
        ));
        let assessment_service = Arc::new(AssessmentService::new(
            assessments.clone(),
            courses.clone(),
            enrollments.clone(),
            users.clone(),
            outcomes.clone(),
            clock.clone(),
        ));
        let outcome_service = Arc::new(OutcomeService::new(
            outcomes.clone(),
            courses.clone(),
            clock.clone(),
        ));
        let students = Arc::new(StudentService::new(
            users.clone(),
            enrollments.clone(),
            courses.clone(),
            assessments.clone(),
            grades.clone(),
        ));
        let grading = Arc::new(GradingService::new(
            assessments.clone(),
            enrollments.clone(),
            users.clone(),
            grades.clone(),
            clock,
        ));
        let reports = Arc::new(ReportService::new(
            users,
            courses,
            enrollments,
            assessments,
            outcomes,
            grades,
        ));

        Self {
            accounts,
            courses: course_service.clone(),
            courses_query: course_service,
            assessments: assessment_service.clone(),
            assessments_query: assessment_service,
            outcomes: outcome_service.clone(),
            outcomes_query: outcome_service,
            students,
            grading: grading.clone(),
            gradebook: grading,
            reports,
        }
    }
}
