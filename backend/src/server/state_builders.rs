//! Build the shared HTTP state over the configured storage.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use slo_backend::inbound::http::state::{HttpState, Repositories};
use slo_backend::outbound::memory::InMemoryStore;
use slo_backend::outbound::persistence::{
    DbPool, DieselAssessmentRepository, DieselCourseRepository, DieselEnrollmentRepository,
    DieselGradeRepository, DieselLearningOutcomeRepository, DieselUserRepository,
};

use super::ServerConfig;

fn diesel_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    HttpState::from_repositories(
        Repositories {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            courses: Arc::new(DieselCourseRepository::new(pool.clone())),
            enrollments: Arc::new(DieselEnrollmentRepository::new(pool.clone())),
            assessments: Arc::new(DieselAssessmentRepository::new(pool.clone())),
            outcomes: Arc::new(DieselLearningOutcomeRepository::new(pool.clone())),
            grades: Arc::new(DieselGradeRepository::new(pool.clone())),
        },
        clock,
    )
}

fn memory_state(store: Arc<InMemoryStore>, clock: Arc<dyn Clock>) -> HttpState {
    HttpState::from_repositories(
        Repositories {
            users: store.clone(),
            courses: store.clone(),
            enrollments: store.clone(),
            assessments: store.clone(),
            outcomes: store.clone(),
            grades: store,
        },
        clock,
    )
}

/// Diesel repositories when a pool is configured, otherwise a fresh
/// in-memory store whose data is lost on exit.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => diesel_state(pool, clock),
        None => {
            warn!("no database configured; using the in-memory store");
            memory_state(Arc::new(InMemoryStore::new()), clock)
        }
    };
    web::Data::new(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slo_backend::domain::ports::CourseFilter;
    use std::net::{Ipv4Addr, SocketAddr};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn missing_pool_selects_in_memory_store() {
        let config = ServerConfig::new(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)));

        let state = build_http_state(&config);

        let courses = state
            .courses_query
            .list_courses(CourseFilter::All)
            .await
            .expect("in-memory listing succeeds");
        assert!(courses.is_empty());
    }
}
