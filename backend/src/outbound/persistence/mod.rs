//! PostgreSQL persistence adapters built on Diesel.
//!
//! Each repository translates between internal row structs (`models`,
//! `schema`) and domain types; none of them holds business rules. Connections
//! come from a `bb8` pool driven by `diesel-async`.
//!
//! ```ignore
//! use slo_backend::outbound::persistence::{DbPool, DieselCourseRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/school")).await?;
//! let courses = DieselCourseRepository::new(pool);
//! ```

mod diesel_assessment_repository;
mod diesel_course_repository;
mod diesel_error_mapping;
mod diesel_grade_repository;
mod diesel_learning_outcome_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_assessment_repository::DieselAssessmentRepository;
pub use diesel_course_repository::{DieselCourseRepository, DieselEnrollmentRepository};
pub use diesel_grade_repository::DieselGradeRepository;
pub use diesel_learning_outcome_repository::DieselLearningOutcomeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
