//! Outbound adapters implementing the repository ports.
//!
//! - **persistence**: PostgreSQL through Diesel and a `bb8` pool.
//! - **memory**: a mutex-guarded in-process store with the same constraints,
//!   used when no database is configured and in scenario tests.

pub mod memory;
pub mod persistence;
