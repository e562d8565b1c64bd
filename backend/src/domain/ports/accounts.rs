//! Driving port for account registration and credential checks.
//!
//! Login answers whether the credentials match an account and returns that
//! account. No session or token is issued.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

/// Domain use-case port for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account. Fails with `duplicate_key` when the username or
    /// email is taken.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Match credentials against the stored digest. Any mismatch is
    /// `unauthorized` without saying which part failed.
    async fn login(&self, credentials: LoginCredentials) -> Result<User, Error>;
}
