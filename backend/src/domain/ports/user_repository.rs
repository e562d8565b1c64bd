//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::{PasswordDigest, Role, User, UserId};

use super::RepositoryError;

/// A user together with its stored password digest.
///
/// Only the account service sees this type; every other port deals in [`User`].
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub user: User,
    pub password_digest: PasswordDigest,
}

/// Port for reading and writing accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Fails with [`RepositoryError::DuplicateKey`] when the username or email
    /// is already taken.
    async fn insert(&self, account: &UserAccount) -> Result<User, RepositoryError>;

    /// Fetch one user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch every user whose id is in `ids`. Unknown ids are skipped; order is
    /// unspecified.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError>;

    /// Fetch all users with `role`.
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, RepositoryError>;

    /// Fetch the account with this exact username.
    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, RepositoryError>;

    /// Fetch the account with this exact email.
    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, RepositoryError>;
}
