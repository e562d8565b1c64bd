//! Account registration and login.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::try_join;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{AccountCommand, UserAccount, UserRepository};
use crate::domain::service_support::map_repository_error;
use crate::domain::{Error, LoginCredentials, PasswordDigest, Registration, User, UserId};

const ACCOUNT_EXISTS: &str = "Username or email already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Account service implementing [`AccountCommand`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountService<U> {
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    async fn find_by_login(&self, login: &str) -> Result<Option<UserAccount>, Error> {
        let map = map_repository_error(ACCOUNT_EXISTS);
        if let Some(account) = self
            .users
            .find_account_by_username(login)
            .await
            .map_err(&map)?
        {
            return Ok(Some(account));
        }
        self.users.find_account_by_email(login).await.map_err(map)
    }
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let map = map_repository_error(ACCOUNT_EXISTS);
        let (by_username, by_email) = try_join!(
            self.users.find_account_by_username(registration.username()),
            self.users.find_account_by_email(registration.email()),
        )
        .map_err(&map)?;
        if by_username.is_some() || by_email.is_some() {
            return Err(Error::duplicate_key(ACCOUNT_EXISTS));
        }

        let account = UserAccount {
            user: User {
                id: UserId::random(),
                username: registration.username().to_owned(),
                email: registration.email().to_owned(),
                role: registration.role(),
                first_name: registration.first_name().to_owned(),
                last_name: registration.last_name().to_owned(),
                created_at: self.clock.utc(),
            },
            password_digest: PasswordDigest::derive(registration.password()),
        };
        // The pre-check can race; the store's unique constraints decide.
        let user = self.users.insert(&account).await.map_err(map)?;
        info!(user_id = %user.id, role = %user.role, "account registered");
        Ok(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<User, Error> {
        let Some(account) = self.find_by_login(credentials.login()).await? else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        if !account.password_digest.verify(credentials.password()) {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
