//! Owner account service: registration, password sign-in and lookups.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountService, CredentialHashError, CredentialHasher, UserPersistenceError, UserRepository,
};
use crate::domain::{
    EmailAddress, Error, LoginCredentials, Registration, User, UserAccount, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => email_taken(),
    }
}

fn map_hash_error(error: CredentialHashError) -> Error {
    Error::internal(error.to_string())
}

fn email_taken() -> Error {
    Error::conflict("an account with this email already exists")
}

/// [`AccountService`] backed by a user repository and a password hasher.
#[derive(Clone)]
pub struct PasswordAccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, H> PasswordAccountService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

impl<U, H> PasswordAccountService<U, H>
where
    H: CredentialHasher + 'static,
{
    /// Run the hasher on the blocking pool; argon2 is deliberately slow.
    async fn on_hasher<T, F>(&self, work: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&H) -> Result<T, CredentialHashError> + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || work(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hash_error)
    }
}

#[async_trait]
impl<U, H> AccountService for PasswordAccountService<U, H>
where
    U: UserRepository,
    H: CredentialHasher + 'static,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(email_taken());
        }

        let password = Zeroizing::new(registration.password().to_owned());
        let password_hash = self
            .on_hasher(move |hasher| hasher.hash(password.as_str()))
            .await?;

        let user = User {
            id: UserId::random(),
            name: registration.name().clone(),
            email: registration.email().clone(),
            created_at: self.clock.utc(),
        };
        self.users
            .insert(&UserAccount {
                user: user.clone(),
                password_hash,
            })
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %user.id, "registered owner account");
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let account = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let password = Zeroizing::new(credentials.password().to_owned());
        let stored_hash = account.password_hash.clone();
        let verified = self
            .on_hasher(move |hasher| hasher.verify(password.as_str(), &stored_hash))
            .await?;
        if !verified {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.user)
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
