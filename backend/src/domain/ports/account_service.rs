//! Driving port for owner sign-up, sign-in and identity lookups.
//!
//! Inbound adapters call this port with validated inputs and keep the
//! resulting [`UserId`] in the session; they never see password hashes.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account. Duplicate email addresses yield a conflict error.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Check credentials. Unknown emails and wrong passwords are
    /// indistinguishable `unauthorized` errors.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Resolve a session's user id, or `None` when the account is gone.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
