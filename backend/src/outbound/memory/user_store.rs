//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserAccount, UserId};

/// Accounts keyed by id; emails are unique.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_accounts<T>(
        &self,
        f: impl FnOnce(&mut HashMap<UserId, UserAccount>) -> Result<T, UserPersistenceError>,
    ) -> Result<T, UserPersistenceError> {
        let mut guard = self
            .accounts
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))?;
        f(&mut guard)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        self.with_accounts(|accounts| {
            if accounts
                .values()
                .any(|existing| existing.user.email == account.user.email)
            {
                return Err(UserPersistenceError::duplicate_email(
                    account.user.email.as_ref(),
                ));
            }
            accounts.insert(account.user.id, account.clone());
            Ok(())
        })
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        self.with_accounts(|accounts| {
            Ok(accounts
                .values()
                .find(|account| &account.user.email == email)
                .cloned())
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.with_accounts(|accounts| Ok(accounts.get(id).map(|account| account.user.clone())))
    }
}
