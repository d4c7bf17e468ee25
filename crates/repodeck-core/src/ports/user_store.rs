//! User store trait definition.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::{NewUser, User};

/// Store for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Returns `Err(StoreError::AlreadyExists)` if the email is taken.
    async fn insert(&self, user: &NewUser) -> Result<User, StoreError>;

    /// Look up a user by email.
    ///
    /// Returns `Err(StoreError::NotFound)` if no such user exists.
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Look up a user by database ID.
    ///
    /// Returns `Err(StoreError::NotFound)` if no such user exists.
    async fn find_by_id(&self, id: i64) -> Result<User, StoreError>;
}
