//! User storage provider traits.

use async_trait::async_trait;
use sso_core::RequestContext;
use sso_model::User;

use crate::error::StorageResult;

/// Persists newly registered users.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait UserSaver: Send + Sync {
    /// Saves a user and returns the assigned ID.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if a user with the same email exists.
    /// The existing record must be left untouched.
    async fn save_user(
        &self,
        ctx: &RequestContext,
        email: &str,
        pass_hash: &[u8],
    ) -> StorageResult<i64>;
}

/// Looks up users.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Gets a user by email.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if no user has this email.
    async fn user(&self, ctx: &RequestContext, email: &str) -> StorageResult<User>;

    /// Gets the admin flag of a user.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the user doesn't exist.
    async fn is_admin(&self, ctx: &RequestContext, user_id: i64) -> StorageResult<bool>;
}
