//! Application storage provider trait.

use async_trait::async_trait;
use sso_core::RequestContext;
use sso_model::App;

use crate::error::StorageResult;

/// Looks up tenant applications.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait AppProvider: Send + Sync {
    /// Gets an application by ID.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the application doesn't exist.
    async fn app(&self, ctx: &RequestContext, app_id: i32) -> StorageResult<App>;
}
