//! In-memory storage backend.
//!
//! Keeps users and applications in process memory. Suitable for tests and
//! local wiring; nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use sso_core::RequestContext;
use sso_model::{App, User};
use tokio::sync::RwLock;

use crate::app::AppProvider;
use crate::error::{StorageError, StorageResult};
use crate::user::{UserProvider, UserSaver};

#[derive(Debug)]
struct StoredUser {
    user: User,
    is_admin: bool,
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<i64, StoredUser>,
    emails: HashMap<String, i64>,
    apps: HashMap<i32, App>,
    last_user_id: i64,
}

/// In-memory implementation of every storage provider trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a tenant application.
    pub async fn add_app(&self, app: App) {
        self.tables.write().await.apps.insert(app.id, app);
    }

    /// Sets the admin flag of an existing user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user doesn't exist.
    pub async fn set_admin(&self, user_id: i64, is_admin: bool) -> StorageResult<()> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| StorageError::not_found("User", user_id))?;
        stored.is_admin = is_admin;
        Ok(())
    }

    /// Returns the number of stored users.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl UserSaver for MemoryStore {
    async fn save_user(
        &self,
        ctx: &RequestContext,
        email: &str,
        pass_hash: &[u8],
    ) -> StorageResult<i64> {
        let mut tables = ctx.guard(self.tables.write()).await?;

        if tables.emails.contains_key(email) {
            return Err(StorageError::duplicate("User", "email", email));
        }

        tables.last_user_id += 1;
        let id = tables.last_user_id;

        tables.emails.insert(email.to_string(), id);
        tables.users.insert(
            id,
            StoredUser {
                user: User::new(id, email, pass_hash),
                is_admin: false,
            },
        );

        Ok(id)
    }
}

#[async_trait]
impl UserProvider for MemoryStore {
    async fn user(&self, ctx: &RequestContext, email: &str) -> StorageResult<User> {
        let tables = ctx.guard(self.tables.read()).await?;

        tables
            .emails
            .get(email)
            .and_then(|id| tables.users.get(id))
            .map(|stored| stored.user.clone())
            .ok_or_else(|| StorageError::not_found("User", email))
    }

    async fn is_admin(&self, ctx: &RequestContext, user_id: i64) -> StorageResult<bool> {
        let tables = ctx.guard(self.tables.read()).await?;

        tables
            .users
            .get(&user_id)
            .map(|stored| stored.is_admin)
            .ok_or_else(|| StorageError::not_found("User", user_id))
    }
}

#[async_trait]
impl AppProvider for MemoryStore {
    async fn app(&self, ctx: &RequestContext, app_id: i32) -> StorageResult<App> {
        let tables = ctx.guard(self.tables.read()).await?;

        tables
            .apps
            .get(&app_id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("App", app_id))
    }
}
