//! Tenant application model.

use serde::{Deserialize, Serialize};

/// A tenant application registered with the SSO system.
///
/// Every access token is issued on behalf of exactly one application and is
/// signed with that application's secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// Unique identifier.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Symmetric signing secret.
    #[serde(skip_serializing, default)]
    pub secret: String,
}

impl App {
    /// Creates a new application.
    #[must_use]
    pub fn new(id: i32, name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
