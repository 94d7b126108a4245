//! User domain model.

use serde::{Deserialize, Serialize};

/// A registered user.
///
/// The password hash is opaque PHC-formatted bytes. It is skipped when
/// serializing and redacted from `Debug` output so it never reaches a log
/// line or a response body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier assigned by storage.
    pub id: i64,
    /// Unique login email.
    pub email: String,
    /// Salted one-way password hash.
    #[serde(skip_serializing, default)]
    pub pass_hash: Vec<u8>,
}

impl User {
    /// Creates a new user.
    #[must_use]
    pub fn new(id: i64, email: impl Into<String>, pass_hash: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            email: email.into(),
            pass_hash: pass_hash.into(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("pass_hash", &"[REDACTED]")
            .finish()
    }
}
