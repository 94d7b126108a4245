//! Access token issuance.
//!
//! Tokens are HS256 JWTs signed with the secret of the application they are
//! issued for. The payload carries exactly four claims: `userId`, `email`,
//! `exp`, and `app_id`. Verification is left to the consuming application.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sso_model::{App, User};
use thiserror::Error;

/// Token issuance errors.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The application has no usable signing secret.
    #[error("app {app_id} has an empty signing secret")]
    EmptySecret {
        /// Application whose secret is malformed.
        app_id: i32,
    },
    /// Signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject user ID.
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Subject email.
    pub email: String,
    /// Expiration time (Unix seconds).
    pub exp: i64,
    /// Application the token was issued for.
    pub app_id: i32,
}

impl TokenClaims {
    /// Creates claims for a user and application.
    #[must_use]
    pub fn new(user: &User, app: &App, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            exp: expires_at.timestamp(),
            app_id: app.id,
        }
    }
}

/// Issues access tokens with a fixed lifetime.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    ttl: Duration,
}

impl TokenIssuer {
    /// Creates a new issuer.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Returns the token lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `user`, signed with `app`'s secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is empty or signing fails.
    pub fn issue(&self, user: &User, app: &App) -> TokenResult<String> {
        self.issue_at(user, app, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is empty or signing fails.
    pub fn issue_at(&self, user: &User, app: &App, now: DateTime<Utc>) -> TokenResult<String> {
        if app.secret.is_empty() {
            return Err(TokenError::EmptySecret { app_id: app.id });
        }

        let claims = TokenClaims::new(user, app, self.expires_at(now));
        let key = EncodingKey::from_secret(app.secret.as_bytes());

        encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
