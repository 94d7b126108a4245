//! Authentication error types.
//!
//! Every failure is classified exactly once into an [`AuthError`] variant and
//! tagged with the operation that produced it. Callers branch on
//! [`AuthError::kind`] instead of matching messages.

use sso_core::ContextError;
use sso_storage::StorageError;
use thiserror::Error;

use crate::password::PasswordError;
use crate::token::TokenError;

/// Operation names attached to errors and spans.
pub mod op {
    /// Login with email and password.
    pub const LOGIN: &str = "auth.login";
    /// Registration of a new user.
    pub const REGISTER_NEW_USER: &str = "auth.register_new_user";
    /// Admin flag lookup.
    pub const IS_ADMIN: &str = "auth.is_admin";
}

/// Authentication operation errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The password did not match the stored hash.
    #[error("{op}: invalid credentials")]
    InvalidCredentials {
        /// Operation that failed.
        op: &'static str,
    },

    /// A referenced user could not be resolved.
    #[error("{op}: invalid request")]
    InvalidRequest {
        /// Operation that failed.
        op: &'static str,
    },

    /// The requesting application does not exist.
    #[error("{op}: app not found")]
    AppNotFound {
        /// Operation that failed.
        op: &'static str,
    },

    /// A user with this email is already registered.
    #[error("{op}: user already exists")]
    UserExists {
        /// Operation that failed.
        op: &'static str,
    },

    /// Unexpected collaborator, hashing, or signing failure.
    #[error("{op}: {source}")]
    Internal {
        /// Operation that failed.
        op: &'static str,
        /// Underlying cause.
        #[source]
        source: InternalError,
    },
}

/// Causes of [`AuthError::Internal`].
#[derive(Debug, Error)]
pub enum InternalError {
    /// Storage backend failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Password hashing failure.
    #[error(transparent)]
    Password(#[from] PasswordError),
    /// Token signing failure.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// The request was cancelled or timed out.
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Classification tag of an [`AuthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// See [`AuthError::InvalidCredentials`].
    InvalidCredentials,
    /// See [`AuthError::InvalidRequest`].
    InvalidRequest,
    /// See [`AuthError::AppNotFound`].
    AppNotFound,
    /// See [`AuthError::UserExists`].
    UserExists,
    /// See [`AuthError::Internal`].
    Internal,
}

impl AuthError {
    /// Wraps an unexpected failure with the operation name.
    #[must_use]
    pub fn internal(op: &'static str, source: impl Into<InternalError>) -> Self {
        Self::Internal {
            op,
            source: source.into(),
        }
    }

    /// Returns the classification tag.
    #[must_use]
    pub const fn kind(&self) -> AuthErrorKind {
        match self {
            Self::InvalidCredentials { .. } => AuthErrorKind::InvalidCredentials,
            Self::InvalidRequest { .. } => AuthErrorKind::InvalidRequest,
            Self::AppNotFound { .. } => AuthErrorKind::AppNotFound,
            Self::UserExists { .. } => AuthErrorKind::UserExists,
            Self::Internal { .. } => AuthErrorKind::Internal,
        }
    }

    /// Returns the operation that produced this error.
    #[must_use]
    pub const fn op(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { op }
            | Self::InvalidRequest { op }
            | Self::AppNotFound { op }
            | Self::UserExists { op }
            | Self::Internal { op, .. } => *op,
        }
    }

    /// Returns whether the caller, not the server, is at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }

    /// Returns a message that is safe to show to end users.
    ///
    /// An unknown email and a wrong password produce the same message at
    /// login so responses do not reveal which accounts exist.
    #[must_use]
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "invalid email or password",
            Self::InvalidRequest { op } if *op == op::LOGIN => "invalid email or password",
            Self::InvalidRequest { .. } => "invalid request",
            Self::AppNotFound { .. } => "app not found",
            Self::UserExists { .. } => "user already exists",
            Self::Internal { .. } => "internal error",
        }
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
