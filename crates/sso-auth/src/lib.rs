//! # sso-auth
//!
//! Authentication core of the SSO system.
//!
//! This crate verifies user credentials, registers users with salted password
//! hashes, issues signed access tokens scoped to a tenant application, and
//! resolves a user's admin flag.
//!
//! ## Components
//!
//! - [`PasswordHasherService`] - Argon2id hashing with a tunable cost policy
//! - [`TokenIssuer`] - HS256 access tokens signed with the application secret
//! - [`AuthService`] - login, registration, and admin checks over injected
//!   storage providers
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use sso_auth::AuthService;
//! use sso_core::RequestContext;
//! use sso_storage::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let auth = AuthService::new(
//!     tracing::Span::current(),
//!     store.clone(),
//!     store.clone(),
//!     store,
//!     Duration::from_secs(3600),
//! );
//!
//! let ctx = RequestContext::new();
//! let user_id = auth.register_new_user(&ctx, "alice@example.com", "hunter2").await?;
//! let token = auth.login(&ctx, "alice@example.com", "hunter2", 1).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use error::{op, AuthError, AuthErrorKind, AuthResult, InternalError};
pub use password::{PasswordError, PasswordHasherService, PasswordPolicy};
pub use service::AuthService;
pub use token::{TokenClaims, TokenError, TokenIssuer};
