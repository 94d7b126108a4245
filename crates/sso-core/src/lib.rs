//! # sso-core
//!
//! Core utilities, configuration, and error handling for the SSO auth core.
//!
//! This crate provides the foundational types shared by the storage and
//! authentication crates:
//!
//! - [`Config`] - token lifetime and password hashing cost, loaded from TOML
//! - [`RequestContext`] - per-call cancellation and deadline
//! - [`Error`] - configuration and bootstrap errors

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;

pub use config::{AuthConfig, Config, PasswordConfig};
pub use context::{ContextError, RequestContext};
pub use error::{Error, Result};
