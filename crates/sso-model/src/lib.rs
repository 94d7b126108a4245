//! # sso-model
//!
//! Domain models for the SSO auth core.
//!
//! - [`User`] - an identity that can log in with an email and password
//! - [`App`] - a tenant application that tokens are issued for

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod app;
pub mod user;

pub use app::App;
pub use user::User;
