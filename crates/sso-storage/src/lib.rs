//! # sso-storage
//!
//! Storage abstraction traits for the SSO auth core.
//!
//! The authentication service owns no storage. It consumes these narrow
//! provider interfaces, which concrete backends (SQL, key-value, etc.)
//! implement.
//!
//! ## Provider Traits
//!
//! - [`UserSaver`] - persists newly registered users
//! - [`UserProvider`] - looks up users and their admin flag
//! - [`AppProvider`] - looks up tenant applications
//!
//! [`MemoryStore`] implements all three over in-process maps.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod app;
pub mod error;
pub mod memory;
pub mod user;

pub use app::AppProvider;
pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use user::{UserProvider, UserSaver};
