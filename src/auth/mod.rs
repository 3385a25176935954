//! # Auth Module
//!
//! Shared-key gate in front of every course route.

pub mod crypto;
pub mod errors;
pub mod key;

pub use errors::{AuthError, AuthResult};
pub use key::ApiKey;
