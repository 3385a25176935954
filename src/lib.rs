//! courselist - a validated course listing REST service with a lecturer console
//!
//! The server keeps course records behind a shared-key REST API; the
//! console agent drives that API from a text menu. Both sides validate
//! input against the same grammars in [`course`].

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod course;
pub mod observability;
pub mod rest_api;
pub mod store;
