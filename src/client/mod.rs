//! # Console Client Module
//!
//! Lecturer-facing console: a menu loop that validates input with the
//! same grammars as the server before issuing any request.

pub mod console;
pub mod errors;
pub mod transport;

pub use console::{ConsoleAgent, MenuChoice};
pub use errors::{ClientError, ClientResult};
pub use transport::{CourseTransport, HttpTransport, Method, TransportResponse};
