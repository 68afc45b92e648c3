//! Domain layer for the Mindful client.
//!
//! Models, remote service contracts, configuration and the shared error
//! type. Nothing here performs I/O; the stores live in
//! `mindful-application` and the HTTP clients in `mindful-infrastructure`.

pub mod config;
pub mod error;
pub mod meditation;
pub mod session;
pub mod subscription;
pub mod user;

// Re-export common error type
pub use error::{MindfulError, Result};
