//! Infrastructure layer for the Mindful client.
//!
//! HTTP implementations of the core service traits, token persistence and
//! configuration loading.

pub mod config_service;
pub mod http;
pub mod paths;
pub mod token_store;

pub use config_service::ConfigService;
pub use http::{ApiClient, HttpAuthService, HttpMeditationService, HttpSubscriptionService};
pub use paths::MindfulPaths;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
