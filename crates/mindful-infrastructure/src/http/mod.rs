//! REST clients for the Mindful backend.

mod auth;
mod client;
mod meditation;
mod subscription;

pub use auth::HttpAuthService;
pub use client::ApiClient;
pub use meditation::HttpMeditationService;
pub use subscription::HttpSubscriptionService;
