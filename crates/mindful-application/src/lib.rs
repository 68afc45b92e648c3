//! Application layer for the Mindful client.
//!
//! The state stores the app reads from, and their composition. Each store
//! wraps remote service contracts from `mindful-core`; concrete clients are
//! injected by the host.

pub mod meditation;
pub mod providers;
pub mod session;
pub mod subscription;
pub mod theme;

#[cfg(test)]
mod testing;

pub use providers::{AppProviders, RemoteServices};
pub use session::{SessionHandle, SessionStore};
pub use subscription::{LoadState, SubscriptionSnapshot, SubscriptionStore};
pub use theme::ThemeStore;
