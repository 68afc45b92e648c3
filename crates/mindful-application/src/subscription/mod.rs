//! Subscription state store.
//!
//! Entitlement status and offerings, kept in step with the session through
//! a [`SessionHandle`](crate::session::SessionHandle).

mod snapshot;
mod store;

pub use snapshot::{LoadState, SubscriptionSnapshot};
pub use store::SubscriptionStore;
