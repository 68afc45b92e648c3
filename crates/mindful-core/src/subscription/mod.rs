//! Subscription domain module.
//!
//! - `model`: tier, status and the derived entitlement
//! - `offering`: purchasable offerings and packages
//! - `service`: the remote subscription contract

mod model;
mod offering;
mod service;

pub use model::{Feature, SubscriptionInfo, SubscriptionStatus, SubscriptionTier};
pub use offering::{BillingPeriod, Offering, Offerings, Package};
pub use service::SubscriptionService;
