//! Remote subscription contract.

use async_trait::async_trait;

use super::model::SubscriptionInfo;
use super::offering::{Offerings, Package};
use crate::error::Result;

/// Remote subscription/billing service.
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    async fn get_subscription_status(&self) -> Result<SubscriptionInfo>;

    async fn get_offerings(&self) -> Result<Offerings>;

    async fn purchase_package(&self, package: &Package) -> Result<()>;

    /// Returns whether any previous purchase was restored.
    async fn restore_purchases(&self) -> Result<bool>;

    async fn cancel_subscription(&self, reason: Option<&str>) -> Result<()>;
}
