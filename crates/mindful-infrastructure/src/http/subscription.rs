use async_trait::async_trait;
use mindful_core::Result;
use mindful_core::subscription::{Offerings, Package, SubscriptionInfo, SubscriptionService};
use serde::{Deserialize, Serialize};

use super::ApiClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PurchaseRequest<'a> {
    package_id: &'a str,
    product_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct RestoreResponse {
    restored: bool,
}

#[derive(Debug, Serialize)]
struct CancelRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

/// `SubscriptionService` backed by the REST API.
#[derive(Clone)]
pub struct HttpSubscriptionService {
    api: ApiClient,
}

impl HttpSubscriptionService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SubscriptionService for HttpSubscriptionService {
    async fn get_subscription_status(&self) -> Result<SubscriptionInfo> {
        self.api.get_json("/subscriptions/status").await
    }

    async fn get_offerings(&self) -> Result<Offerings> {
        self.api.get_json("/subscriptions/offerings").await
    }

    async fn purchase_package(&self, package: &Package) -> Result<()> {
        tracing::info!("[HttpSubscriptionService] Purchasing package {}", package.id);
        let body = PurchaseRequest {
            package_id: &package.id,
            product_id: &package.product_id,
        };
        self.api.post("/subscriptions/purchase", &body).await
    }

    async fn restore_purchases(&self) -> Result<bool> {
        let response: RestoreResponse = self
            .api
            .post_json("/subscriptions/restore", &serde_json::json!({}), true)
            .await?;
        Ok(response.restored)
    }

    async fn cancel_subscription(&self, reason: Option<&str>) -> Result<()> {
        self.api
            .post("/subscriptions/cancel", &CancelRequest { reason })
            .await
    }
}
