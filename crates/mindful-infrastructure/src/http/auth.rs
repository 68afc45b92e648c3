use async_trait::async_trait;
use mindful_core::Result;
use mindful_core::user::{AuthService, Credentials, RegistrationData, User};
use serde::Deserialize;

use super::ApiClient;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// `AuthService` backed by the REST API.
///
/// Tokens issued by login and register are persisted in the client's
/// token store; `logout` always forgets the local token, even when the
/// server call fails.
#[derive(Clone)]
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        tracing::debug!("[HttpAuthService] Logging in {}", credentials.email);
        let response: TokenResponse = self.api.post_json("/auth/login", credentials, false).await?;
        self.api.tokens().save(&response.token).await
    }

    async fn register(&self, data: &RegistrationData) -> Result<()> {
        tracing::debug!("[HttpAuthService] Registering {}", data.email);
        let response: TokenResponse = self.api.post_json("/auth/register", data, false).await?;
        self.api.tokens().save(&response.token).await
    }

    async fn logout(&self) -> Result<()> {
        let remote = match self.api.tokens().load().await {
            Ok(Some(_)) => self.api.post("/auth/logout", &serde_json::json!({})).await,
            Ok(None) => Ok(()),
            Err(e) => {
                tracing::warn!("[HttpAuthService] Stored token unreadable, discarding it: {}", e);
                Ok(())
            }
        };
        self.api.tokens().clear().await?;
        remote
    }

    async fn get_current_user(&self) -> Result<User> {
        self.api.get_json("/auth/me").await
    }

    async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.api.tokens().load().await?.is_some())
    }
}
