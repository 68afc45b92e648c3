use mindful_core::config::ApiSettings;
use mindful_core::{MindfulError, Result};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::token_store::TokenStore;

/// Shared HTTP plumbing for the Mindful API.
///
/// Builds URLs against the configured base, attaches the bearer token for
/// authorized routes and maps HTTP failures onto [`MindfulError`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| MindfulError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path, true).await?;
        let response = self.send(request, path, true).await?;
        Ok(response.json().await?)
    }

    /// POSTs `body` and decodes the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B, authorized: bool) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path, authorized).await?.json(body);
        let response = self.send(request, path, authorized).await?;
        Ok(response.json().await?)
    }

    /// POSTs `body` and ignores the response body.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path, true).await?.json(body);
        self.send(request, path, true).await?;
        Ok(())
    }

    async fn request(&self, method: Method, path: &str, authorized: bool) -> Result<RequestBuilder> {
        let builder = self.client.request(method, self.url(path));
        if !authorized {
            return Ok(builder);
        }
        match self.tokens.load().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Err(MindfulError::NotAuthenticated),
        }
    }

    async fn send(&self, request: RequestBuilder, path: &str, authorized: bool) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!("[ApiClient] {} returned {}: {}", path, status, body);
        Err(error_for_status(status, &body, path, authorized))
    }
}

/// Maps a non-success response onto the error taxonomy.
pub(crate) fn error_for_status(
    status: StatusCode,
    body: &str,
    path: &str,
    authorized: bool,
) -> MindfulError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    match status {
        StatusCode::UNAUTHORIZED if authorized => MindfulError::NotAuthenticated,
        StatusCode::NOT_FOUND => MindfulError::not_found("resource", path),
        StatusCode::BAD_REQUEST
        | StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::CONFLICT
        | StatusCode::UNPROCESSABLE_ENTITY => MindfulError::Validation(message),
        _ => MindfulError::Network(format!("{} ({})", message, status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::MemoryTokenStore;

    fn client(base_url: &str) -> ApiClient {
        let settings = ApiSettings {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        ApiClient::new(&settings, Arc::new(MemoryTokenStore::new())).unwrap()
    }

    #[test]
    fn test_url_joins_cleanly() {
        let api = client("http://localhost:8080/v1/");
        assert_eq!(api.url("/auth/login"), "http://localhost:8080/v1/auth/login");
        assert_eq!(api.url("auth/me"), "http://localhost:8080/v1/auth/me");
    }

    #[test]
    fn test_validation_uses_server_message() {
        let err = error_for_status(
            StatusCode::UNAUTHORIZED,
            r#"{"message":"bad password"}"#,
            "/auth/login",
            false,
        );
        assert_eq!(err, MindfulError::validation("bad password"));
    }

    #[test]
    fn test_unauthorized_on_authorized_route() {
        let err = error_for_status(StatusCode::UNAUTHORIZED, "", "/auth/me", true);
        assert_eq!(err, MindfulError::NotAuthenticated);
    }

    #[test]
    fn test_server_error_is_network() {
        let err = error_for_status(StatusCode::BAD_GATEWAY, "<html>", "/subscriptions/status", true);
        assert_eq!(err, MindfulError::network("Bad Gateway (502)"));
    }

    #[test]
    fn test_not_found_keeps_path() {
        let err = error_for_status(StatusCode::NOT_FOUND, "", "/meditations/x", true);
        assert_eq!(err, MindfulError::not_found("resource", "/meditations/x"));
    }

    #[test]
    fn test_error_field_fallback() {
        let err = error_for_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"error":"email already taken"}"#,
            "/auth/register",
            false,
        );
        assert_eq!(err, MindfulError::validation("email already taken"));
    }

    #[tokio::test]
    async fn test_authorized_request_without_token() {
        let api = client("http://localhost:1");
        let err = api.get_json::<serde_json::Value>("/auth/me").await.unwrap_err();
        assert_eq!(err, MindfulError::NotAuthenticated);
    }
}
