//! HTTP client for the control-plane API (reqwest-based).
//!
//! One `ApiClient` is constructed at startup and shared, read-only, by every
//! consumer. All requests carry the account token; responses are decoded
//! centrally so status-to-error mapping lives in one place.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::ApiSettings;
use crate::error::{ApiError, ApiResult};

/// Header carrying the account token.
const AUTH_HEADER: &str = "x-api-key";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client for the control-plane API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: String,
    http_client: Client,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"***")
            .finish()
    }
}

impl ApiClient {
    /// Create a client from resolved settings.
    pub fn new(settings: ApiSettings) -> ApiResult<Self> {
        let http_client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(concat!("alertmesh/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::invalid_config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: settings.host,
            token: settings.token,
            http_client,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(settings: ApiSettings, http_client: Client) -> Self {
        Self {
            base_url: settings.host,
            token: settings.token,
            http_client,
        }
    }

    /// Base URL of the remote API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &'static str,
        key: &str,
    ) -> ApiResult<T> {
        debug!("GET {}", path);
        let response = self
            .http_client
            .get(self.url(path))
            .header(AUTH_HEADER, &self.token)
            .send()
            .await?;
        self.handle_response(response, resource, key).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        resource: &'static str,
        key: &str,
    ) -> ApiResult<T> {
        debug!("POST {}", path);
        let response = self
            .http_client
            .post(self.url(path))
            .header(AUTH_HEADER, &self.token)
            .json(body)
            .send()
            .await?;
        self.handle_response(response, resource, key).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        resource: &'static str,
        key: &str,
    ) -> ApiResult<T> {
        debug!("PATCH {}", path);
        let response = self
            .http_client
            .patch(self.url(path))
            .header(AUTH_HEADER, &self.token)
            .json(body)
            .send()
            .await?;
        self.handle_response(response, resource, key).await
    }

    /// POST without a response body expectation (toggle-style endpoints).
    pub(crate) async fn post_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        resource: &'static str,
        key: &str,
    ) -> ApiResult<()> {
        debug!("POST {}", path);
        let response = self
            .http_client
            .post(self.url(path))
            .header(AUTH_HEADER, &self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.error_from_response(response, resource, key).await)
        }
    }

    pub(crate) async fn delete(
        &self,
        path: &str,
        resource: &'static str,
        key: &str,
    ) -> ApiResult<()> {
        debug!("DELETE {}", path);
        let response = self
            .http_client
            .delete(self.url(path))
            .header(AUTH_HEADER, &self.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT || status.is_success() {
            Ok(())
        } else {
            Err(self.error_from_response(response, resource, key).await)
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &'static str,
        key: &str,
    ) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| ApiError::decode(e.to_string()))
        } else {
            Err(self.error_from_response(response, resource, key).await)
        }
    }

    async fn error_from_response(
        &self,
        response: reqwest::Response,
        resource: &'static str,
        key: &str,
    ) -> ApiError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());

        if status == StatusCode::NOT_FOUND {
            return ApiError::not_found(resource, key);
        }

        warn!(
            resource,
            key,
            status = status.as_u16(),
            "remote rejected request"
        );
        let detail = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        };
        ApiError::rejected(status.as_u16(), detail)
    }
}
