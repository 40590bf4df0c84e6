//! Dedicated gateway operations.
//!
//! Gateways are addressed by name on the wire; the integer id in the record
//! is informational.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::records::GatewayRecord;

#[derive(Debug, Clone, Serialize)]
struct NewGateway<'a> {
    name: &'a str,
    is_private: bool,
    is_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
struct GatewayFlags {
    is_private: bool,
    is_enabled: bool,
}

/// Remote operations on dedicated gateways.
#[async_trait]
pub trait GatewaysApi: Send + Sync {
    /// Create a gateway (POST /v1/gateways).
    async fn create_gateway(
        &self,
        name: &str,
        is_private: bool,
        is_enabled: bool,
    ) -> ApiResult<GatewayRecord>;

    /// Fetch a gateway by name (GET /v1/gateways/:name).
    async fn get_gateway_by_name(&self, name: &str) -> ApiResult<GatewayRecord>;

    /// Update a gateway's flags by name (PATCH /v1/gateways/:name).
    async fn update_gateway_by_name(
        &self,
        name: &str,
        is_private: bool,
        is_enabled: bool,
    ) -> ApiResult<GatewayRecord>;

    /// Delete a gateway by name (DELETE /v1/gateways/:name).
    async fn delete_gateway_by_name(&self, name: &str) -> ApiResult<()>;

    /// List every gateway on the account (GET /v1/gateways).
    async fn list_gateways(&self) -> ApiResult<Vec<GatewayRecord>>;
}

#[async_trait]
impl GatewaysApi for ApiClient {
    async fn create_gateway(
        &self,
        name: &str,
        is_private: bool,
        is_enabled: bool,
    ) -> ApiResult<GatewayRecord> {
        let body = NewGateway {
            name,
            is_private,
            is_enabled,
        };
        self.post("/v1/gateways", &body, "gateway", name).await
    }

    async fn get_gateway_by_name(&self, name: &str) -> ApiResult<GatewayRecord> {
        self.get(&format!("/v1/gateways/{name}"), "gateway", name)
            .await
    }

    async fn update_gateway_by_name(
        &self,
        name: &str,
        is_private: bool,
        is_enabled: bool,
    ) -> ApiResult<GatewayRecord> {
        let body = GatewayFlags {
            is_private,
            is_enabled,
        };
        self.patch(&format!("/v1/gateways/{name}"), &body, "gateway", name)
            .await
    }

    async fn delete_gateway_by_name(&self, name: &str) -> ApiResult<()> {
        self.delete(&format!("/v1/gateways/{name}"), "gateway", name)
            .await
    }

    async fn list_gateways(&self) -> ApiResult<Vec<GatewayRecord>> {
        self.get("/v1/gateways", "gateway", "*").await
    }
}
