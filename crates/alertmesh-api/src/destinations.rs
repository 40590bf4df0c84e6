//! Webhook destination operations.
//!
//! The remote API has no in-place destination update; callers that need one
//! delete and recreate.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::records::DestinationRecord;

/// Request payload for creating a destination.
#[derive(Debug, Clone, Serialize)]
pub struct NewDestination {
    pub name: String,
    pub to: String,
    pub webhook_type: String,
    pub service: String,
    pub payload_type: u8,
}

/// Remote operations on webhook destinations.
#[async_trait]
pub trait DestinationsApi: Send + Sync {
    /// Create a destination (POST /v1/destinations).
    async fn create_destination(&self, new: &NewDestination) -> ApiResult<DestinationRecord>;

    /// Fetch a destination by id (GET /v1/destinations/:id).
    async fn get_destination(&self, id: &str) -> ApiResult<DestinationRecord>;

    /// Delete a destination by id (DELETE /v1/destinations/:id).
    async fn delete_destination(&self, id: &str) -> ApiResult<()>;

    /// List every destination on the account (GET /v1/destinations).
    async fn list_destinations(&self) -> ApiResult<Vec<DestinationRecord>>;
}

#[async_trait]
impl DestinationsApi for ApiClient {
    async fn create_destination(&self, new: &NewDestination) -> ApiResult<DestinationRecord> {
        self.post("/v1/destinations", new, "destination", &new.name)
            .await
    }

    async fn get_destination(&self, id: &str) -> ApiResult<DestinationRecord> {
        self.get(&format!("/v1/destinations/{id}"), "destination", id)
            .await
    }

    async fn delete_destination(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/v1/destinations/{id}"), "destination", id)
            .await
    }

    async fn list_destinations(&self) -> ApiResult<Vec<DestinationRecord>> {
        self.get("/v1/destinations", "destination", "*").await
    }
}
