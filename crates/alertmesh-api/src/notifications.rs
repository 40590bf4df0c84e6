//! Event notification operations.
//!
//! Notification content (name, expression, destination references) is
//! updated in one call that replaces the destination set wholesale; the
//! enabled state is switched through a separate toggle endpoint.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::records::NotificationRecord;

/// Request payload for creating a notification.
#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    pub name: String,
    pub expression: String,
    pub network: String,
    pub destination_ids: Vec<String>,
}

/// Request payload for updating a notification's content.
///
/// The destination list replaces the remote set; there is no incremental
/// add/remove.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationUpdate {
    pub name: String,
    pub expression: String,
    pub destination_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
struct ToggleRequest {
    enabled: bool,
}

/// Remote operations on event notifications.
#[async_trait]
pub trait NotificationsApi: Send + Sync {
    /// Create a notification (POST /v1/notifications).
    async fn create_notification(&self, new: &NewNotification) -> ApiResult<NotificationRecord>;

    /// Fetch a notification by id (GET /v1/notifications/:id).
    async fn get_notification(&self, id: &str) -> ApiResult<NotificationRecord>;

    /// Update a notification's content by id (PATCH /v1/notifications/:id).
    async fn update_notification(
        &self,
        id: &str,
        update: &NotificationUpdate,
    ) -> ApiResult<NotificationRecord>;

    /// Switch a notification on or off (POST /v1/notifications/:id/toggle).
    async fn toggle_notification(&self, id: &str, enabled: bool) -> ApiResult<()>;

    /// Delete a notification by id (DELETE /v1/notifications/:id).
    async fn delete_notification(&self, id: &str) -> ApiResult<()>;

    /// List every notification on the account (GET /v1/notifications).
    async fn list_notifications(&self) -> ApiResult<Vec<NotificationRecord>>;
}

#[async_trait]
impl NotificationsApi for ApiClient {
    async fn create_notification(&self, new: &NewNotification) -> ApiResult<NotificationRecord> {
        self.post("/v1/notifications", new, "notification", &new.name)
            .await
    }

    async fn get_notification(&self, id: &str) -> ApiResult<NotificationRecord> {
        self.get(&format!("/v1/notifications/{id}"), "notification", id)
            .await
    }

    async fn update_notification(
        &self,
        id: &str,
        update: &NotificationUpdate,
    ) -> ApiResult<NotificationRecord> {
        self.patch(&format!("/v1/notifications/{id}"), update, "notification", id)
            .await
    }

    async fn toggle_notification(&self, id: &str, enabled: bool) -> ApiResult<()> {
        let body = ToggleRequest { enabled };
        self.post_unit(
            &format!("/v1/notifications/{id}/toggle"),
            &body,
            "notification",
            id,
        )
        .await
    }

    async fn delete_notification(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/v1/notifications/{id}"), "notification", id)
            .await
    }

    async fn list_notifications(&self) -> ApiResult<Vec<NotificationRecord>> {
        self.get("/v1/notifications", "notification", "*").await
    }
}
