//! Notification reconciliation policy.
//!
//! Notification content (name, expression, destination references) updates
//! in one call that replaces the destination set wholesale; the enabled
//! state goes through a separate toggle call. The toggle fires on every
//! create and update, whether or not the flag changed: the remote side
//! effect of the call is observable and is not assumed to be a no-op.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use alertmesh_api::{ApiResult, NewNotification, NotificationUpdate, NotificationsApi};

use crate::adapter;
use crate::diagnostics::{Diagnostic, Diagnostics, ProblemKind};
use crate::kinds::decode_failure;
use crate::reconciler::{remote_failure, EntityKind, EntityPolicy, UpdateStyle};
use crate::record::Notification;

/// In-place update policy for event notifications.
pub struct NotificationPolicy {
    api: Arc<dyn NotificationsApi>,
}

impl NotificationPolicy {
    pub fn new(api: Arc<dyn NotificationsApi>) -> Self {
        Self { api }
    }

    /// Switch the notification to the planned enabled state, reporting a
    /// failure instead of swallowing it: the content may already be
    /// converged while the enabled flag is stale.
    async fn toggle(&self, id: &str, enabled: bool, diagnostics: &mut Diagnostics) {
        debug!(id, enabled, "toggling notification");
        if let Err(err) = self.api.toggle_notification(id, enabled).await {
            diagnostics.push(Diagnostic::error(
                ProblemKind::RemoteRejected,
                format!(
                    "could not switch notification {id} {}",
                    if enabled { "on" } else { "off" }
                ),
                format!("enabled state may be stale: {err}"),
            ));
        }
    }
}

#[async_trait]
impl EntityPolicy for NotificationPolicy {
    type Record = Notification;

    fn kind(&self) -> EntityKind {
        EntityKind::Notification
    }

    fn update_style(&self) -> UpdateStyle {
        UpdateStyle::InPlace
    }

    fn key(&self, record: &Self::Record) -> Option<String> {
        record.id.clone()
    }

    fn describe(&self, record: &Self::Record) -> String {
        format!(
            "{} on {} ({} destination reference(s), enabled: {})",
            record.name,
            record.network,
            record.destination_ids.len(),
            record.enabled
        )
    }

    async fn create(
        &self,
        desired: &Self::Record,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self::Record> {
        let new = NewNotification {
            name: desired.name.clone(),
            expression: desired.expression.clone(),
            network: desired.network.clone(),
            destination_ids: desired.destination_ids.clone(),
        };

        let record = match self.api.create_notification(&new).await {
            Ok(record) => record,
            Err(err) => {
                diagnostics.push(remote_failure(self.kind(), "create", &err));
                return None;
            }
        };

        self.toggle(&record.id, desired.enabled, diagnostics).await;

        let mut result = desired.clone();
        result.id = Some(record.id.clone());
        result.created_at = Some(adapter::render_timestamp(&record.created_at));
        result.updated_at = Some(adapter::render_timestamp(&record.updated_at));
        match record
            .destinations
            .iter()
            .map(adapter::destination_from_wire)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(destinations) => result.destinations = destinations,
            Err(err) => {
                diagnostics.push(remote_failure(
                    self.kind(),
                    "decode resolved destinations for",
                    &decode_failure(err),
                ));
            }
        }
        Some(result)
    }

    async fn fetch(&self, key: &str) -> ApiResult<Self::Record> {
        let record = self.api.get_notification(key).await?;
        adapter::notification_from_wire(&record).map_err(decode_failure)
    }

    /// Two sequential remote calls: the content update, then the toggle.
    /// Both are always attempted; each failure gets its own diagnostic so
    /// the caller sees the full picture.
    async fn update_in_place(
        &self,
        state: &Self::Record,
        plan: &Self::Record,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self::Record> {
        let Some(id) = self.key(state) else {
            diagnostics.push(Diagnostic::error(
                ProblemKind::NotFound,
                "cannot update notification without a key".to_string(),
                "the current state carries no remote id".to_string(),
            ));
            return None;
        };

        let update = NotificationUpdate {
            name: plan.name.clone(),
            expression: plan.expression.clone(),
            destination_ids: plan.destination_ids.clone(),
        };

        let updated = match self.api.update_notification(&id, &update).await {
            Ok(record) => Some(record),
            Err(err) => {
                diagnostics.push(remote_failure(self.kind(), "update", &err));
                None
            }
        };

        self.toggle(&id, plan.enabled, diagnostics).await;

        let record = updated?;
        let mut result = plan.clone();
        result.id = Some(record.id.clone());
        result.created_at = Some(adapter::render_timestamp(&record.created_at));
        result.updated_at = Some(adapter::render_timestamp(&record.updated_at));
        match record
            .destinations
            .iter()
            .map(adapter::destination_from_wire)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(destinations) => result.destinations = destinations,
            Err(err) => {
                diagnostics.push(remote_failure(
                    self.kind(),
                    "decode resolved destinations for",
                    &decode_failure(err),
                ));
            }
        }
        Some(result)
    }

    async fn delete_remote(&self, key: &str) -> ApiResult<()> {
        self.api.delete_notification(key).await
    }

    async fn list(&self) -> ApiResult<Vec<Self::Record>> {
        let records = self.api.list_notifications().await?;
        records
            .iter()
            .map(|r| adapter::notification_from_wire(r).map_err(decode_failure))
            .collect()
    }
}
