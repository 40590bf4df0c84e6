//! Destination reconciliation policy.
//!
//! The remote API has no in-place destination update, so updates run as
//! replacements: the old entity is deleted and a new one created, with
//! fresh id, token and timestamps.

use std::sync::Arc;

use async_trait::async_trait;

use alertmesh_api::{ApiResult, DestinationsApi, NewDestination};

use crate::adapter;
use crate::diagnostics::Diagnostics;
use crate::kinds::decode_failure;
use crate::reconciler::{remote_failure, EntityKind, EntityPolicy, UpdateStyle};
use crate::record::Destination;

/// Replacement-update policy for webhook destinations.
pub struct DestinationPolicy {
    api: Arc<dyn DestinationsApi>,
}

impl DestinationPolicy {
    pub fn new(api: Arc<dyn DestinationsApi>) -> Self {
        Self { api }
    }

    fn encode(desired: &Destination) -> NewDestination {
        NewDestination {
            name: desired.name.clone(),
            to: desired.to.clone(),
            webhook_type: desired.webhook_type.as_str().to_string(),
            service: desired.service.clone(),
            payload_type: desired.payload_type.get(),
        }
    }
}

#[async_trait]
impl EntityPolicy for DestinationPolicy {
    type Record = Destination;

    fn kind(&self) -> EntityKind {
        EntityKind::Destination
    }

    fn update_style(&self) -> UpdateStyle {
        UpdateStyle::Replace
    }

    fn key(&self, record: &Self::Record) -> Option<String> {
        record.id.clone()
    }

    fn describe(&self, record: &Self::Record) -> String {
        format!(
            "{} -> {} ({}, service {}, payload type {})",
            record.name, record.to, record.webhook_type, record.service, record.payload_type
        )
    }

    async fn create(
        &self,
        desired: &Self::Record,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self::Record> {
        match self.api.create_destination(&Self::encode(desired)).await {
            Ok(record) => {
                let mut result = desired.clone();
                result.id = Some(record.id);
                result.token = Some(record.token);
                result.created_at = Some(adapter::render_timestamp(&record.created_at));
                result.updated_at = Some(adapter::render_timestamp(&record.updated_at));
                Some(result)
            }
            Err(err) => {
                diagnostics.push(remote_failure(self.kind(), "create", &err));
                None
            }
        }
    }

    async fn fetch(&self, key: &str) -> ApiResult<Self::Record> {
        let record = self.api.get_destination(key).await?;
        adapter::destination_from_wire(&record).map_err(decode_failure)
    }

    async fn delete_remote(&self, key: &str) -> ApiResult<()> {
        self.api.delete_destination(key).await
    }

    async fn list(&self) -> ApiResult<Vec<Self::Record>> {
        let records = self.api.list_destinations().await?;
        records
            .iter()
            .map(|r| adapter::destination_from_wire(r).map_err(decode_failure))
            .collect()
    }
}
