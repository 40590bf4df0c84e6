//! Gateway reconciliation policy.
//!
//! Gateways update in place, but the name is write-once: a changed name
//! fails the update before any remote call. The remote addresses gateways
//! by name, so the name doubles as the operational key.

use std::sync::Arc;

use async_trait::async_trait;

use alertmesh_api::{ApiResult, GatewaysApi};

use crate::adapter;
use crate::diagnostics::Diagnostics;
use crate::reconciler::{remote_failure, EntityKind, EntityPolicy, UpdateStyle};
use crate::record::Gateway;

/// In-place update policy for dedicated gateways.
pub struct GatewayPolicy {
    api: Arc<dyn GatewaysApi>,
}

impl GatewayPolicy {
    pub fn new(api: Arc<dyn GatewaysApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EntityPolicy for GatewayPolicy {
    type Record = Gateway;

    fn kind(&self) -> EntityKind {
        EntityKind::Gateway
    }

    fn update_style(&self) -> UpdateStyle {
        UpdateStyle::InPlace
    }

    fn key(&self, record: &Self::Record) -> Option<String> {
        Some(record.name.clone())
    }

    fn describe(&self, record: &Self::Record) -> String {
        format!(
            "{} (private: {}, enabled: {})",
            record.name, record.is_private, record.is_enabled
        )
    }

    fn immutable_conflict(&self, state: &Self::Record, plan: &Self::Record) -> Option<String> {
        (state.name != plan.name).then(|| "name".to_string())
    }

    async fn create(
        &self,
        desired: &Self::Record,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self::Record> {
        match self
            .api
            .create_gateway(&desired.name, desired.is_private, desired.is_enabled)
            .await
        {
            Ok(record) => Some(adapter::gateway_from_wire(&record)),
            Err(err) => {
                diagnostics.push(remote_failure(self.kind(), "create", &err));
                None
            }
        }
    }

    async fn fetch(&self, key: &str) -> ApiResult<Self::Record> {
        let record = self.api.get_gateway_by_name(key).await?;
        Ok(adapter::gateway_from_wire(&record))
    }

    async fn update_in_place(
        &self,
        state: &Self::Record,
        plan: &Self::Record,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self::Record> {
        match self
            .api
            .update_gateway_by_name(&state.name, plan.is_private, plan.is_enabled)
            .await
        {
            Ok(record) => Some(adapter::gateway_from_wire(&record)),
            Err(err) => {
                diagnostics.push(remote_failure(self.kind(), "update", &err));
                None
            }
        }
    }

    async fn delete_remote(&self, key: &str) -> ApiResult<()> {
        self.api.delete_gateway_by_name(key).await
    }

    async fn list(&self) -> ApiResult<Vec<Self::Record>> {
        let records = self.api.list_gateways().await?;
        Ok(records.iter().map(adapter::gateway_from_wire).collect())
    }
}
