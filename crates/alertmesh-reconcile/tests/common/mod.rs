//! In-memory spy implementations of the control-plane API traits.
//!
//! Each mock keeps a call log so tests can assert call counts and ordering,
//! and failure switches so tests can fail individual remote calls.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use alertmesh_api::records::{DestinationRecord, GatewayRecord, NotificationRecord};
use alertmesh_api::{
    ApiError, ApiResult, DestinationsApi, GatewaysApi, NewDestination, NewNotification,
    NotificationUpdate, NotificationsApi,
};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Spy destination API backed by a map.
#[derive(Default)]
pub struct MockDestinations {
    pub calls: Mutex<Vec<String>>,
    store: Mutex<HashMap<String, DestinationRecord>>,
    next_id: AtomicU64,
    pub fail_create: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl MockDestinations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn log(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl DestinationsApi for MockDestinations {
    async fn create_destination(&self, new: &NewDestination) -> ApiResult<DestinationRecord> {
        self.log(format!("create_destination {}", new.name));
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ApiError::rejected(422, "destination rejected"));
        }

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = DestinationRecord {
            id: format!("dest-{n}"),
            name: new.name.clone(),
            to: new.to.clone(),
            webhook_type: new.webhook_type.clone(),
            service: new.service.clone(),
            token: format!("tok-{n}"),
            payload_type: new.payload_type,
            created_at: base_time(),
            updated_at: base_time(),
        };
        self.store
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn get_destination(&self, id: &str) -> ApiResult<DestinationRecord> {
        self.log(format!("get_destination {id}"));
        self.store
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("destination", id))
    }

    async fn delete_destination(&self, id: &str) -> ApiResult<()> {
        self.log(format!("delete_destination {id}"));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ApiError::rejected(500, "delete rejected"));
        }
        self.store
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::rejected(500, format!("no destination {id} to delete")))
    }

    async fn list_destinations(&self) -> ApiResult<Vec<DestinationRecord>> {
        self.log("list_destinations".to_string());
        let store = self.store.lock().unwrap();
        let mut records: Vec<_> = store.values().cloned().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }
}

/// Spy gateway API backed by a map keyed on name.
#[derive(Default)]
pub struct MockGateways {
    pub calls: Mutex<Vec<String>>,
    store: Mutex<HashMap<String, GatewayRecord>>,
    next_id: AtomicU64,
    pub fail_update: AtomicBool,
}

impl MockGateways {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn log(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl GatewaysApi for MockGateways {
    async fn create_gateway(
        &self,
        name: &str,
        is_private: bool,
        is_enabled: bool,
    ) -> ApiResult<GatewayRecord> {
        self.log(format!("create_gateway {name}"));
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = GatewayRecord {
            id: n as i64,
            uuid: format!("00000000-0000-0000-0000-{n:012}"),
            name: name.to_string(),
            domain: format!("{name}.example-ipfs.net"),
            status: "active".to_string(),
            is_private,
            is_enabled,
            created_at: base_time(),
            updated_at: base_time(),
        };
        self.store
            .lock()
            .unwrap()
            .insert(name.to_string(), record.clone());
        Ok(record)
    }

    async fn get_gateway_by_name(&self, name: &str) -> ApiResult<GatewayRecord> {
        self.log(format!("get_gateway {name}"));
        self.store
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::not_found("gateway", name))
    }

    async fn update_gateway_by_name(
        &self,
        name: &str,
        is_private: bool,
        is_enabled: bool,
    ) -> ApiResult<GatewayRecord> {
        self.log(format!("update_gateway {name}"));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(ApiError::rejected(500, "update rejected"));
        }
        let mut store = self.store.lock().unwrap();
        let record = store
            .get_mut(name)
            .ok_or_else(|| ApiError::not_found("gateway", name))?;
        record.is_private = is_private;
        record.is_enabled = is_enabled;
        record.updated_at = base_time() + chrono::Duration::hours(1);
        Ok(record.clone())
    }

    async fn delete_gateway_by_name(&self, name: &str) -> ApiResult<()> {
        self.log(format!("delete_gateway {name}"));
        self.store
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ApiError::rejected(500, format!("no gateway {name} to delete")))
    }

    async fn list_gateways(&self) -> ApiResult<Vec<GatewayRecord>> {
        self.log("list_gateways".to_string());
        let store = self.store.lock().unwrap();
        let mut records: Vec<_> = store.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }
}

struct StoredNotification {
    record: NotificationRecord,
    destination_ids: Vec<String>,
}

/// Spy notification API. Destination references are resolved against a
/// destination table the test seeds through [`MockNotifications::seed_destination`].
#[derive(Default)]
pub struct MockNotifications {
    pub calls: Mutex<Vec<String>>,
    store: Mutex<HashMap<String, StoredNotification>>,
    destinations: Mutex<HashMap<String, DestinationRecord>>,
    next_id: AtomicU64,
    pub fail_update: AtomicBool,
    pub fail_toggle: AtomicBool,
}

impl MockNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn log(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }

    /// Register a destination record that notification reads resolve
    /// references against.
    pub fn seed_destination(&self, id: &str) {
        let record = DestinationRecord {
            id: id.to_string(),
            name: format!("{id}-name"),
            to: "https://example.test/fn".to_string(),
            webhook_type: "POST".to_string(),
            service: "webhook".to_string(),
            token: format!("tok-{id}"),
            payload_type: 1,
            created_at: base_time(),
            updated_at: base_time(),
        };
        self.destinations
            .lock()
            .unwrap()
            .insert(id.to_string(), record);
    }

    fn resolve(&self, ids: &[String]) -> Vec<DestinationRecord> {
        let table = self.destinations.lock().unwrap();
        ids.iter().filter_map(|id| table.get(id).cloned()).collect()
    }
}

#[async_trait]
impl NotificationsApi for MockNotifications {
    async fn create_notification(&self, new: &NewNotification) -> ApiResult<NotificationRecord> {
        self.log(format!("create_notification {}", new.name));
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = NotificationRecord {
            id: format!("notif-{n}"),
            name: new.name.clone(),
            expression: new.expression.clone(),
            network: new.network.clone(),
            enabled: false,
            destinations: self.resolve(&new.destination_ids),
            created_at: base_time(),
            updated_at: base_time(),
        };
        self.store.lock().unwrap().insert(
            record.id.clone(),
            StoredNotification {
                record: record.clone(),
                destination_ids: new.destination_ids.clone(),
            },
        );
        Ok(record)
    }

    async fn get_notification(&self, id: &str) -> ApiResult<NotificationRecord> {
        self.log(format!("get_notification {id}"));
        let store = self.store.lock().unwrap();
        let stored = store
            .get(id)
            .ok_or_else(|| ApiError::not_found("notification", id))?;
        let mut record = stored.record.clone();
        record.destinations = self.resolve(&stored.destination_ids);
        Ok(record)
    }

    async fn update_notification(
        &self,
        id: &str,
        update: &NotificationUpdate,
    ) -> ApiResult<NotificationRecord> {
        self.log(format!("update_notification {id}"));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(ApiError::rejected(500, "update rejected"));
        }
        let mut store = self.store.lock().unwrap();
        let stored = store
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("notification", id))?;
        stored.record.name = update.name.clone();
        stored.record.expression = update.expression.clone();
        stored.destination_ids = update.destination_ids.clone();
        stored.record.updated_at = base_time() + chrono::Duration::hours(1);
        let mut record = stored.record.clone();
        record.destinations = self.resolve(&stored.destination_ids);
        Ok(record)
    }

    async fn toggle_notification(&self, id: &str, enabled: bool) -> ApiResult<()> {
        self.log(format!("toggle_notification {id} {enabled}"));
        if self.fail_toggle.load(Ordering::SeqCst) {
            return Err(ApiError::rejected(500, "toggle rejected"));
        }
        let mut store = self.store.lock().unwrap();
        let stored = store
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("notification", id))?;
        stored.record.enabled = enabled;
        Ok(())
    }

    async fn delete_notification(&self, id: &str) -> ApiResult<()> {
        self.log(format!("delete_notification {id}"));
        self.store
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::rejected(500, format!("no notification {id} to delete")))
    }

    async fn list_notifications(&self) -> ApiResult<Vec<NotificationRecord>> {
        self.log("list_notifications".to_string());
        let store = self.store.lock().unwrap();
        let mut records: Vec<_> = store
            .values()
            .map(|stored| {
                let mut record = stored.record.clone();
                record.destinations = self.resolve(&stored.destination_ids);
                record
            })
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }
}
