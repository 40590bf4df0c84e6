//! Remote record adapter: wire records to typed records.
//!
//! Pure mapping, no I/O. Every observed timestamp gets the one fixed text
//! rendering; the gateway's integer id becomes text; a notification's nested
//! destination list is resolved through the destination mapping.

use alertmesh_api::records::{DestinationRecord, GatewayRecord, NotificationRecord};
use chrono::{DateTime, Utc};

use crate::record::{Destination, Gateway, Notification, PayloadType, RecordError};

/// The one timestamp rendering applied to observed values.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a remote timestamp as `YYYY-MM-DD HH:MM:SS` text.
#[must_use]
pub fn render_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Map a wire destination into the typed record.
///
/// The payload type is passed through without range checking; the webhook
/// type must be one of the two documented methods.
pub fn destination_from_wire(record: &DestinationRecord) -> Result<Destination, RecordError> {
    Ok(Destination {
        id: Some(record.id.clone()),
        name: record.name.clone(),
        to: record.to.clone(),
        webhook_type: record.webhook_type.parse()?,
        service: record.service.clone(),
        payload_type: PayloadType::from_remote(record.payload_type),
        token: Some(record.token.clone()),
        created_at: Some(render_timestamp(&record.created_at)),
        updated_at: Some(render_timestamp(&record.updated_at)),
    })
}

/// Map a wire gateway into the typed record.
#[must_use]
pub fn gateway_from_wire(record: &GatewayRecord) -> Gateway {
    Gateway {
        id: Some(record.id.to_string()),
        uuid: Some(record.uuid.clone()),
        name: record.name.clone(),
        domain: Some(record.domain.clone()),
        status: Some(record.status.clone()),
        is_private: record.is_private,
        is_enabled: record.is_enabled,
        created_at: Some(render_timestamp(&record.created_at)),
        updated_at: Some(render_timestamp(&record.updated_at)),
    }
}

/// Map a wire notification into the typed record, resolving the nested
/// destination list.
pub fn notification_from_wire(record: &NotificationRecord) -> Result<Notification, RecordError> {
    let destinations = record
        .destinations
        .iter()
        .map(destination_from_wire)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Notification {
        id: Some(record.id.clone()),
        name: record.name.clone(),
        network: record.network.clone(),
        expression: record.expression.clone(),
        destination_ids: record.destinations.iter().map(|d| d.id.clone()).collect(),
        enabled: record.enabled,
        destinations,
        created_at: Some(render_timestamp(&record.created_at)),
        updated_at: Some(render_timestamp(&record.updated_at)),
    })
}
