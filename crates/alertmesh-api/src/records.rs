//! Wire records as returned by the control-plane API.
//!
//! These are the raw JSON shapes; the reconciliation core maps them into its
//! typed records and owns all presentation concerns (timestamp rendering,
//! id formatting).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A webhook destination as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationRecord {
    /// Remote-assigned destination id.
    pub id: String,
    /// User-supplied destination name.
    pub name: String,
    /// URL alert payloads are delivered to.
    pub to: String,
    /// Delivery method, `"POST"` or `"GET"`.
    pub webhook_type: String,
    /// Destination service, currently always `"webhook"`.
    pub service: String,
    /// Remote-generated verification token.
    pub token: String,
    /// Payload shape selector, 1 through 7.
    pub payload_type: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A dedicated gateway as returned by the API.
///
/// The wire id is an integer; the reconciliation core formats it as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRecord {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    pub domain: String,
    pub status: String,
    pub is_private: bool,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An event notification as returned by the API.
///
/// The remote resolves the notification's destination references into full
/// destination records on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,
    pub name: String,
    /// Opaque matching rule payload.
    pub expression: String,
    /// Network the notification watches.
    pub network: String,
    pub enabled: bool,
    #[serde(default)]
    pub destinations: Vec<DestinationRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
