//! Typed entity records.
//!
//! Desired fields are plain values; remote-assigned fields are `Option` and
//! stay `None` until observed. Timestamps are opaque remote values rendered
//! once as `YYYY-MM-DD HH:MM:SS` text by the adapter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Local validation failure while building a desired record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("invalid payload type {value}: must be between 1 and 7")]
    InvalidPayloadType { value: u8 },

    #[error("invalid webhook type {value:?}: must be POST or GET")]
    InvalidWebhookType { value: String },
}

/// Delivery method for a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookType {
    Post,
    Get,
}

impl WebhookType {
    /// Wire rendering of the variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WebhookType::Post => "POST",
            WebhookType::Get => "GET",
        }
    }
}

impl std::str::FromStr for WebhookType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POST" => Ok(WebhookType::Post),
            "GET" => Ok(WebhookType::Get),
            other => Err(RecordError::InvalidWebhookType {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for WebhookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload shape selector for a destination.
///
/// Desired records validate the 1–7 range at construction. Values observed
/// from the remote are taken as-is through [`PayloadType::from_remote`];
/// the remote owns validation of its own responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadType(u8);

impl PayloadType {
    /// Build a payload type from caller configuration, enforcing the
    /// documented 1–7 range.
    pub fn new(value: u8) -> Result<Self, RecordError> {
        if (1..=7).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RecordError::InvalidPayloadType { value })
        }
    }

    /// Accept a remote-reported payload type without range checking.
    #[must_use]
    pub fn from_remote(value: u8) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PayloadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A webhook destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    /// Remote-assigned id; the key for read, delete and import.
    pub id: Option<String>,
    pub name: String,
    /// URL alert payloads are delivered to.
    pub to: String,
    pub webhook_type: WebhookType,
    pub service: String,
    pub payload_type: PayloadType,
    /// Remote-generated verification token, never produced locally.
    pub token: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Destination {
    /// Build a desired destination record with no observed state.
    #[must_use]
    pub fn desired(
        name: impl Into<String>,
        to: impl Into<String>,
        webhook_type: WebhookType,
        service: impl Into<String>,
        payload_type: PayloadType,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            to: to.into(),
            webhook_type,
            service: service.into(),
            payload_type,
            token: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// A dedicated gateway.
///
/// The name is write-once; updates may only change the two flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    /// Remote-assigned id, an integer on the wire, carried as text.
    pub id: Option<String>,
    pub uuid: Option<String>,
    pub name: String,
    pub domain: Option<String>,
    pub status: Option<String>,
    pub is_private: bool,
    pub is_enabled: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Gateway {
    /// Build a desired gateway record with no observed state.
    #[must_use]
    pub fn desired(name: impl Into<String>, is_private: bool, is_enabled: bool) -> Self {
        Self {
            id: None,
            uuid: None,
            name: name.into(),
            domain: None,
            status: None,
            is_private,
            is_enabled,
            created_at: None,
            updated_at: None,
        }
    }
}

/// An event notification referencing destinations by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Option<String>,
    pub name: String,
    /// Network the notification watches.
    pub network: String,
    /// Opaque matching rule payload, forwarded untouched.
    pub expression: String,
    /// Foreign keys into the destination kind; integrity is enforced
    /// remotely.
    pub destination_ids: Vec<String>,
    pub enabled: bool,
    /// Full destination records as resolved by the remote on read.
    pub destinations: Vec<Destination>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Notification {
    /// Build a desired notification record with no observed state.
    #[must_use]
    pub fn desired(
        name: impl Into<String>,
        network: impl Into<String>,
        expression: impl Into<String>,
        destination_ids: Vec<String>,
        enabled: bool,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            network: network.into(),
            expression: expression.into(),
            destination_ids,
            enabled,
            destinations: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}
