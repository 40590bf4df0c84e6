//! # alertmesh API client
//!
//! HTTP client and wire types for the node-provider control-plane API.
//!
//! Each entity kind gets its own capability trait (`DestinationsApi`,
//! `GatewaysApi`, `NotificationsApi`); the single [`client::ApiClient`]
//! implements all three and is constructed once, then shared read-only by
//! every consumer.
//!
//! ## Example
//!
//! ```ignore
//! use alertmesh_api::{ApiClient, ApiSettings, DestinationsApi};
//!
//! let settings = ApiSettings::resolve(None, None)?;
//! let client = ApiClient::new(settings)?;
//! let destinations = client.list_destinations().await?;
//! ```

pub mod client;
pub mod config;
pub mod destinations;
pub mod error;
pub mod gateways;
pub mod notifications;
pub mod records;

pub use client::ApiClient;
pub use config::{ApiSettings, HOST_ENV_VAR, TOKEN_ENV_VAR};
pub use destinations::{DestinationsApi, NewDestination};
pub use error::{ApiError, ApiResult};
pub use gateways::GatewaysApi;
pub use notifications::{NewNotification, NotificationUpdate, NotificationsApi};
pub use records::{DestinationRecord, GatewayRecord, NotificationRecord};
