//! # alertmesh reconciliation core
//!
//! Converges declared destination, gateway and notification configuration
//! against the control-plane API. Each kind gets the same five lifecycle
//! operations (create, read, update, delete, import) behind one generic
//! [`Reconciler`]; everything kind-specific (encoding, decoding, update
//! policy) lives in an [`EntityPolicy`] implementation.
//!
//! Operations report problems as accumulated [`Diagnostics`] rather than
//! `Err`: a partially failed call sequence still describes every step so
//! the caller can reconcile state manually.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use alertmesh_api::{ApiClient, ApiSettings};
//! use alertmesh_reconcile::{
//!     Destination, DestinationPolicy, PayloadType, Reconciler, WebhookType,
//! };
//!
//! let client = Arc::new(ApiClient::new(ApiSettings::resolve(None, None)?)?);
//! let reconciler = Reconciler::new(DestinationPolicy::new(client));
//!
//! let desired = Destination::desired(
//!     "au-test-api",
//!     "https://example.test/fn",
//!     WebhookType::Post,
//!     "webhook",
//!     PayloadType::new(1)?,
//! );
//! let created = reconciler.create(&desired).await;
//! ```

pub mod adapter;
pub mod diagnostics;
pub mod kinds;
pub mod reconciler;
pub mod record;

pub use diagnostics::{Diagnostic, Diagnostics, ProblemKind, Severity};
pub use kinds::{DestinationPolicy, GatewayPolicy, NotificationPolicy};
pub use reconciler::{
    EntityKind, EntityPolicy, Reconciled, Reconciler, ReplacementPhase, UpdateOutcome,
    UpdateStyle,
};
pub use record::{
    Destination, Gateway, Notification, PayloadType, RecordError, WebhookType,
};
