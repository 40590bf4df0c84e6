//! Per-kind reconciliation policies.

mod destination;
mod gateway;
mod notification;

pub use destination::DestinationPolicy;
pub use gateway::GatewayPolicy;
pub use notification::NotificationPolicy;

use alertmesh_api::ApiError;

use crate::record::RecordError;

/// A remote response that does not map into the typed record is treated as
/// a malformed response, not a local validation failure.
pub(crate) fn decode_failure(err: RecordError) -> ApiError {
    ApiError::decode(err.to_string())
}
