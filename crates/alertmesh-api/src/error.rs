//! API client error types.
//!
//! Remote failures are classified so the reconciliation core can tell a
//! missing entity apart from a rejected call without inspecting HTTP details.

use thiserror::Error;

/// Error returned by control-plane API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client configuration is unusable (missing host/token, bad URL).
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The remote system has no entity for the given key.
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },

    /// The remote accepted the connection but rejected the call.
    #[error("remote rejected request (HTTP {status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// Transport-level failure before a response was produced.
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The response body did not parse as the expected record.
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Create an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ApiError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a not-found error for the given resource and key.
    pub fn not_found(resource: &'static str, key: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource,
            key: key.into(),
        }
    }

    /// Create a rejection error from an HTTP status and response body.
    pub fn rejected(status: u16, detail: impl Into<String>) -> Self {
        ApiError::Rejected {
            status,
            detail: detail.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        ApiError::Decode {
            message: message.into(),
        }
    }

    /// Whether this error means the entity does not exist remotely.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
