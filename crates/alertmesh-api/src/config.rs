//! Client settings: API host and token.
//!
//! Resolution precedence is explicit value, then environment variable, then
//! an error when both are absent. Environment lookup is injectable so tests
//! never touch process state.

use crate::error::{ApiError, ApiResult};

/// Environment variable consulted when no explicit host is given.
pub const HOST_ENV_VAR: &str = "ALERTMESH_API_HOST";

/// Environment variable consulted when no explicit token is given.
pub const TOKEN_ENV_VAR: &str = "ALERTMESH_API_TOKEN";

/// Resolved connection settings for the control-plane API.
#[derive(Clone)]
pub struct ApiSettings {
    /// Base URL of the API, without a trailing slash.
    pub host: String,
    /// Bearer token presented on every request.
    pub token: String,
}

impl ApiSettings {
    /// Resolve settings from explicit values and the process environment.
    pub fn resolve(host: Option<String>, token: Option<String>) -> ApiResult<Self> {
        Self::resolve_with(host, token, |name| std::env::var(name).ok())
    }

    /// Resolve settings using the supplied environment lookup.
    pub fn resolve_with<F>(
        host: Option<String>,
        token: Option<String>,
        env: F,
    ) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = host
            .filter(|v| !v.is_empty())
            .or_else(|| env(HOST_ENV_VAR).filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                ApiError::invalid_config(format!(
                    "missing API host: set it explicitly or via {HOST_ENV_VAR}"
                ))
            })?;

        let token = token
            .filter(|v| !v.is_empty())
            .or_else(|| env(TOKEN_ENV_VAR).filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                ApiError::invalid_config(format!(
                    "missing API token: set it explicitly or via {TOKEN_ENV_VAR}"
                ))
            })?;

        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            token,
        })
    }
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("host", &self.host)
            .field("token", &"***")
            .finish()
    }
}
