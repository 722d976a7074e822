//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// JSON error body returned on failure.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query parameters for the cache invalidation endpoint.
///
/// With no parameters the whole cache is cleared. `key` narrows the clear
/// to one entry and is only meaningful for the `location` class.
#[derive(Debug, Deserialize)]
pub struct ClearCacheParams {
    /// Cache class: `location`, `distance` or `fuel`.
    pub class: Option<String>,

    /// Postal code to clear from the location class.
    pub key: Option<String>,
}

/// Response from the cache invalidation endpoint.
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub cleared: String,
}

/// Health check payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub rates_version: &'static str,
}
