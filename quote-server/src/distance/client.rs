//! Routing provider HTTP client (directions API with key auth).

use serde::Deserialize;

use crate::fetch::{FetchError, ResilientClient, RetryConfig};
use crate::location::Coordinates;

use super::resolver::RoutingProvider;

/// Default base URL for the routing provider.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Distance and duration of a routed leg.
#[derive(Debug, Clone, Copy)]
pub struct RouteSummary {
    pub distance_m: f64,
    pub duration_s: f64,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    summary: Summary,
}

#[derive(Debug, Deserialize)]
struct Summary {
    distance: f64,
    duration: f64,
}

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// API key. Absence is a supported degraded mode: the resolver falls
    /// back to great-circle estimates without treating it as an error.
    pub api_key: Option<String>,

    /// Base URL for the API.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Retry policy for provider calls.
    pub retry: RetryConfig,
}

impl RoutingConfig {
    /// Create a config with an optional API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            retry: RetryConfig::default(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Routing API client.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    fetch: ResilientClient,
    base_url: String,
    api_key: Option<String>,
}

impl RoutingClient {
    /// Create a new routing client.
    pub fn new(config: RoutingConfig) -> Result<Self, FetchError> {
        let fetch = ResilientClient::new(config.retry, config.timeout_secs)?;
        Ok(Self {
            fetch,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }
}

impl RoutingProvider for RoutingClient {
    fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    async fn route(&self, from: Coordinates, to: Coordinates) -> Result<RouteSummary, FetchError> {
        let url = format!("{}/v2/directions/driving-car", self.base_url);
        let query = [
            ("api_key", self.api_key.clone().unwrap_or_default()),
            ("start", format!("{},{}", from.lon, from.lat)),
            ("end", format!("{},{}", to.lon, to.lat)),
        ];

        let response: DirectionsResponse = self.fetch.get_json(&url, &query).await?;

        let summary = response
            .features
            .into_iter()
            .next()
            .map(|f| f.properties.summary)
            .ok_or_else(|| FetchError::Json {
                message: "directions response contained no routes".to_string(),
            })?;

        Ok(RouteSummary {
            distance_m: summary.distance,
            duration_s: summary.duration,
        })
    }
}
