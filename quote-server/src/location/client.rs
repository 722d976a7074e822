//! Geocoding provider HTTP client (Nominatim-style search API).

use serde::Deserialize;

use crate::fetch::{FetchError, ResilientClient, RetryConfig};

use super::resolver::{GeocodeHit, GeocodingProvider};

/// Default base URL for the geocoding provider.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Raw search result from the provider.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    importance: Option<f64>,
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    /// Base URL for the API (defaults to the public Nominatim instance).
    pub base_url: String,

    /// ISO country code the postal-code search is restricted to.
    pub country_code: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Retry policy for provider calls.
    pub retry: RetryConfig,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            country_code: "in".to_string(),
            timeout_secs: 10,
            retry: RetryConfig::default(),
        }
    }
}

impl GeocodingConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Geocoding API client.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    fetch: ResilientClient,
    base_url: String,
    country_code: String,
}

impl GeocodingClient {
    /// Create a new geocoding client.
    pub fn new(config: GeocodingConfig) -> Result<Self, FetchError> {
        let fetch = ResilientClient::new(config.retry, config.timeout_secs)?;
        Ok(Self {
            fetch,
            base_url: config.base_url,
            country_code: config.country_code,
        })
    }
}

impl GeocodingProvider for GeocodingClient {
    async fn geocode(&self, postal_code: &str) -> Result<Vec<GeocodeHit>, FetchError> {
        let url = format!("{}/search", self.base_url);
        let query = [
            ("postalcode", postal_code.to_string()),
            ("country", self.country_code.clone()),
            ("format", "json".to_string()),
            ("limit", "5".to_string()),
        ];

        let results: Vec<SearchResult> = self.fetch.get_json(&url, &query).await?;

        Ok(results
            .into_iter()
            .filter_map(|r| {
                let lat = r.lat.parse().ok()?;
                let lon = r.lon.parse().ok()?;
                Some(GeocodeHit {
                    lat,
                    lon,
                    display_name: r.display_name,
                    importance: r.importance.unwrap_or(0.3),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GeocodingConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.country_code, "in");
    }

    #[test]
    fn config_with_base_url() {
        let config = GeocodingConfig::default().with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn unparseable_coordinates_are_dropped() {
        let raw = r#"[
            {"lat": "28.61", "lon": "77.21", "display_name": "New Delhi, India", "importance": 0.8},
            {"lat": "not-a-number", "lon": "77.21", "display_name": "Broken", "importance": 0.5}
        ]"#;
        let results: Vec<SearchResult> = serde_json::from_str(raw).unwrap();
        assert_eq!(results.len(), 2);

        let hits: Vec<GeocodeHit> = results
            .into_iter()
            .filter_map(|r| {
                let lat = r.lat.parse().ok()?;
                let lon = r.lon.parse().ok()?;
                Some(GeocodeHit {
                    lat,
                    lon,
                    display_name: r.display_name,
                    importance: r.importance.unwrap_or(0.3),
                })
            })
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_name, "New Delhi, India");
    }
}
