//! Postal-code resolver: validation, cache check, provider call, fallback.
//!
//! Resolution never hard-fails. Invalid input and provider outages both
//! degrade to a fixed central fallback so a price can always be produced;
//! the fallback is tagged so operators can tell the difference.

use std::sync::Arc;

use crate::cache::QuoteCache;
use crate::fetch::FetchError;

use super::types::{CityTier, Coordinates, LocationInfo, LocationSource};

/// Minimum postal-code length treated as resolvable input.
const MIN_CODE_LEN: usize = 4;

/// Central fallback coordinate (Nagpur), used when resolution is impossible.
const FALLBACK_COORDS: Coordinates = Coordinates {
    lat: 21.1458,
    lon: 79.0882,
};

/// Curated metro-city names; an exact name match outranks the importance score.
const METRO_CITIES: &[&str] = &[
    "mumbai",
    "delhi",
    "new delhi",
    "bengaluru",
    "bangalore",
    "chennai",
    "kolkata",
    "hyderabad",
    "pune",
    "ahmedabad",
];

/// Curated region clusters, matched by substring against the provider's
/// display name. First match wins; unmatched locations land in "other".
const REGION_CLUSTERS: &[(&str, &[&str])] = &[
    (
        "delhi-ncr",
        &["delhi", "noida", "gurgaon", "gurugram", "ghaziabad", "faridabad"],
    ),
    ("mumbai", &["mumbai", "thane", "navi mumbai", "kalyan"]),
    ("bengaluru", &["bengaluru", "bangalore"]),
    ("chennai", &["chennai"]),
    ("kolkata", &["kolkata", "howrah"]),
    ("hyderabad", &["hyderabad", "secunderabad"]),
    (
        "hilly-regions",
        &[
            "shimla",
            "manali",
            "dehradun",
            "mussoorie",
            "nainital",
            "gangtok",
            "darjeeling",
            "srinagar",
            "himachal",
            "uttarakhand",
            "sikkim",
        ],
    ),
];

/// A normalized geocoding result.
#[derive(Debug, Clone)]
pub struct GeocodeHit {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
    pub importance: f64,
}

/// Abstraction over the geocoding provider so tests can inject
/// deterministic responses and count calls.
pub trait GeocodingProvider {
    async fn geocode(&self, postal_code: &str) -> Result<Vec<GeocodeHit>, FetchError>;
}

/// Resolves postal codes to [`LocationInfo`], caching results for an hour.
pub struct LocationResolver<P> {
    provider: P,
    cache: Arc<QuoteCache>,
}

impl<P: GeocodingProvider> LocationResolver<P> {
    pub fn new(provider: P, cache: Arc<QuoteCache>) -> Self {
        Self { provider, cache }
    }

    /// Resolve a postal code. Infallible: bad input and provider outages
    /// both yield the fixed fallback.
    pub async fn resolve(&self, postal_code: &str) -> LocationInfo {
        let code = postal_code.trim();

        // Invalid input: no network call, no cache entry.
        if code.len() < MIN_CODE_LEN {
            tracing::debug!(postal_code = code, "postal code too short, using fallback");
            return fallback_location();
        }

        if let Some(mut hit) = self.cache.get_location(code).await {
            hit.source = LocationSource::Cache;
            return hit;
        }

        let info = match self.provider.geocode(code).await {
            Ok(hits) => match best_hit(&hits) {
                Some(hit) => {
                    tracing::debug!(postal_code = code, "geocoding provider succeeded");
                    classify(hit)
                }
                None => {
                    tracing::warn!(postal_code = code, "provider returned no results, using fallback");
                    fallback_location()
                }
            },
            Err(e) => {
                tracing::warn!(postal_code = code, error = %e, "geocoding failed, using fallback");
                fallback_location()
            }
        };

        // The fallback is cached too, so repeated misses for the same code
        // don't hammer a struggling provider within the TTL window.
        self.cache
            .insert_location(code.to_string(), info.clone())
            .await;

        info
    }
}

/// The fixed location returned when resolution is impossible.
pub(crate) fn fallback_location() -> LocationInfo {
    LocationInfo {
        coords: FALLBACK_COORDS,
        region: "unknown".to_string(),
        tier: CityTier::Town,
        source: LocationSource::Fallback,
    }
}

fn best_hit(hits: &[GeocodeHit]) -> Option<&GeocodeHit> {
    hits.iter()
        .max_by(|a, b| a.importance.total_cmp(&b.importance))
}

fn classify(hit: &GeocodeHit) -> LocationInfo {
    LocationInfo {
        coords: Coordinates::new(hit.lat, hit.lon),
        region: classify_region(&hit.display_name),
        tier: classify_tier(&hit.display_name, hit.importance),
        source: LocationSource::Provider,
    }
}

/// City tier by priority rule: curated metro list first, then the
/// provider's importance score.
fn classify_tier(display_name: &str, importance: f64) -> CityTier {
    let name = display_name.to_lowercase();
    if METRO_CITIES.iter().any(|m| name.contains(m)) {
        return CityTier::Metro;
    }

    if importance > 0.7 {
        CityTier::Metro
    } else if importance > 0.5 {
        CityTier::NormalCity
    } else if importance < 0.3 {
        CityTier::Village
    } else {
        CityTier::Town
    }
}

/// Region cluster by substring match against the display name.
fn classify_region(display_name: &str) -> String {
    let name = display_name.to_lowercase();
    for (slug, needles) in REGION_CLUSTERS {
        if needles.iter().any(|n| name.contains(n)) {
            return (*slug).to_string();
        }
    }
    "other".to_string()
}
