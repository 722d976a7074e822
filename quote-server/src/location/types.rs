//! Resolved location types.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Coarse urbanization classification, driving base-rate lookups.
///
/// Ordering matters for rate tables: `Metro` commands the highest rates,
/// `Village` the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CityTier {
    Metro,
    NormalCity,
    Town,
    Village,
}

/// Where a resolved location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationSource {
    /// Resolved by the live geocoding provider.
    Provider,

    /// Served from the location cache.
    Cache,

    /// Fixed fallback used when input was invalid or the provider failed.
    Fallback,
}

/// A resolved location. Derived once, never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub coords: Coordinates,

    /// Curated region cluster slug (e.g. "delhi-ncr"), or "other"/"unknown".
    pub region: String,

    pub tier: CityTier,

    pub source: LocationSource,
}
