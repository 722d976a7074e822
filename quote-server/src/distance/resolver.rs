//! Distance resolver: cache check, routed primary path, haversine fallback.
//!
//! Absence of routing credentials is a normal operating mode, not a
//! failure: the resolver silently degrades to great-circle estimates and
//! flags the lower confidence on the result.

use std::sync::Arc;

use crate::cache::QuoteCache;
use crate::fetch::FetchError;
use crate::location::Coordinates;

use super::client::RouteSummary;
use super::types::{DistanceConfidence, DistanceInfo, RoadComposition, RouteKey};

/// Minimum billable distance; very short hops are priced as a local move.
pub const MIN_DISTANCE_KM: u32 = 5;

/// Empirical driving pace used when no routed duration is available.
const FALLBACK_MINS_PER_KM: f64 = 1.5;

/// Mean earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Abstraction over the routing provider for tests.
pub trait RoutingProvider {
    /// Whether credentials are present. When false the resolver skips the
    /// network entirely.
    fn is_configured(&self) -> bool;

    async fn route(&self, from: Coordinates, to: Coordinates) -> Result<RouteSummary, FetchError>;
}

/// Resolves the travel distance between two coordinate pairs, caching
/// results for a day (route geometry changes slowly).
pub struct DistanceResolver<P> {
    provider: P,
    cache: Arc<QuoteCache>,
}

impl<P: RoutingProvider> DistanceResolver<P> {
    pub fn new(provider: P, cache: Arc<QuoteCache>) -> Self {
        Self { provider, cache }
    }

    /// Resolve the distance between two points. Infallible: every failure
    /// mode degrades to the haversine estimate.
    pub async fn resolve(&self, from: Coordinates, to: Coordinates) -> DistanceInfo {
        let key = RouteKey::new(from, to);

        if let Some(hit) = self.cache.get_route(&key).await {
            return hit;
        }

        let info = if !self.provider.is_configured() {
            tracing::debug!("routing provider unconfigured, using haversine estimate");
            estimate(from, to)
        } else {
            match self.provider.route(from, to).await {
                Ok(summary) => {
                    tracing::debug!("routing provider succeeded");
                    routed(summary)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "routing failed, using haversine estimate");
                    estimate(from, to)
                }
            }
        };

        self.cache.insert_route(key, info).await;
        info
    }
}

/// Build a [`DistanceInfo`] from a routed summary.
fn routed(summary: RouteSummary) -> DistanceInfo {
    let distance_km = ((summary.distance_m / 1000.0).round() as u32).max(MIN_DISTANCE_KM);
    DistanceInfo {
        distance_km,
        duration_mins: (summary.duration_s / 60.0).round() as u32,
        roads: routed_composition(distance_km),
        confidence: DistanceConfidence::Routed,
    }
}

/// Great-circle fallback used when the primary path is unavailable.
pub(crate) fn estimate(from: Coordinates, to: Coordinates) -> DistanceInfo {
    let distance_km = (haversine_km(from, to).round() as u32).max(MIN_DISTANCE_KM);
    DistanceInfo {
        distance_km,
        duration_mins: (distance_km as f64 * FALLBACK_MINS_PER_KM).round() as u32,
        roads: FALLBACK_COMPOSITION,
        confidence: DistanceConfidence::Estimated,
    }
}

/// Coarse composition signalling lower confidence than the routed split.
const FALLBACK_COMPOSITION: RoadComposition = RoadComposition {
    highway_pct: 40,
    local_pct: 45,
    unpaved_pct: 15,
};

/// Plausible road split for a routed leg: longer routes spend more of
/// their length on highways.
fn routed_composition(distance_km: u32) -> RoadComposition {
    match distance_km {
        0..=30 => RoadComposition {
            highway_pct: 15,
            local_pct: 75,
            unpaved_pct: 10,
        },
        31..=100 => RoadComposition {
            highway_pct: 35,
            local_pct: 55,
            unpaved_pct: 10,
        },
        101..=300 => RoadComposition {
            highway_pct: 55,
            local_pct: 35,
            unpaved_pct: 10,
        },
        _ => RoadComposition {
            highway_pct: 65,
            local_pct: 28,
            unpaved_pct: 7,
        },
    }
}

/// Great-circle distance between two coordinate pairs.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}
