//! Travel distance types.

use serde::{Deserialize, Serialize};

use crate::location::Coordinates;

/// Percentage split of the route across road classes. Sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadComposition {
    pub highway_pct: u8,
    pub local_pct: u8,
    pub unpaved_pct: u8,
}

/// How the distance was obtained. Fallback geometry is flagged so
/// downstream billing can see it used degraded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistanceConfidence {
    /// Live routing provider supplied the route.
    Routed,

    /// Great-circle approximation; provider unconfigured or unavailable.
    Estimated,
}

impl DistanceConfidence {
    pub fn label(self) -> &'static str {
        match self {
            DistanceConfidence::Routed => "routed",
            DistanceConfidence::Estimated => "estimated",
        }
    }
}

/// Travel distance and duration between two resolved points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceInfo {
    /// Route distance, floored at the configured minimum so very short
    /// hops are not underpriced.
    pub distance_km: u32,

    pub duration_mins: u32,

    pub roads: RoadComposition,

    pub confidence: DistanceConfidence,
}

/// Cache key for a route: both endpoints quantized to millidegrees
/// (~100 m), which bounds cache cardinality while keeping nearby
/// lookups distinct enough for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteKey {
    from: (i32, i32),
    to: (i32, i32),
}

impl RouteKey {
    pub fn new(from: Coordinates, to: Coordinates) -> Self {
        Self {
            from: quantize(from),
            to: quantize(to),
        }
    }

    /// Render the key for the admin cache-stats surface.
    pub fn display(&self) -> String {
        format!(
            "{:.3},{:.3}->{:.3},{:.3}",
            self.from.0 as f64 / 1000.0,
            self.from.1 as f64 / 1000.0,
            self.to.0 as f64 / 1000.0,
            self.to.1 as f64 / 1000.0,
        )
    }
}

fn quantize(c: Coordinates) -> (i32, i32) {
    ((c.lat * 1000.0).round() as i32, (c.lon * 1000.0).round() as i32)
}
