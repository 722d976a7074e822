//! Road-quality multipliers from route composition and terrain.

use crate::distance::RoadComposition;

/// Per-class cost weights. Unpaved stretches are the slowest and hardest
/// on the truck, so they weigh heaviest.
const HIGHWAY_WEIGHT: f64 = 1.0;
const LOCAL_WEIGHT: f64 = 1.1;
const UNPAVED_WEIGHT: f64 = 1.5;

/// Weighted blend of the route's road-class percentages.
pub fn composition_factor(roads: &RoadComposition) -> f64 {
    (roads.highway_pct as f64 * HIGHWAY_WEIGHT
        + roads.local_pct as f64 * LOCAL_WEIGHT
        + roads.unpaved_pct as f64 * UNPAVED_WEIGHT)
        / 100.0
}

/// Per-region base road multiplier; hilly terrain is penalized. The worse
/// of the two endpoint regions applies.
pub fn region_road_factor(origin_region: &str, dest_region: &str) -> f64 {
    fn base(region: &str) -> f64 {
        match region {
            "hilly-regions" => 1.2,
            _ => 1.0,
        }
    }
    base(origin_region).max(base(dest_region))
}
