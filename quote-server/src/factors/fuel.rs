//! Fuel-price adjustment.
//!
//! There is no live fuel feed; the gauge simulates one with a bounded
//! random walk around a fixed baseline, cached for 12 hours so quotes stay
//! stable within a pricing window. The index never diverges by more than
//! ±10% from the baseline.

use std::sync::Arc;

use rand::Rng;

use crate::cache::QuoteCache;

/// Baseline fuel index (₹/litre equivalent the rate tables were tuned at).
pub const FUEL_BASELINE: f64 = 100.0;

/// Maximum step of one simulated move.
const MAX_STEP: f64 = 0.03;

/// Hard band around the baseline.
const MAX_DEVIATION: f64 = 0.10;

/// Simulated fuel index, cached under the `fuel` cache class.
pub struct FuelGauge {
    cache: Arc<QuoteCache>,
}

impl FuelGauge {
    pub fn new(cache: Arc<QuoteCache>) -> Self {
        Self { cache }
    }

    /// Current adjustment multiplier: index / baseline, within [0.9, 1.1].
    pub async fn adjustment(&self) -> f64 {
        let index = match self.cache.get_fuel_index().await {
            Some(index) => index,
            None => {
                let index = next_index(FUEL_BASELINE);
                self.cache.insert_fuel_index(index).await;
                tracing::debug!(index, "refreshed fuel index");
                index
            }
        };
        index / FUEL_BASELINE
    }
}

/// One step of the bounded random walk, clamped to the ±10% band.
fn next_index(current: f64) -> f64 {
    let step: f64 = rand::thread_rng().gen_range(-MAX_STEP..=MAX_STEP);
    let next = current * (1.0 + step);
    next.clamp(
        FUEL_BASELINE * (1.0 - MAX_DEVIATION),
        FUEL_BASELINE * (1.0 + MAX_DEVIATION),
    )
}
