//! Static, versioned rate tables.
//!
//! Read-only at runtime; changing a rate is a deployment event, after
//! which operators bust the derived caches via the admin surface.

use serde::{Deserialize, Serialize};

use crate::location::CityTier;

/// GST applied to every quote.
pub const GST_RATE: f64 = 0.18;

/// Toll estimate per kilometre.
pub const TOLL_PER_KM: f64 = 2.0;

/// Insurance premium as a fraction of the declared value.
pub const INSURANCE_RATE: f64 = 0.03;

/// Flat storage rate per month.
pub const STORAGE_PER_MONTH: f64 = 2000.0;

/// Flat surcharge per floor without elevator assistance.
pub const FLOOR_RATE: f64 = 300.0;

/// Fraction of the floor surcharge charged when an elevator is present.
pub const ELEVATOR_DISCOUNT: f64 = 0.5;

/// Labor cost as a fraction of base cost, before duration scaling.
pub const LABOR_RATIO: f64 = 0.2;

/// Packing cost fractions of base cost.
pub const PACKING_STANDARD: f64 = 0.2;
pub const PACKING_PREMIUM: f64 = 0.3;

/// Reference trip duration the labor estimate is scaled against.
pub const REFERENCE_DURATION_MINS: f64 = 600.0;

/// Labor duration scaling never drops below this.
pub const LABOR_DURATION_FLOOR: f64 = 0.5;

/// Volumetric weight divisor (cm³ per kg).
pub const VOLUMETRIC_DIVISOR: f64 = 5000.0;

/// Parcel surge multipliers. Applied on top of the shared time factor.
pub const SURGE_PEAK_HOUR: f64 = 1.2;
pub const SURGE_WEEKEND: f64 = 1.15;
pub const SURGE_HOLIDAY: f64 = 1.3;

/// Requested home size for a relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveSize {
    #[serde(rename = "1rk")]
    OneRk,
    #[serde(rename = "1bhk")]
    OneBhk,
    #[serde(rename = "2bhk")]
    TwoBhk,
    #[serde(rename = "3bhk")]
    ThreeBhk,
    #[serde(rename = "4bhk")]
    FourBhk,
    #[serde(rename = "villa")]
    Villa,
}

impl MoveSize {
    /// Parse a request-supplied move size. Unknown sizes are a hard input
    /// error at the pipeline boundary, so this returns `None` rather than
    /// defaulting.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "1rk" => Some(MoveSize::OneRk),
            "1bhk" => Some(MoveSize::OneBhk),
            "2bhk" => Some(MoveSize::TwoBhk),
            "3bhk" => Some(MoveSize::ThreeBhk),
            "4bhk" => Some(MoveSize::FourBhk),
            "villa" => Some(MoveSize::Villa),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoveSize::OneRk => "1RK",
            MoveSize::OneBhk => "1BHK",
            MoveSize::TwoBhk => "2BHK",
            MoveSize::ThreeBhk => "3BHK",
            MoveSize::FourBhk => "4BHK",
            MoveSize::Villa => "Villa",
        }
    }

    /// Whether the heuristic large-home adjustment applies.
    pub fn is_large_home(self) -> bool {
        matches!(self, MoveSize::ThreeBhk | MoveSize::FourBhk)
    }
}

/// Parcel distance category, bucketed from the resolved distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistanceCategory {
    Intracity,
    NearbyCity,
    Intercity,
    LongDistance,
}

impl DistanceCategory {
    pub fn bucket(distance_km: u32) -> Self {
        match distance_km {
            0..=30 => DistanceCategory::Intracity,
            31..=100 => DistanceCategory::NearbyCity,
            101..=300 => DistanceCategory::Intercity,
            _ => DistanceCategory::LongDistance,
        }
    }

    /// Human-readable delivery window for this category.
    pub fn delivery_estimate(self) -> &'static str {
        match self {
            DistanceCategory::Intracity => "same day",
            DistanceCategory::NearbyCity => "next day",
            DistanceCategory::Intercity => "2-3 days",
            DistanceCategory::LongDistance => "4-7 days",
        }
    }
}

/// The static rate tables, constructed once at startup.
#[derive(Debug, Clone)]
pub struct RateTables {
    /// Table revision, reported on the admin surface and in logs.
    pub version: &'static str,
}

impl Default for RateTables {
    fn default() -> Self {
        Self { version: "2026.08" }
    }
}

impl RateTables {
    /// Base relocation cost by home size and origin city tier (₹).
    pub fn base_cost(&self, size: MoveSize, tier: CityTier) -> f64 {
        use CityTier::*;
        use MoveSize::*;
        match (size, tier) {
            (OneRk, Metro) => 4000.0,
            (OneRk, NormalCity) => 3500.0,
            (OneRk, Town) => 3000.0,
            (OneRk, Village) => 2500.0,
            (OneBhk, Metro) => 6000.0,
            (OneBhk, NormalCity) => 5200.0,
            (OneBhk, Town) => 4500.0,
            (OneBhk, Village) => 4000.0,
            (TwoBhk, Metro) => 9000.0,
            (TwoBhk, NormalCity) => 8000.0,
            (TwoBhk, Town) => 7000.0,
            (TwoBhk, Village) => 6000.0,
            (ThreeBhk, Metro) => 13000.0,
            (ThreeBhk, NormalCity) => 11500.0,
            (ThreeBhk, Town) => 10000.0,
            (ThreeBhk, Village) => 8500.0,
            (FourBhk, Metro) => 18000.0,
            (FourBhk, NormalCity) => 16000.0,
            (FourBhk, Town) => 14000.0,
            (FourBhk, Village) => 12000.0,
            (Villa, Metro) => 25000.0,
            (Villa, NormalCity) => 22000.0,
            (Villa, Town) => 19000.0,
            (Villa, Village) => 16000.0,
        }
    }

    /// Per-km transport rate for a tier pair (₹/km): the mean of the two
    /// endpoint tiers' rates.
    pub fn per_km_rate(&self, origin: CityTier, dest: CityTier) -> f64 {
        fn tier_rate(tier: CityTier) -> f64 {
            match tier {
                CityTier::Metro => 55.0,
                CityTier::NormalCity => 48.0,
                CityTier::Town => 42.0,
                CityTier::Village => 36.0,
            }
        }
        (tier_rate(origin) + tier_rate(dest)) / 2.0
    }

    /// Flat handling rate for a declared special-item category.
    pub fn special_item_rate(&self, category: &str) -> Option<f64> {
        let rate = match category.to_lowercase().as_str() {
            "fragile" => 500.0,
            "electronics" => 800.0,
            "artwork" => 1200.0,
            "antique" => 1500.0,
            "pool_table" => 2500.0,
            "piano" => 3000.0,
            "plants" => 300.0,
            _ => return None,
        };
        Some(rate)
    }

    /// Weight-slab multiplier for the chargeable parcel weight.
    /// Monotonically increasing across slab boundaries.
    pub fn parcel_weight_multiplier(&self, chargeable_kg: f64) -> f64 {
        if chargeable_kg <= 5.0 {
            1.0
        } else if chargeable_kg <= 10.0 {
            1.2
        } else if chargeable_kg <= 25.0 {
            1.5
        } else if chargeable_kg <= 50.0 {
            2.0
        } else if chargeable_kg <= 100.0 {
            2.5
        } else {
            3.0
        }
    }

    /// Per-km parcel rate by distance category (₹/km).
    pub fn parcel_per_km(&self, category: DistanceCategory) -> f64 {
        match category {
            DistanceCategory::Intracity => 15.0,
            DistanceCategory::NearbyCity => 12.0,
            DistanceCategory::Intercity => 9.0,
            DistanceCategory::LongDistance => 7.0,
        }
    }

    /// Minimum parcel charge by distance category (₹).
    pub fn parcel_minimum(&self, category: DistanceCategory) -> f64 {
        match category {
            DistanceCategory::Intracity => 100.0,
            DistanceCategory::NearbyCity => 250.0,
            DistanceCategory::Intercity => 450.0,
            DistanceCategory::LongDistance => 800.0,
        }
    }

    /// Package-type premium multiplier.
    pub fn package_type_multiplier(&self, package_type: &str) -> f64 {
        match package_type.to_lowercase().as_str() {
            "electronics" => 1.2,
            "food" => 1.15,
            "medicine" => 1.25,
            _ => 1.0,
        }
    }

    /// Rider incentive as a percentage of the pre-GST amount.
    /// Informational only; never enters the customer total.
    pub fn rider_incentive_pct(&self, category: DistanceCategory) -> f64 {
        match category {
            DistanceCategory::Intracity => 5.0,
            DistanceCategory::NearbyCity => 8.0,
            DistanceCategory::Intercity => 10.0,
            DistanceCategory::LongDistance => 12.0,
        }
    }

    /// Stepped parking surcharge by truck-to-door distance bracket (₹).
    pub fn parking_surcharge(&self, parking_distance_m: u32) -> f64 {
        match parking_distance_m {
            0..=50 => 0.0,
            51..=100 => 500.0,
            101..=150 => 1000.0,
            _ => 1500.0,
        }
    }
}

/// Whether an hour of day counts as parcel peak demand.
pub fn is_peak_hour(hour: u32) -> bool {
    (8..=10).contains(&hour) || (17..=20).contains(&hour)
}
