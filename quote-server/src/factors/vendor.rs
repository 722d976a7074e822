//! Vendor tier markups with regional overrides.

use serde::{Deserialize, Serialize};

/// Vendor service tier. Ordering: economy < default < premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum VendorTier {
    Economy,
    #[default]
    Default,
    Premium,
}

impl VendorTier {
    /// Parse a request-supplied vendor type; anything unrecognized maps to
    /// the default tier.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "economy" => VendorTier::Economy,
            "premium" => VendorTier::Premium,
            _ => VendorTier::Default,
        }
    }

    fn generic_markup(self) -> f64 {
        match self {
            VendorTier::Economy => 0.9,
            VendorTier::Default => 1.0,
            VendorTier::Premium => 1.25,
        }
    }
}

/// Curated region-specific markup overrides: (region, tier, markup).
/// Dense metros support a steeper premium spread.
const REGION_OVERRIDES: &[(&str, VendorTier, f64)] = &[
    ("mumbai", VendorTier::Premium, 1.4),
    ("mumbai", VendorTier::Economy, 0.95),
    ("delhi-ncr", VendorTier::Premium, 1.35),
    ("bengaluru", VendorTier::Premium, 1.3),
    ("hilly-regions", VendorTier::Default, 1.1),
    ("hilly-regions", VendorTier::Economy, 1.0),
];

/// Vendor markup for a move between two regions.
///
/// A curated override on the origin region takes priority, then the
/// destination region, then the generic tier table.
pub fn vendor_markup(tier: VendorTier, origin_region: &str, dest_region: &str) -> f64 {
    for region in [origin_region, dest_region] {
        if let Some((_, _, markup)) = REGION_OVERRIDES
            .iter()
            .find(|(r, t, _)| *r == region && *t == tier)
        {
            return *markup;
        }
    }
    tier.generic_markup()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        assert!(
            VendorTier::Economy.generic_markup()
                < VendorTier::Default.generic_markup()
        );
        assert!(
            VendorTier::Default.generic_markup()
                < VendorTier::Premium.generic_markup()
        );
    }

    #[test]
    fn parse_is_lenient() {
        assert_eq!(VendorTier::parse("economy"), VendorTier::Economy);
        assert_eq!(VendorTier::parse("Premium"), VendorTier::Premium);
        assert_eq!(VendorTier::parse("standard"), VendorTier::Default);
        assert_eq!(VendorTier::parse(""), VendorTier::Default);
    }

    #[test]
    fn generic_table_applies_without_overrides() {
        assert_eq!(vendor_markup(VendorTier::Premium, "other", "other"), 1.25);
        assert_eq!(vendor_markup(VendorTier::Economy, "other", "chennai"), 0.9);
    }

    #[test]
    fn origin_override_takes_priority() {
        assert_eq!(vendor_markup(VendorTier::Premium, "mumbai", "other"), 1.4);
        // Origin has no override for this tier, destination does.
        assert_eq!(
            vendor_markup(VendorTier::Premium, "other", "delhi-ncr"),
            1.35
        );
        // Origin override wins over the destination's.
        assert_eq!(
            vendor_markup(VendorTier::Premium, "mumbai", "delhi-ncr"),
            1.4
        );
    }

    #[test]
    fn hilly_default_tier_is_marked_up() {
        assert_eq!(
            vendor_markup(VendorTier::Default, "hilly-regions", "other"),
            1.1
        );
    }
}
