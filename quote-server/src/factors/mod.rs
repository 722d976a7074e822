//! Pure, stateless factor lookups producing scalar price multipliers.
//!
//! The fuel gauge is the one exception to statelessness: it caches the
//! simulated fuel index under its own TTL class.

mod fuel;
mod road;
mod time;
mod vendor;

pub use fuel::{FUEL_BASELINE, FuelGauge};
pub use road::{composition_factor, region_road_factor};
pub use time::{is_public_holiday, time_factor};
pub use vendor::{VendorTier, vendor_markup};
