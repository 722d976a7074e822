//! Location resolution: postal code → coordinates, city tier, region.

mod client;
mod resolver;
mod types;

pub use client::{GeocodingClient, GeocodingConfig};
pub use resolver::{GeocodeHit, GeocodingProvider, LocationResolver};
pub(crate) use resolver::fallback_location;
pub use types::{CityTier, Coordinates, LocationInfo, LocationSource};
