//! Distance resolution between two resolved locations.

mod client;
mod resolver;
mod types;

pub use client::{RouteSummary, RoutingClient, RoutingConfig};
pub use resolver::{DistanceResolver, MIN_DISTANCE_KM, RoutingProvider, haversine_km};
pub(crate) use resolver::estimate;
pub use types::{DistanceConfidence, DistanceInfo, RoadComposition, RouteKey};
