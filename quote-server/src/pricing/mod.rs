//! Quote orchestration: request types, validation, and dispatch to the
//! relocation and parcel pipelines.

mod breakdown;
mod parcel;
mod relocation;

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::distance::{self, DistanceInfo, DistanceResolver, RoutingProvider};
use crate::factors::FuelGauge;
use crate::location::{
    GeocodingProvider, LocationInfo, LocationResolver, fallback_location,
};
use crate::rates::RateTables;

pub use breakdown::{AppliedFactors, CostBreakdown, OrderType};

/// The quoter wired with the live geocoding and routing clients.
pub type LiveQuoter = Quoter<crate::location::GeocodingClient, crate::distance::RoutingClient>;

/// Default budget for the full resolve chain per endpoint. Past this the
/// pipeline degrades to local fallbacks rather than keeping the caller
/// waiting through upstream retries.
const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

/// A declared special item.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialItem {
    pub category: String,
    pub quantity: u32,
}

/// Parcel dimensions in centimetres.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ParcelDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// An opted-in extra service with its flat cost.
#[derive(Debug, Clone, Deserialize)]
pub struct AdditionalService {
    pub name: String,
    pub cost: f64,
}

/// Inbound quote request, shared by both pipelines.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub from_zip: String,
    pub to_zip: String,
    pub order_type: OrderType,

    /// Home size; required for moving orders.
    #[serde(default)]
    pub move_size: Option<String>,

    /// Move/pickup date; defaults to today.
    #[serde(default)]
    pub move_date: Option<NaiveDate>,

    /// Pickup hour of day (0-23), used for parcel peak-hour surge.
    #[serde(default)]
    pub pickup_hour: Option<u32>,

    #[serde(default)]
    pub origin_floor: u32,
    #[serde(default)]
    pub destination_floor: u32,
    #[serde(default)]
    pub origin_elevator: bool,
    #[serde(default)]
    pub destination_elevator: bool,

    /// Truck-to-door distances in metres.
    #[serde(default)]
    pub origin_parking_distance: u32,
    #[serde(default)]
    pub destination_parking_distance: u32,

    #[serde(default)]
    pub premium_packing: bool,
    #[serde(default)]
    pub special_items: Vec<SpecialItem>,
    #[serde(default)]
    pub storage_months: u32,
    #[serde(default)]
    pub insurance_value: f64,
    #[serde(default)]
    pub vendor_type: Option<String>,
    #[serde(default)]
    pub additional_services: Vec<AdditionalService>,

    #[serde(default)]
    pub parcel_weight: Option<f64>,
    #[serde(default)]
    pub parcel_dimensions: Option<ParcelDimensions>,
    #[serde(default)]
    pub package_type: Option<String>,
}

impl QuoteRequest {
    fn effective_date(&self) -> NaiveDate {
        self.move_date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Errors from the quoting engine.
///
/// Upstream outages never surface here; they are absorbed by the
/// resolvers' fallbacks. Only input problems fail a quote.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuoteError {
    /// The request failed validation; nothing was resolved or cached.
    #[error("invalid request: {0}")]
    InvalidInput(String),
}

/// The quoting engine: owns the resolvers, factor tables and rate tables,
/// and dispatches requests to the appropriate pipeline.
pub struct Quoter<G, R> {
    pub(crate) locations: LocationResolver<G>,
    pub(crate) distances: DistanceResolver<R>,
    pub(crate) fuel: FuelGauge,
    pub(crate) rates: RateTables,
    resolve_timeout: Duration,
}

impl<G: GeocodingProvider, R: RoutingProvider> Quoter<G, R> {
    pub fn new(
        locations: LocationResolver<G>,
        distances: DistanceResolver<R>,
        fuel: FuelGauge,
        rates: RateTables,
    ) -> Self {
        Self {
            locations,
            distances,
            fuel,
            rates,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
        }
    }

    /// Override the per-resolver timeout (for tests and tuning).
    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    /// Produce an itemized quote for the request.
    pub async fn quote(&self, request: &QuoteRequest) -> Result<CostBreakdown, QuoteError> {
        match request.order_type {
            OrderType::Moving => relocation::estimate(self, request).await,
            OrderType::Parcel => parcel::estimate(self, request).await,
        }
    }

    /// Resolve both endpoints and the distance between them, each leg
    /// bounded by the resolve timeout. Infallible by construction.
    pub(crate) async fn resolve_route(
        &self,
        from_zip: &str,
        to_zip: &str,
    ) -> (LocationInfo, LocationInfo, DistanceInfo) {
        let (origin, dest) = tokio::join!(
            self.resolve_location(from_zip),
            self.resolve_location(to_zip),
        );

        let distance = match tokio::time::timeout(
            self.resolve_timeout,
            self.distances.resolve(origin.coords, dest.coords),
        )
        .await
        {
            Ok(info) => info,
            Err(_) => {
                tracing::warn!(from_zip, to_zip, "distance resolution timed out, estimating");
                distance::estimate(origin.coords, dest.coords)
            }
        };

        (origin, dest, distance)
    }

    async fn resolve_location(&self, zip: &str) -> LocationInfo {
        match tokio::time::timeout(self.resolve_timeout, self.locations.resolve(zip)).await {
            Ok(info) => info,
            Err(_) => {
                tracing::warn!(zip, "location resolution timed out, using fallback");
                fallback_location()
            }
        }
    }
}

/// Round a rupee amount to two decimals for presentation and audit.
pub(crate) fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Fresh quote identifier; generated per call, never reused.
pub(crate) fn new_quote_id() -> String {
    format!("Q-{}", uuid::Uuid::new_v4().simple())
}
