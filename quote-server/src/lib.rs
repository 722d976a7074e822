//! Dynamic cost-estimation engine.
//!
//! Turns an (origin, destination, service-size, date) request into a fully
//! itemized price quote for either a full-load relocation or a parcel
//! delivery. External geocoding and routing lookups are cached and degrade
//! gracefully; the pricing pipelines themselves are deterministic.

pub mod cache;
pub mod distance;
pub mod factors;
pub mod fetch;
pub mod location;
pub mod pricing;
pub mod rates;
pub mod web;
