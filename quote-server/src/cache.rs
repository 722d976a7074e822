//! Multi-TTL caching layer for derived estimation data.
//!
//! Each data class has its own freshness requirement: resolved locations go
//! stale in an hour (postal mappings barely change, but tier data may),
//! route geometry is good for a day, and the fuel index for half a day.
//! One moka cache per class keeps TTL policy and invalidation independent.
//!
//! Failed computations are never inserted, so an upstream outage cannot
//! poison the cache with empty placeholders.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use serde::Serialize;

use crate::distance::{DistanceInfo, RouteKey};
use crate::location::LocationInfo;

/// A cache class with its own TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheClass {
    Location,
    Distance,
    Fuel,
}

impl CacheClass {
    /// Parse an admin-supplied class name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "location" => Some(CacheClass::Location),
            "distance" => Some(CacheClass::Distance),
            "fuel" => Some(CacheClass::Fuel),
            _ => None,
        }
    }
}

/// Configuration for the cache layer.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for resolved locations.
    pub location_ttl: Duration,

    /// TTL for route distances.
    pub distance_ttl: Duration,

    /// TTL for the fuel-price index.
    pub fuel_ttl: Duration,

    /// Maximum entries per class.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            location_ttl: Duration::from_secs(60 * 60),
            distance_ttl: Duration::from_secs(24 * 60 * 60),
            fuel_ttl: Duration::from_secs(12 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Per-class statistics for the admin surface.
#[derive(Debug, Clone, Serialize)]
pub struct ClassStats {
    pub entries: usize,
    pub keys: Vec<String>,
}

/// Snapshot of the whole cache.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub location: ClassStats,
    pub distance: ClassStats,
    pub fuel: ClassStats,
}

/// The shared estimation cache.
pub struct QuoteCache {
    locations: MokaCache<String, LocationInfo>,
    routes: MokaCache<RouteKey, DistanceInfo>,
    fuel: MokaCache<(), f64>,
}

impl QuoteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            locations: MokaCache::builder()
                .time_to_live(config.location_ttl)
                .max_capacity(config.max_capacity)
                .build(),
            routes: MokaCache::builder()
                .time_to_live(config.distance_ttl)
                .max_capacity(config.max_capacity)
                .build(),
            fuel: MokaCache::builder()
                .time_to_live(config.fuel_ttl)
                .max_capacity(1)
                .build(),
        }
    }

    pub async fn get_location(&self, postal_code: &str) -> Option<LocationInfo> {
        self.locations.get(postal_code).await
    }

    pub async fn insert_location(&self, postal_code: String, info: LocationInfo) {
        self.locations.insert(postal_code, info).await;
    }

    pub async fn get_route(&self, key: &RouteKey) -> Option<DistanceInfo> {
        self.routes.get(key).await
    }

    pub async fn insert_route(&self, key: RouteKey, info: DistanceInfo) {
        self.routes.insert(key, info).await;
    }

    pub async fn get_fuel_index(&self) -> Option<f64> {
        self.fuel.get(&()).await
    }

    pub async fn insert_fuel_index(&self, index: f64) {
        self.fuel.insert((), index).await;
    }

    /// Clear one key, one whole class, or everything.
    ///
    /// Distance and fuel entries are not addressable by string key, so a
    /// key supplied for those classes clears the whole class.
    pub async fn invalidate(&self, class: Option<CacheClass>, key: Option<&str>) {
        match (class, key) {
            (Some(CacheClass::Location), Some(key)) => {
                self.locations.invalidate(key).await;
            }
            (Some(CacheClass::Location), None) => self.locations.invalidate_all(),
            (Some(CacheClass::Distance), _) => self.routes.invalidate_all(),
            (Some(CacheClass::Fuel), _) => self.fuel.invalidate_all(),
            (None, _) => {
                self.locations.invalidate_all();
                self.routes.invalidate_all();
                self.fuel.invalidate_all();
            }
        }
    }

    /// Snapshot per-class sizes and keys for monitoring.
    pub async fn stats(&self) -> CacheStats {
        self.locations.run_pending_tasks().await;
        self.routes.run_pending_tasks().await;
        self.fuel.run_pending_tasks().await;

        let location_keys: Vec<String> =
            self.locations.iter().map(|(k, _)| k.as_ref().clone()).collect();
        let route_keys: Vec<String> = self.routes.iter().map(|(k, _)| k.display()).collect();
        let fuel_keys: Vec<String> = self
            .fuel
            .iter()
            .map(|(_, index)| format!("index={index:.2}"))
            .collect();

        CacheStats {
            location: ClassStats {
                entries: location_keys.len(),
                keys: location_keys,
            },
            distance: ClassStats {
                entries: route_keys.len(),
                keys: route_keys,
            },
            fuel: ClassStats {
                entries: fuel_keys.len(),
                keys: fuel_keys,
            },
        }
    }
}
