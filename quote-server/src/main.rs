use std::net::SocketAddr;
use std::sync::Arc;

use quote_server::cache::{CacheConfig, QuoteCache};
use quote_server::distance::{DistanceResolver, RoutingClient, RoutingConfig};
use quote_server::factors::FuelGauge;
use quote_server::location::{GeocodingClient, GeocodingConfig, LocationResolver};
use quote_server::pricing::Quoter;
use quote_server::rates::RateTables;
use quote_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quote_server=info".into()),
        )
        .init();

    // Routing credentials are optional; without them every distance is a
    // great-circle estimate, flagged as such in the quotes.
    let routing_api_key = match std::env::var("ROUTING_API_KEY") {
        Ok(key) if !key.is_empty() => Some(key),
        _ => {
            eprintln!("Warning: ROUTING_API_KEY not set. Distances will be estimated.");
            None
        }
    };

    let cache = Arc::new(QuoteCache::new(&CacheConfig::default()));

    let geocoding = GeocodingClient::new(GeocodingConfig::default())
        .expect("Failed to create geocoding client");
    let routing = RoutingClient::new(RoutingConfig::new(routing_api_key))
        .expect("Failed to create routing client");

    let rates = RateTables::default();
    println!("Rate tables version {}", rates.version);

    let quoter = Quoter::new(
        LocationResolver::new(geocoding, cache.clone()),
        DistanceResolver::new(routing, cache.clone()),
        FuelGauge::new(cache.clone()),
        rates,
    );

    let state = AppState::new(quoter, cache);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Cost estimation service listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET    /health       - Health check");
    println!("  POST   /api/quote    - Itemized moving or parcel quote");
    println!("  GET    /admin/cache  - Cache statistics");
    println!("  DELETE /admin/cache  - Invalidate cached entries");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
