//! Web layer for the cost estimation service.
//!
//! Exposes the quoting endpoint plus a small admin surface for the cache.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
