//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::QuoteCache;
use crate::pricing::LiveQuoter;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The quoting engine, wired with live providers.
    pub quoter: Arc<LiveQuoter>,

    /// The shared cache, exposed for the admin surface.
    pub cache: Arc<QuoteCache>,
}

impl AppState {
    pub fn new(quoter: LiveQuoter, cache: Arc<QuoteCache>) -> Self {
        Self {
            quoter: Arc::new(quoter),
            cache,
        }
    }
}
