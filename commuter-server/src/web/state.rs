//! Application state for the web layer.

use std::sync::Arc;

use crate::clock::Clock;

/// Shared application state.
///
/// Generic over the gateway so the server can run against the live API or
/// a mock.
pub struct AppState<G> {
    /// Transit API gateway
    pub gateway: Arc<G>,

    /// Clock for status correction and page timestamps
    pub clock: Arc<dyn Clock>,
}

impl<G> AppState<G> {
    /// Create a new app state.
    pub fn new(gateway: G, clock: impl Clock + 'static) -> Self {
        Self {
            gateway: Arc::new(gateway),
            clock: Arc::new(clock),
        }
    }
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            clock: Arc::clone(&self.clock),
        }
    }
}
