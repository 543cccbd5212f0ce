//! The seam between the departure logic and the network.

use std::fmt;
use std::future::Future;

use serde_json::Value;

use super::error::MbtaError;

/// Query parameters in the order they are sent.
pub type QueryParams = Vec<(&'static str, String)>;

/// The upstream endpoints this crate talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Routes,
    Predictions,
}

impl Endpoint {
    /// Path appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Routes => "/routes",
            Endpoint::Predictions => "/predictions",
        }
    }

    /// Short name, as used in mock data file names.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Routes => "routes",
            Endpoint::Predictions => "predictions",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "routes" => Some(Endpoint::Routes),
            "predictions" => Some(Endpoint::Predictions),
            _ => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Performs GET requests against the transit API and returns parsed JSON.
///
/// Implemented by [`super::MbtaClient`] for the live API and by
/// [`super::MockGateway`] for tests and offline development.
pub trait TransitGateway: Send + Sync {
    fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[(&'static str, String)],
    ) -> impl Future<Output = Result<Value, MbtaError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::Routes.path(), "/routes");
        assert_eq!(Endpoint::Predictions.to_string(), "/predictions");
    }

    #[test]
    fn endpoint_names() {
        for endpoint in [Endpoint::Routes, Endpoint::Predictions] {
            assert_eq!(Endpoint::from_name(endpoint.name()), Some(endpoint));
        }
        assert_eq!(Endpoint::from_name("schedules"), None);
    }
}
