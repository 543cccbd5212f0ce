//! Route resolution: which commuter rail lines serve a station.

use serde_json::Value;
use tracing::debug;

use crate::domain::{RouteId, Station};
use crate::mbta::{Endpoint, MbtaError, QueryParams, RouteResource, TransitGateway};

/// Route type for commuter rail in the GTFS route type enumeration.
pub const COMMUTER_RAIL_ROUTE_TYPE: &str = "2";

/// Query parameters for the `/routes` request for a station.
pub fn routes_query(station: Station) -> QueryParams {
    vec![
        ("filter[stop]", station.stop_filter().to_string()),
        ("filter[type]", COMMUTER_RAIL_ROUTE_TYPE.to_string()),
    ]
}

/// Fetch the ids of the commuter rail routes serving `station`.
///
/// Ids are returned in response order. Gateway failures propagate as-is;
/// a response without a `data` array is [`MbtaError::MalformedResponse`].
pub async fn resolve_routes<G: TransitGateway>(
    gateway: &G,
    station: Station,
) -> Result<Vec<RouteId>, MbtaError> {
    let response = gateway
        .fetch(Endpoint::Routes, &routes_query(station))
        .await?;

    let routes = route_ids(response)?;
    debug!(%station, routes = routes.len(), "resolved routes");
    Ok(routes)
}

fn route_ids(mut response: Value) -> Result<Vec<RouteId>, MbtaError> {
    let data = response
        .get_mut("data")
        .map(Value::take)
        .ok_or_else(|| MbtaError::malformed("data", "missing from routes response"))?;

    let routes: Vec<RouteResource> =
        serde_json::from_value(data).map_err(|e| MbtaError::malformed("data", e.to_string()))?;

    Ok(routes.into_iter().map(|r| RouteId::new(r.id)).collect())
}
