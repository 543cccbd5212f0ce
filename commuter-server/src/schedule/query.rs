//! Query construction for the `/predictions` endpoint.

use crate::domain::{RouteId, Station};
use crate::mbta::QueryParams;

/// Related resources side-loaded with each prediction.
const INCLUDE: &str = "stop,route,trip";

/// Outbound trips only; inbound trains terminate at the station.
const OUTBOUND_DIRECTION: &str = "0";

/// Ascending departure time; the board relies on this order.
const SORT_BY_DEPARTURE: &str = "departure_time";

/// Build the `/predictions` query for a station and its routes.
///
/// Parameters come out in a fixed order so identical inputs always produce
/// an identical request. An empty route list yields an empty route filter,
/// which upstream answers with no predictions.
pub fn build_predictions_query(station: Station, routes: &[RouteId]) -> QueryParams {
    let route_filter = routes
        .iter()
        .map(RouteId::as_str)
        .collect::<Vec<_>>()
        .join(",");

    vec![
        ("include", INCLUDE.to_string()),
        ("filter[stop]", station.stop_filter().to_string()),
        ("filter[route]", route_filter),
        ("filter[direction_id]", OUTBOUND_DIRECTION.to_string()),
        ("sort", SORT_BY_DEPARTURE.to_string()),
    ]
}
