//! Station aggregation: routes → query → predictions → board, per station.

use tracing::{debug, info};

use crate::clock::Clock;
use crate::domain::{CommuterDepartures, Station, StationBoard};
use crate::mbta::{Endpoint, MbtaError, TransitGateway};

use super::normalize::normalize;
use super::query::build_predictions_query;
use super::routes::resolve_routes;

/// Fetch and normalize the departure board for one station.
///
/// A station with no routes still gets a predictions request (with an empty
/// route filter); upstream answers it with no data, giving an empty board.
pub async fn fetch_station<G, C>(
    gateway: &G,
    clock: &C,
    station: Station,
) -> Result<StationBoard, MbtaError>
where
    G: TransitGateway,
    C: Clock + ?Sized,
{
    let routes = resolve_routes(gateway, station).await?;
    if routes.is_empty() {
        debug!(%station, "no routes; querying predictions with empty route filter");
    }

    let query = build_predictions_query(station, &routes);
    let raw = gateway.fetch(Endpoint::Predictions, &query).await?;

    let board = normalize(raw, clock.now())?;
    info!(%station, departures = board.len(), "fetched departure board");
    Ok(board)
}

/// Fetch boards for both stations.
///
/// The two stations are fetched concurrently. Either one failing fails the
/// whole call; an empty board is not a failure.
pub async fn fetch_all<G, C>(gateway: &G, clock: &C) -> Result<CommuterDepartures, MbtaError>
where
    G: TransitGateway,
    C: Clock + ?Sized,
{
    let (north_station, south_station) = tokio::try_join!(
        fetch_station(gateway, clock, Station::NorthStation),
        fetch_station(gateway, clock, Station::SouthStation),
    )?;

    Ok(CommuterDepartures {
        north_station,
        south_station,
    })
}
