//! Domain types for the departure board.
//!
//! These are the validated, normalized shapes the rest of the crate works
//! with. Raw upstream documents live in [`crate::mbta`] and are converted
//! into these types by [`crate::schedule`].

mod departure;
mod station;
mod status;
mod time;

pub use departure::{
    CommuterDepartures, DepartureKey, DepartureRecord, HEADSIGN_ENDED, PLATFORM_TBD,
    StationBoard, StationDepartures,
};
pub use station::{RouteId, Station};
pub use status::DepartureStatus;
pub use time::{TimeError, parse_departure_time};
