//! Station and route identifiers.

use std::fmt;

use serde::Serialize;

/// A commuter rail terminal served by the departure board.
///
/// The set is closed: each station carries the stop filter sent upstream
/// and the label used as its key in responses. Supporting another terminal
/// means adding a variant here and to [`Station::ALL`].
///
/// # Examples
///
/// ```
/// use commuter_server::domain::Station;
///
/// assert_eq!(Station::NorthStation.stop_filter(), "place-north");
/// assert_eq!(Station::SouthStation.label(), "south_station");
/// assert_eq!(Station::from_label("north_station"), Some(Station::NorthStation));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Station {
    NorthStation,
    SouthStation,
}

impl Station {
    /// Every configured station, in display order.
    pub const ALL: [Station; 2] = [Station::NorthStation, Station::SouthStation];

    /// Value for the upstream `filter[stop]` parameter.
    ///
    /// North Station is addressed by its parent stop id, South Station by
    /// name; the API accepts both.
    pub fn stop_filter(&self) -> &'static str {
        match self {
            Station::NorthStation => "place-north",
            Station::SouthStation => "South Station",
        }
    }

    /// Snake-case label used as the response key.
    pub fn label(&self) -> &'static str {
        match self {
            Station::NorthStation => "north_station",
            Station::SouthStation => "south_station",
        }
    }

    /// Look up a station by its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque upstream route identifier (e.g. "CR-Haverhill").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
