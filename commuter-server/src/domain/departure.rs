//! Normalized departure records and the boards built from them.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};

use super::{DepartureStatus, RouteId, Station};

/// Platform shown until the feed assigns one.
pub const PLATFORM_TBD: &str = "TBD";

/// Headsign for a trip the feed no longer describes.
pub const HEADSIGN_ENDED: &str = "Ended";

/// Key identifying a departure within one station's board.
///
/// Built from the route id and the departure timestamp exactly as the feed
/// sent it, joined by `-`. The raw string is used rather than a reformatted
/// time so the key matches upstream byte for byte.
///
/// # Examples
///
/// ```
/// use commuter_server::domain::{DepartureKey, RouteId};
///
/// let key = DepartureKey::new(&RouteId::new("CR-1"), "2024-01-01T08:00:00Z");
/// assert_eq!(key.as_str(), "CR-1-2024-01-01T08:00:00Z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DepartureKey(String);

impl DepartureKey {
    pub fn new(route_id: &RouteId, raw_departure_time: &str) -> Self {
        Self(format!("{route_id}-{raw_departure_time}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DepartureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A prediction merged with its stop, trip and route details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartureRecord {
    /// Upstream prediction id
    pub prediction_id: String,

    /// Predicted departure, in the offset the feed reported
    pub departure_time: DateTime<FixedOffset>,

    /// Status after correction; `None` when the feed sent no status
    pub status: Option<DepartureStatus>,

    pub route_id: RouteId,
    pub trip_id: String,
    pub stop_id: String,

    /// Destination shown to riders; "Ended" if the trip has none
    pub headsign: String,

    /// Train name/number from the trip, empty if unknown
    pub train_number: String,

    /// Platform (track) code, "TBD" until assigned
    pub platform_code: String,
}

/// Departures for one station, in the order the feed returned them.
///
/// Serializes as a JSON object keyed by [`DepartureKey`], preserving
/// insertion order. Inserting an existing key replaces the record but keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationDepartures {
    entries: Vec<(DepartureKey, DepartureRecord)>,
    index: HashMap<DepartureKey, usize>,
}

impl StationDepartures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a record, returning the one it replaced if the key was taken.
    pub fn insert(&mut self, key: DepartureKey, record: DepartureRecord) -> Option<DepartureRecord> {
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, record)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
                None
            }
        }
    }

    pub fn get(&self, key: &DepartureKey) -> Option<&DepartureRecord> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &DepartureKey) -> Option<&mut DepartureRecord> {
        self.index.get(key).map(|&i| &mut self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DepartureKey, &DepartureRecord)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &DepartureKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn records(&self) -> impl Iterator<Item = &DepartureRecord> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl Serialize for StationDepartures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// What one station's board shows.
///
/// `Empty` is the normal overnight state, not a failure. It serializes as
/// `false` so pollers can test the field for truthiness.
#[derive(Debug, Clone, PartialEq)]
pub enum StationBoard {
    Departures(StationDepartures),
    Empty,
}

impl StationBoard {
    pub fn departures(&self) -> Option<&StationDepartures> {
        match self {
            StationBoard::Departures(d) => Some(d),
            StationBoard::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StationBoard::Empty)
    }

    /// Number of departures (zero for `Empty`).
    pub fn len(&self) -> usize {
        self.departures().map_or(0, StationDepartures::len)
    }
}

impl Serialize for StationBoard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StationBoard::Departures(d) => d.serialize(serializer),
            StationBoard::Empty => serializer.serialize_bool(false),
        }
    }
}

/// Boards for both terminals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommuterDepartures {
    pub north_station: StationBoard,
    pub south_station: StationBoard,
}

impl CommuterDepartures {
    pub fn board(&self, station: Station) -> &StationBoard {
        match station {
            Station::NorthStation => &self.north_station,
            Station::SouthStation => &self.south_station,
        }
    }
}
