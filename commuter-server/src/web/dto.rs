//! Data transfer objects for the polling endpoint.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::{Serialize, Serializer};

use crate::domain::{CommuterDepartures, DepartureRecord, StationBoard};

/// Body of the `/page-info` response.
#[derive(Debug, Serialize)]
pub struct PageInfoResponse {
    pub north_station: BoardView,
    pub south_station: BoardView,

    /// Weekday name, e.g. "Monday"
    pub today: String,

    /// Date without zero padding, e.g. "2024-1-1"
    pub date: String,

    /// Time of day, e.g. "7:05 AM"
    pub time: String,
}

impl PageInfoResponse {
    /// Build the response from fetched departures and the current local time.
    pub fn new<Tz>(departures: &CommuterDepartures, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            north_station: BoardView::from_board(&departures.north_station),
            south_station: BoardView::from_board(&departures.south_station),
            today: now.format("%A").to_string(),
            date: now.format("%Y-%-m-%-d").to_string(),
            time: now.format("%-I:%M %p").to_string(),
        }
    }
}

/// A station board ready for display.
///
/// Serializes as an object keyed by departure key in board order, or as
/// `false` when the station has no departures.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView(Option<Vec<(String, DepartureView)>>);

impl BoardView {
    pub fn from_board(board: &StationBoard) -> Self {
        Self(board.departures().map(|departures| {
            departures
                .iter()
                .map(|(key, record)| (key.to_string(), DepartureView::from_record(record)))
                .collect()
        }))
    }

    pub fn departures(&self) -> Option<&[(String, DepartureView)]> {
        self.0.as_deref()
    }
}

impl Serialize for BoardView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(entries) => serializer.collect_map(entries.iter().map(|(k, v)| (k, v))),
            None => serializer.serialize_bool(false),
        }
    }
}

/// A departure with its time formatted for riders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartureView {
    pub prediction_id: String,

    /// Clock time in the feed's offset, e.g. "8:05 a.m."
    pub departure_time: String,

    pub status: Option<String>,
    pub route_id: String,
    pub trip_id: String,
    pub stop_id: String,
    pub headsign: String,
    pub train_number: String,
    pub platform_code: String,
}

impl DepartureView {
    pub fn from_record(record: &DepartureRecord) -> Self {
        Self {
            prediction_id: record.prediction_id.clone(),
            departure_time: display_time(&record.departure_time),
            status: record.status.as_ref().map(|s| s.to_string()),
            route_id: record.route_id.to_string(),
            trip_id: record.trip_id.clone(),
            stop_id: record.stop_id.clone(),
            headsign: record.headsign.clone(),
            train_number: record.train_number.clone(),
            platform_code: record.platform_code.clone(),
        }
    }
}

/// Format a time as "8:05 a.m." / "12:30 p.m.".
pub fn display_time<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format("%-I:%M %p")
        .to_string()
        .replace("AM", "a.m.")
        .replace("PM", "p.m.")
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DepartureKey, DepartureStatus, RouteId, StationDepartures, parse_departure_time,
    };
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    fn record(time: &str) -> DepartureRecord {
        DepartureRecord {
            prediction_id: "p1".to_string(),
            departure_time: parse_departure_time(time).unwrap(),
            status: Some(DepartureStatus::Delayed),
            route_id: RouteId::new("CR-Lowell"),
            trip_id: "t1".to_string(),
            stop_id: "BNT-0000-01".to_string(),
            headsign: "Lowell".to_string(),
            train_number: "301".to_string(),
            platform_code: "TBD".to_string(),
        }
    }

    #[test]
    fn display_time_morning_and_evening() {
        let t = parse_departure_time("2024-01-01T08:05:00-05:00").unwrap();
        assert_eq!(display_time(&t), "8:05 a.m.");

        let t = parse_departure_time("2024-01-01T17:40:00-05:00").unwrap();
        assert_eq!(display_time(&t), "5:40 p.m.");

        let t = parse_departure_time("2024-01-01T00:15:00-05:00").unwrap();
        assert_eq!(display_time(&t), "12:15 a.m.");
    }

    #[test]
    fn display_time_uses_feed_offset() {
        // Same instant, shown in the offset the feed reported.
        let t = parse_departure_time("2024-01-01T13:05:00Z").unwrap();
        assert_eq!(display_time(&t), "1:05 p.m.");
        let eastern = t.with_timezone(&FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(display_time(&eastern), "8:05 a.m.");
    }

    #[test]
    fn departure_view_copies_fields() {
        let view = DepartureView::from_record(&record("2024-01-01T08:05:00-05:00"));
        assert_eq!(view.departure_time, "8:05 a.m.");
        assert_eq!(view.status.as_deref(), Some("Delayed"));
        assert_eq!(view.route_id, "CR-Lowell");
        assert_eq!(view.train_number, "301");
        assert_eq!(view.platform_code, "TBD");
    }

    #[test]
    fn page_info_serialization() {
        let mut departures = StationDepartures::new();
        let raw = "2024-01-01T08:05:00-05:00";
        departures.insert(DepartureKey::new(&RouteId::new("CR-Lowell"), raw), record(raw));

        let all = CommuterDepartures {
            north_station: StationBoard::Departures(departures),
            south_station: StationBoard::Empty,
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 7, 5, 0).unwrap();

        let json = serde_json::to_value(PageInfoResponse::new(&all, &now)).unwrap();

        assert_eq!(json["today"], "Monday");
        assert_eq!(json["date"], "2024-1-1");
        assert_eq!(json["time"], "7:05 AM");
        assert_eq!(json["south_station"], json!(false));
        assert_eq!(
            json["north_station"]["CR-Lowell-2024-01-01T08:05:00-05:00"]["departure_time"],
            "8:05 a.m."
        );
        assert_eq!(
            json["north_station"]["CR-Lowell-2024-01-01T08:05:00-05:00"]["headsign"],
            "Lowell"
        );
    }

    #[test]
    fn board_view_keeps_order() {
        let mut departures = StationDepartures::new();
        for (route, raw) in [
            ("CR-Z", "2024-01-01T08:00:00Z"),
            ("CR-A", "2024-01-01T09:00:00Z"),
        ] {
            departures.insert(DepartureKey::new(&RouteId::new(route), raw), record(raw));
        }

        let view = BoardView::from_board(&StationBoard::Departures(departures));
        let keys: Vec<_> = view
            .departures()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, ["CR-Z-2024-01-01T08:00:00Z", "CR-A-2024-01-01T09:00:00Z"]);

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.find("CR-Z").unwrap() < json.find("CR-A").unwrap());
    }

    #[test]
    fn empty_board_view_is_false() {
        let view = BoardView::from_board(&StationBoard::Empty);
        assert_eq!(view.departures(), None);
        assert_eq!(serde_json::to_string(&view).unwrap(), "false");
    }
}
