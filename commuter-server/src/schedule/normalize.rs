//! Normalization of a predictions document into a station board.
//!
//! Works in two passes over one response:
//!
//! 1. Each prediction becomes a [`DepartureRecord`] keyed by
//!    [`DepartureKey`], with platform, headsign and train number defaulted.
//!    Stop, trip and route ids are remembered against the key.
//! 2. Each `included` stop or trip is matched back to its departure through
//!    those ids and its attributes are copied in.
//!
//! The id lookups live only for the duration of one call.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{
    DepartureKey, DepartureRecord, DepartureStatus, HEADSIGN_ENDED, PLATFORM_TBD, RouteId,
    StationBoard, StationDepartures, parse_departure_time,
};
use crate::mbta::{
    IncludedResource, MbtaError, PredictionResource, PredictionsDocument, RelatedKind,
};

/// Normalize a raw `/predictions` response.
///
/// An empty `data` array yields [`StationBoard::Empty`]. `now` is the
/// instant used for status correction (see [`correct_status`]).
///
/// # Errors
///
/// - [`MbtaError::MalformedResponse`] if `data` is missing or a prediction
///   lacks a relationship id or a parseable departure time
/// - [`MbtaError::KeyLookup`] if an included stop, trip or route matches no
///   prediction
pub fn normalize(raw: Value, now: DateTime<Utc>) -> Result<StationBoard, MbtaError> {
    match raw.get("data") {
        None => {
            return Err(MbtaError::malformed(
                "data",
                "missing from predictions response",
            ));
        }
        // Nothing to key `included` against, so it is not inspected.
        Some(Value::Array(data)) if data.is_empty() => return Ok(StationBoard::Empty),
        Some(_) => {}
    }

    let document = parse_document(raw)?;

    let mut departures = StationDepartures::with_capacity(document.data.len());
    let mut lookups = RelatedLookups::default();

    for prediction in document.data {
        let (key, record) = convert_prediction(prediction, now)?;
        lookups.record(&key, &record);

        if let Some(previous) = departures.insert(key.clone(), record) {
            warn!(
                %key,
                replaced = %previous.prediction_id,
                "duplicate departure key in predictions response"
            );
        }
    }

    for related in &document.included {
        splice_related(&mut departures, &lookups, related)?;
    }

    Ok(StationBoard::Departures(departures))
}

fn parse_document(raw: Value) -> Result<PredictionsDocument, MbtaError> {
    serde_json::from_value(raw).map_err(|e| MbtaError::malformed("predictions", e.to_string()))
}

/// Build the keyed record for one prediction.
fn convert_prediction(
    prediction: PredictionResource,
    now: DateTime<Utc>,
) -> Result<(DepartureKey, DepartureRecord), MbtaError> {
    let relationships = &prediction.relationships;
    let route_id = relationships
        .route
        .id()
        .map(RouteId::new)
        .ok_or_else(|| MbtaError::malformed("relationships.route", missing_in(&prediction)))?;
    let trip_id = relationships
        .trip
        .id()
        .ok_or_else(|| MbtaError::malformed("relationships.trip", missing_in(&prediction)))?
        .to_string();
    let stop_id = relationships
        .stop
        .id()
        .ok_or_else(|| MbtaError::malformed("relationships.stop", missing_in(&prediction)))?
        .to_string();

    let raw_time = prediction.attributes.departure_time.as_deref().ok_or_else(|| {
        MbtaError::malformed("attributes.departure_time", missing_in(&prediction))
    })?;
    let departure_time = parse_departure_time(raw_time)
        .map_err(|e| MbtaError::malformed("attributes.departure_time", e.to_string()))?;

    let key = DepartureKey::new(&route_id, raw_time);

    let status = prediction
        .attributes
        .status
        .as_deref()
        .map(DepartureStatus::parse);
    let status = correct_status(status, &departure_time, now);

    let record = DepartureRecord {
        prediction_id: prediction.id,
        departure_time,
        status,
        route_id,
        trip_id,
        stop_id,
        headsign: String::new(),
        train_number: String::new(),
        platform_code: PLATFORM_TBD.to_string(),
    };

    Ok((key, record))
}

fn missing_in(prediction: &PredictionResource) -> String {
    format!("missing in prediction {}", prediction.id)
}

/// Correct a status the feed reports too early.
///
/// The feed sometimes marks a train "Departed" before its predicted
/// departure time. If the status is `Departed` and the departure is strictly
/// after `now`, the train is reported as `Delayed` instead. Every other
/// status passes through unchanged.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use commuter_server::domain::{DepartureStatus, parse_departure_time};
/// use commuter_server::schedule::correct_status;
///
/// let departs = parse_departure_time("2024-01-01T08:00:00Z").unwrap();
/// let before = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
/// let after = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
///
/// assert_eq!(
///     correct_status(Some(DepartureStatus::Departed), &departs, before),
///     Some(DepartureStatus::Delayed)
/// );
/// assert_eq!(
///     correct_status(Some(DepartureStatus::Departed), &departs, after),
///     Some(DepartureStatus::Departed)
/// );
/// ```
pub fn correct_status(
    status: Option<DepartureStatus>,
    departure_time: &DateTime<FixedOffset>,
    now: DateTime<Utc>,
) -> Option<DepartureStatus> {
    match status {
        Some(DepartureStatus::Departed) if departure_time.with_timezone(&Utc) > now => {
            debug!(%departure_time, %now, "departed before departure time; reporting delayed");
            Some(DepartureStatus::Delayed)
        }
        other => other,
    }
}

/// Ids seen in the primary pass, each pointing at the last departure that
/// referenced it.
#[derive(Default)]
struct RelatedLookups {
    stops: HashMap<String, DepartureKey>,
    trips: HashMap<String, DepartureKey>,
    routes: HashMap<String, DepartureKey>,
}

impl RelatedLookups {
    fn record(&mut self, key: &DepartureKey, record: &DepartureRecord) {
        self.stops.insert(record.stop_id.clone(), key.clone());
        self.trips.insert(record.trip_id.clone(), key.clone());
        self.routes
            .insert(record.route_id.as_str().to_string(), key.clone());
    }

    fn resolve(&self, kind: RelatedKind, id: &str) -> Result<&DepartureKey, MbtaError> {
        let map = match kind {
            RelatedKind::Stop => &self.stops,
            RelatedKind::Trip => &self.trips,
            RelatedKind::Route => &self.routes,
        };
        map.get(id).ok_or_else(|| MbtaError::KeyLookup {
            kind,
            id: id.to_string(),
        })
    }
}

/// Copy one included record's attributes onto its departure.
fn splice_related(
    departures: &mut StationDepartures,
    lookups: &RelatedLookups,
    related: &IncludedResource,
) -> Result<(), MbtaError> {
    let (kind, id) = match related {
        IncludedResource::Stop { id, .. } => (RelatedKind::Stop, id),
        IncludedResource::Trip { id, .. } => (RelatedKind::Trip, id),
        IncludedResource::Route { id } => (RelatedKind::Route, id),
        IncludedResource::Other => return Ok(()),
    };

    let key = lookups.resolve(kind, id)?;
    let record = departures
        .get_mut(key)
        .ok_or_else(|| MbtaError::KeyLookup {
            kind,
            id: id.clone(),
        })?;

    match related {
        IncludedResource::Stop { attributes, .. } => {
            if let Some(platform) = non_empty(&attributes.platform_code) {
                record.platform_code = platform.to_string();
            }
        }
        IncludedResource::Trip { attributes, .. } => {
            record.headsign = non_empty(&attributes.headsign)
                .unwrap_or(HEADSIGN_ENDED)
                .to_string();
            if let Some(name) = non_empty(&attributes.name) {
                record.train_number = name.to_string();
            }
        }
        // Routes are only included to satisfy the request; nothing to copy.
        IncludedResource::Route { .. } | IncludedResource::Other => {}
    }

    Ok(())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
