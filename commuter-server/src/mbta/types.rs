//! MBTA v3 API response DTOs.
//!
//! The API speaks JSON:API: a top-level `data` array of primary resources,
//! each with `attributes` and `relationships`, plus an optional `included`
//! array of side-loaded resources. Only the fields the departure board uses
//! are modelled; everything else is ignored.

use std::fmt;

use serde::Deserialize;

/// A route from the `/routes` endpoint. Only the id is used.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResource {
    pub id: String,
}

/// Response from the `/predictions` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionsDocument {
    pub data: Vec<PredictionResource>,

    /// Side-loaded stops, trips and routes. Absent when nothing was included.
    #[serde(default)]
    pub included: Vec<IncludedResource>,
}

/// A single departure prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResource {
    pub id: String,
    pub attributes: PredictionAttributes,
    pub relationships: PredictionRelationships,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionAttributes {
    /// ISO-8601 with offset. Null for arrival-only predictions.
    #[serde(default)]
    pub departure_time: Option<String>,

    /// Free-text status (e.g. "On time", "Departed"). Often null.
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRelationships {
    pub route: Relationship,
    pub trip: Relationship,
    pub stop: Relationship,
}

/// A to-one relationship. `data` is null when the link is unset.
#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    pub data: Option<ResourceIdentifier>,
}

impl Relationship {
    pub fn id(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.id.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A side-loaded resource from `included`, tagged by its `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IncludedResource {
    Stop {
        id: String,
        #[serde(default)]
        attributes: StopAttributes,
    },
    Trip {
        id: String,
        #[serde(default)]
        attributes: TripAttributes,
    },
    Route {
        id: String,
    },
    /// Any other resource type; ignored.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopAttributes {
    /// Track number at a commuter rail terminal.
    #[serde(default)]
    pub platform_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripAttributes {
    #[serde(default)]
    pub headsign: Option<String>,

    /// Train number (e.g. "2315").
    #[serde(default)]
    pub name: Option<String>,
}

/// Which kind of related record a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelatedKind {
    Stop,
    Trip,
    Route,
}

impl fmt::Display for RelatedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelatedKind::Stop => "stop",
            RelatedKind::Trip => "trip",
            RelatedKind::Route => "route",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_predictions_document() {
        let json = r#"{
            "data": [
                {
                    "type": "prediction",
                    "id": "prediction-CR-Weekday-Fall-23-301-North Station-1",
                    "attributes": {
                        "arrival_time": null,
                        "departure_time": "2024-01-01T08:00:00-05:00",
                        "direction_id": 0,
                        "schedule_relationship": null,
                        "status": "On time"
                    },
                    "relationships": {
                        "route": {"data": {"id": "CR-Lowell", "type": "route"}},
                        "stop": {"data": {"id": "BNT-0000-01", "type": "stop"}},
                        "trip": {"data": {"id": "CR-Weekday-Fall-23-301", "type": "trip"}}
                    }
                }
            ],
            "included": [
                {"type": "stop", "id": "BNT-0000-01", "attributes": {"platform_code": "1", "name": "North Station"}},
                {"type": "trip", "id": "CR-Weekday-Fall-23-301", "attributes": {"headsign": "Lowell", "name": "301"}},
                {"type": "route", "id": "CR-Lowell", "attributes": {"long_name": "Lowell Line"}}
            ],
            "jsonapi": {"version": "1.0"}
        }"#;

        let doc: PredictionsDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.data.len(), 1);

        let p = &doc.data[0];
        assert_eq!(
            p.attributes.departure_time.as_deref(),
            Some("2024-01-01T08:00:00-05:00")
        );
        assert_eq!(p.attributes.status.as_deref(), Some("On time"));
        assert_eq!(p.relationships.route.id(), Some("CR-Lowell"));
        assert_eq!(p.relationships.stop.id(), Some("BNT-0000-01"));

        assert_eq!(doc.included.len(), 3);
        match &doc.included[0] {
            IncludedResource::Stop { id, attributes } => {
                assert_eq!(id, "BNT-0000-01");
                assert_eq!(attributes.platform_code.as_deref(), Some("1"));
            }
            other => panic!("expected stop, got {other:?}"),
        }
        match &doc.included[1] {
            IncludedResource::Trip { attributes, .. } => {
                assert_eq!(attributes.headsign.as_deref(), Some("Lowell"));
                assert_eq!(attributes.name.as_deref(), Some("301"));
            }
            other => panic!("expected trip, got {other:?}"),
        }
        assert!(matches!(&doc.included[2], IncludedResource::Route { id } if id == "CR-Lowell"));
    }

    #[test]
    fn missing_included_defaults_to_empty() {
        let doc: PredictionsDocument = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(doc.data.is_empty());
        assert!(doc.included.is_empty());
    }

    #[test]
    fn unknown_included_type_is_other() {
        let json = r#"{"type": "vehicle", "id": "y1234", "attributes": {"label": "1050"}}"#;
        let res: IncludedResource = serde_json::from_str(json).unwrap();
        assert!(matches!(res, IncludedResource::Other));
    }

    #[test]
    fn null_attributes_are_none() {
        let json = r#"{"type": "trip", "id": "t1", "attributes": {"headsign": null, "name": ""}}"#;
        let res: IncludedResource = serde_json::from_str(json).unwrap();
        match res {
            IncludedResource::Trip { attributes, .. } => {
                assert!(attributes.headsign.is_none());
                assert_eq!(attributes.name.as_deref(), Some(""));
            }
            other => panic!("expected trip, got {other:?}"),
        }
    }

    #[test]
    fn null_relationship_data() {
        let json = r#"{"data": null}"#;
        let rel: Relationship = serde_json::from_str(json).unwrap();
        assert_eq!(rel.id(), None);
    }
}
