//! MBTA v3 API access.
//!
//! This module provides the gateway to the MBTA's public JSON:API service.
//! Only the two endpoints the departure board needs are supported:
//! - `/routes` to find the commuter rail lines serving a station
//! - `/predictions` for real-time departure predictions, with the related
//!   stops, trips and routes side-loaded under `included`
//!
//! The [`TransitGateway`] trait is the seam between the departure logic and
//! the network; [`MbtaClient`] is the live implementation and
//! [`MockGateway`] serves canned documents.

mod client;
mod error;
mod gateway;
mod mock;
mod types;

pub use client::{MbtaClient, MbtaConfig, SUPPORTED_BASE_URL};
pub use error::MbtaError;
pub use gateway::{Endpoint, QueryParams, TransitGateway};
pub use mock::{MockGateway, RecordedRequest};
pub use types::{
    IncludedResource, PredictionAttributes, PredictionRelationships, PredictionResource,
    PredictionsDocument, Relationship, RelatedKind, ResourceIdentifier, RouteResource,
    StopAttributes, TripAttributes,
};
