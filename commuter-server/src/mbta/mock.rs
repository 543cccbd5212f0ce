//! Mock gateway for testing without API access.
//!
//! Serves canned JSON documents as if they were live API responses, keyed by
//! endpoint and station. Documents can be added in code or loaded from a
//! directory of files named `{endpoint}-{station label}.json`
//! (e.g. `predictions-north_station.json`).

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::Station;

use super::error::MbtaError;
use super::gateway::{Endpoint, TransitGateway};

/// A request seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub endpoint: Endpoint,
    pub params: Vec<(&'static str, String)>,
}

/// Gateway that answers from pre-loaded documents.
///
/// Lookups use the `filter[stop]` parameter of the request, so each station
/// gets its own routes and predictions documents. Requests with no matching
/// document fail with a 404 [`MbtaError::ApiError`].
///
/// Requests are only recorded after [`MockGateway::with_recording`]; a mock
/// serving a long-running process keeps no history.
#[derive(Debug, Clone, Default)]
pub struct MockGateway {
    documents: HashMap<(Endpoint, &'static str), Value>,
    requests: Option<Arc<Mutex<Vec<RecordedRequest>>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `endpoint` requests filtered to `station`.
    pub fn with_document(mut self, endpoint: Endpoint, station: Station, document: Value) -> Self {
        self.documents
            .insert((endpoint, station.stop_filter()), document);
        self
    }

    /// Keep a log of every request, readable through [`Self::requests`].
    pub fn with_recording(mut self) -> Self {
        self.requests = Some(Arc::default());
        self
    }

    /// Load documents from a directory.
    ///
    /// Non-JSON files are skipped. A JSON file whose name does not parse as
    /// `{endpoint}-{station label}` is an error.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, MbtaError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            MbtaError::Configuration(format!(
                "failed to read mock data directory {}: {e}",
                data_dir.display()
            ))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                MbtaError::Configuration(format!("failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let (endpoint, station) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(parse_file_stem)
                .ok_or_else(|| {
                    MbtaError::Configuration(format!(
                        "mock file {} is not named {{routes|predictions}}-{{station}}.json",
                        path.display()
                    ))
                })?;

            let json = std::fs::read_to_string(&path).map_err(|e| {
                MbtaError::Configuration(format!("failed to read {}: {e}", path.display()))
            })?;
            let document: Value = serde_json::from_str(&json).map_err(|e| {
                MbtaError::Configuration(format!("failed to parse {}: {e}", path.display()))
            })?;

            mock = mock.with_document(endpoint, station, document);
        }

        Ok(mock)
    }

    /// Number of loaded documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Every request received so far, in order. Empty unless recording.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        match &self.requests {
            Some(requests) => requests.lock().await.clone(),
            None => Vec::new(),
        }
    }
}

fn parse_file_stem(stem: &str) -> Option<(Endpoint, Station)> {
    let (endpoint, label) = stem.split_once('-')?;
    Some((Endpoint::from_name(endpoint)?, Station::from_label(label)?))
}

impl TransitGateway for MockGateway {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[(&'static str, String)],
    ) -> Result<Value, MbtaError> {
        if let Some(requests) = &self.requests {
            requests.lock().await.push(RecordedRequest {
                endpoint,
                params: params.to_vec(),
            });
        }

        let stop = params
            .iter()
            .find(|(name, _)| *name == "filter[stop]")
            .map(|(_, value)| value.as_str())
            .unwrap_or_default();

        self.documents
            .iter()
            .find(|((e, s), _)| *e == endpoint && *s == stop)
            .map(|(_, doc)| doc.clone())
            .ok_or_else(|| MbtaError::ApiError {
                status: 404,
                message: format!("no mock document for {endpoint} at {stop:?}"),
            })
    }
}
