//! MBTA client error types.

use super::gateway::Endpoint;
use super::types::RelatedKind;

/// Errors from fetching or normalizing MBTA data.
#[derive(Debug, thiserror::Error)]
pub enum MbtaError {
    /// Client misconfigured (unsupported base URL, unusable API key)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// HTTP request failed (connection refused, DNS, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("request to {endpoint} timed out after {secs}s")]
    Timeout { endpoint: Endpoint, secs: u64 },

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by MBTA API")]
    RateLimited,

    /// Invalid API key or access denied
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Response was not JSON, or an expected field was missing or invalid
    #[error("malformed response: {field}: {message}")]
    MalformedResponse {
        field: &'static str,
        message: String,
    },

    /// An included record refers to no prediction in the primary data
    #[error("included {kind} {id:?} does not belong to any prediction")]
    KeyLookup { kind: RelatedKind, id: String },
}

impl MbtaError {
    pub(crate) fn malformed(field: &'static str, message: impl Into<String>) -> Self {
        MbtaError::MalformedResponse {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MbtaError::ApiError {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = MbtaError::malformed("data", "missing");
        assert_eq!(err.to_string(), "malformed response: data: missing");

        let err = MbtaError::KeyLookup {
            kind: RelatedKind::Trip,
            id: "CR-Weekday-1".into(),
        };
        assert_eq!(
            err.to_string(),
            r#"included trip "CR-Weekday-1" does not belong to any prediction"#
        );

        let err = MbtaError::Timeout {
            endpoint: Endpoint::Predictions,
            secs: 30,
        };
        assert_eq!(err.to_string(), "request to /predictions timed out after 30s");
    }
}
