//! MBTA v3 HTTP client.
//!
//! Issues authenticated GET requests against the single supported API base
//! URL and hands back the parsed JSON body. Status codes are mapped onto
//! [`MbtaError`]; interpreting the body is left to the caller.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::debug;

use super::error::MbtaError;
use super::gateway::{Endpoint, TransitGateway};

/// The only API base URL this client accepts.
pub const SUPPORTED_BASE_URL: &str = "https://api-v3.mbta.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// API key; empty means anonymous (heavily rate limited) access
    pub api_key: String,
    /// Base URL; must equal [`SUPPORTED_BASE_URL`]
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MbtaConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: SUPPORTED_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the base URL. Validated when the client is built.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The base URL with any trailing slash removed, if it is the supported
    /// one.
    pub fn checked_base_url(&self) -> Result<String, MbtaError> {
        validate_base_url(&self.base_url)
    }
}

/// MBTA v3 API client.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl MbtaClient {
    /// Create a new client.
    ///
    /// Fails with [`MbtaError::Configuration`] if the base URL is not the
    /// supported one or the API key is not a valid header value.
    pub fn new(config: MbtaConfig) -> Result<Self, MbtaError> {
        let base_url = config.checked_base_url()?;
        Self::build(config, base_url)
    }

    /// Client against an arbitrary base URL, for tests against a local stub.
    #[cfg(test)]
    fn with_unchecked_base_url(config: MbtaConfig) -> Result<Self, MbtaError> {
        let base_url = config.base_url.clone();
        Self::build(config, base_url)
    }

    fn build(config: MbtaConfig, base_url: String) -> Result<Self, MbtaError> {
        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| {
                MbtaError::Configuration("API key is not a valid header value".to_string())
            })?;
            headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn transport_error(&self, endpoint: Endpoint, err: reqwest::Error) -> MbtaError {
        if err.is_timeout() {
            MbtaError::Timeout {
                endpoint,
                secs: self.timeout_secs,
            }
        } else {
            MbtaError::Http(err)
        }
    }
}

impl TransitGateway for MbtaClient {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[(&'static str, String)],
    ) -> Result<Value, MbtaError> {
        let url = self.endpoint_url(endpoint);
        debug!(%endpoint, params = ?params, "requesting MBTA endpoint");

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MbtaError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MbtaError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MbtaError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        serde_json::from_str(&body).map_err(|e| {
            MbtaError::malformed(
                "body",
                format!(
                    "{e} (body: {})",
                    body.chars().take(500).collect::<String>()
                ),
            )
        })
    }
}

/// Check a configured base URL against the supported one.
///
/// A single trailing slash is tolerated.
fn validate_base_url(url: &str) -> Result<String, MbtaError> {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    if trimmed == SUPPORTED_BASE_URL {
        Ok(trimmed.to_string())
    } else {
        Err(MbtaError::Configuration(format!(
            "unsupported MBTA base URL {url:?} (expected {SUPPORTED_BASE_URL})"
        )))
    }
}
