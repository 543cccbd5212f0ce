//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::mbta::{MbtaConfig, SUPPORTED_BASE_URL};

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Error in a configuration variable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {name}={value:?}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// MBTA client settings (`MBTA_KEY`, `MBTA_URL`, `MBTA_TIMEOUT_SECS`)
    pub mbta: MbtaConfig,

    /// Serve canned documents from this directory instead of the live API
    /// (`MBTA_MOCK_DIR`)
    pub mock_dir: Option<PathBuf>,

    /// Listen address (`COMMUTER_ADDR`)
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if set.
    ///
    /// An unsupported `MBTA_URL` is rejected even when `MBTA_MOCK_DIR` means
    /// the live client is never built.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("MBTA_KEY").unwrap_or_default();
        let base_url = lookup("MBTA_URL").unwrap_or_else(|| SUPPORTED_BASE_URL.to_string());

        let mut mbta = MbtaConfig::new(api_key).with_base_url(base_url);
        mbta.checked_base_url().map_err(|e| ConfigError {
            name: "MBTA_URL",
            value: mbta.base_url.clone(),
            reason: e.to_string(),
        })?;
        if let Some(raw) = lookup("MBTA_TIMEOUT_SECS") {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| ConfigError {
                    name: "MBTA_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: "expected a positive number of seconds".to_string(),
                })?;
            mbta = mbta.with_timeout(secs);
        }

        let mock_dir = lookup("MBTA_MOCK_DIR")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let raw_addr = lookup("COMMUTER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = raw_addr.parse().map_err(|e: std::net::AddrParseError| ConfigError {
            name: "COMMUTER_ADDR",
            value: raw_addr.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            mbta,
            mock_dir,
            addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.mbta.api_key, "");
        assert_eq!(config.mbta.base_url, SUPPORTED_BASE_URL);
        assert_eq!(config.mbta.timeout_secs, 30);
        assert_eq!(config.mock_dir, None);
        assert_eq!(config.addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn reads_all_variables() {
        let config = config(&[
            ("MBTA_KEY", "secret"),
            ("MBTA_URL", "https://api-v3.mbta.com/"),
            ("MBTA_TIMEOUT_SECS", "5"),
            ("MBTA_MOCK_DIR", "mock-data"),
            ("COMMUTER_ADDR", "0.0.0.0:8080"),
        ])
        .unwrap();

        assert_eq!(config.mbta.api_key, "secret");
        assert_eq!(config.mbta.base_url, "https://api-v3.mbta.com/");
        assert_eq!(config.mbta.timeout_secs, 5);
        assert_eq!(config.mock_dir, Some(PathBuf::from("mock-data")));
        assert_eq!(config.addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn empty_mock_dir_is_unset() {
        let config = config(&[("MBTA_MOCK_DIR", "")]).unwrap();
        assert_eq!(config.mock_dir, None);
    }

    #[test]
    fn rejects_bad_timeout() {
        for value in ["soon", "0", "-1"] {
            let err = config(&[("MBTA_TIMEOUT_SECS", value)]).unwrap_err();
            assert_eq!(err.name, "MBTA_TIMEOUT_SECS");
        }
    }

    #[test]
    fn rejects_unsupported_base_url() {
        let err = config(&[("MBTA_URL", "http://localhost:8080")]).unwrap_err();
        assert_eq!(err.name, "MBTA_URL");
        assert_eq!(err.value, "http://localhost:8080");
    }

    #[test]
    fn rejects_unsupported_base_url_in_mock_mode() {
        let err = config(&[
            ("MBTA_URL", "https://example.com"),
            ("MBTA_MOCK_DIR", "mock-data"),
        ])
        .unwrap_err();
        assert_eq!(err.name, "MBTA_URL");
    }

    #[test]
    fn rejects_bad_addr() {
        let err = config(&[("COMMUTER_ADDR", "localhost")]).unwrap_err();
        assert_eq!(err.name, "COMMUTER_ADDR");
    }
}
