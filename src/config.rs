//! Client Configuration
//!
//! REST endpoint and HTTP timeouts for account resolution and broadcast.
//! Timeouts surface as transport errors; nothing is retried.

use std::time::Duration;
use url::Url;

use crate::error::{CosmosError, CosmosResult};

/// REST server used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:1317";

pub const ENV_ENDPOINT: &str = "COSMOS_REST_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "COSMOS_REST_TIMEOUT_SECS";

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, no trailing slash
    pub endpoint: String,
    /// Whole-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("cosmos-stdtx/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `COSMOS_REST_ENDPOINT` / `COSMOS_REST_TIMEOUT_SECS`
    pub fn from_env() -> CosmosResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> CosmosResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config.endpoint = validate_endpoint(&endpoint)?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                CosmosError::config(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
            if secs == 0 {
                return Err(CosmosError::config(format!("{} must be greater than zero", ENV_TIMEOUT_SECS)));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> CosmosResult<Self> {
        self.endpoint = validate_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join a REST path onto the endpoint
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }
}

/// Validate a REST endpoint URL and normalize away any trailing slash
pub fn validate_endpoint(endpoint: &str) -> CosmosResult<String> {
    let trimmed = endpoint.trim();
    let parsed = Url::parse(trimmed)?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CosmosError::config(format!("Unsupported URL scheme: {}", other)));
        }
    }

    if parsed.host_str().map(|h| h.is_empty()).unwrap_or(true) {
        return Err(CosmosError::config(format!("Endpoint has no host: {}", trimmed)));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_default_endpoint() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://localhost:1317");
        assert_eq!(config.url("/txs"), "http://localhost:1317/txs");
        assert_eq!(config.url("auth/accounts/x"), "http://localhost:1317/auth/accounts/x");
    }

    #[test]
    fn test_validate_endpoint() {
        assert_eq!(validate_endpoint("https://lcd.example.com/").unwrap(), "https://lcd.example.com");
        assert_eq!(validate_endpoint("http://127.0.0.1:1317").unwrap(), "http://127.0.0.1:1317");

        assert_eq!(validate_endpoint("ftp://example.com").unwrap_err().code, ErrorCode::Config);
        assert_eq!(validate_endpoint("not a url").unwrap_err().code, ErrorCode::Config);
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(|key| match key {
            ENV_ENDPOINT => Some("https://rest.example.org/".to_string()),
            ENV_TIMEOUT_SECS => Some("5".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.endpoint, "https://rest.example.org");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let err = ClientConfig::from_lookup(|key| match key {
            ENV_TIMEOUT_SECS => Some("soon".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);
    }

    #[test]
    fn test_from_lookup_zero_timeout_rejected() {
        let err = ClientConfig::from_lookup(|key| match key {
            ENV_TIMEOUT_SECS => Some("0".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);
        assert!(err.message.contains("greater than zero"));
    }
}
