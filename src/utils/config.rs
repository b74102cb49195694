//! Service configuration, read once at process start

use crate::utils::error::ResolveError;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_HOST: &str = "ytstream-download-youtube-videos.p.rapidapi.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_KEY: &str = "RAPIDAPI_KEY";
pub const ENV_API_HOST: &str = "RAPIDAPI_HOST";
pub const ENV_BASE_URL: &str = "STREAMGRAB_BASE_URL";
pub const ENV_TIMEOUT: &str = "STREAMGRAB_TIMEOUT_SECS";

/// Settings for the extraction service
#[derive(Clone)]
pub struct ServiceConfig {
    /// Value of the `x-rapidapi-key` header
    pub api_key: String,

    /// Value of the `x-rapidapi-host` header
    pub api_host: String,

    /// Scheme and authority the `/dl` endpoint is joined onto
    pub base_url: String,

    /// Applied by the HTTP client; expiry surfaces as a transport failure
    pub request_timeout: Duration,
}

// The key must never reach logs
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &"<redacted>")
            .field("api_host", &self.api_host)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ServiceConfig {
    /// Config with the default host for the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: format!("https://{}", DEFAULT_API_HOST),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read the process environment
    pub fn from_env() -> Result<Self, ResolveError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. A missing or blank API key is a
    /// configuration error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ResolveError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(ENV_API_KEY).ok_or_else(|| {
            ResolveError::Configuration(format!("{} is not set", ENV_API_KEY))
        })?;

        let api_host = get(ENV_API_HOST).unwrap_or_else(|| DEFAULT_API_HOST.to_string());

        let base_url = get(ENV_BASE_URL)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("https://{}", api_host));

        let request_timeout = match get(ENV_TIMEOUT) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ResolveError::Configuration(format!(
                        "{} must be a whole number of seconds, got {:?}",
                        ENV_TIMEOUT, raw
                    ))
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_key,
            api_host,
            base_url,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = ServiceConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ResolveError::Configuration(_)));
    }

    #[test]
    fn test_blank_key_is_configuration_error() {
        let err = ServiceConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "   ")])).unwrap_err();
        assert!(matches!(err, ResolveError::Configuration(_)));
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "k")])).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(config.base_url, format!("https://{}", DEFAULT_API_HOST));
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "k"),
            (ENV_API_HOST, "other.example"),
            (ENV_BASE_URL, "http://127.0.0.1:9000/"),
            (ENV_TIMEOUT, "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_host, "other.example");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_base_url_follows_host_override() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "k"),
            (ENV_API_HOST, "other.example"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://other.example");
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let err = ServiceConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "k"),
            (ENV_TIMEOUT, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ResolveError::Configuration(_)));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config =
            ServiceConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "sk-live-123456")])).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-live-123456"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains(DEFAULT_API_HOST));
    }
}
