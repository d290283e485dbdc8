//! Client configuration

use std::time::Duration;

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://youthweb.net";

/// API version announced in the `Accept` header
pub const API_VERSION: &str = "0.4";

/// Prefix for every cache key built by the client
pub const CACHE_NAMESPACE: &str = "youthweb_api.";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of response body bytes read (8 MiB)
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "YOUTHWEB_API_URL";

/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT: &str = "YOUTHWEB_API_TIMEOUT";

/// Client configuration for connecting to the Youthweb API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://youthweb.net")
    pub base_url: String,

    /// Request timeout in seconds, applied by the default transport
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the configuration from the environment, falling back to defaults.
    ///
    /// An unparsable timeout is ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            config.base_url = url;
        }

        if let Some(secs) = std::env::var(ENV_TIMEOUT)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.timeout = secs;
        }

        config
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Value of the `Accept` header for this API version
    pub fn accept_header() -> String {
        format!(
            "{media}, {media}; net.youthweb.api.version={version}",
            media = shared::jsonapi::MEDIA_TYPE,
            version = API_VERSION
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
