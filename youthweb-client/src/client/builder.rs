//! Builder for [`Client`] construction.

use std::sync::Arc;

use crate::cache::CachePool;
use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::http::HttpTransport;

use super::Client;

/// Builder for `Client`.
///
/// # Example
///
/// ```no_run
/// use youthweb_client::{Client, MemoryCachePool};
///
/// let client = Client::builder()
///     .base_url("https://youthweb.net")
///     .timeout(10)
///     .credentials("Username", "User-Token")
///     .cache_provider(Box::new(MemoryCachePool::new()))
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    credentials: Option<Credentials>,
    access_token: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
    cache_pool: Option<Box<dyn CachePool>>,
}

impl ClientBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Sets the request timeout (seconds) of the default transport.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.timeout = seconds;
        self
    }

    /// Sets the user credentials.
    pub fn credentials(mut self, username: impl Into<String>, secret: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, secret));
        self
    }

    /// Sets a bearer token obtained earlier.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Uses a custom HTTP transport instead of the reqwest default.
    pub fn http_client(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Uses a cache pool instead of the no-op default.
    pub fn cache_provider(mut self, pool: Box<dyn CachePool>) -> Self {
        self.cache_pool = Some(pool);
        self
    }

    /// Builds the client.
    ///
    /// The default transport is created lazily on the first request.
    pub fn build(self) -> Client {
        let mut client = Client::with_config(self.config);

        if let Some(credentials) = self.credentials {
            client.dispatcher.set_credentials(credentials);
        }
        if self.access_token.is_some() {
            client.dispatcher.set_access_token(self.access_token);
        }
        if let Some(transport) = self.transport {
            client.dispatcher.set_transport(transport);
        }
        if let Some(pool) = self.cache_pool {
            client.cache.set_pool(pool);
        }

        client
    }
}
