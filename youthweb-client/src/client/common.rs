//! Core client definition.
//!
//! The [`Client`] owns the dispatcher, the cache gateway and the memoized
//! resource accessors. Dropping it commits the cache pool.

use std::sync::{Arc, OnceLock};

use http::Method;
use serde_json::Value;
use shared::jsonapi::Document;

use crate::cache::{CacheGateway, CachePool};
use crate::config::ClientConfig;
use crate::credentials::{CredentialKey, Credentials};
use crate::error::ClientResult;
use crate::http::HttpTransport;
use crate::resource::{Auth, Resource, ResourceName, Stats, Users};

use super::builder::ClientBuilder;
use super::dispatcher::Dispatcher;

/// Youthweb API client.
///
/// # Example
///
/// ```no_run
/// use youthweb_client::Client;
///
/// # async fn example() -> Result<(), youthweb_client::ClientError> {
/// let mut client = Client::new();
/// client.set_user_credentials("Username", "User-Token");
///
/// client.auth().get_bearer_token().await?;
/// let me = client.users().show_me().await?;
/// println!("{:?}", me.get("data.attributes.username"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    pub(crate) dispatcher: Arc<Dispatcher>,
    pub(crate) cache: CacheGateway,
    auth: OnceLock<Auth>,
    stats: OnceLock<Stats>,
    users: OnceLock<Users>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a client with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client from a configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(config)),
            cache: CacheGateway::new(),
            auth: OnceLock::new(),
            stats: OnceLock::new(),
            users: OnceLock::new(),
        }
    }

    /// Creates a builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    // ========== Requests ==========

    /// GET `path` and parse the JSON:API response.
    pub async fn get(&self, path: &str, data: Option<Value>) -> ClientResult<Document> {
        self.dispatcher.run_request(path, Method::GET, data).await
    }

    /// POST `data` to `path` and parse the JSON:API response.
    pub async fn post(&self, path: &str, data: Option<Value>) -> ClientResult<Document> {
        self.dispatcher.run_request(path, Method::POST, data).await
    }

    // ========== Resources ==========

    /// Resolves a resource accessor by name.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidResourceName` for names other than
    /// `"auth"`, `"stats"` and `"users"`.
    pub fn get_resource(&self, name: &str) -> ClientResult<Resource<'_>> {
        Ok(match name.parse::<ResourceName>()? {
            ResourceName::Auth => Resource::Auth(self.auth()),
            ResourceName::Stats => Resource::Stats(self.stats()),
            ResourceName::Users => Resource::Users(self.users()),
        })
    }

    pub fn auth(&self) -> &Auth {
        self.auth
            .get_or_init(|| Auth::new(self.dispatcher.clone()))
    }

    pub fn stats(&self) -> &Stats {
        self.stats
            .get_or_init(|| Stats::new(self.dispatcher.clone()))
    }

    pub fn users(&self) -> &Users {
        self.users
            .get_or_init(|| Users::new(self.dispatcher.clone()))
    }

    // ========== Configuration ==========

    /// Returns the base URL.
    pub fn url(&self) -> String {
        self.dispatcher.url()
    }

    /// Sets the base URL.
    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.dispatcher.set_url(url.into());
        self
    }

    /// Returns a snapshot of the configuration.
    pub fn config(&self) -> ClientConfig {
        self.dispatcher.config()
    }

    /// Replaces the HTTP transport.
    pub fn set_http_client(&mut self, transport: Arc<dyn HttpTransport>) -> &mut Self {
        self.dispatcher.set_transport(transport);
        self
    }

    /// Returns the HTTP transport, creating the default one on first use.
    pub fn http_client(&self) -> ClientResult<Arc<dyn HttpTransport>> {
        self.dispatcher.transport()
    }

    // ========== Credentials ==========

    /// Sets the user credentials.
    pub fn set_user_credentials(
        &mut self,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> &mut Self {
        self.dispatcher
            .set_credentials(Credentials::new(username, secret));
        self
    }

    /// Returns a single credential by key (`"username"` or `"secret"`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidCredentialKey` for any other key.
    pub fn user_credential(&self, key: &str) -> ClientResult<String> {
        let key: CredentialKey = key.parse()?;
        Ok(self.dispatcher.credentials().get(key).to_string())
    }

    /// Returns a copy of the stored credentials.
    pub fn credentials(&self) -> Credentials {
        self.dispatcher.credentials()
    }

    /// Returns the bearer token sent with every request, if any.
    pub fn access_token(&self) -> Option<String> {
        self.dispatcher.access_token()
    }

    /// Sets or clears the bearer token.
    pub fn set_access_token(&mut self, token: Option<String>) -> &mut Self {
        self.dispatcher.set_access_token(token);
        self
    }

    // ========== Cache ==========

    /// Replaces the cache pool.
    pub fn set_cache_provider(&mut self, pool: Box<dyn CachePool>) -> &mut Self {
        self.cache.set_pool(pool);
        self
    }

    /// Returns the cache pool, a no-op pool unless one was set.
    pub fn cache_provider(&mut self) -> &mut dyn CachePool {
        self.cache.pool()
    }

    /// Prefixes `key` with the client's cache namespace.
    pub fn build_cache_key(&self, key: &str) -> String {
        self.cache.key(key)
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.cache.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheItem, MemoryCachePool};
    use crate::error::{ClientError, UNKNOWN_ERROR_MESSAGE};
    use crate::http::{ApiRequest, HttpResponse, TransportError};
    use async_trait::async_trait;
    use http::StatusCode;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every request with the same status and body
    #[derive(Debug)]
    struct FixedTransport {
        status: StatusCode,
        body: String,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl FixedTransport {
        fn new(status: StatusCode, body: &str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_string(),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl HttpTransport for FixedTransport {
        async fn send(&self, request: ApiRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().push(request);
            let response = HttpResponse::new(self.status, self.body.as_bytes());
            if response.is_success() {
                Ok(response)
            } else {
                Err(TransportError::Status { response })
            }
        }
    }

    /// Counts commits
    #[derive(Debug)]
    struct CountingPool {
        commits: Arc<AtomicUsize>,
    }

    impl CachePool for CountingPool {
        fn get_item(&self, _key: &str) -> Option<CacheItem> {
            None
        }
        fn save(&mut self, _item: CacheItem) -> bool {
            true
        }
        fn save_deferred(&mut self, _item: CacheItem) -> bool {
            true
        }
        fn delete_item(&mut self, _key: &str) -> bool {
            true
        }
        fn clear(&mut self) -> bool {
            true
        }
        fn commit(&mut self) -> bool {
            self.commits.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    #[test]
    fn test_get_url_returns_value_from_set_url() {
        let mut client = Client::new();
        assert_eq!(client.url(), "https://youthweb.net");

        client.set_url("http://test.local");
        assert_eq!(client.url(), "http://test.local");

        client.set_url("http://test.local/");
        assert_eq!(client.url(), "http://test.local/");
    }

    #[test]
    fn test_user_credentials_round_trip() {
        let mut client = Client::new();
        client.set_user_credentials("Username", "User-Token");

        assert_eq!(client.user_credential("username").unwrap(), "Username");
        assert_eq!(client.user_credential("secret").unwrap(), "User-Token");
    }

    #[test]
    fn test_user_credentials_can_be_overwritten() {
        let mut client = Client::new();
        client
            .set_user_credentials("First", "one")
            .set_user_credentials("Second", "two");

        assert_eq!(client.credentials(), Credentials::new("Second", "two"));
    }

    #[test]
    fn test_user_credential_with_wrong_key() {
        let mut client = Client::new();
        client.set_user_credentials("Username", "User-Token");

        let err = client.user_credential("foobar").unwrap_err();
        assert!(matches!(err, ClientError::InvalidCredentialKey(_)));
        assert_eq!(
            err.to_string(),
            "\"foobar\" is not a valid key for user credentials."
        );
    }

    #[test]
    fn test_build_cache_key() {
        let client = Client::new();
        assert_eq!(client.build_cache_key("foobar"), "youthweb_api.foobar");
    }

    #[test]
    fn test_get_resource_returns_matching_accessor() {
        let client = Client::new();

        assert!(client.get_resource("auth").unwrap().as_auth().is_some());
        assert!(client.get_resource("stats").unwrap().as_stats().is_some());
        assert!(client.get_resource("users").unwrap().as_users().is_some());
        assert_eq!(
            client.get_resource("users").unwrap().name(),
            ResourceName::Users
        );
    }

    #[test]
    fn test_get_resource_is_memoized() {
        let client = Client::new();
        let first = client.get_resource("users").unwrap().as_users().unwrap();
        let second = client.users();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_get_unknown_resource() {
        let client = Client::new();
        let err = client.get_resource("foobar").unwrap_err();
        assert!(matches!(&err, ClientError::InvalidResourceName(n) if n == "foobar"));
    }

    #[test]
    fn test_cache_provider_defaults_to_void_pool() {
        let mut client = Client::new();
        client.cache_provider().save(CacheItem::new("a", 1));
        assert!(!client.cache_provider().has_item("a"));
    }

    #[test]
    fn test_set_cache_provider() {
        let mut client = Client::new();
        client.set_cache_provider(Box::new(MemoryCachePool::new()));

        let key = client.build_cache_key("me");
        client.cache_provider().save(CacheItem::new(key.clone(), "cached"));
        assert!(client.cache_provider().has_item(&key));
    }

    #[tokio::test]
    async fn test_get_parses_response() {
        let mut client = Client::new();
        client.set_http_client(FixedTransport::new(
            StatusCode::OK,
            r#"{"meta":{"this":"that"}}"#,
        ));

        let doc = client.get("foobar", None).await.unwrap();
        assert!(doc.has("meta.this"));
        assert_eq!(doc.get_str("meta.this"), Some("that"));
    }

    #[tokio::test]
    async fn test_client_error_with_title() {
        let mut client = Client::new();
        client.set_http_client(FixedTransport::new(
            StatusCode::UNAUTHORIZED,
            r#"{"errors":[{"status":"401","title":"Unauthorized"}]}"#,
        ));

        let err = client.get("foobar", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[tokio::test]
    async fn test_client_error_with_detail() {
        let mut client = Client::new();
        client.set_http_client(FixedTransport::new(
            StatusCode::UNAUTHORIZED,
            r#"{"errors":[{"status":"401","title":"Unauthorized","detail":"Detailed error message"}]}"#,
        ));

        let err = client.get("foobar", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Detailed error message");
    }

    #[tokio::test]
    async fn test_client_error_without_errors_member() {
        let mut client = Client::new();
        client.set_http_client(FixedTransport::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"meta":{"error":"foobar"}}"#,
        ));

        let err = client.post("foobar", None).await.unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(err.as_request_error().unwrap().code(), 500);
    }

    #[tokio::test]
    async fn test_resources_use_fixed_paths() {
        let transport = FixedTransport::new(StatusCode::OK, r#"{"data":null}"#);
        let mut client = Client::new();
        client
            .set_url("http://test.local")
            .set_http_client(transport.clone());

        client.users().show(42).await.unwrap();
        client.users().show_me().await.unwrap();
        client.stats().show("forum").await.unwrap();

        let requests = transport.requests.lock();
        let urls: Vec<_> = requests.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "http://test.local/users/42",
                "http://test.local/me",
                "http://test.local/stats/forum"
            ]
        );
        assert!(requests.iter().all(|r| r.method == Method::GET));
    }

    #[tokio::test]
    async fn test_auth_stores_bearer_token() {
        let transport = FixedTransport::new(StatusCode::OK, r#"{"meta":{"token":"t0k3n"}}"#);
        let mut client = Client::new();
        client
            .set_url("http://test.local")
            .set_user_credentials("Username", "User-Token")
            .set_http_client(transport.clone());

        let token = client.auth().get_bearer_token().await.unwrap();
        assert_eq!(token, "t0k3n");
        assert_eq!(client.access_token().as_deref(), Some("t0k3n"));

        client.users().show_me().await.unwrap();

        let requests = transport.requests.lock();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url, "http://test.local/auth/token");
        let body: Value = serde_json::from_slice(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["data"]["type"], "auth");
        assert_eq!(body["data"]["attributes"]["username"], "Username");
        assert_eq!(body["data"]["attributes"]["token_secret"], "User-Token");
        assert!(requests[0].headers.get(http::header::AUTHORIZATION).is_none());
        assert_eq!(requests[1].headers[http::header::AUTHORIZATION], "Bearer t0k3n");
    }

    #[tokio::test]
    async fn test_auth_without_token_in_response() {
        let mut client = Client::new();
        client.set_http_client(FixedTransport::new(StatusCode::OK, r#"{"meta":{}}"#));

        let err = client.auth().get_bearer_token().await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
        assert!(client.access_token().is_none());
    }

    #[tokio::test]
    async fn test_cache_flushed_once_on_drop() {
        let commits = Arc::new(AtomicUsize::new(0));
        {
            let mut client = Client::new();
            client
                .set_http_client(FixedTransport::new(StatusCode::OK, r#"{"meta":{}}"#))
                .set_cache_provider(Box::new(CountingPool {
                    commits: commits.clone(),
                }));

            for _ in 0..3 {
                client.get("/me", None).await.unwrap();
            }
            assert_eq!(commits.load(Ordering::SeqCst), 0);
        }
        assert_eq!(commits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_flushed_on_error_path() {
        let commits = Arc::new(AtomicUsize::new(0));

        async fn failing(commits: Arc<AtomicUsize>) -> ClientResult<Document> {
            let mut client = Client::new();
            client
                .set_http_client(FixedTransport::new(StatusCode::FORBIDDEN, "{}"))
                .set_cache_provider(Box::new(CountingPool { commits }));
            client.get("/me", None).await
        }

        assert!(failing(commits.clone()).await.is_err());
        assert_eq!(commits.load(Ordering::SeqCst), 1);
    }
}
