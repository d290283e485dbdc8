//! Youthweb Client - typed client for the Youthweb JSON:API
//!
//! Wraps the remote API with resource accessors (auth, stats, users),
//! credential handling, a pluggable cache pool and uniform error
//! translation for failed requests.

pub mod cache;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod resource;

pub use cache::{CacheItem, CachePool, MemoryCachePool, VoidCachePool};
pub use client::{Client, ClientBuilder};
pub use config::{API_VERSION, CACHE_NAMESPACE, ClientConfig, DEFAULT_BASE_URL, MAX_BODY_BYTES};
pub use credentials::{CredentialKey, Credentials};
pub use error::{ClientError, ClientResult, RequestError, UNKNOWN_ERROR_MESSAGE};
pub use crate::http::{ApiRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use resource::{Auth, Resource, ResourceName, Stats, Users};

// Re-export shared document types for convenience
pub use shared::jsonapi::{Document, ErrorObject};
