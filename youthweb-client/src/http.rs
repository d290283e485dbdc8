//! Transport gateway
//!
//! [`HttpTransport`] is the single seam between the client and the network.
//! [`ReqwestTransport`] is the default implementation; tests and embedders
//! plug in their own.

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use thiserror::Error;

use crate::config::{ClientConfig, MAX_BODY_BYTES};

/// Outgoing request, built fresh for every call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Response as seen by the client
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Transport-level failure
#[derive(Debug, Error)]
pub enum TransportError {
    /// Server answered with a non-2xx status
    #[error("HTTP {}", .response.status)]
    Status { response: HttpResponse },

    /// No response was received (connection, TLS, timeout, ...)
    #[error("Network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// The response attached to the failure, if any
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            TransportError::Status { response } => Some(response),
            TransportError::Network(_) => None,
        }
    }

    /// Status of the attached response, if any
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(Box::new(err))
    }
}

/// HTTP transport trait
#[async_trait]
pub trait HttpTransport: Send + Sync + std::fmt::Debug {
    /// Send a request.
    ///
    /// Non-2xx responses must be reported as [`TransportError::Status`].
    async fn send(&self, request: ApiRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured `reqwest::Client`
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Read at most `MAX_BODY_BYTES + 1` bytes so oversized bodies stay detectable
    async fn read_body(mut response: reqwest::Response) -> Result<Vec<u8>, TransportError> {
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let remaining = MAX_BODY_BYTES + 1 - body.len();
            if chunk.len() >= remaining {
                body.extend_from_slice(&chunk[..remaining]);
                break;
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<HttpResponse, TransportError> {
        let mut req = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = Self::read_body(response).await?;

        let response = HttpResponse {
            status,
            headers,
            body,
        };
        if !status.is_success() {
            return Err(TransportError::Status { response });
        }
        Ok(response)
    }
}
