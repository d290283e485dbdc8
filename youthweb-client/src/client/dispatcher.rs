//! Request dispatcher, response parser and error translator.
//!
//! Every request issued by the client or its resources goes through
//! [`Dispatcher::run_request`]: one attempt, then either a parsed
//! [`Document`] or a uniform [`RequestError`].

use std::sync::Arc;

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use http::{HeaderMap, Method};
use parking_lot::RwLock;
use serde_json::Value;
use shared::jsonapi::{Document, MEDIA_TYPE};

use crate::config::{ClientConfig, MAX_BODY_BYTES};
use crate::credentials::Credentials;
use crate::error::{ClientError, ClientResult, RequestError, UNKNOWN_ERROR_MESSAGE};
use crate::http::{ApiRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

/// Shared request state; resources hold it through `Arc`.
#[derive(Debug)]
pub(crate) struct Dispatcher {
    config: RwLock<ClientConfig>,
    credentials: RwLock<Credentials>,
    access_token: RwLock<Option<String>>,
    transport: RwLock<Option<Arc<dyn HttpTransport>>>,
}

impl Dispatcher {
    pub(crate) fn new(config: ClientConfig) -> Self {
        Self {
            config: RwLock::new(config),
            credentials: RwLock::new(Credentials::default()),
            access_token: RwLock::new(None),
            transport: RwLock::new(None),
        }
    }

    pub(crate) fn url(&self) -> String {
        self.config.read().base_url.clone()
    }

    pub(crate) fn set_url(&self, url: String) {
        self.config.write().base_url = url;
    }

    pub(crate) fn config(&self) -> ClientConfig {
        self.config.read().clone()
    }

    pub(crate) fn credentials(&self) -> Credentials {
        self.credentials.read().clone()
    }

    pub(crate) fn set_credentials(&self, credentials: Credentials) {
        *self.credentials.write() = credentials;
    }

    pub(crate) fn access_token(&self) -> Option<String> {
        self.access_token.read().clone()
    }

    pub(crate) fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write() = token;
    }

    pub(crate) fn set_transport(&self, transport: Arc<dyn HttpTransport>) {
        *self.transport.write() = Some(transport);
    }

    /// The transport, building the reqwest default on first use
    pub(crate) fn transport(&self) -> ClientResult<Arc<dyn HttpTransport>> {
        if let Some(transport) = self.transport.read().as_ref() {
            return Ok(transport.clone());
        }

        let mut slot = self.transport.write();
        if let Some(transport) = slot.as_ref() {
            return Ok(transport.clone());
        }
        let transport: Arc<dyn HttpTransport> = Arc::new(
            ReqwestTransport::new(&self.config.read())
                .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?,
        );
        *slot = Some(transport.clone());
        Ok(transport)
    }

    fn headers(&self) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_str(&ClientConfig::accept_header())?);
        if let Some(token) = self.access_token.read().as_deref() {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))?);
        }
        Ok(headers)
    }

    /// Send one request and parse the answer.
    pub(crate) async fn run_request(
        &self,
        path: &str,
        method: Method,
        data: Option<Value>,
    ) -> ClientResult<Document> {
        let request = ApiRequest {
            url: format!("{}{}", self.url(), path),
            method,
            headers: self.headers()?,
            body: data.map(|d| serde_json::to_vec(&d)).transpose()?,
        };

        tracing::debug!(method = %request.method, url = %request.url, "Dispatching request");

        let transport = self.transport()?;
        let response = match transport.send(request).await {
            Ok(response) => response,
            Err(failure) => return Err(translate(failure).into()),
        };

        tracing::debug!(
            status = %response.status,
            bytes = response.body.len(),
            "Parsing response"
        );
        parse_response(&response)
    }
}

/// Parse a response body into a JSON:API document.
pub(crate) fn parse_response(response: &HttpResponse) -> ClientResult<Document> {
    if response.body.len() > MAX_BODY_BYTES {
        return Err(ClientError::BodyTooLarge {
            limit: MAX_BODY_BYTES,
        });
    }
    Ok(Document::parse(&response.body)?)
}

/// Turn a transport failure into the uniform request error.
///
/// Message precedence: `errors.0.detail`, then `errors.0.title`, then
/// [`UNKNOWN_ERROR_MESSAGE`]. Parse failures here are swallowed.
pub(crate) fn translate(failure: TransportError) -> RequestError {
    let message = failure
        .response()
        .and_then(|response| parse_response(response).ok())
        .and_then(|document| error_message(&document))
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());

    RequestError::new(message, failure)
}

fn error_message(document: &Document) -> Option<String> {
    if !document.has("errors.0") {
        return None;
    }
    ["errors.0.detail", "errors.0.title"]
        .iter()
        .find_map(|path| document.get_str(path))
        .map(str::to_string)
}
