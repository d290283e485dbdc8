//! Client error types

use http::StatusCode;
use shared::error::DocumentError;
use thiserror::Error;

use crate::http::TransportError;

/// Message used when a failed response carries no usable JSON:API error
pub const UNKNOWN_ERROR_MESSAGE: &str = "The server responses with an unknown error.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Unknown resource name passed to `get_resource`
    #[error("The resource \"{0}\" does not exist.")]
    InvalidResourceName(String),

    /// Unknown credential key passed to `user_credential`
    #[error("\"{0}\" is not a valid key for user credentials.")]
    InvalidCredentialKey(String),

    /// A request failed at the transport level
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Response body is not a valid JSON:API document
    #[error("Parse error: {0}")]
    Parse(#[from] DocumentError),

    /// Response body exceeds the read limit
    #[error("Response body too large: limit {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// Header value could not be encoded
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    /// Request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Well-formed document without an expected member
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// The uniform request error, if this is one
    pub fn as_request_error(&self) -> Option<&RequestError> {
        match self {
            ClientError::Request(e) => Some(e),
            _ => None,
        }
    }
}

/// Uniform error for every failed request.
///
/// Carries the message extracted from the response (or
/// [`UNKNOWN_ERROR_MESSAGE`]), the HTTP status if one was received, and the
/// original transport failure as its source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RequestError {
    message: String,
    status: Option<StatusCode>,
    #[source]
    source: TransportError,
}

impl RequestError {
    pub fn new(message: impl Into<String>, source: TransportError) -> Self {
        Self {
            message: message.into(),
            status: source.status(),
            source,
        }
    }

    /// Derived human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the failed response, if any
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Numeric status code, `0` when no response was received
    pub fn code(&self) -> u16 {
        self.status.map(|s| s.as_u16()).unwrap_or(0)
    }

    /// The original transport failure
    pub fn transport_error(&self) -> &TransportError {
        &self.source
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
