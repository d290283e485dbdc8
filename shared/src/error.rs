//! Error types for the shared crate
//!
//! Errors raised while turning raw response bytes into a JSON:API document.

use thiserror::Error;

/// Document parsing error
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Body is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top level of the body is not a JSON object
    #[error("A JSON:API document must be an object")]
    NotAnObject,

    /// None of `data`, `errors` or `meta` is present
    #[error("A JSON:API document must contain at least one of \"data\", \"errors\" or \"meta\"")]
    MissingTopLevelMember,

    /// Both `data` and `errors` are present
    #[error("The members \"data\" and \"errors\" must not coexist in a JSON:API document")]
    DataAndErrors,

    /// `errors` is not an array of error objects
    #[error("Invalid errors member: {0}")]
    InvalidErrors(String),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;
