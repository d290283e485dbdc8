//! Shared types for the Youthweb client
//!
//! JSON:API document model, request payloads and document errors.

pub mod error;
pub mod jsonapi;
pub mod request;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{DocumentError, DocumentResult};
pub use jsonapi::{Document, ErrorObject, MEDIA_TYPE};
pub use request::{AuthTokenAttributes, RequestDocument, ResourceObject};
