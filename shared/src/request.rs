//! Request types for the shared crate
//!
//! JSON:API request payloads sent by the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level request document: `{"data": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDocument {
    pub data: ResourceObject,
}

impl RequestDocument {
    /// Wrap a resource object
    pub fn new(data: ResourceObject) -> Self {
        Self { data }
    }

    /// Convert into a JSON value for the request body
    pub fn into_value(self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// JSON:API resource object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, Value>,
}

impl ResourceObject {
    /// Create a resource object of the given type
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            attributes: serde_json::Map::new(),
        }
    }

    /// Set the resource id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Attributes posted to `/auth/token`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokenAttributes {
    pub username: String,
    pub token_secret: String,
}

impl From<AuthTokenAttributes> for RequestDocument {
    fn from(attrs: AuthTokenAttributes) -> Self {
        RequestDocument::new(
            ResourceObject::new("auth")
                .with_attribute("username", attrs.username)
                .with_attribute("token_secret", attrs.token_secret),
        )
    }
}
