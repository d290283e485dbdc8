//! JSON:API document model
//!
//! A [`Document`] is an immutable view over a parsed response body. Members
//! are addressed with dotted paths where numeric segments index into arrays,
//! e.g. `errors.0.detail`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DocumentError, DocumentResult};

/// Media type of every JSON:API request and response
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// Parsed JSON:API document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse raw bytes into a document.
    ///
    /// Validates the top-level structure only: the body must be an object
    /// holding at least one of `data`, `errors` or `meta`, `data` and
    /// `errors` must not coexist, and `errors` must be an array of objects
    /// whose `title` and `detail` members, when present, are strings.
    pub fn parse(bytes: &[u8]) -> DocumentResult<Self> {
        let root: Value = serde_json::from_slice(bytes)?;
        Self::from_value(root)
    }

    /// Build a document from an already decoded JSON value.
    pub fn from_value(root: Value) -> DocumentResult<Self> {
        let object = root.as_object().ok_or(DocumentError::NotAnObject)?;

        let has_data = object.contains_key("data");
        let has_errors = object.contains_key("errors");
        if !has_data && !has_errors && !object.contains_key("meta") {
            return Err(DocumentError::MissingTopLevelMember);
        }
        if has_data && has_errors {
            return Err(DocumentError::DataAndErrors);
        }

        if let Some(errors) = object.get("errors") {
            let entries = errors
                .as_array()
                .ok_or_else(|| DocumentError::InvalidErrors("expected an array".into()))?;
            for (index, entry) in entries.iter().enumerate() {
                let entry = entry.as_object().ok_or_else(|| {
                    DocumentError::InvalidErrors(format!("entry {} is not an object", index))
                })?;
                for member in ["title", "detail"] {
                    if entry.get(member).is_some_and(|v| !v.is_string()) {
                        return Err(DocumentError::InvalidErrors(format!(
                            "entry {} member \"{}\" is not a string",
                            index, member
                        )));
                    }
                }
            }
        }

        Ok(Self { root })
    }

    /// Check whether a member exists at `path`.
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Look up the member at `path`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.root, path)
    }

    /// Look up a string member at `path`.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Typed view of the top-level `errors` array.
    ///
    /// Entries that do not fit [`ErrorObject`] are skipped.
    pub fn errors(&self) -> Vec<ErrorObject> {
        self.root
            .get("errors")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| serde_json::from_value(e.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the document is an error document.
    pub fn is_error(&self) -> bool {
        self.has("errors")
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Consume the document and return the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.root
    }
}

/// Walk `value` along a dotted path.
///
/// Numeric segments index arrays; on objects every segment is a key. An
/// empty path addresses `value` itself.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// JSON:API error object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}
