// Schema descriptor

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declarative schema for a request body.
///
/// The descriptor is opaque to the invocation pipeline; it is handed
/// unchanged to whichever [`SchemaValidator`](crate::SchemaValidator) is installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Value);

impl Schema {
    /// Wrap a JSON schema document.
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    /// Parse a schema from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text).map(Self)
    }

    /// The underlying document.
    pub fn document(&self) -> &Value {
        &self.0
    }

    /// Consume the descriptor, returning the document.
    pub fn into_document(self) -> Value {
        self.0
    }
}

impl From<Value> for Schema {
    fn from(document: Value) -> Self {
        Self::new(document)
    }
}
