// Validation errors

use std::fmt;
use thiserror::Error;

/// A single schema violation found in a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer to the offending value (`""` for the document root)
    pub path: String,

    /// Human-readable message, without the path
    pub message: String,

    /// Schema keyword that failed
    pub keyword: String,
}

impl SchemaViolation {
    /// Create a new violation
    pub fn new(
        path: impl Into<String>,
        keyword: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            keyword: keyword.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} {}", self.path, self.message)
        }
    }
}

/// Errors raised while compiling a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not a valid JSON Schema (bad keyword values, bad
    /// patterns, unresolvable references).
    #[error("{message}")]
    InvalidSchema {
        /// JSON pointer into the schema document
        path: String,
        message: String,
    },
}

/// Result type for schema compilation.
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_path() {
        let violation = SchemaViolation::new("/age", "minimum", "-1 is less than the minimum of 0");
        assert_eq!(violation.to_string(), "/age -1 is less than the minimum of 0");

        let root = SchemaViolation::new("", "type", "null is not of type \"object\"");
        assert_eq!(root.to_string(), "null is not of type \"object\"");
    }
}
