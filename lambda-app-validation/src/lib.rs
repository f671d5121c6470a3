//! Request body validation for lambda-app
//!
//! The invocation pipeline treats schema validation as a pluggable
//! capability: it hands a [`Schema`] descriptor and the parsed request body
//! to a [`SchemaValidator`] and reports every [`SchemaViolation`] it gets back.
//!
//! [`JsonSchemaValidator`] is the built-in engine, a thin adapter over the
//! `jsonschema` crate.
//!
//! # Examples
//!
//! ```
//! use lambda_app_validation::{CompiledSchema, JsonSchema, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new(json!({
//!     "type": "object",
//!     "required": ["name"],
//!     "properties": {
//!         "name": { "type": "string", "minLength": 1 },
//!         "email": { "type": "string", "format": "email" }
//!     }
//! }));
//!
//! let compiled = JsonSchema::compile(&schema).unwrap();
//! assert!(compiled.is_valid(&json!({ "name": "John" })));
//!
//! let violations = compiled.validate(&json!({ "email": "nope" }));
//! assert_eq!(violations.len(), 2);
//! assert!(violations.iter().any(|v| v.keyword == "required"));
//! assert!(violations.iter().any(|v| v.keyword == "format" && v.path == "/email"));
//! ```

mod errors;
mod json_schema;
mod schema;
mod traits;

pub use errors::*;
pub use json_schema::{JsonSchema, JsonSchemaValidator};
pub use schema::Schema;
pub use traits::*;
