// Built-in JSON schema validator, backed by the `jsonschema` crate

use crate::{CompiledSchema, Result, Schema, SchemaError, SchemaValidator, SchemaViolation};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Last segment of a schema path, i.e. the keyword that failed.
fn keyword_of(schema_path: &str) -> &str {
    schema_path.rsplit('/').next().unwrap_or(schema_path)
}

/// A schema compiled by [`JsonSchemaValidator`].
#[derive(Debug)]
pub struct JsonSchema {
    validator: jsonschema::Validator,
}

impl JsonSchema {
    /// Compile a schema document directly.
    ///
    /// The draft is taken from `$schema` (2020-12 when absent) and `format`
    /// is asserted, not just annotated.
    pub fn compile(schema: &Schema) -> Result<Self> {
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(schema.document())
            .map_err(|err| SchemaError::InvalidSchema {
                path: err.instance_path.to_string(),
                message: err.to_string(),
            })?;

        Ok(Self { validator })
    }
}

impl CompiledSchema for JsonSchema {
    fn validate(&self, data: &Value) -> Vec<SchemaViolation> {
        self.validator
            .iter_errors(data)
            .map(|err| {
                let schema_path = err.schema_path.to_string();
                SchemaViolation::new(
                    err.instance_path.to_string(),
                    keyword_of(&schema_path),
                    err.to_string(),
                )
            })
            .collect()
    }

    fn is_valid(&self, data: &Value) -> bool {
        self.validator.is_valid(data)
    }
}

/// Default schema validator: full JSON Schema (drafts 4 through 2020-12)
/// with format assertion enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl JsonSchemaValidator {
    /// Create a validator.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SchemaValidator for JsonSchemaValidator {
    async fn compile(&self, schema: &Schema) -> Result<Arc<dyn CompiledSchema>> {
        Ok(Arc::new(JsonSchema::compile(schema)?))
    }
}
