// Validation capability traits

use crate::{Result, Schema, SchemaViolation};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A schema compiled by a [`SchemaValidator`], ready to check payloads.
pub trait CompiledSchema: Send + Sync {
    /// Validate `data`; an empty list means the payload is valid.
    fn validate(&self, data: &Value) -> Vec<SchemaViolation>;

    /// Check validity without collecting messages.
    fn is_valid(&self, data: &Value) -> bool {
        self.validate(data).is_empty()
    }
}

/// Pluggable schema validation engine.
///
/// Compilation is async so engines that resolve remote references or cache
/// compiled schemas out of process can be plugged in.
#[async_trait]
pub trait SchemaValidator: Send + Sync {
    /// Compile a schema descriptor.
    async fn compile(&self, schema: &Schema) -> Result<Arc<dyn CompiledSchema>>;

    /// Compile `schema` and validate `data` against it.
    async fn validate(&self, schema: &Schema, data: &Value) -> Result<Vec<SchemaViolation>> {
        let compiled = self.compile(schema).await?;
        Ok(compiled.validate(data))
    }
}

#[async_trait]
impl<T: SchemaValidator + ?Sized> SchemaValidator for Arc<T> {
    async fn compile(&self, schema: &Schema) -> Result<Arc<dyn CompiledSchema>> {
        (**self).compile(schema).await
    }
}
