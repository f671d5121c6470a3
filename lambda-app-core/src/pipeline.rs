//! The init pipeline.
//!
//! Stages run in a fixed order and stop at the first failure:
//!
//! 1. ingest the event and context, lower-casing header names
//! 2. required headers
//! 3. required path parameters
//! 4. required querystring parameters
//! 5. one `400` listing everything missing from stages 2-4
//! 6. schema validation of the body (only with a schema)
//! 7. authorization hook (only when enabled and installed)
//!
//! Structural checks always run before the schema, and the schema before
//! authorization.

use crate::error::ErrorKind;
use crate::text::{capitalize, comma_join};
use crate::{Invocation, InvocationContext, InvocationError, InvocationEvent, InvocationOptions, Result};
use lambda_app_validation::Schema;
use serde_json::Value;
use std::collections::HashMap;

/// Names from `required` whose value is absent or empty.
fn missing<'a>(
    required: &'a [String],
    lookup: impl Fn(&str) -> Option<&'a str>,
) -> Vec<&'a str> {
    required
        .iter()
        .map(String::as_str)
        .filter(|name| lookup(name).is_none_or(str::is_empty))
        .collect()
}

fn lookup_in<'a>(map: &'a HashMap<String, String>) -> impl Fn(&str) -> Option<&'a str> {
    move |name: &str| map.get(name).map(String::as_str)
}

impl<E, I> Invocation<E, I>
where
    E: InvocationEvent,
    I: Send + Sync,
{
    /// Initialize the invocation from a platform event.
    ///
    /// `options` is layered over the instance options, which are layered over
    /// the built-in defaults; the merged result replaces the instance options.
    pub async fn init(
        &mut self,
        event: E,
        context: InvocationContext,
        options: InvocationOptions<E, I>,
    ) -> Result<()> {
        let instance = std::mem::take(&mut self.options);
        self.options = InvocationOptions::defaults().merge(instance).merge(options);

        self.state.ingest(event, context);
        self.logger.debug(&format!(
            "init request {} ({})",
            self.request_id(),
            self.aws_request_id()
        ));

        self.check_requirements()?;

        if let Some(schema) = self.options.schema.clone() {
            let body = self.validate_body(&schema).await?;
            self.state.set_body(body);
        }

        self.authorize().await
    }

    fn check_requirements(&self) -> Result<()> {
        let require = &self.options.require;
        let state = &self.state;
        let mut clauses = Vec::new();

        let headers = missing(require.headers(), |name| state.header(name));
        if !headers.is_empty() {
            clauses.push(format!("missing required headers: {}", comma_join(&headers)));
        }

        let path = missing(require.path(), lookup_in(&state.parameters().path));
        if !path.is_empty() {
            clauses.push(format!(
                "missing required path parameters: {}",
                comma_join(&path)
            ));
        }

        let querystring = missing(
            require.querystring(),
            lookup_in(&state.parameters().querystring),
        );
        if !querystring.is_empty() {
            clauses.push(format!(
                "missing required querystring parameters: {}",
                comma_join(&querystring)
            ));
        }

        if clauses.is_empty() {
            return Ok(());
        }

        let message = capitalize(&clauses.join("; "));
        self.logger.warn(&message);
        Err(InvocationError::bad_request(message).with_kind(ErrorKind::MissingRequirements))
    }

    /// Parse the body (JSON only when declared as such) and validate it.
    async fn validate_body(&self, schema: &Schema) -> Result<Value> {
        let data = self.parse_body()?;

        let violations = self
            .validator
            .validate(schema, &data)
            .await
            .map_err(|err| {
                self.logger.error(&format!("schema compilation failed: {}", err));
                InvocationError::internal(format!("Invalid schema: {}", err))
                    .with_kind(ErrorKind::InvalidSchema)
            })?;

        if violations.is_empty() {
            return Ok(data);
        }

        let messages: Vec<String> = violations.iter().map(ToString::to_string).collect();
        let message = comma_join(&messages);
        self.logger.warn(&format!("schema validation failed: {}", message));
        Err(InvocationError::bad_request(message).with_kind(ErrorKind::SchemaViolation))
    }

    fn parse_body(&self) -> Result<Value> {
        let Some(raw) = self.raw_body() else {
            return Ok(Value::Null);
        };

        let is_json = self
            .header("content-type")
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));
        if !is_json {
            return Ok(Value::String(raw.into_owned()));
        }

        serde_json::from_str(&raw).map_err(|err| {
            self.logger.warn(&format!("invalid JSON body: {}", err));
            InvocationError::bad_request("Invalid JSON body").with_kind(ErrorKind::InvalidJson)
        })
    }

    async fn authorize(&mut self) -> Result<()> {
        if !self.options.is_authorize_enabled() {
            self.logger.debug("authorization disabled");
            return Ok(());
        }
        let Some(authorizer) = self.options.on_authorize.clone() else {
            return Ok(());
        };
        let (Some(event), Some(context)) = (self.state.event(), self.state.context()) else {
            return Ok(());
        };

        let outcome = authorizer.authorize(event, context).await;
        match outcome {
            Ok(identity) => {
                self.identity = identity;
                Ok(())
            }
            Err(err) => {
                let message = err.to_string();
                self.logger.warn(&format!("authorization rejected: {}", message));
                Err(InvocationError::unauthorized(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_collects_all() {
        let required = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut values = HashMap::new();
        values.insert("b".to_string(), "present".to_string());
        values.insert("c".to_string(), String::new());

        assert_eq!(missing(&required, lookup_in(&values)), vec!["a", "c"]);
    }

    #[test]
    fn test_missing_nothing_required() {
        let values = HashMap::new();
        assert!(missing(&[], lookup_in(&values)).is_empty());
    }
}
