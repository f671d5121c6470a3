// Per-invocation request state

use crate::{InvocationContext, InvocationEvent};
use serde_json::Value;
use std::collections::HashMap;

/// Path and querystring parameters, kept in separate maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    pub path: HashMap<String, String>,
    pub querystring: HashMap<String, String>,
}

/// Request data captured when an invocation initializes.
///
/// Written only by `init`; read-only afterwards.
#[derive(Debug, Clone)]
pub struct RequestState<E> {
    event: Option<E>,
    context: Option<InvocationContext>,
    headers: HashMap<String, String>,
    parameters: Parameters,
    body: Option<Value>,
}

impl<E> Default for RequestState<E> {
    fn default() -> Self {
        Self {
            event: None,
            context: None,
            headers: HashMap::new(),
            parameters: Parameters::default(),
            body: None,
        }
    }
}

impl<E: InvocationEvent> RequestState<E> {
    /// Capture `event` and `context`, lower-casing every header name.
    pub(crate) fn ingest(&mut self, event: E, context: InvocationContext) {
        self.headers = event
            .headers()
            .into_iter()
            .map(|(name, value)| (name.to_lowercase(), value))
            .collect();
        self.parameters = Parameters {
            path: event.path_parameters(),
            querystring: event.query_string_parameters(),
        };
        self.body = None;
        self.event = Some(event);
        self.context = Some(context);
    }
}

impl<E> RequestState<E> {
    pub(crate) fn set_body(&mut self, body: Value) {
        self.body = Some(body);
    }

    /// The raw event, once initialized.
    pub fn event(&self) -> Option<&E> {
        self.event.as_ref()
    }

    /// The invocation context, once initialized.
    pub fn context(&self) -> Option<&InvocationContext> {
        self.context.as_ref()
    }

    /// Headers keyed by lower-cased name.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Look up a header, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Path and querystring parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Request body as parsed during schema validation.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headers_lowercased() {
        let mut state = RequestState::default();
        state.ingest(
            json!({ "headers": { "X-Api-Key": "secret", "CONTENT-TYPE": "text/plain" } }),
            InvocationContext::new("abc"),
        );

        assert_eq!(state.headers().get("x-api-key"), Some(&"secret".to_string()));
        assert_eq!(state.header("X-API-KEY"), Some("secret"));
        assert_eq!(state.header("content-type"), Some("text/plain"));
        assert!(state.headers().keys().all(|k| k == &k.to_lowercase()));
    }

    #[test]
    fn test_parameters_kept_apart() {
        let mut state = RequestState::default();
        state.ingest(
            json!({
                "pathParameters": { "id": "42" },
                "queryStringParameters": { "page": "2" }
            }),
            InvocationContext::new("abc"),
        );

        assert_eq!(state.parameters().path.get("id"), Some(&"42".to_string()));
        assert_eq!(state.parameters().path.get("page"), None);
        assert_eq!(
            state.parameters().querystring.get("page"),
            Some(&"2".to_string())
        );
        assert_eq!(state.parameters().querystring.get("id"), None);
    }

    #[test]
    fn test_empty_before_ingest() {
        let state: RequestState<serde_json::Value> = RequestState::default();
        assert!(state.event().is_none());
        assert!(state.context().is_none());
        assert!(state.headers().is_empty());
        assert!(state.body().is_none());
    }
}
