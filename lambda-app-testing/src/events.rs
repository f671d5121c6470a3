// Event and context fixtures

use base64::Engine;
use lambda_app_core::{HttpEvent, InvocationContext};
use serde::Serialize;

/// Trace token used by [`context`] fixtures when none is given.
pub const TEST_REQUEST_ID: &str = "c6af9ac6-7b61-11e6-9a41-93e8deadbeef";

/// Build an invocation context carrying `request_id`.
pub fn context(request_id: &str) -> InvocationContext {
    InvocationContext {
        request_id: request_id.to_string(),
        invoked_function_arn: "arn:aws:lambda:us-east-1:123456789012:function:test".to_string(),
        deadline_ms: 0,
        xray_trace_id: None,
    }
}

/// Context with [`TEST_REQUEST_ID`].
pub fn test_context() -> InvocationContext {
    context(TEST_REQUEST_ID)
}

/// Fluent builder for [`HttpEvent`] fixtures.
#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    event: HttpEvent,
}

impl EventBuilder {
    /// Start from an empty `GET /` event.
    pub fn new() -> Self {
        let mut event = HttpEvent {
            version: Some("2.0".to_string()),
            ..HttpEvent::default()
        };
        event.request_context.http.method = Some("GET".to_string());
        event.request_context.http.path = Some("/".to_string());
        Self { event }
    }

    /// Shorthand for `new().method(method).path(path)`.
    pub fn request(method: &str, path: &str) -> Self {
        Self::new().method(method).path(path)
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: &str) -> Self {
        self.event.request_context.http.method = Some(method.to_uppercase());
        self
    }

    /// Set the request path.
    pub fn path(mut self, path: &str) -> Self {
        self.event.raw_path = Some(path.to_string());
        self.event.request_context.http.path = Some(path.to_string());
        self
    }

    /// Add a header, keeping the given casing.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.event
            .headers
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Add a path parameter.
    pub fn path_parameter(mut self, name: &str, value: &str) -> Self {
        self.event
            .path_parameters
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Add a querystring parameter.
    pub fn query_parameter(mut self, name: &str, value: &str) -> Self {
        self.event
            .query_string_parameters
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Set a raw body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.event.body = Some(body.into());
        self.event.is_base64_encoded = false;
        self
    }

    /// Serialize `value` as the body and declare it as JSON.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Self {
        let body = serde_json::to_string(value).unwrap_or_default();
        self.header("Content-Type", "application/json").body(body)
    }

    /// Set a body the way the gateway delivers binary payloads.
    pub fn base64_body(mut self, body: &[u8]) -> Self {
        self.event.body = Some(base64::engine::general_purpose::STANDARD.encode(body));
        self.event.is_base64_encoded = true;
        self
    }

    /// Set the caller address.
    pub fn source_ip(mut self, ip: &str) -> Self {
        self.event.request_context.http.source_ip = Some(ip.to_string());
        self
    }

    /// Set the caller user agent.
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.event.request_context.http.user_agent = Some(user_agent.to_string());
        self
    }

    /// Finish the event.
    pub fn build(self) -> HttpEvent {
        self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_app_core::InvocationEvent;
    use serde_json::json;

    #[test]
    fn test_event_builder() {
        let event = EventBuilder::request("post", "/users/42")
            .header("X-Api-Key", "secret")
            .path_parameter("id", "42")
            .query_parameter("expand", "true")
            .source_ip("10.0.0.1")
            .json(&json!({"name": "John"}))
            .build();

        assert_eq!(event.request_context.http.method.as_deref(), Some("POST"));
        assert_eq!(event.raw_path.as_deref(), Some("/users/42"));
        assert_eq!(event.headers.get("Content-Type").map(String::as_str), Some("application/json"));
        assert_eq!(event.path_parameters().get("id"), Some(&"42".to_string()));
        assert_eq!(event.source_ip(), Some("10.0.0.1"));
        assert_eq!(event.body().as_deref(), Some(r#"{"name":"John"}"#));
    }

    #[test]
    fn test_base64_body() {
        let event = EventBuilder::new().base64_body(b"hello").build();
        assert!(event.is_base64_encoded);
        assert_eq!(event.body().as_deref(), Some("hello"));
    }

    #[test]
    fn test_context() {
        assert_eq!(super::test_context().request_id, TEST_REQUEST_ID);
        assert_eq!(context("abc").request_id, "abc");
    }
}
