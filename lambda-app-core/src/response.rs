//! Response envelope construction.
//!
//! Every response body has the same outer shape:
//!
//! ```json
//! { "request": { "id": "<display id>", "duration": 12 }, "context": { ... }, ...payload }
//! ```
//!
//! `context` is the resolved identity and is left out when the identity is
//! empty. Payload fields are merged last and win on key collisions.

use crate::identity::identity_value;
use crate::{HttpStatus, Invocation, InvocationError, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Content type of every envelope body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The two fixed response headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: String,
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub access_control_allow_origin: String,
}

impl ResponseHeaders {
    /// JSON headers with the given CORS origin.
    pub fn json(origin: impl Into<String>) -> Self {
        Self {
            content_type: JSON_CONTENT_TYPE.to_string(),
            access_control_allow_origin: origin.into(),
        }
    }
}

/// A finished response, in the shape the platform expects back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: HttpStatus,
    /// JSON-encoded body.
    pub body: String,
    pub headers: ResponseHeaders,
}

impl ResponseEnvelope {
    /// Response status.
    pub fn status(&self) -> HttpStatus {
        self.status_code
    }

    /// Parse the body back into JSON.
    pub fn json_body(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<E, I: Serialize> Invocation<E, I> {
    /// Build a response envelope.
    ///
    /// `payload` must be a JSON object (or `None`/`null`). The `on_response`
    /// hook sees the finished envelope; its failure is returned as
    /// [`ResponseError::Hook`].
    pub fn response(
        &self,
        status: HttpStatus,
        payload: Option<Value>,
    ) -> Result<ResponseEnvelope, ResponseError> {
        let mut body = Map::new();
        body.insert(
            "request".to_string(),
            json!({
                "id": self.request_id(),
                "duration": self.duration_ms(),
            }),
        );
        if let Some(identity) = identity_value(&self.identity)? {
            body.insert("context".to_string(), identity);
        }
        match payload {
            None | Some(Value::Null) => {}
            Some(Value::Object(fields)) => body.extend(fields),
            Some(other) => return Err(ResponseError::InvalidPayload(kind_name(&other))),
        }

        let envelope = ResponseEnvelope {
            status_code: status,
            body: serde_json::to_string(&body)?,
            headers: ResponseHeaders::json(self.options.allow_origin()),
        };

        if let Some(hook) = &self.options.on_response {
            hook(&envelope).map_err(ResponseError::Hook)?;
        }
        Ok(envelope)
    }

    /// Build a response from any serializable payload.
    pub fn response_json<P: Serialize + ?Sized>(
        &self,
        status: HttpStatus,
        payload: &P,
    ) -> Result<ResponseEnvelope, ResponseError> {
        let payload = serde_json::to_value(payload)?;
        self.response(status, Some(payload))
    }

    /// Render an error as `{"message": ...}` with the error's status.
    pub fn render(&self, error: &InvocationError) -> Result<ResponseEnvelope, ResponseError> {
        self.response(error.status(), Some(json!({ "message": error.message() })))
    }
}

impl InvocationError {
    /// Render this error through `invocation`'s response builder.
    pub fn response<E, I: Serialize>(
        &self,
        invocation: &Invocation<E, I>,
    ) -> Result<ResponseEnvelope, ResponseError> {
        invocation.render(self)
    }
}
