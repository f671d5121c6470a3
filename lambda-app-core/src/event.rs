//! Inbound invocation data.
//!
//! The pipeline reads events through [`InvocationEvent`] so any payload shape
//! can be plugged in. [`HttpEvent`] models the API Gateway HTTP API (payload
//! format 2.0); `serde_json::Value` works too for loosely typed events.

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

/// Read access to a platform event.
pub trait InvocationEvent: Send + Sync {
    /// Request headers, with whatever casing the platform delivered.
    fn headers(&self) -> Vec<(String, String)>;

    /// Path parameters extracted by the gateway.
    fn path_parameters(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Querystring parameters.
    fn query_string_parameters(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Request body as text, decoded if the platform delivered it base64 encoded.
    fn body(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Caller user agent.
    fn user_agent(&self) -> Option<&str> {
        None
    }

    /// Caller network address.
    fn source_ip(&self) -> Option<&str> {
        None
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// API Gateway HTTP API event (payload format 2.0).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpEvent {
    pub version: Option<String>,
    pub route_key: Option<String>,
    pub raw_path: Option<String>,
    pub raw_query_string: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub path_parameters: HashMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub query_string_parameters: HashMap<String, String>,
    pub request_context: HttpRequestContext,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

/// `requestContext` of an [`HttpEvent`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpRequestContext {
    pub account_id: Option<String>,
    pub api_id: Option<String>,
    pub domain_name: Option<String>,
    pub request_id: Option<String>,
    pub stage: Option<String>,
    pub http: HttpDescription,
}

/// `requestContext.http` of an [`HttpEvent`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpDescription {
    pub method: Option<String>,
    pub path: Option<String>,
    pub protocol: Option<String>,
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
}

impl InvocationEvent for HttpEvent {
    fn headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn path_parameters(&self) -> HashMap<String, String> {
        self.path_parameters.clone()
    }

    fn query_string_parameters(&self) -> HashMap<String, String> {
        self.query_string_parameters.clone()
    }

    fn body(&self) -> Option<Cow<'_, str>> {
        let body = self.body.as_deref()?;
        if !self.is_base64_encoded {
            return Some(Cow::Borrowed(body));
        }
        // Undecodable payloads are passed through untouched.
        match base64::engine::general_purpose::STANDARD.decode(body) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Some(Cow::Owned(text)),
                Err(_) => Some(Cow::Borrowed(body)),
            },
            Err(_) => Some(Cow::Borrowed(body)),
        }
    }

    fn user_agent(&self) -> Option<&str> {
        self.request_context.http.user_agent.as_deref()
    }

    fn source_ip(&self) -> Option<&str> {
        self.request_context.http.source_ip.as_deref()
    }
}

fn string_map(value: Option<&Value>) -> HashMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

/// Loosely typed events: fields are looked up by their gateway JSON names.
impl InvocationEvent for Value {
    fn headers(&self) -> Vec<(String, String)> {
        string_map(self.get("headers")).into_iter().collect()
    }

    fn path_parameters(&self) -> HashMap<String, String> {
        string_map(self.get("pathParameters"))
    }

    fn query_string_parameters(&self) -> HashMap<String, String> {
        string_map(self.get("queryStringParameters"))
    }

    fn body(&self) -> Option<Cow<'_, str>> {
        self.get("body").and_then(Value::as_str).map(Cow::Borrowed)
    }

    fn user_agent(&self) -> Option<&str> {
        self.pointer("/requestContext/http/userAgent")
            .and_then(Value::as_str)
    }

    fn source_ip(&self) -> Option<&str> {
        self.pointer("/requestContext/http/sourceIp")
            .and_then(Value::as_str)
    }
}

/// Invocation metadata supplied by the hosting platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvocationContext {
    /// Opaque trace token for this invocation.
    #[serde(alias = "awsRequestId")]
    pub request_id: String,
    pub invoked_function_arn: String,
    /// Execution deadline in epoch milliseconds.
    pub deadline_ms: u64,
    pub xray_trace_id: Option<String>,
}

impl InvocationContext {
    /// Context carrying only a trace token.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Self::default()
        }
    }
}
