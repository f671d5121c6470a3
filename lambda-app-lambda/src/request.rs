//! Lambda request conversion.

use lambda_app_core::{InvocationContext, InvocationEvent, UNINITIALIZED_REQUEST_ID};
use lambda_http::request::RequestContext;
use lambda_http::{Body, Request, RequestExt};
use std::borrow::Cow;
use std::collections::HashMap;

/// An API Gateway / ALB / Function URL request, flattened for the invocation
/// pipeline.
#[derive(Debug, Clone, Default)]
pub struct GatewayRequest {
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Headers, as delivered.
    pub headers: Vec<(String, String)>,
    /// Path parameters (from API Gateway).
    pub path_parameters: HashMap<String, String>,
    /// Querystring parameters.
    pub query_string_parameters: HashMap<String, String>,
    /// Request body as text.
    pub body: Option<String>,
    /// Source IP.
    pub source_ip: Option<String>,
    /// User agent.
    pub user_agent: Option<String>,
}

impl GatewayRequest {
    /// Split a `lambda_http::Request` into an event and its invocation context.
    pub fn from_lambda_request(request: Request) -> (Self, InvocationContext) {
        let path_parameters: HashMap<String, String> = request
            .path_parameters()
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        let query_string_parameters: HashMap<String, String> = request
            .query_string_parameters()
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        let context = request
            .lambda_context_ref()
            .map(|ctx| InvocationContext {
                request_id: ctx.request_id.clone(),
                invoked_function_arn: ctx.invoked_function_arn.clone(),
                deadline_ms: ctx.deadline,
                xray_trace_id: ctx.xray_trace_id.clone(),
            })
            .unwrap_or_else(|| InvocationContext::new(UNINITIALIZED_REQUEST_ID));

        let (source_ip, user_agent) = match request.request_context_ref() {
            Some(RequestContext::ApiGatewayV2(v2)) => {
                (v2.http.source_ip.clone(), v2.http.user_agent.clone())
            }
            Some(RequestContext::ApiGatewayV1(v1)) => {
                (v1.identity.source_ip.clone(), v1.identity.user_agent.clone())
            }
            _ => (None, None),
        };

        let (parts, body) = request.into_parts();

        let headers = parts
            .headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect::<Vec<_>>();

        // ALB and Function URL contexts carry no user agent.
        let user_agent = user_agent.or_else(|| {
            parts
                .headers
                .get(http::header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        });

        let body = match body {
            Body::Empty => None,
            Body::Text(text) => Some(text),
            Body::Binary(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        };

        let event = Self {
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            headers,
            path_parameters,
            query_string_parameters,
            body,
            source_ip,
            user_agent,
        };
        (event, context)
    }
}

impl InvocationEvent for GatewayRequest {
    fn headers(&self) -> Vec<(String, String)> {
        self.headers.clone()
    }

    fn path_parameters(&self) -> HashMap<String, String> {
        self.path_parameters.clone()
    }

    fn query_string_parameters(&self) -> HashMap<String, String> {
        self.query_string_parameters.clone()
    }

    fn body(&self) -> Option<Cow<'_, str>> {
        self.body.as_deref().map(Cow::Borrowed)
    }

    fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    fn source_ip(&self) -> Option<&str> {
        self.source_ip.as_deref()
    }
}
