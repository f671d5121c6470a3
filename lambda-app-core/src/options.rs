//! Invocation configuration.
//!
//! Options are layered when an invocation initializes: built-in defaults,
//! then the options set on the instance, then the options passed to
//! `init`. A field set in a later layer wins.

use crate::{BoxError, InvocationContext, ResponseEnvelope};
use async_trait::async_trait;
use lambda_app_validation::Schema;
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Default value of `Access-Control-Allow-Origin`.
pub const DEFAULT_ALLOW_ORIGIN: &str = "*";

/// Authorization hook: resolves the caller identity for an event.
///
/// A rejection aborts the invocation with `401 Unauthorized`; the error's
/// `Display` text becomes the response message.
#[async_trait]
pub trait Authorizer<E, I>: Send + Sync {
    /// Resolve the identity of the caller.
    async fn authorize(&self, event: &E, context: &InvocationContext) -> Result<I, BoxError>;
}

#[async_trait]
impl<E, I, F, Fut> Authorizer<E, I> for F
where
    E: Sync,
    I: Send,
    F: Fn(&E, &InvocationContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<I, BoxError>> + Send + 'static,
{
    async fn authorize(&self, event: &E, context: &InvocationContext) -> Result<I, BoxError> {
        self(event, context).await
    }
}

/// Observation hook called with every finished envelope.
pub type ResponseHook = Arc<dyn Fn(&ResponseEnvelope) -> Result<(), BoxError> + Send + Sync>;

/// Names that must be present (and non-empty) on the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    /// Required header names, matched case-insensitively.
    pub headers: Option<Vec<String>>,
    /// Required path and querystring parameters.
    pub parameters: ParameterRequirements,
}

/// Required path and querystring parameter names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterRequirements {
    pub path: Option<Vec<String>>,
    pub querystring: Option<Vec<String>>,
}

impl Requirements {
    /// Required headers, empty when unset.
    pub fn headers(&self) -> &[String] {
        self.headers.as_deref().unwrap_or_default()
    }

    /// Required path parameters, empty when unset.
    pub fn path(&self) -> &[String] {
        self.parameters.path.as_deref().unwrap_or_default()
    }

    /// Required querystring parameters, empty when unset.
    pub fn querystring(&self) -> &[String] {
        self.parameters.querystring.as_deref().unwrap_or_default()
    }

    /// Check if nothing is required.
    pub fn is_empty(&self) -> bool {
        self.headers().is_empty() && self.path().is_empty() && self.querystring().is_empty()
    }

    fn merge(self, over: Self) -> Self {
        Self {
            headers: over.headers.or(self.headers),
            parameters: ParameterRequirements {
                path: over.parameters.path.or(self.parameters.path),
                querystring: over.parameters.querystring.or(self.parameters.querystring),
            },
        }
    }
}

fn names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Vec<String> {
    names.into_iter().map(Into::into).collect()
}

/// Configuration consumed by the init pipeline and the response builder.
///
/// `E` is the event type handed to the authorization hook, `I` the identity
/// it produces.
pub struct InvocationOptions<E, I> {
    /// Run the authorization hook (default `true`).
    pub authorize: Option<bool>,
    /// `Access-Control-Allow-Origin` response header (default `"*"`).
    pub access_control_allow_origin: Option<String>,
    /// Schema the request body must satisfy.
    pub schema: Option<Schema>,
    /// Required headers and parameters.
    pub require: Requirements,
    /// Caller-defined extension bag.
    pub custom: Option<Map<String, Value>>,
    /// Authorization hook.
    pub on_authorize: Option<Arc<dyn Authorizer<E, I>>>,
    /// Response observation hook.
    pub on_response: Option<ResponseHook>,
}

impl<E, I> InvocationOptions<E, I> {
    /// Empty options: every field unset.
    pub fn new() -> Self {
        Self {
            authorize: None,
            access_control_allow_origin: None,
            schema: None,
            require: Requirements::default(),
            custom: None,
            on_authorize: None,
            on_response: None,
        }
    }

    /// Built-in defaults, the bottom layer of every merge.
    pub fn defaults() -> Self {
        Self {
            authorize: Some(true),
            access_control_allow_origin: Some(DEFAULT_ALLOW_ORIGIN.to_string()),
            ..Self::new()
        }
    }

    /// Enable or disable the authorization stage.
    pub fn authorize(mut self, enabled: bool) -> Self {
        self.authorize = Some(enabled);
        self
    }

    /// Set the CORS origin sent with every response.
    pub fn access_control_allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.access_control_allow_origin = Some(origin.into());
        self
    }

    /// Validate the request body against `schema`.
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Require headers (case-insensitive).
    pub fn require_headers<S: Into<String>>(mut self, headers: impl IntoIterator<Item = S>) -> Self {
        self.require.headers = Some(names(headers));
        self
    }

    /// Require path parameters.
    pub fn require_path_parameters<S: Into<String>>(
        mut self,
        parameters: impl IntoIterator<Item = S>,
    ) -> Self {
        self.require.parameters.path = Some(names(parameters));
        self
    }

    /// Require querystring parameters.
    pub fn require_querystring_parameters<S: Into<String>>(
        mut self,
        parameters: impl IntoIterator<Item = S>,
    ) -> Self {
        self.require.parameters.querystring = Some(names(parameters));
        self
    }

    /// Add an entry to the extension bag.
    pub fn custom(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Install the authorization hook.
    pub fn on_authorize(mut self, authorizer: impl Authorizer<E, I> + 'static) -> Self {
        self.on_authorize = Some(Arc::new(authorizer));
        self
    }

    /// Install the response observation hook.
    pub fn on_response<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ResponseEnvelope) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.on_response = Some(Arc::new(hook));
        self
    }

    /// Overlay `over` on top of `self`; fields set in `over` win.
    pub fn merge(self, over: Self) -> Self {
        Self {
            authorize: over.authorize.or(self.authorize),
            access_control_allow_origin: over
                .access_control_allow_origin
                .or(self.access_control_allow_origin),
            schema: over.schema.or(self.schema),
            require: self.require.merge(over.require),
            custom: over.custom.or(self.custom),
            on_authorize: over.on_authorize.or(self.on_authorize),
            on_response: over.on_response.or(self.on_response),
        }
    }

    /// Effective authorize flag.
    pub fn is_authorize_enabled(&self) -> bool {
        self.authorize.unwrap_or(true)
    }

    /// Effective CORS origin.
    pub fn allow_origin(&self) -> &str {
        self.access_control_allow_origin
            .as_deref()
            .unwrap_or(DEFAULT_ALLOW_ORIGIN)
    }

    /// Read one entry of the extension bag.
    pub fn custom_value(&self, key: &str) -> Option<&Value> {
        self.custom.as_ref().and_then(|custom| custom.get(key))
    }
}

impl<E, I> Default for InvocationOptions<E, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, I> Clone for InvocationOptions<E, I> {
    fn clone(&self) -> Self {
        Self {
            authorize: self.authorize,
            access_control_allow_origin: self.access_control_allow_origin.clone(),
            schema: self.schema.clone(),
            require: self.require.clone(),
            custom: self.custom.clone(),
            on_authorize: self.on_authorize.clone(),
            on_response: self.on_response.clone(),
        }
    }
}

impl<E, I> fmt::Debug for InvocationOptions<E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationOptions")
            .field("authorize", &self.authorize)
            .field("access_control_allow_origin", &self.access_control_allow_origin)
            .field("schema", &self.schema)
            .field("require", &self.require)
            .field("custom", &self.custom)
            .field("on_authorize", &self.on_authorize.is_some())
            .field("on_response", &self.on_response.is_some())
            .finish()
    }
}
