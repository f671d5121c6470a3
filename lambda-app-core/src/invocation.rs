//! The per-request invocation.
//!
//! An [`Invocation`] lives for exactly one request: construct it, `init` it
//! with the platform event, read from it, and build responses. Every accessor
//! is safe to call before `init` and returns an empty value in that case, so
//! timeout and failure paths can always produce a response.

use crate::{
    Base58Encoder, DynamicIdentity, HttpEvent, IdEncoder, InvocationContext, InvocationEvent,
    InvocationOptions, RequestState,
};
use lambda_app_log::{AppLogger, default_logger};
use lambda_app_validation::{JsonSchemaValidator, SchemaValidator};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Trace token used for the display identifier before `init`.
pub const UNINITIALIZED_REQUEST_ID: &str = "0";

/// One request's lifecycle: request state, identity slot and response builder.
///
/// `E` is the platform event type, `I` the identity produced by the
/// authorization hook.
pub struct Invocation<E = HttpEvent, I = DynamicIdentity> {
    pub(crate) options: InvocationOptions<E, I>,
    pub(crate) state: RequestState<E>,
    pub(crate) identity: I,
    pub(crate) logger: Arc<dyn AppLogger>,
    pub(crate) encoder: Arc<dyn IdEncoder>,
    pub(crate) validator: Arc<dyn SchemaValidator>,
    request_id: Option<String>,
    started: Instant,
}

impl<E, I: Default> Invocation<E, I> {
    /// Create an invocation; the duration clock starts now.
    pub fn new() -> Self {
        Self {
            options: InvocationOptions::new(),
            state: RequestState::default(),
            identity: I::default(),
            logger: default_logger(),
            encoder: Arc::new(Base58Encoder),
            validator: Arc::new(JsonSchemaValidator::new()),
            request_id: None,
            started: Instant::now(),
        }
    }
}

impl<E, I: Default> Default for Invocation<E, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, I> Invocation<E, I> {
    /// Set instance-level options, layered under the options passed to `init`.
    pub fn with_options(mut self, options: InvocationOptions<E, I>) -> Self {
        self.options = options;
        self
    }

    /// Inject a logger.
    pub fn with_logger(mut self, logger: Arc<dyn AppLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Inject the display identifier encoder.
    pub fn with_encoder(mut self, encoder: Arc<dyn IdEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Inject the schema validation engine.
    pub fn with_validator(mut self, validator: Arc<dyn SchemaValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Override the display identifier.
    pub fn set_request_id(&mut self, request_id: impl Into<String>) {
        self.request_id = Some(request_id.into());
    }

    /// The logger for this invocation.
    pub fn log(&self) -> &dyn AppLogger {
        self.logger.as_ref()
    }

    /// Current options (merged after `init`).
    pub fn options(&self) -> &InvocationOptions<E, I> {
        &self.options
    }

    /// One entry of the `custom` extension bag.
    pub fn custom(&self, key: &str) -> Option<&Value> {
        self.options.custom_value(key)
    }

    /// The raw platform trace token, or `"0"` before `init`.
    pub fn aws_request_id(&self) -> &str {
        self.state
            .context()
            .map(|context| context.request_id.as_str())
            .unwrap_or(UNINITIALIZED_REQUEST_ID)
    }

    /// Display identifier: the encoded trace token, unless overridden.
    pub fn request_id(&self) -> String {
        match &self.request_id {
            Some(id) => id.clone(),
            None => self.encoder.encode(self.aws_request_id()),
        }
    }

    /// Time since the invocation was constructed.
    pub fn duration(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time since construction, in whole milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration().as_millis() as u64
    }

    /// The identity resolved by the authorization hook.
    pub fn identity(&self) -> &I {
        &self.identity
    }

    /// Request state captured by `init`.
    pub fn state(&self) -> &RequestState<E> {
        &self.state
    }

    /// The raw event, once initialized.
    pub fn event(&self) -> Option<&E> {
        self.state.event()
    }

    /// The invocation context, once initialized.
    pub fn context(&self) -> Option<&InvocationContext> {
        self.state.context()
    }

    /// Headers keyed by lower-cased name.
    pub fn headers(&self) -> &HashMap<String, String> {
        self.state.headers()
    }

    /// Look up a header, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.state.header(name)
    }

    /// Look up a path parameter.
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.state.parameters().path.get(name).map(String::as_str)
    }

    /// Look up a querystring parameter.
    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.state
            .parameters()
            .querystring
            .get(name)
            .map(String::as_str)
    }

    /// Body parsed during schema validation.
    pub fn body(&self) -> Option<&Value> {
        self.state.body()
    }
}

impl<E: InvocationEvent, I> Invocation<E, I> {
    /// Caller network address, or `""`.
    pub fn source_ip(&self) -> &str {
        self.event().and_then(E::source_ip).unwrap_or_default()
    }

    /// Caller user agent, or `""`.
    pub fn user_agent(&self) -> &str {
        self.event().and_then(E::user_agent).unwrap_or_default()
    }

    /// Unparsed request body.
    pub fn raw_body(&self) -> Option<Cow<'_, str>> {
        self.event().and_then(E::body)
    }
}
