//! Lambda runtime for lambda-app handlers.

use lambda_app_core::{
    DynamicIdentity, IdEncoder, Invocation, InvocationError, InvocationOptions, ResponseEnvelope,
};
use lambda_app_log::AppLogger;
use lambda_app_validation::SchemaValidator;
use lambda_http::{Body, Error, Request, Response, run, service_fn};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::GatewayRequest;

/// The invocation type handed to handlers.
pub type LambdaInvocation<I = DynamicIdentity> = Invocation<GatewayRequest, I>;

/// Lambda runtime configuration.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    /// Enable request logging.
    pub log_requests: bool,
    /// Enable response logging.
    pub log_responses: bool,
}

impl Default for LambdaConfig {
    fn default() -> Self {
        Self {
            log_requests: true,
            log_responses: false,
        }
    }
}

impl LambdaConfig {
    /// Enable request logging.
    pub fn log_requests(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    /// Enable response logging.
    pub fn log_responses(mut self, enabled: bool) -> Self {
        self.log_responses = enabled;
        self
    }
}

/// Request handler for an initialized invocation.
///
/// Any `InvocationError` returned here is rendered as `{"message": ...}`
/// with the error's status.
#[async_trait::async_trait]
pub trait InvocationHandler<I = DynamicIdentity>: Send + Sync {
    /// Options passed to `init` for every event, layered over the runtime's.
    fn options(&self) -> InvocationOptions<GatewayRequest, I> {
        InvocationOptions::new()
    }

    /// Handle one initialized invocation.
    async fn handle(
        &self,
        app: Arc<LambdaInvocation<I>>,
    ) -> Result<ResponseEnvelope, InvocationError>;
}

#[async_trait::async_trait]
impl<I, F, Fut> InvocationHandler<I> for F
where
    I: Send + Sync + 'static,
    F: Fn(Arc<LambdaInvocation<I>>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ResponseEnvelope, InvocationError>> + Send + 'static,
{
    async fn handle(
        &self,
        app: Arc<LambdaInvocation<I>>,
    ) -> Result<ResponseEnvelope, InvocationError> {
        self(app).await
    }
}

/// Lambda runtime for lambda-app handlers.
///
/// Every event gets a fresh [`Invocation`] built from the runtime's options
/// and injected collaborators.
pub struct LambdaRuntime<H, I = DynamicIdentity> {
    handler: Arc<H>,
    config: LambdaConfig,
    options: InvocationOptions<GatewayRequest, I>,
    logger: Option<Arc<dyn AppLogger>>,
    validator: Option<Arc<dyn SchemaValidator>>,
    encoder: Option<Arc<dyn IdEncoder>>,
}

impl<H, I> LambdaRuntime<H, I>
where
    H: InvocationHandler<I> + 'static,
    I: Serialize + Default + Send + Sync + 'static,
{
    /// Create a new Lambda runtime.
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
            config: LambdaConfig::default(),
            options: InvocationOptions::new(),
            logger: None,
            validator: None,
            encoder: None,
        }
    }

    /// Set the runtime configuration.
    pub fn with_config(mut self, config: LambdaConfig) -> Self {
        self.config = config;
        self
    }

    /// Instance-level options shared by every invocation.
    pub fn with_options(mut self, options: InvocationOptions<GatewayRequest, I>) -> Self {
        self.options = options;
        self
    }

    /// Inject a logger into every invocation.
    pub fn with_logger(mut self, logger: Arc<dyn AppLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Inject a schema validation engine into every invocation.
    pub fn with_validator(mut self, validator: Arc<dyn SchemaValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Inject a display identifier encoder into every invocation.
    pub fn with_encoder(mut self, encoder: Arc<dyn IdEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Run the Lambda runtime.
    ///
    /// This function never returns under normal operation.
    pub async fn run(self) -> Result<(), Error> {
        info!("Starting lambda-app runtime");

        let runtime = Arc::new(self);
        run(service_fn(move |request: Request| {
            let runtime = runtime.clone();
            async move { runtime.handle_request(request).await }
        }))
        .await
    }

    fn invocation(&self) -> LambdaInvocation<I> {
        let mut app = Invocation::new().with_options(self.options.clone());
        if let Some(logger) = &self.logger {
            app = app.with_logger(logger.clone());
        }
        if let Some(validator) = &self.validator {
            app = app.with_validator(validator.clone());
        }
        if let Some(encoder) = &self.encoder {
            app = app.with_encoder(encoder.clone());
        }
        app
    }

    /// Run one event through `init`, the handler and the response builder.
    pub async fn handle(&self, request: Request) -> crate::Result<ResponseEnvelope> {
        let (event, context) = GatewayRequest::from_lambda_request(request);

        if self.config.log_requests {
            debug!(
                method = %event.method,
                path = %event.path,
                request_id = %context.request_id,
                "Handling Lambda request"
            );
        }

        let mut app = self.invocation();
        let envelope = match app.init(event, context, self.handler.options()).await {
            Ok(()) => {
                let app = Arc::new(app);
                match self.handler.handle(app.clone()).await {
                    Ok(envelope) => envelope,
                    Err(err) => app.render(&err)?,
                }
            }
            Err(err) => app.render(&err)?,
        };

        if self.config.log_responses {
            debug!(status = envelope.status_code.code(), "Lambda response");
        }
        Ok(envelope)
    }

    async fn handle_request(&self, request: Request) -> Result<Response<Body>, Error> {
        let envelope = self.handle(request).await.inspect_err(|err| {
            error!(error = %err, "Failed to build response");
        })?;
        Ok(into_response(envelope)?)
    }
}

/// Convert an envelope into the HTTP response handed back to the platform.
pub fn into_response(envelope: ResponseEnvelope) -> crate::Result<Response<Body>> {
    let response = Response::builder()
        .status(envelope.status_code.code())
        .header(http::header::CONTENT_TYPE, envelope.headers.content_type)
        .header(
            http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
            envelope.headers.access_control_allow_origin,
        )
        .body(Body::Text(envelope.body))?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_app_core::HttpStatus;
    use serde_json::json;

    fn request(headers: &[(&str, &str)]) -> Request {
        let mut builder = http::Request::builder().method("GET").uri("/health");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::Empty).unwrap()
    }

    async fn ok(app: Arc<LambdaInvocation>) -> Result<ResponseEnvelope, InvocationError> {
        Ok(app.response(HttpStatus::Ok, Some(json!({"status": "ok"})))?)
    }

    #[test]
    fn test_config_builder() {
        let config = LambdaConfig::default()
            .log_requests(false)
            .log_responses(true);
        assert!(!config.log_requests);
        assert!(config.log_responses);
    }

    #[tokio::test]
    async fn test_handle_success() {
        let runtime = LambdaRuntime::<_, DynamicIdentity>::new(ok)
            .with_options(InvocationOptions::new().authorize(false));
        let envelope = runtime.handle(request(&[])).await.unwrap();
        assert_eq!(envelope.status_code, HttpStatus::Ok);
        assert_eq!(envelope.json_body().unwrap()["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_lambda_context_uses_fallback_id() {
        let runtime = LambdaRuntime::<_, DynamicIdentity>::new(ok)
            .with_options(InvocationOptions::new().authorize(false));
        let envelope = runtime.handle(request(&[])).await.unwrap();

        let body = envelope.json_body().unwrap();
        assert_eq!(body["request"]["id"], "q");
    }

    #[tokio::test]
    async fn test_init_failure_is_rendered() {
        let runtime = LambdaRuntime::<_, DynamicIdentity>::new(ok).with_options(
            InvocationOptions::new()
                .authorize(false)
                .require_headers(["x-api-key"]),
        );
        let envelope = runtime.handle(request(&[])).await.unwrap();
        assert_eq!(envelope.status_code, HttpStatus::BadRequest);
        assert_eq!(
            envelope.json_body().unwrap()["message"],
            "Missing required headers: x-api-key"
        );
    }

    #[tokio::test]
    async fn test_handler_failure_is_rendered() {
        let runtime = LambdaRuntime::<_, DynamicIdentity>::new(|_app: Arc<LambdaInvocation>| async {
            Err::<ResponseEnvelope, _>(InvocationError::not_found("no such user"))
        })
        .with_options(InvocationOptions::new().authorize(false));

        let envelope = runtime.handle(request(&[])).await.unwrap();
        assert_eq!(envelope.status_code, HttpStatus::NotFound);
        assert_eq!(envelope.json_body().unwrap()["message"], "no such user");
    }

    #[test]
    fn test_into_response() {
        let envelope = ResponseEnvelope {
            status_code: HttpStatus::Created,
            body: r#"{"id":1}"#.to_string(),
            headers: lambda_app_core::ResponseHeaders::json("localhost"),
        };
        let response = into_response(envelope).unwrap();
        assert_eq!(response.status(), 201);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(response.headers()["access-control-allow-origin"], "localhost");
        assert!(matches!(response.body(), Body::Text(text) if text == r#"{"id":1}"#));
    }
}
