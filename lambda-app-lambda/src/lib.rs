//! # lambda-app-lambda
//!
//! AWS Lambda runtime adapter for lambda-app handlers.
//!
//! Works with API Gateway (REST and HTTP APIs), ALB and Lambda Function
//! URLs. Every event is turned into a fresh [`Invocation`](lambda_app_core::Invocation),
//! run through the init pipeline and handed to your handler; failures are
//! rendered as `{"message": ...}` envelopes with the matching status.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lambda_app_core::prelude::*;
//! use lambda_app_lambda::{LambdaInvocation, LambdaRuntime};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! async fn get_user(app: Arc<LambdaInvocation>) -> Result<ResponseEnvelope, InvocationError> {
//!     let id = app.path_parameter("id").unwrap_or_default();
//!     Ok(app.response(HttpStatus::Ok, Some(json!({ "id": id })))?)
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     lambda_app_lambda::init_tracing();
//!
//!     LambdaRuntime::new(get_user)
//!         .with_options(
//!             InvocationOptions::new()
//!                 .authorize(false)
//!                 .require_path_parameters(["id"]),
//!         )
//!         .run()
//!         .await
//! }
//! ```
//!
//! ## Packaging
//!
//! The workspace ships a size-tuned `release-lambda` profile:
//!
//! ```bash
//! cargo lambda build --profile release-lambda --arm64
//! ```
//!
//! Set `LAMBDA_APP_LOG_LEVEL` on the function to change the default log
//! level; `RUST_LOG` takes precedence for the tracing output.

mod error;
mod request;
mod runtime;

pub use error::{LambdaError, Result};
pub use request::GatewayRequest;
pub use runtime::{InvocationHandler, LambdaConfig, LambdaInvocation, LambdaRuntime, into_response};

pub use lambda_http;
pub use lambda_runtime;

/// Install the JSON tracing subscriber used for CloudWatch output.
///
/// Structured JSON output suitable for CloudWatch Logs. The filter comes from
/// `RUST_LOG`, falling back to the `LAMBDA_APP_LOG_LEVEL` level.
pub fn init_tracing() {
    let level = lambda_app_log::JsonLogger::from_env().level();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_str()));
    install(filter);
}

/// Install the JSON tracing subscriber with an explicit filter directive.
pub fn init_tracing_with_level(level: &str) {
    install(tracing_subscriber::EnvFilter::new(level));
}

fn install(filter: tracing_subscriber::EnvFilter) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // A second call keeps the subscriber that is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
        .try_init();
}
