// lambda-app - per-request lifecycle for serverless HTTP handlers
//
// Validates required headers, path/querystring parameters and the request
// body, runs an authorization hook, and wraps every response in a uniform
// JSON envelope.

// Re-export core functionality
pub use lambda_app_core::*;

pub use lambda_app_log::{AppLogger, JsonLogger, Level, default_logger};
pub use lambda_app_validation::{
    CompiledSchema, JsonSchema, JsonSchemaValidator, Schema, SchemaError, SchemaValidator,
    SchemaViolation,
};

pub use async_trait::async_trait;

// Re-export optional crates
#[cfg(feature = "lambda")]
pub use lambda_app_lambda;

#[cfg(feature = "testing")]
pub use lambda_app_testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use lambda_app_core::prelude::*;
    pub use lambda_app_core::{ErrorKind, InvocationContext, Requirements};
    pub use lambda_app_log::Level;
    pub use lambda_app_validation::SchemaViolation;

    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::json;

    #[cfg(feature = "lambda")]
    pub use lambda_app_lambda::{
        GatewayRequest, InvocationHandler, LambdaConfig, LambdaInvocation, LambdaRuntime,
    };
}
