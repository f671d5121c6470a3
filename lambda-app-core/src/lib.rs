//! # lambda-app-core
//!
//! Per-request lifecycle coordinator for serverless HTTP handlers.
//!
//! An [`Invocation`] is created for every incoming event. `init` runs the
//! validation pipeline (required headers and parameters, body schema,
//! authorization hook) and the response builder wraps every payload in a
//! uniform JSON envelope carrying a display request id, the elapsed time and
//! the caller identity.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lambda_app_core::prelude::*;
//! use serde_json::json;
//!
//! # async fn handle(event: HttpEvent, context: InvocationContext) -> Result<ResponseEnvelope, ResponseError> {
//! let mut app: Invocation = Invocation::new();
//! let options = InvocationOptions::new()
//!     .authorize(false)
//!     .require_headers(["x-api-key"])
//!     .require_path_parameters(["id"]);
//!
//! if let Err(err) = app.init(event, context, options).await {
//!     return app.render(&err);
//! }
//!
//! let id = app.path_parameter("id").unwrap_or_default().to_string();
//! app.response(HttpStatus::Ok, Some(json!({ "id": id })))
//! # }
//! ```
//!
//! ## Identity
//!
//! The identity slot is generic. Applications with a known identity shape
//! declare it as the second type parameter:
//!
//! ```rust
//! use lambda_app_core::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Debug, Default, Serialize)]
//! struct User {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     id: Option<String>,
//! }
//!
//! let options = InvocationOptions::<HttpEvent, User>::new().on_authorize(
//!     |event: &HttpEvent, _context: &InvocationContext| {
//!         let key = event.headers.get("x-api-key").cloned();
//!         async move {
//!             match key {
//!                 Some(id) => Ok::<_, BoxError>(User { id: Some(id) }),
//!                 None => Err("invalid user".into()),
//!             }
//!         }
//!     },
//! );
//! let app = Invocation::<HttpEvent, User>::new().with_options(options);
//! assert!(app.identity().id.is_none());
//! ```

mod encoder;
mod error;
mod event;
mod identity;
mod invocation;
mod options;
mod pipeline;
mod response;
mod state;
mod status;
mod text;

pub use encoder::{Base58Encoder, IdEncoder, base58};
pub use error::{BoxError, ErrorKind, InvocationError, ResponseError, Result};
pub use event::{HttpDescription, HttpEvent, HttpRequestContext, InvocationContext, InvocationEvent};
pub use identity::{DynamicIdentity, identity_value, is_empty_identity};
pub use invocation::{Invocation, UNINITIALIZED_REQUEST_ID};
pub use options::{
    Authorizer, DEFAULT_ALLOW_ORIGIN, InvocationOptions, ParameterRequirements, Requirements,
    ResponseHook,
};
pub use response::{JSON_CONTENT_TYPE, ResponseEnvelope, ResponseHeaders};
pub use state::{Parameters, RequestState};
pub use status::HttpStatus;
pub use text::{capitalize, comma_join};

pub use lambda_app_log as log;
pub use lambda_app_validation as validation;

/// Common imports for handlers.
pub mod prelude {
    pub use crate::{
        Authorizer, BoxError, DynamicIdentity, HttpEvent, HttpStatus, IdEncoder, Invocation,
        InvocationContext, InvocationError, InvocationEvent, InvocationOptions, ResponseEnvelope,
        ResponseError,
    };
    pub use lambda_app_log::AppLogger;
    pub use lambda_app_validation::{Schema, SchemaValidator};
}
