//! Testing utilities for lambda-app handlers.
//!
//! ## Features
//!
//! - 🧪 **EventBuilder** - HTTP event fixtures
//! - 🎭 **MockAuthorizer** - Canned authorization outcomes
//! - 👁️ **RecordingLogger / SpyValidator / ResponseRecorder** - Call tracking
//! - ✅ **Assertions** - Envelope assertions
//!
//! ## Quick Start
//!
//! ```
//! use lambda_app_core::{HttpStatus, Invocation, InvocationOptions};
//! use lambda_app_testing::*;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let event = EventBuilder::request("GET", "/users/42")
//!     .header("X-Api-Key", "secret")
//!     .path_parameter("id", "42")
//!     .build();
//!
//! let mut app: Invocation = Invocation::new();
//! let options = InvocationOptions::new()
//!     .on_authorize(MockAuthorizer::allow(json!({"id": 42}).as_object().cloned().unwrap()))
//!     .require_headers(["x-api-key"]);
//! app.init(event, test_context(), options).await.unwrap();
//!
//! let response = app.response(HttpStatus::Ok, None).unwrap();
//! assert_status(&response, HttpStatus::Ok);
//! assert_context(&response, &json!({"id": 42}));
//! # });
//! ```

mod assertions;
mod events;
mod mock;

pub use assertions::*;
pub use events::{EventBuilder, TEST_REQUEST_ID, context, test_context};
pub use mock::{MockAuthorizer, RecordingLogger, ResponseRecorder, SpyValidator};
