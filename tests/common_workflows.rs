//! Integration tests for common lambda-app workflows.
//!
//! These tests verify that the most common use cases work correctly.

use lambda_app::prelude::*;
use lambda_app::{Base58Encoder, JsonLogger, UNINITIALIZED_REQUEST_ID};
use lambda_app_testing::*;
use std::sync::Arc;

// =============================================================================
// Typed identity
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
struct Caller {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    roles: Vec<String>,
}

fn api_key_authorizer() -> impl Authorizer<HttpEvent, Caller> {
    |event: &HttpEvent, _context: &InvocationContext| {
        let key = event
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("x-api-key"))
            .map(|(_, value)| value.clone());
        async move {
            match key.as_deref() {
                Some("admin-key") => Ok::<_, BoxError>(Caller {
                    id: Some("admin".to_string()),
                    roles: vec!["admin".to_string()],
                }),
                Some(_) => Ok(Caller {
                    id: Some("guest".to_string()),
                    roles: Vec::new(),
                }),
                None => Err("invalid user".into()),
            }
        }
    }
}

// =============================================================================
// Create-user workflow
// =============================================================================

fn create_user_options() -> InvocationOptions<HttpEvent, Caller> {
    InvocationOptions::new()
        .require_headers(["x-api-key"])
        .schema(json!({
            "type": "object",
            "required": ["email"],
            "additionalProperties": false,
            "properties": {
                "email": { "type": "string", "format": "email" },
                "name": { "type": "string", "maxLength": 64 }
            }
        }))
        .on_authorize(api_key_authorizer())
}

async fn create_user(event: HttpEvent) -> ResponseEnvelope {
    let mut app: Invocation<HttpEvent, Caller> = Invocation::new();
    if let Err(err) = app.init(event, test_context(), create_user_options()).await {
        return app.render(&err).unwrap();
    }

    let email = app
        .body()
        .and_then(|body| body.get("email"))
        .cloned()
        .unwrap_or_default();
    app.response(HttpStatus::Created, Some(json!({ "email": email })))
        .unwrap()
}

#[tokio::test]
async fn test_create_user_success() {
    let response = create_user(
        EventBuilder::request("POST", "/users")
            .header("X-Api-Key", "admin-key")
            .json(&json!({"email": "jane@example.com", "name": "Jane"}))
            .build(),
    )
    .await;

    assert_status(&response, HttpStatus::Created);
    assert_field(&response, "email", &json!("jane@example.com"));
    assert_context(&response, &json!({"id": "admin", "roles": ["admin"]}));
    assert_request_id(&response, &Base58Encoder.encode(TEST_REQUEST_ID));
}

#[tokio::test]
async fn test_create_user_missing_key() {
    let response = create_user(
        EventBuilder::request("POST", "/users")
            .json(&json!({"email": "jane@example.com"}))
            .build(),
    )
    .await;

    assert_status(&response, HttpStatus::BadRequest);
    assert_message(&response, "Missing required headers: x-api-key");
    assert_no_context(&response);
}

#[tokio::test]
async fn test_create_user_invalid_body() {
    let response = create_user(
        EventBuilder::request("POST", "/users")
            .header("x-api-key", "guest-key")
            .json(&json!({"email": "not-an-email", "admin": true}))
            .build(),
    )
    .await;

    assert_status(&response, HttpStatus::BadRequest);
    let body = response.json_body().unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("admin"));
    assert!(message.contains("/email "));
    assert!(message.contains("not-an-email"));
    assert_eq!(message.matches(", ").count(), 1);
}

#[tokio::test]
async fn test_create_user_rejected_caller() {
    let options = create_user_options().require_headers(Vec::<String>::new());
    let mut app: Invocation<HttpEvent, Caller> = Invocation::new();
    let err = app
        .init(
            EventBuilder::new()
                .json(&json!({"email": "jane@example.com"}))
                .build(),
            test_context(),
            options,
        )
        .await
        .unwrap_err();

    let response = err.response(&app).unwrap();
    assert_status(&response, HttpStatus::Unauthorized);
    assert_message(&response, "invalid user");
}

// =============================================================================
// Envelope basics
// =============================================================================

#[test]
fn test_response_without_init() {
    let app: Invocation = Invocation::new();
    let response = app.response(HttpStatus::GatewayTimeout, None).unwrap();

    assert_server_error(&response);
    assert_request_id(&response, &Base58Encoder.encode(UNINITIALIZED_REQUEST_ID));
    assert_eq!(app.aws_request_id(), "0");
}

#[tokio::test]
async fn test_logger_injection() {
    let logger = RecordingLogger::new();
    let mut app: Invocation = Invocation::new().with_logger(Arc::new(logger.clone()));

    app.init(
        EventBuilder::new().build(),
        test_context(),
        InvocationOptions::new().authorize(false),
    )
    .await
    .unwrap();
    app.log().info("handled");

    assert!(logger.contains(Level::Info, "handled"));
    assert!(logger.contains(Level::Debug, "authorization disabled"));
}

#[test]
fn test_default_logger_level() {
    let logger = JsonLogger::new().with_level(Level::Warn);
    assert!(!logger.is_enabled(Level::Info));
    assert!(logger.is_enabled(Level::Error));
}
