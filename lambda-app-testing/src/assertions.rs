// Test assertions for response envelopes

use lambda_app_core::{HttpStatus, ResponseEnvelope};
use serde_json::Value;

fn body(response: &ResponseEnvelope) -> Value {
    response
        .json_body()
        .expect("Response body is not valid JSON")
}

/// Assert that a response has a specific status
pub fn assert_status(response: &ResponseEnvelope, expected: HttpStatus) {
    assert_eq!(
        response.status_code, expected,
        "Expected status {}, got {}",
        expected, response.status_code
    );
}

/// Assert that a response carries `{"message": expected}`
pub fn assert_message(response: &ResponseEnvelope, expected: &str) {
    let body = body(response);
    let actual = body.get("message").and_then(Value::as_str);
    assert_eq!(
        actual,
        Some(expected),
        "Expected message '{}', got {:?}",
        expected,
        actual
    );
}

/// Assert that the envelope's `request.id` is `expected`
pub fn assert_request_id(response: &ResponseEnvelope, expected: &str) {
    let body = body(response);
    let actual = body.pointer("/request/id").and_then(Value::as_str);
    assert_eq!(
        actual,
        Some(expected),
        "Expected request id '{}', got {:?}",
        expected,
        actual
    );
}

/// Assert that the envelope carries `context` equal to `expected`
pub fn assert_context(response: &ResponseEnvelope, expected: &Value) {
    let body = body(response);
    assert_eq!(
        body.get("context"),
        Some(expected),
        "Expected context {}, got {:?}",
        expected,
        body.get("context")
    );
}

/// Assert that the envelope has no `context` key
pub fn assert_no_context(response: &ResponseEnvelope) {
    let body = body(response);
    assert!(
        body.get("context").is_none(),
        "Expected no context, got {:?}",
        body.get("context")
    );
}

/// Assert that a body field equals `expected`
pub fn assert_field(response: &ResponseEnvelope, key: &str, expected: &Value) {
    let body = body(response);
    assert_eq!(
        body.get(key),
        Some(expected),
        "Expected field '{}' to be {}, got {:?}",
        key,
        expected,
        body.get(key)
    );
}

/// Assert the CORS origin header
pub fn assert_allow_origin(response: &ResponseEnvelope, expected: &str) {
    assert_eq!(
        response.headers.access_control_allow_origin, expected,
        "Expected Access-Control-Allow-Origin '{}', got '{}'",
        expected, response.headers.access_control_allow_origin
    );
}

/// Assert that a response has JSON content type
pub fn assert_json_content_type(response: &ResponseEnvelope) {
    assert!(
        response.headers.content_type.contains("application/json"),
        "Expected JSON content type, got {}",
        response.headers.content_type
    );
}

/// Assert that a response is successful (2xx status)
pub fn assert_success(response: &ResponseEnvelope) {
    assert!(
        response.status_code.is_success(),
        "Expected successful status (2xx), got {}",
        response.status_code
    );
}

/// Assert that a response is a client error (4xx status)
pub fn assert_client_error(response: &ResponseEnvelope) {
    assert!(
        response.status_code.is_client_error(),
        "Expected client error status (4xx), got {}",
        response.status_code
    );
}

/// Assert that a response is a server error (5xx status)
pub fn assert_server_error(response: &ResponseEnvelope) {
    assert!(
        response.status_code.is_server_error(),
        "Expected server error status (5xx), got {}",
        response.status_code
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_app_core::ResponseHeaders;
    use serde_json::json;

    fn envelope(status: HttpStatus, body: Value) -> ResponseEnvelope {
        ResponseEnvelope {
            status_code: status,
            body: body.to_string(),
            headers: ResponseHeaders::json("localhost"),
        }
    }

    #[test]
    fn test_assert_status_and_message() {
        let response = envelope(
            HttpStatus::BadRequest,
            json!({"request": {"id": "q", "duration": 0}, "message": "Invalid JSON body"}),
        );
        assert_status(&response, HttpStatus::BadRequest);
        assert_client_error(&response);
        assert_message(&response, "Invalid JSON body");
        assert_request_id(&response, "q");
        assert_no_context(&response);
    }

    #[test]
    fn test_assert_context_and_headers() {
        let response = envelope(
            HttpStatus::Ok,
            json!({"request": {"id": "q", "duration": 0}, "context": {"id": 1}, "n": 2}),
        );
        assert_success(&response);
        assert_context(&response, &json!({"id": 1}));
        assert_field(&response, "n", &json!(2));
        assert_allow_origin(&response, "localhost");
        assert_json_content_type(&response);
    }

    #[test]
    fn test_assert_server_error() {
        let response = envelope(HttpStatus::GatewayTimeout, json!({}));
        assert_server_error(&response);
    }

    #[test]
    #[should_panic(expected = "Expected status")]
    fn test_assert_status_mismatch() {
        let response = envelope(HttpStatus::Ok, json!({}));
        assert_status(&response, HttpStatus::NotFound);
    }
}
