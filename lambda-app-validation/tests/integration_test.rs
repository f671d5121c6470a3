//! Integration tests for lambda-app-validation

use lambda_app_validation::*;
use serde_json::{Value, json};

fn user_schema() -> Schema {
    Schema::new(json!({
        "type": "object",
        "required": ["name", "age"],
        "additionalProperties": false,
        "properties": {
            "name": { "type": "string", "minLength": 2, "maxLength": 10 },
            "age": { "type": "integer", "minimum": 0, "maximum": 150 },
            "email": { "type": "string", "format": "email" },
            "role": { "enum": ["admin", "user"] },
            "code": { "type": "string", "pattern": "^[A-Z]{3}$" },
            "tags": {
                "type": "array",
                "minItems": 1,
                "maxItems": 3,
                "items": { "type": "string" }
            }
        }
    }))
}

async fn violations(schema: Value, data: Value) -> Vec<SchemaViolation> {
    JsonSchemaValidator::new()
        .validate(&Schema::new(schema), &data)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_valid_payload() {
    let validator = JsonSchemaValidator::new();
    let violations = validator
        .validate(
            &user_schema(),
            &json!({
                "name": "John",
                "age": 30,
                "email": "john@example.com",
                "role": "admin",
                "code": "ABC",
                "tags": ["a", "b"]
            }),
        )
        .await
        .unwrap();
    assert!(violations.is_empty());
}

#[tokio::test]
async fn test_missing_required_properties() {
    let violations = violations(user_schema().into_document(), json!({})).await;

    assert_eq!(violations.len(), 2);
    assert!(violations.iter().all(|v| v.keyword == "required"));
    assert!(violations.iter().all(|v| v.path.is_empty()));
    assert!(violations[0].message.contains("name"));
    assert!(violations[1].message.contains("age"));
}

#[tokio::test]
async fn test_collects_every_violation() {
    let violations = violations(
        user_schema().into_document(),
        json!({
            "name": "J",
            "age": -1,
            "role": "guest",
            "code": "abc",
            "tags": [],
            "extra": true
        }),
    )
    .await;

    let keywords: Vec<&str> = violations.iter().map(|v| v.keyword.as_str()).collect();
    assert!(keywords.contains(&"minLength"));
    assert!(keywords.contains(&"minimum"));
    assert!(keywords.contains(&"enum"));
    assert!(keywords.contains(&"pattern"));
    assert!(keywords.contains(&"minItems"));
    assert!(keywords.contains(&"additionalProperties"));
}

#[tokio::test]
async fn test_violation_paths() {
    let violations = violations(
        user_schema().into_document(),
        json!({ "name": "John", "age": 200, "tags": ["ok", 7] }),
    )
    .await;

    let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
    assert!(paths.contains(&"/age"));
    assert!(paths.contains(&"/tags/1"));

    let age = violations.iter().find(|v| v.path == "/age").unwrap();
    assert_eq!(age.keyword, "maximum");
    assert!(age.to_string().starts_with("/age "));
}

#[tokio::test]
async fn test_email_format_is_asserted() {
    let violations = violations(
        user_schema().into_document(),
        json!({ "name": "John", "age": 30, "email": "not-an-email" }),
    )
    .await;

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].keyword, "format");
    assert_eq!(violations[0].path, "/email");
}

#[tokio::test]
async fn test_root_type_mismatch_has_bare_message() {
    let violations = violations(user_schema().into_document(), Value::Null).await;

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].keyword, "type");
    assert_eq!(violations[0].to_string(), violations[0].message);
    assert!(violations[0].message.contains("object"));
}

#[tokio::test]
async fn test_exclusive_bounds_and_const() {
    let schema = Schema::new(json!({
        "type": "object",
        "properties": {
            "ratio": { "type": "number", "exclusiveMinimum": 0, "exclusiveMaximum": 1 },
            "version": { "const": 2 }
        }
    }));
    let compiled = JsonSchemaValidator::new().compile(&schema).await.unwrap();

    assert!(compiled.is_valid(&json!({ "ratio": 0.5, "version": 2 })));

    let violations = compiled.validate(&json!({ "ratio": 1, "version": 3 }));
    let keywords: Vec<&str> = violations.iter().map(|v| v.keyword.as_str()).collect();
    assert_eq!(keywords.len(), 2);
    assert!(keywords.contains(&"exclusiveMaximum"));
    assert!(keywords.contains(&"const"));
}

#[tokio::test]
async fn test_every_keyword_is_enforced() {
    let cases = [
        (json!({"anyOf": [{"type": "string"}, {"type": "integer"}]}), json!(true)),
        (json!({"oneOf": [{"type": "string"}]}), json!(5)),
        (json!({"allOf": [{"type": "integer"}, {"minimum": 10}]}), json!(3)),
        (json!({"not": {"type": "null"}}), Value::Null),
        (json!({"minProperties": 1}), json!({})),
        (json!({"uniqueItems": true}), json!([1, 1])),
        (json!({"multipleOf": 2}), json!(3)),
        (
            json!({"$defs": {"s": {"type": "string"}}, "$ref": "#/$defs/s"}),
            json!(5),
        ),
        (
            json!({"if": {"type": "integer"}, "then": {"minimum": 0}}),
            json!(-1),
        ),
    ];

    for (schema, data) in cases {
        let found = violations(schema.clone(), data.clone()).await;
        assert!(!found.is_empty(), "{} accepted {}", schema, data);
    }
}

#[tokio::test]
async fn test_invalid_pattern_fails_compilation() {
    let schema = Schema::new(json!({ "type": "string", "pattern": "([" }));
    let result = JsonSchemaValidator::new().compile(&schema).await;
    assert!(matches!(result, Err(SchemaError::InvalidSchema { .. })));
}

#[tokio::test]
async fn test_shared_validator_through_arc() {
    let validator: std::sync::Arc<dyn SchemaValidator> =
        std::sync::Arc::new(JsonSchemaValidator::new());
    let found = validator
        .validate(&Schema::new(json!({"type": "string"})), &json!("ok"))
        .await
        .unwrap();
    assert!(found.is_empty());
}
