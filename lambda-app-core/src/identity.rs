// Identity slot helpers

use serde::Serialize;
use serde_json::{Map, Value};

/// Identity type for applications that don't declare their own shape.
pub type DynamicIdentity = Map<String, Value>;

/// Serialize an identity for the response envelope.
///
/// An identity that serializes to `null` or to an object with no keys is
/// absent and yields `None`.
pub fn identity_value<I: Serialize + ?Sized>(identity: &I) -> serde_json::Result<Option<Value>> {
    Ok(match serde_json::to_value(identity)? {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        value => Some(value),
    })
}

/// Check if an identity counts as absent.
pub fn is_empty_identity<I: Serialize + ?Sized>(identity: &I) -> bool {
    matches!(identity_value(identity), Ok(None))
}
