//! Display identifiers.
//!
//! The platform hands every invocation an opaque trace token (usually a
//! UUID). Responses carry a shorter base58 rendering of it.

use uuid::Uuid;

/// Shortens an opaque trace identifier into a display identifier.
///
/// Implementations must be deterministic: the same input always yields the
/// same output.
pub trait IdEncoder: Send + Sync {
    /// Encode `id`.
    fn encode(&self, id: &str) -> String;
}

/// Base58 (Bitcoin alphabet) encoder.
///
/// UUIDs are encoded from their 16 raw bytes, so a 36 character UUID becomes
/// at most 22 characters. Anything else is encoded from its UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base58Encoder;

impl IdEncoder for Base58Encoder {
    fn encode(&self, id: &str) -> String {
        match Uuid::parse_str(id) {
            Ok(uuid) => base58(uuid.as_bytes()),
            Err(_) => base58(id.as_bytes()),
        }
    }
}

/// Base58-encode a byte string (Bitcoin alphabet); each leading zero byte
/// becomes `'1'`.
pub fn base58(input: &[u8]) -> String {
    bs58::encode(input).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_encoding() {
        let encoder = Base58Encoder;
        assert_eq!(
            encoder.encode("c6af9ac6-7b61-11e6-9a41-93e8deadbeef"),
            "RY1MhFYzCrPF63Mp8eegdL"
        );
        assert_eq!(
            encoder.encode("550e8400-e29b-41d4-a716-446655440000"),
            "BWBeN28Vb7cMEx7Ym8AUzs"
        );
    }

    #[test]
    fn test_nil_uuid_keeps_leading_zeros() {
        assert_eq!(
            Base58Encoder.encode("00000000-0000-0000-0000-000000000000"),
            "1111111111111111"
        );
    }

    #[test]
    fn test_non_uuid_encoding() {
        assert_eq!(Base58Encoder.encode("0"), "q");
        assert_eq!(Base58Encoder.encode("123456"), "RVu1HWU5");
        assert_eq!(base58(b"hello world"), "StV1DL6CwTryKyV");
        assert_eq!(base58(b""), "");
    }

    #[test]
    fn test_deterministic() {
        let id = "8476a536-e9f4-11e8-9739-2dfe598c3fcd";
        assert_eq!(Base58Encoder.encode(id), Base58Encoder.encode(id));
        assert!(Base58Encoder.encode(id).len() <= 22);
    }
}
