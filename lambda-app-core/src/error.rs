// Error types for lambda-app invocations

use crate::HttpStatus;
use thiserror::Error;

/// Boxed error returned by caller-supplied hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for the init pipeline.
pub type Result<T> = std::result::Result<T, InvocationError>;

/// Which pipeline stage produced an [`InvocationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required headers or path/querystring parameters are missing.
    MissingRequirements,
    /// The body was declared as JSON but does not parse.
    InvalidJson,
    /// The body does not satisfy the configured schema.
    SchemaViolation,
    /// The configured schema could not be compiled.
    InvalidSchema,
    /// The authorization hook rejected the caller.
    Unauthorized,
    /// Raised by handler code.
    Custom,
}

/// A failed invocation: an HTTP status plus a client-facing message.
///
/// The error does not hold on to the invocation that raised it. Render it with
/// [`InvocationError::response`] (or [`Invocation::render`](crate::Invocation::render))
/// to get a ready-to-send envelope whose body carries `{"message": ...}`.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct InvocationError {
    status: HttpStatus,
    message: String,
    kind: ErrorKind,
}

impl InvocationError {
    /// Create an error with an explicit status.
    pub fn new(status: HttpStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            kind: ErrorKind::Custom,
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(HttpStatus::BadRequest, message)
    }

    /// 401 Unauthorized.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(HttpStatus::Unauthorized, message).with_kind(ErrorKind::Unauthorized)
    }

    /// 403 Forbidden.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(HttpStatus::Forbidden, message)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(HttpStatus::NotFound, message)
    }

    /// 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(HttpStatus::InternalServerError, message)
    }

    pub(crate) fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// HTTP status carried by the error.
    pub fn status(&self) -> HttpStatus {
        self.status
    }

    /// Numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status.code()
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Stage that produced the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }
}

/// Errors raised while building a response envelope.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The envelope body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The payload is not a JSON object and cannot be merged into the body.
    #[error("Response payload must be a JSON object, got {0}")]
    InvalidPayload(&'static str),

    /// The `on_response` hook failed; the error is passed through unchanged.
    #[error("{0}")]
    Hook(BoxError),
}

impl From<ResponseError> for InvocationError {
    fn from(err: ResponseError) -> Self {
        Self::internal(err.to_string())
    }
}
