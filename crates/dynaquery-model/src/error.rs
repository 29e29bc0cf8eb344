//! Service error shape.
//!
//! The service reports failures as JSON bodies with a `__type` field holding a
//! fully-qualified error name (`com.amazonaws.dynamodb.v20120810#...`) and an
//! optional message. [`ServiceError`] preserves that shape verbatim so callers
//! see exactly what the service said, while [`ServiceErrorCode`] gives a typed
//! view of the well-known codes.

use serde::Deserialize;

/// Well-known error codes reported by the table service.
///
/// Codes the client has no special handling for still round-trip through
/// [`ServiceErrorCode::Other`] rather than being lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ServiceErrorCode {
    /// A condition expression evaluated to false.
    ConditionalCheckFailed,
    /// Table or index not found.
    ResourceNotFound,
    /// A transactional write was canceled.
    TransactionCanceled,
    /// Concurrent transaction conflict.
    TransactionConflict,
    /// Provisioned read/write capacity exceeded.
    ProvisionedThroughputExceeded,
    /// Request rejected by input validation.
    #[default]
    Validation,
    /// Malformed request body.
    Serialization,
    /// Service-side failure.
    InternalServerError,
    /// Any error code this client does not recognize.
    Other(String),
}

impl ServiceErrorCode {
    /// Parse the short code out of a fully-qualified `__type` value.
    ///
    /// The service prefixes codes with a namespace and `#`, e.g.
    /// `com.amazonaws.dynamodb.v20120810#ResourceNotFoundException`; a bare
    /// code without the namespace is accepted as well.
    #[must_use]
    pub fn from_type_name(type_name: &str) -> Self {
        let short = type_name.rsplit('#').next().unwrap_or(type_name);
        match short {
            "ConditionalCheckFailedException" => Self::ConditionalCheckFailed,
            "ResourceNotFoundException" => Self::ResourceNotFound,
            "TransactionCanceledException" => Self::TransactionCanceled,
            "TransactionConflictException" => Self::TransactionConflict,
            "ProvisionedThroughputExceededException" => Self::ProvisionedThroughputExceeded,
            "ValidationException" => Self::Validation,
            "SerializationException" => Self::Serialization,
            "InternalServerError" => Self::InternalServerError,
            _ => Self::Other(short.to_owned()),
        }
    }

    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ConditionalCheckFailed => "ConditionalCheckFailedException",
            Self::ResourceNotFound => "ResourceNotFoundException",
            Self::TransactionCanceled => "TransactionCanceledException",
            Self::TransactionConflict => "TransactionConflictException",
            Self::ProvisionedThroughputExceeded => "ProvisionedThroughputExceededException",
            Self::Validation => "ValidationException",
            Self::Serialization => "SerializationException",
            Self::InternalServerError => "InternalServerError",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error response from the table service, passed through unmodified.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ServiceError {
    /// Typed view of the error code.
    pub code: ServiceErrorCode,
    /// The raw `__type` value as received.
    pub type_name: String,
    /// Human-readable message from the service.
    pub message: String,
}

impl ServiceError {
    /// Create an error from a fully-qualified type name and message.
    #[must_use]
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            code: ServiceErrorCode::from_type_name(&type_name),
            type_name,
            message: message.into(),
        }
    }

    /// Parse a JSON error body as the service emits it.
    ///
    /// Unparseable bodies become a [`ServiceErrorCode::Serialization`] error
    /// carrying the raw body, so no failure detail is ever dropped.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<WireError>(body) {
            Ok(wire) => Self::new(wire.type_name, wire.message.unwrap_or_default()),
            Err(_) => Self::new(
                "SerializationException",
                String::from_utf8_lossy(body).into_owned(),
            ),
        }
    }
}

/// The JSON error body shape. The message key's casing varies by operation.
#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(rename = "__type")]
    type_name: String,
    #[serde(alias = "Message", default)]
    message: Option<String>,
}
