//! Error Types for the Mitra API
//!
//! This module defines error handling for the HTTP layer:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//! - Mapping from domain `MitraError` values to status codes
//!
//! All errors are serialized as JSON with appropriate HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mitra_core::{LlmError, MitraError, StorageError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request contains invalid input data
    InvalidInput,

    /// Required field is missing from request
    MissingField,

    /// Field format is incorrect
    InvalidFormat,

    /// Intent name outside the supported set
    UnsupportedIntent,

    // ========================================================================
    // Server Errors (500, 502, 503, 504)
    // ========================================================================
    /// Internal server error
    InternalError,

    /// Storage operation failed
    StorageError,

    /// Intent classifier answered with an error
    UpstreamError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// Operation timed out
    Timeout,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput
            | ErrorCode::MissingField
            | ErrorCode::InvalidFormat
            | ErrorCode::UnsupportedIntent => StatusCode::BAD_REQUEST,

            ErrorCode::UpstreamError => StatusCode::BAD_GATEWAY,

            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,

            ErrorCode::InternalError | ErrorCode::StorageError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response returned by every endpoint on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingField,
            format!("Required field '{}' is missing", field),
        )
    }

    pub fn invalid_format(field: &str, expected: &str) -> Self {
        Self::new(
            ErrorCode::InvalidFormat,
            format!("Field '{}' has invalid format, expected: {}", field, expected),
        )
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn storage_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    pub fn upstream_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamError, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    pub fn timeout(operation: &str) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("Operation '{}' timed out", operation),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Lets handlers return `Result<_, ApiError>` directly.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        }
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM DOMAIN AND STANDARD ERRORS
// ============================================================================

impl From<MitraError> for ApiError {
    fn from(err: MitraError) -> Self {
        let message = err.to_string();
        match err {
            MitraError::Validation(ValidationError::RequiredFieldMissing { field }) => {
                ApiError::new(ErrorCode::MissingField, message)
                    .with_details(serde_json::json!({ "field": field }))
            }
            MitraError::Validation(ValidationError::InvalidValue { field, .. })
            | MitraError::Validation(ValidationError::InvalidFormat { field, .. }) => {
                ApiError::invalid_input(message).with_details(serde_json::json!({ "field": field }))
            }
            MitraError::Agent(_) => ApiError::new(ErrorCode::UnsupportedIntent, message),
            MitraError::Storage(StorageError::Timeout { operation }) => {
                ApiError::timeout(&operation)
            }
            MitraError::Storage(_) => ApiError::storage_error(message),
            MitraError::Llm(LlmError::ProviderNotConfigured) => {
                ApiError::service_unavailable(message)
            }
            MitraError::Llm(_) => ApiError::upstream_error(message),
            MitraError::Config(_) => ApiError::internal_error(message),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::invalid_input(format!("Invalid JSON: {}", err))
    }
}

impl From<uuid::Error> for ApiError {
    fn from(err: uuid::Error) -> Self {
        ApiError::invalid_format("id", &format!("valid UUID: {}", err))
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use mitra_core::{AgentError, Collection, ConfigError};

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::MissingField.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::StorageError.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::UpstreamError.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(ErrorCode::ServiceUnavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ErrorCode::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_validation_errors_are_client_errors() {
        let err: ApiError = MitraError::from(ValidationError::RequiredFieldMissing {
            field: "exercise".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::MissingField);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.details, Some(serde_json::json!({"field": "exercise"})));

        let err: ApiError = MitraError::from(ValidationError::InvalidValue {
            field: "sets".to_string(),
            reason: "not a number".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.contains("sets"));

        let err: ApiError = MitraError::from(AgentError::UnsupportedIntent {
            name: "add_travel_plan".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_failures_keep_underlying_message() {
        let err: ApiError = MitraError::from(StorageError::QueryFailed {
            collection: Collection::Todos,
            reason: "injected failure".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("injected failure"));

        let err: ApiError = MitraError::from(StorageError::Timeout {
            operation: "schedule merge fetch".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::Timeout);
        assert!(err.message.contains("schedule merge fetch"));
    }

    #[test]
    fn test_llm_and_config_mapping() {
        let err: ApiError = MitraError::from(LlmError::ProviderNotConfigured).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let err: ApiError = MitraError::from(LlmError::RequestFailed {
            provider: "groq".to_string(),
            status: 500,
            message: "boom".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);

        let err: ApiError = MitraError::from(ConfigError::MissingRequired {
            field: "probe_slots".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_error_serialization() -> Result<(), serde_json::Error> {
        let err = ApiError::invalid_input("Invalid user schedule provided");
        let json = serde_json::to_string(&err)?;

        assert!(json.contains("INVALID_INPUT"));
        assert!(json.contains("Invalid user schedule provided"));
        assert!(!json.contains("details"));

        let deserialized: ApiError = serde_json::from_str(&json)?;
        assert_eq!(deserialized, err);
        Ok(())
    }

    #[test]
    fn test_uuid_error_is_invalid_format() {
        let err: ApiError = match uuid::Uuid::parse_str("not-a-uuid") {
            Ok(_) => return,
            Err(e) => e.into(),
        };
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(err.message.contains("id"));
    }
}
