//! Error types for Mitra operations

use crate::{Collection, RecordId};
use thiserror::Error;

/// Storage collaborator errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Insert into {collection} failed: {reason}")]
    InsertFailed { collection: Collection, reason: String },

    #[error("Query on {collection} failed: {reason}")]
    QueryFailed { collection: Collection, reason: String },

    #[error("Delete from {collection} failed for {id}: {reason}")]
    DeleteFailed {
        collection: Collection,
        id: RecordId,
        reason: String,
    },

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Storage operation timed out: {operation}")]
    Timeout { operation: String },
}

/// Argument and payload validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Invalid format for {field}: expected {expected}, got {got:?}")]
    InvalidFormat {
        field: String,
        expected: String,
        got: String,
    },
}

/// Intent routing errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("Unsupported intent: {name}")]
    UnsupportedIntent { name: String },
}

/// Intent-classification provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("No LLM provider configured")]
    ProviderNotConfigured,

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Rate limited by {provider}, retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all Mitra errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MitraError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for Mitra operations.
pub type MitraResult<T> = Result<T, MitraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_message_names_collection() {
        let err = StorageError::QueryFailed {
            collection: Collection::Todos,
            reason: "disk on fire".to_string(),
        };
        assert_eq!(err.to_string(), "Query on todos failed: disk on fire");
    }

    #[test]
    fn test_from_conversions_wrap_category() {
        let err: MitraError = ValidationError::RequiredFieldMissing {
            field: "exercise".to_string(),
        }
        .into();
        assert!(matches!(err, MitraError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: Required field missing: exercise"
        );

        let err: MitraError = StorageError::Timeout {
            operation: "merge fetch".to_string(),
        }
        .into();
        assert!(matches!(err, MitraError::Storage(StorageError::Timeout { .. })));
    }
}
