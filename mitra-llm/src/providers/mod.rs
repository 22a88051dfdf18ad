//! LLM provider implementations
//!
//! Concrete [`IntentClassifier`](crate::IntentClassifier) backends. Only the
//! OpenAI-compatible chat-completions protocol is implemented; Groq speaks
//! it too.

pub mod openai;

use mitra_core::{LlmError, MitraError};

pub(crate) fn request_failed(provider: &str, status: u16, message: impl Into<String>) -> MitraError {
    LlmError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    }
    .into()
}

pub(crate) fn rate_limited(provider: &str, retry_after_ms: u64) -> MitraError {
    LlmError::RateLimited {
        provider: provider.to_string(),
        retry_after_ms,
    }
    .into()
}

pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> MitraError {
    LlmError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    }
    .into()
}
