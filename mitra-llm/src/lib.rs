//! Mitra LLM - Intent Classification
//!
//! Turns a free-text chat message into either a named intent with
//! structured arguments or a plain conversational reply. The coordinator
//! never parses text itself; it only sees what a classifier returns.

use async_trait::async_trait;
use mitra_core::MitraResult;
use serde_json::Value;

pub mod prompt;
pub mod providers;
pub mod tools;

pub use providers::openai::{OpenAIClient, ToolCallingClassifier};
pub use tools::{tool_catalog, ToolSpec};

// ============================================================================
// CLASSIFIER CONTRACT
// ============================================================================

/// Outcome of classifying one chat message.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The model picked a tool. `arguments` is always a JSON object.
    Intent { name: String, arguments: Value },
    /// The model answered without calling a tool.
    Reply(String),
}

impl Classification {
    pub fn intent(name: impl Into<String>, arguments: Value) -> Self {
        Classification::Intent {
            name: name.into(),
            arguments,
        }
    }
}

/// Trait for intent classifiers.
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify one user message.
    ///
    /// # Returns
    /// * `Ok(Classification)` - An intent or a direct reply
    /// * `Err(MitraError::Llm)` - If the provider call fails
    async fn classify(&self, message: &str) -> MitraResult<Classification>;

    /// Identifier of the backing model, for logs.
    fn model_id(&self) -> &str;
}
