//! OpenAI-compatible provider
//!
//! Chat completions with tool calling, used for intent classification.

pub mod classifier;
pub mod client;
pub mod types;

pub use classifier::{ToolCallingClassifier, DEFAULT_MODEL};
pub use client::{OpenAIClient, DEFAULT_BASE_URL};
