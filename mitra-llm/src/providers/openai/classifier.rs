//! Tool-calling intent classifier

use super::client::OpenAIClient;
use super::types::{ChatRequest, ChatResponse, Message, ResponseMessage, Tool};
use crate::prompt::ROUTING_SYSTEM_PROMPT;
use crate::providers::invalid_response;
use crate::tools::tool_catalog;
use crate::{Classification, IntentClassifier};
use async_trait::async_trait;
use mitra_core::MitraResult;
use serde_json::{Map, Value};

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Classifies messages by letting the model pick one of the catalog tools.
pub struct ToolCallingClassifier {
    client: OpenAIClient,
    model: String,
    temperature: f32,
}

impl ToolCallingClassifier {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            temperature: 0.7,
        }
    }

    /// Classifier on the default endpoint and model.
    pub fn with_default_model(api_key: impl Into<String>) -> Self {
        Self::new(OpenAIClient::new(api_key, 30), DEFAULT_MODEL)
    }

    fn build_request(&self, message: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(ROUTING_SYSTEM_PROMPT),
                Message::user(message),
            ],
            tools: tool_catalog()
                .iter()
                .map(|spec| Tool::function(spec.definition()))
                .collect(),
            tool_choice: Some("auto".to_string()),
            temperature: Some(self.temperature),
        }
    }
}

/// Read the first tool call, or fall back to the text content.
fn interpret(provider: &str, message: ResponseMessage) -> MitraResult<Classification> {
    if let Some(call) = message.tool_calls.and_then(|calls| calls.into_iter().next()) {
        let arguments = parse_arguments(provider, &call.function.arguments)?;
        return Ok(Classification::Intent {
            name: call.function.name,
            arguments,
        });
    }

    Ok(Classification::Reply(message.content.unwrap_or_default()))
}

/// Tool arguments arrive as a JSON string that must decode to an object.
fn parse_arguments(provider: &str, raw: &str) -> MitraResult<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(other) => Err(invalid_response(
            provider,
            format!("tool arguments must be an object, got {}", other),
        )),
        Err(e) => Err(invalid_response(
            provider,
            format!("tool arguments are not valid JSON: {}", e),
        )),
    }
}

#[async_trait]
impl IntentClassifier for ToolCallingClassifier {
    async fn classify(&self, message: &str) -> MitraResult<Classification> {
        let request = self.build_request(message);
        let response: ChatResponse = self.client.request("chat/completions", request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| invalid_response(self.client.provider(), "No completion in response"))?;

        let classification = interpret(self.client.provider(), choice.message)?;
        if let Classification::Intent { name, .. } = &classification {
            tracing::debug!(intent = %name, model = %self.model, "Message classified");
        }
        Ok(classification)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for ToolCallingClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolCallingClassifier")
            .field("client", &self.client)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::openai::types::ChatResponse;
    use mitra_core::{LlmError, MitraError};
    use serde_json::json;

    fn response(body: Value) -> ChatResponse {
        serde_json::from_value(body).expect("valid chat response")
    }

    #[test]
    fn test_request_carries_catalog_and_prompt() -> Result<(), serde_json::Error> {
        let classifier = ToolCallingClassifier::with_default_model("key");
        let body = serde_json::to_value(classifier.build_request("did 3x10 squats"))?;

        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "did 3x10 squats");
        assert_eq!(body["tools"].as_array().map(Vec::len), Some(8));
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "log_workout");
        Ok(())
    }

    #[test]
    fn test_interpret_tool_call() -> MitraResult<()> {
        let chat = response(json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "add_task",
                            "arguments": "{\"task\":\"Finish report\",\"priority\":\"high\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }));
        let message = chat.choices.into_iter().next().expect("one choice").message;

        assert_eq!(
            interpret("groq", message)?,
            Classification::intent(
                "add_task",
                json!({"task": "Finish report", "priority": "high"})
            )
        );
        Ok(())
    }

    #[test]
    fn test_interpret_plain_reply() -> MitraResult<()> {
        let chat = response(json!({
            "choices": [{"message": {"content": "Hi there!"}, "finish_reason": "stop"}]
        }));
        let message = chat.choices.into_iter().next().expect("one choice").message;
        assert_eq!(
            interpret("groq", message)?,
            Classification::Reply("Hi there!".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_parse_arguments_edge_cases() {
        assert_eq!(parse_arguments("groq", "").ok(), Some(json!({})));
        assert!(matches!(
            parse_arguments("groq", "[1,2]"),
            Err(MitraError::Llm(LlmError::InvalidResponse { .. }))
        ));
        assert!(parse_arguments("groq", "{not json").is_err());
    }
}
