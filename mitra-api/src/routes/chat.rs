//! Chat Endpoint
//!
//! Classifies a free-text message, routes the resulting intent through the
//! coordinator and answers with a short confirmation.

use axum::{extract::State, routing::post, Json, Router};
use mitra_agents::{Dispatched, Intent};
use mitra_core::{AgentAction, AgentResponse, LlmError, MitraError, Schedule};
use mitra_llm::Classification;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::telemetry::metrics::with_metrics;
use crate::types::{ChatRequest, ChatResponse};

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /chat - Route one chat message
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Message handled", body = ChatResponse),
        (status = 400, description = "Missing message or invalid intent arguments", body = ApiError),
        (status = 502, description = "Intent classifier failed", body = ApiError),
        (status = 503, description = "No intent classifier configured", body = ApiError),
    ),
))]
pub async fn chat(
    State(state): State<AppState>,
    payload: Option<Json<ChatRequest>>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(request) = payload.ok_or_else(|| ApiError::missing_field("message"))?;
    let classifier = state
        .classifier
        .as_ref()
        .ok_or_else(|| ApiError::from(MitraError::from(LlmError::ProviderNotConfigured)))?;

    tracing::debug!(
        model = classifier.model_id(),
        chars = request.message.chars().count(),
        "Classifying chat message"
    );

    let (name, arguments) = match classifier.classify(&request.message).await? {
        Classification::Reply(text) => return Ok(Json(ChatResponse::reply(text))),
        Classification::Intent { name, arguments } => (name, arguments),
    };

    let dispatched = state.coordinator.dispatch(&name, &arguments).await;
    record_dispatch(&name, dispatched.is_ok());

    Ok(Json(match dispatched? {
        Dispatched::Agent(response) => ChatResponse {
            reply: confirmation(&response),
            agent_response: Some(response),
            schedule: None,
        },
        Dispatched::Schedule(schedule) => ChatResponse {
            reply: schedule_summary(&schedule),
            agent_response: None,
            schedule: Some(schedule),
        },
    }))
}

fn record_dispatch(name: &str, success: bool) {
    let intent = name.parse::<Intent>().ok();
    with_metrics(|metrics| {
        metrics.record_dispatch(intent.map_or("unsupported", |i| i.name()), success);
        if intent == Some(Intent::GenerateSchedule) {
            metrics.record_schedule_build("generate", success);
        }
    });
}

// ============================================================================
// REPLY TEXT
// ============================================================================

/// User-facing confirmation for a routed event.
pub fn confirmation(response: &AgentResponse) -> String {
    let data = &response.data;
    match response.action {
        AgentAction::LoggedWorkout => {
            let weight = match data.get("weight").and_then(Value::as_f64) {
                Some(w) if w != 0.0 => format!(" @ {}kg", display_number(w)),
                _ => String::new(),
            };
            let pr = if data.get("is_pr").and_then(Value::as_bool).unwrap_or(false) {
                " - NEW PR! 🏆"
            } else {
                ""
            };
            format!(
                "💪 Excellent! Logged {}x{} {}{}{}. Keep it up!",
                text(data, "sets"),
                text(data, "reps"),
                text(data, "exercise"),
                weight,
                pr
            )
        }
        AgentAction::AddedTask => format!(
            "📝 Task added by Task Agent (Priority: {})",
            text(data, "priority")
        ),
        AgentAction::LoggedTransaction => {
            format!("💰 {} logged by Finance Agent", text(data, "type"))
        }
        AgentAction::WroteJournal => "📔 Journal saved by Journal Agent".to_string(),
        AgentAction::ScheduledMedication => format!(
            "💊 {} scheduled by Healthcare Agent",
            text(data, "medicine")
        ),
        AgentAction::AddedHabit => format!(
            "🌱 Habit \"{}\" added by Lifestyle Agent",
            text(data, "habit")
        ),
        AgentAction::None => "✅ Action completed".to_string(),
    }
}

/// Reply sent alongside a schedule generated from chat.
pub fn schedule_summary(schedule: &Schedule) -> String {
    format!(
        "✅ Optimized schedule generated!\n\nBalance Score: {:.0}/100\nTotal Activities: {}\n\nCheck /schedule endpoint for full details.",
        schedule.balance_score, schedule.total_activities
    )
}

fn text(data: &Value, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.as_f64().map(display_number).unwrap_or_else(|| n.to_string()),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Whole numbers print without a fractional part.
fn display_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mitra_core::ResponseCategory;
    use serde_json::json;

    fn response(action: AgentAction, data: Value) -> AgentResponse {
        AgentResponse::new("Test Agent", action, ResponseCategory::Fitness, 30, 8).with_data(data)
    }

    #[test]
    fn test_workout_confirmation() {
        let with_pr = response(
            AgentAction::LoggedWorkout,
            json!({"exercise": "Bench press", "sets": 3, "reps": 10, "weight": 60.0, "is_pr": true}),
        );
        assert_eq!(
            confirmation(&with_pr),
            "💪 Excellent! Logged 3x10 Bench press @ 60kg - NEW PR! 🏆. Keep it up!"
        );

        let plain = response(
            AgentAction::LoggedWorkout,
            json!({"exercise": "Pull-ups", "sets": 4, "reps": 8, "weight": null, "is_pr": false}),
        );
        assert_eq!(
            confirmation(&plain),
            "💪 Excellent! Logged 4x8 Pull-ups. Keep it up!"
        );

        let fractional = response(
            AgentAction::LoggedWorkout,
            json!({"exercise": "Curl", "sets": 3, "reps": 12, "weight": 12.5, "is_pr": false}),
        );
        assert!(confirmation(&fractional).contains("@ 12.5kg"));
    }

    #[test]
    fn test_other_confirmations() {
        assert_eq!(
            confirmation(&response(AgentAction::AddedTask, json!({"priority": "high"}))),
            "📝 Task added by Task Agent (Priority: high)"
        );
        assert_eq!(
            confirmation(&response(AgentAction::LoggedTransaction, json!({"type": "expense"}))),
            "💰 expense logged by Finance Agent"
        );
        assert_eq!(
            confirmation(&response(AgentAction::ScheduledMedication, json!({"medicine": "Aspirin"}))),
            "💊 Aspirin scheduled by Healthcare Agent"
        );
        assert_eq!(
            confirmation(&response(AgentAction::AddedHabit, json!({"habit": "Drink water"}))),
            "🌱 Habit \"Drink water\" added by Lifestyle Agent"
        );
        assert_eq!(
            confirmation(&response(AgentAction::WroteJournal, Value::Null)),
            "📔 Journal saved by Journal Agent"
        );
        assert_eq!(confirmation(&AgentResponse::unknown()), "✅ Action completed");
    }

    #[test]
    fn test_display_number() {
        assert_eq!(display_number(60.0), "60");
        assert_eq!(display_number(-2.0), "-2");
        assert_eq!(display_number(0.5), "0.5");
    }
}
