//! Request and response bodies for the Mitra HTTP API.
//!
//! Field names follow the camelCase wire format existing clients expect.

use mitra_core::{
    AgentResponse, FinanceRecord, JournalRecord, RecordId, Schedule, Stored, TodoRecord,
    WorkoutRecord,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// CHAT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatRequest {
    pub message: String,
}

/// Reply to one chat message.
///
/// At most one of `agentResponse` and `schedule` is present; a plain
/// conversational answer carries neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_response: Option<AgentResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}

impl ChatResponse {
    pub fn reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            agent_response: None,
            schedule: None,
        }
    }
}

// ============================================================================
// RECORD LISTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TaskListResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub tasks: Vec<Stored<TodoRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WorkoutListResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub workouts: Vec<Stored<WorkoutRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FinanceListResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub entries: Vec<Stored<FinanceRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JournalListResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub entries: Vec<Stored<JournalRecord>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: RecordId,
}

// ============================================================================
// SERVICE STATUS
// ============================================================================

/// Endpoint catalogue grouped by HTTP method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EndpointCatalog {
    pub post: Vec<String>,
    pub get: Vec<String>,
    pub delete: Vec<String>,
}

impl Default for EndpointCatalog {
    fn default() -> Self {
        let owned = |paths: &[&str]| paths.iter().map(|p| p.to_string()).collect();
        Self {
            post: owned(&["/chat", "/optimize-schedule"]),
            get: owned(&["/schedule", "/tasks", "/workouts", "/finance", "/journal"]),
            delete: owned(&["/finance/:id"]),
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub architecture: String,
    pub agents: Vec<String>,
    pub endpoints: EndpointCatalog,
    pub activity_log_entries: usize,
    pub version: String,
}
