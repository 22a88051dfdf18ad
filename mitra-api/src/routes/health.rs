//! Service Status and Health Check Endpoints
//!
//! - / - Service status document with agents and endpoint catalogue
//! - /health/ping - Simple liveness check
//! - /health/live - Process alive check with uptime

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use mitra_agents::Coordinator;
use mitra_core::AgentKind;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::types::{EndpointCatalog, StatusResponse};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthDetails {
    pub version: String,
    pub uptime_seconds: u64,
    pub classifier_configured: bool,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET / - Service status
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is online", body = StatusResponse),
    ),
))]
pub async fn status(State(coordinator): State<Arc<Coordinator>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online".to_string(),
        message: "Mitra AI Multi-Agent System".to_string(),
        architecture: "Central Coordinator + Feature-Specific Agents".to_string(),
        agents: AgentKind::ALL
            .iter()
            .map(|kind| kind.as_str().to_string())
            .collect(),
        endpoints: EndpointCatalog::default(),
        activity_log_entries: coordinator.activity().len(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health/ping - Simple pong response
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/ping",
    tag = "Health",
    responses(
        (status = 200, description = "Service is responding", body = String),
    ),
))]
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, "pong")
}

/// GET /health/live - Process liveness check
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Process is alive", body = HealthResponse),
    ),
))]
pub async fn liveness(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        message: Some("Process is alive".to_string()),
        details: Some(details(state.start_time, state.classifier.is_some())),
    };
    (StatusCode::OK, Json(response))
}

fn details(start_time: Instant, classifier_configured: bool) -> HealthDetails {
    HealthDetails {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: start_time.elapsed().as_secs(),
        classifier_configured,
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Health router, nested under `/health`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(liveness))
}
