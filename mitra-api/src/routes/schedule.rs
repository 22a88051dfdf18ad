//! Schedule Endpoints
//!
//! - GET /schedule - Plan today from stored state
//! - POST /optimize-schedule - Merge stored state into the caller's own day

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use mitra_core::{MergedSchedule, Schedule, ScheduleItem};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::telemetry::metrics::with_metrics;

pub const INVALID_USER_SCHEDULE: &str = "Invalid user schedule provided";

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /schedule - Clean-slate schedule
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/schedule",
    tag = "Schedule",
    responses(
        (status = 200, description = "Generated schedule", body = Schedule),
        (status = 500, description = "A storage read failed", body = ApiError),
        (status = 504, description = "Storage reads exceeded the deadline", body = ApiError),
    ),
))]
pub async fn get_schedule(State(state): State<AppState>) -> ApiResult<Json<Schedule>> {
    let result = state.coordinator.generate_schedule().await;
    with_metrics(|m| m.record_schedule_build("generate", result.is_ok()));
    Ok(Json(result?))
}

/// POST /optimize-schedule - Merge the caller's schedule with stored state
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/optimize-schedule",
    tag = "Schedule",
    request_body(content = Object, description = "`{\"userSchedule\": ScheduleItem[]}`"),
    responses(
        (status = 200, description = "Merged schedule", body = MergedSchedule),
        (status = 400, description = "userSchedule missing, not an array, or holding malformed items", body = ApiError),
        (status = 500, description = "A storage read failed", body = ApiError),
    ),
))]
pub async fn optimize_schedule(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<MergedSchedule>> {
    let items = parse_user_schedule(payload.map(|Json(body)| body))?;
    tracing::info!(activities = items.len(), "Optimizing user-provided schedule");

    let result = state.coordinator.merge_user_schedule(items).await;
    with_metrics(|m| m.record_schedule_build("merge", result.is_ok()));
    Ok(Json(result?))
}

/// Pull `userSchedule` out of the request body.
///
/// A missing body or field, or a non-array value, is rejected with the
/// fixed message clients match on. Items that fail to decode are reported
/// with their index.
pub fn parse_user_schedule(body: Option<Value>) -> ApiResult<Vec<ScheduleItem>> {
    let entries = match body {
        Some(Value::Object(mut fields)) => match fields.remove("userSchedule") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(ApiError::invalid_input(INVALID_USER_SCHEDULE)),
        },
        _ => return Err(ApiError::invalid_input(INVALID_USER_SCHEDULE)),
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<ScheduleItem>(entry).map_err(|e| {
                ApiError::invalid_input(format!("Invalid schedule item at index {}: {}", index, e))
                    .with_details(serde_json::json!({ "index": index }))
            })
        })
        .collect()
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/schedule", get(get_schedule))
        .route("/optimize-schedule", post(optimize_schedule))
}
