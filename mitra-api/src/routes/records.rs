//! Stored Record Endpoints
//!
//! Read-only listings of what the agents have persisted, newest first, plus
//! permanent deletion of finance entries.

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use mitra_core::{FinanceRecord, JournalRecord, Record, TodoRecord, WorkoutRecord};
use mitra_storage::{DocumentStoreExt, Query};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{
    DeleteResponse, FinanceListResponse, JournalListResponse, TaskListResponse,
    WorkoutListResponse,
};

const WORKOUT_LIST_LIMIT: usize = 20;
const FINANCE_LIST_LIMIT: usize = 50;

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /tasks - All todos, newest first
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/tasks",
    tag = "Records",
    responses(
        (status = 200, description = "Stored tasks", body = TaskListResponse),
        (status = 500, description = "Storage read failed", body = ApiError),
    ),
))]
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<TaskListResponse>> {
    let tasks = state
        .store()
        .fetch_records::<TodoRecord>(&Query::newest_first())
        .await?;
    Ok(Json(TaskListResponse { tasks }))
}

/// GET /workouts - Latest workouts
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/workouts",
    tag = "Records",
    responses(
        (status = 200, description = "The 20 most recent workouts", body = WorkoutListResponse),
        (status = 500, description = "Storage read failed", body = ApiError),
    ),
))]
pub async fn list_workouts(State(state): State<AppState>) -> ApiResult<Json<WorkoutListResponse>> {
    let workouts = state
        .store()
        .fetch_records::<WorkoutRecord>(&Query::newest_first().limit(WORKOUT_LIST_LIMIT))
        .await?;
    Ok(Json(WorkoutListResponse { workouts }))
}

/// GET /finance - Latest finance entries
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/finance",
    tag = "Records",
    responses(
        (status = 200, description = "The 50 most recent finance entries", body = FinanceListResponse),
        (status = 500, description = "Storage read failed", body = ApiError),
    ),
))]
pub async fn list_finance(State(state): State<AppState>) -> ApiResult<Json<FinanceListResponse>> {
    let entries = state
        .store()
        .fetch_records::<FinanceRecord>(&Query::newest_first().limit(FINANCE_LIST_LIMIT))
        .await?;
    Ok(Json(FinanceListResponse { entries }))
}

/// DELETE /finance/:id - Delete one finance entry
///
/// Deleting an id that is already gone still succeeds.
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/finance/{id}",
    tag = "Records",
    params(("id" = Uuid, Path, description = "Finance entry id")),
    responses(
        (status = 200, description = "Entry deleted", body = DeleteResponse),
        (status = 400, description = "Malformed id", body = ApiError),
        (status = 500, description = "Storage delete failed", body = ApiError),
    ),
))]
pub async fn delete_finance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = Uuid::parse_str(&id)?;
    let existed = state.store().delete(FinanceRecord::COLLECTION, id).await?;
    tracing::info!(%id, existed, "Deleted finance entry");

    Ok(Json(DeleteResponse {
        success: true,
        message: "Entry deleted permanently".to_string(),
        id,
    }))
}

/// GET /journal - All journal entries, newest first
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/journal",
    tag = "Records",
    responses(
        (status = 200, description = "Stored journal entries", body = JournalListResponse),
        (status = 500, description = "Storage read failed", body = ApiError),
    ),
))]
pub async fn list_journal(State(state): State<AppState>) -> ApiResult<Json<JournalListResponse>> {
    let entries = state
        .store()
        .fetch_records::<JournalRecord>(&Query::newest_first())
        .await?;
    Ok(Json(JournalListResponse { entries }))
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks))
        .route("/workouts", get(list_workouts))
        .route("/finance", get(list_finance))
        .route("/finance/:id", delete(delete_finance))
        .route("/journal", get(list_journal))
}
