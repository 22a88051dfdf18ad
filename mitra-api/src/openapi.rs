//! OpenAPI Specification for the Mitra API
//!
//! Generated by utoipa from the route annotations and schema derives.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{HealthDetails, HealthResponse, HealthStatus};
use crate::routes::{chat, health, records, schedule};
use crate::telemetry::metrics;
use crate::types::*;

use mitra_core::{
    ActivityType, AgentAction, AgentKind, AgentResponse, Flexibility, MergeInsights,
    MergedSchedule, ResponseCategory, Schedule, ScheduleInsights, ScheduleItem, TimeOfDay,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mitra API",
        description = "Multi-agent personal assistant: chat routing, day planning and stored records",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Chat", description = "Free-text messages routed to domain agents"),
        (name = "Schedule", description = "Clean-slate planning and user-schedule merging"),
        (name = "Records", description = "Persisted agent records"),
        (name = "Health", description = "Service status and liveness"),
        (name = "Observability", description = "Prometheus metrics")
    ),
    paths(
        chat::chat,
        schedule::get_schedule,
        schedule::optimize_schedule,
        records::list_tasks,
        records::list_workouts,
        records::list_finance,
        records::delete_finance,
        records::list_journal,
        health::status,
        health::ping,
        health::liveness,
        metrics::metrics_handler,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        ChatRequest,
        ChatResponse,
        TaskListResponse,
        WorkoutListResponse,
        FinanceListResponse,
        JournalListResponse,
        DeleteResponse,
        EndpointCatalog,
        StatusResponse,
        HealthResponse,
        HealthStatus,
        HealthDetails,
        Schedule,
        ScheduleInsights,
        MergedSchedule,
        MergeInsights,
        ScheduleItem,
        ActivityType,
        AgentResponse,
        AgentAction,
        AgentKind,
        ResponseCategory,
        Flexibility,
        TimeOfDay,
    ))
)]
pub struct ApiDoc;
