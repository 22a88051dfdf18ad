//! REST API Routes Module
//!
//! Includes:
//! - Chat routing through the intent classifier
//! - Schedule generation and user-schedule merging
//! - Stored record listings and finance deletion
//! - Service status and health checks
//! - Prometheus metrics and the OpenAPI document
//! - CORS support for browser-based clients

pub mod chat;
pub mod health;
pub mod records;
pub mod schedule;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::ApiConfig;
use crate::state::AppState;
use crate::telemetry::{metrics_handler, observability_middleware};

pub use chat::create_router as chat_router;
pub use health::create_router as health_router;
pub use records::create_router as records_router;
pub use schedule::create_router as schedule_router;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json endpoint.
#[cfg(feature = "openapi")]
async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// Empty origins allow everything; otherwise exact origins and `*.domain`
/// wildcards from the configuration are honoured.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: allowing all origins");
        return cors.allow_origin(Any);
    }

    tracing::info!(origins = ?config.cors_origins, "CORS: restricting origins");
    let allowed = config.clone();
    cors.allow_origin(AllowOrigin::predicate(
        move |origin: &HeaderValue, _request| {
            origin
                .to_str()
                .map(|origin| allowed.is_origin_allowed(origin))
                .unwrap_or(false)
        },
    ))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete API router.
///
/// # Middleware Order (outer to inner)
/// 1. CORS - handles preflight requests
/// 2. Observability - tracing span and metrics per request
pub fn create_api_router(state: AppState, config: &ApiConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(health::status))
        .merge(chat::create_router())
        .merge(schedule::create_router())
        .merge(records::create_router())
        .nest("/health", health::create_router())
        .route("/metrics", get(metrics_handler));

    #[cfg(feature = "openapi")]
    {
        router = router.route("/openapi.json", get(openapi_json));
    }

    router
        .with_state(state)
        .layer(from_fn(observability_middleware))
        .layer(build_cors_layer(config))
}
