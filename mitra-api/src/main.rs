//! Mitra API Server Entry Point
//!
//! Loads configuration from the environment, wires the coordinator over an
//! in-memory store and serves the HTTP API until Ctrl-C.

use std::sync::Arc;

use axum::Router;
use mitra_api::telemetry::{init_tracing, TelemetryConfig};
use mitra_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};
use mitra_storage::InMemoryStore;

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_tracing(&telemetry_config)?;

    let config = ApiConfig::from_env();
    let addr = config.bind_addr()?;

    let store = Arc::new(InMemoryStore::new());
    let state = AppState::from_config(&config, store)?;
    let app: Router = create_api_router(state, &config);

    tracing::info!(
        %addr,
        fetch_timeout_ms = config.fetch_timeout.as_millis() as u64,
        activity_log_capacity = config.activity_log_capacity,
        "Starting Mitra API server"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
