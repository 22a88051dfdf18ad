//! Mitra API - HTTP Boundary
//!
//! Axum server in front of the coordinator: free-text chat routed through
//! an intent classifier, day planning, stored-record listings, health,
//! Prometheus metrics and an OpenAPI document.

pub mod config;
pub mod error;
pub mod macros;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;
pub use types::*;
