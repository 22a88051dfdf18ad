//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use mitra_agents::{ActivityLog, Coordinator};
use mitra_core::{MitraError, PlannerConfig};
use mitra_llm::{IntentClassifier, OpenAIClient, ToolCallingClassifier};
use mitra_storage::DocumentStore;

use crate::config::ApiConfig;
use crate::error::ApiResult;

/// Application-wide state shared across all routes.
///
/// Built once at startup; tests build their own isolated instance.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<Coordinator>,
    /// `None` when no classifier key is configured.
    pub classifier: Option<Arc<dyn IntentClassifier>>,
    pub start_time: Instant,
}

crate::impl_from_ref!(Arc<Coordinator>, coordinator);
crate::impl_from_ref!(Option<Arc<dyn IntentClassifier>>, classifier);
crate::impl_from_ref!(Instant, start_time);

impl AppState {
    pub fn new(coordinator: Coordinator, classifier: Option<Arc<dyn IntentClassifier>>) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            classifier,
            start_time: Instant::now(),
        }
    }

    /// Wire the coordinator and the optional classifier from configuration.
    pub fn from_config(config: &ApiConfig, store: Arc<dyn DocumentStore>) -> ApiResult<Self> {
        let planner = PlannerConfig::default().with_fetch_timeout(config.fetch_timeout);
        planner.validate().map_err(MitraError::from)?;

        let coordinator = Coordinator::new(store, planner)
            .with_activity_log(ActivityLog::bounded(config.activity_log_capacity));

        let classifier = config.llm_api_key.as_ref().map(|key| {
            let client = OpenAIClient::new(key.clone(), config.llm_requests_per_minute)
                .with_base_url(config.llm_base_url.clone());
            tracing::info!(
                provider = client.provider(),
                model = %config.llm_model,
                "Intent classifier configured"
            );
            Arc::new(ToolCallingClassifier::new(client, config.llm_model.clone()))
                as Arc<dyn IntentClassifier>
        });
        if classifier.is_none() {
            tracing::warn!("No classifier API key set; /chat will answer 503");
        }

        Ok(Self::new(coordinator, classifier))
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        self.coordinator.store()
    }
}
