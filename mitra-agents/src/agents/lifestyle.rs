//! Habit tracking.
//!
//! Habits are recorded and read back during merge, but they have no
//! cadence of their own, so this is not one of the [`DomainAgent`]s.
//!
//! [`DomainAgent`]: super::DomainAgent

use crate::args::Args;
use chrono::Utc;
use mitra_core::{AgentAction, AgentResponse, HabitRecord, MitraResult, ResponseCategory};
use mitra_storage::{DocumentStore, DocumentStoreExt};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct LifestyleAgent {
    store: Arc<dyn DocumentStore>,
}

impl LifestyleAgent {
    pub const NAME: &'static str = "Lifestyle Agent";

    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn process(&self, args: &Value) -> MitraResult<AgentResponse> {
        let args = Args::new(args)?;
        let record = HabitRecord {
            habit: args.required_text("habit")?,
            timestamp: Utc::now(),
        };
        self.store.insert_record(&record).await?;

        Ok(AgentResponse::new(
            Self::NAME,
            AgentAction::AddedHabit,
            ResponseCategory::Lifestyle,
            10,
            6,
        )
        .with_data(json!({ "habit": record.habit })))
    }
}
