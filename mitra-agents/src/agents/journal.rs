//! Journal agent: reflections and mood

use super::DomainAgent;
use crate::args::Args;
use async_trait::async_trait;
use chrono::Utc;
use mitra_core::{
    AgentAction, AgentKind, AgentResponse, ClockTime, Flexibility, JournalRecord, MitraResult,
    RequirementDetail, ResponseCategory, ScheduleRequirement, TimeOfDay, TimeWindow,
};
use mitra_storage::{DocumentStore, DocumentStoreExt};
use serde_json::{json, Value};
use std::sync::Arc;

const ENTRY_MINUTES: u32 = 15;

pub struct JournalAgent {
    store: Arc<dyn DocumentStore>,
}

impl JournalAgent {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DomainAgent for JournalAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Journal
    }

    async fn process(&self, args: &Value) -> MitraResult<AgentResponse> {
        let args = Args::new(args)?;
        let record = JournalRecord {
            title: args.text_or("title", ""),
            content: args.required_text("content")?,
            mood: args.text_or("mood", "neutral"),
            timestamp: Utc::now(),
        };
        self.store.insert_record(&record).await?;

        Ok(AgentResponse::new(
            self.kind().display_name(),
            AgentAction::WroteJournal,
            ResponseCategory::Wellness,
            ENTRY_MINUTES,
            self.kind().priority(),
        )
        .with_flexibility(Flexibility::High)
        .with_preferred_time(TimeOfDay::Evening)
        .with_data(json!({
            "title": record.title,
            "mood": record.mood,
        })))
    }

    async fn requirements(&self) -> MitraResult<ScheduleRequirement> {
        Ok(ScheduleRequirement::new(
            self.kind(),
            RequirementDetail::Journal {
                recommended_frequency: 7,
                duration_minutes: ENTRY_MINUTES,
                preferred_window: TimeWindow::new(ClockTime::at(20, 0), ClockTime::at(22, 0)),
            },
        ))
    }
}
