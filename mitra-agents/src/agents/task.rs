//! Task agent: to-do capture, duration estimates and deadlines

use super::DomainAgent;
use crate::args::Args;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use mitra_core::{
    AgentAction, AgentKind, AgentResponse, MitraResult, RequirementDetail, ResponseCategory,
    ScheduleRequirement, TaskPriority, Timestamp, TodoRecord,
};
use mitra_storage::{DocumentStore, DocumentStoreExt, Query};
use serde_json::{json, Value};
use std::sync::Arc;

/// Minutes assumed per pending task when summarizing the backlog.
const PLANNING_MINUTES_PER_TASK: u32 = 30;

/// Estimate how long a task takes from keywords in its text.
///
/// Rules are checked in order: calls and emails are quick, meetings take an
/// hour, reports and projects two hours, anything else half an hour.
pub fn estimate_task_minutes(task: &str) -> u32 {
    let text = task.to_lowercase();
    let has = |needle: &str| text.contains(needle);

    if has("call") || has("email") {
        15
    } else if has("meeting") {
        60
    } else if has("report") || has("project") {
        120
    } else {
        30
    }
}

/// Deadline implied by the task text: four hours out for anything marked
/// urgent or due today, otherwise a day.
pub fn infer_deadline(task: &str, now: Timestamp) -> Timestamp {
    let text = task.to_lowercase();
    if text.contains("urgent") || text.contains("today") {
        now + Duration::hours(4)
    } else {
        now + Duration::hours(24)
    }
}

pub struct TaskAgent {
    store: Arc<dyn DocumentStore>,
}

impl TaskAgent {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DomainAgent for TaskAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Task
    }

    async fn process(&self, args: &Value) -> MitraResult<AgentResponse> {
        let args = Args::new(args)?;
        let now = Utc::now();
        let record = TodoRecord {
            task: args.required_text("task")?,
            priority: args
                .text("priority")
                .map(|p| TaskPriority::from_text(&p))
                .unwrap_or_default(),
            completed: false,
            timestamp: now,
        };
        self.store.insert_record(&record).await?;

        Ok(AgentResponse::new(
            self.kind().display_name(),
            AgentAction::AddedTask,
            ResponseCategory::Productivity,
            estimate_task_minutes(&record.task),
            record.priority.score(),
        )
        .with_flexibility(record.priority.flexibility())
        .with_deadline(infer_deadline(&record.task, now))
        .with_data(json!({
            "task": record.task,
            "priority": record.priority,
        })))
    }

    async fn requirements(&self) -> MitraResult<ScheduleRequirement> {
        let pending = self
            .store
            .fetch_records::<TodoRecord>(&Query::all().filter_eq("completed", false))
            .await?;

        Ok(ScheduleRequirement::new(
            self.kind(),
            RequirementDetail::Task {
                pending_tasks: pending.len(),
                total_estimated_minutes: pending.len() as u32 * PLANNING_MINUTES_PER_TASK,
            },
        ))
    }
}
