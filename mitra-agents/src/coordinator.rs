//! Central coordinator.
//!
//! Owns the agent roster and the activity log, routes intents, and runs
//! the two planning operations. Stored state for a plan is read with one
//! concurrent fan-out under a deadline; if any read fails or the deadline
//! passes, the whole operation fails and nothing partial is returned.

use crate::activity::{ActivityEntry, ActivityLog};
use crate::agents::{AgentRoster, LifestyleAgent};
use crate::intent::{Intent, IntentTarget};
use crate::schedule::{build_schedule, merge_schedule, MergeSources};
use chrono::Utc;
use futures_util::future::try_join_all;
use mitra_core::{
    AgentResponse, HabitRecord, MedicationRecord, MergedSchedule, MitraError, MitraResult,
    PlannerConfig, Schedule, ScheduleItem, StorageError, Stored, TodoRecord, WorkoutRecord,
};
use mitra_storage::{DocumentStore, DocumentStoreExt, Query};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Outcome of dispatching one classified intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    Agent(AgentResponse),
    Schedule(Schedule),
}

pub struct Coordinator {
    store: Arc<dyn DocumentStore>,
    roster: AgentRoster,
    lifestyle: LifestyleAgent,
    activity: ActivityLog,
    config: PlannerConfig,
}

impl Coordinator {
    pub const NAME: &'static str = "Central Coordinator";

    pub fn new(store: Arc<dyn DocumentStore>, config: PlannerConfig) -> Self {
        Self {
            roster: AgentRoster::new(store.clone(), &config),
            lifestyle: LifestyleAgent::new(store.clone()),
            activity: ActivityLog::new(),
            store,
            config,
        }
    }

    pub fn with_activity_log(mut self, activity: ActivityLog) -> Self {
        self.activity = activity;
        self
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    // ========================================================================
    // ROUTING
    // ========================================================================

    /// Dispatch a classifier tool call by name.
    ///
    /// Names outside [`Intent`] answer with [`AgentResponse::unknown`]
    /// instead of failing, and leave no activity entry.
    pub async fn dispatch(&self, name: &str, args: &Value) -> MitraResult<Dispatched> {
        match name.parse::<Intent>() {
            Ok(intent) => self.route(intent, args).await,
            Err(e) => {
                tracing::warn!(intent = %name, error = %e, "Ignoring unsupported intent");
                Ok(Dispatched::Agent(AgentResponse::unknown()))
            }
        }
    }

    /// Route a known intent to its handler.
    pub async fn route(&self, intent: Intent, args: &Value) -> MitraResult<Dispatched> {
        let response = match intent.target() {
            IntentTarget::Agent(kind) => self.roster.get(kind).process(args).await?,
            IntentTarget::Habit => self.lifestyle.process(args).await?,
            IntentTarget::Schedule => {
                return self.generate_schedule().await.map(Dispatched::Schedule);
            }
        };

        tracing::info!(
            intent = %intent,
            agent = %response.agent,
            "{}: routed to {}",
            Self::NAME,
            response.agent
        );
        self.activity.append(ActivityEntry {
            timestamp: Utc::now(),
            agent: response.agent.clone(),
            response: response.clone(),
        });
        Ok(Dispatched::Agent(response))
    }

    // ========================================================================
    // PLANNING
    // ========================================================================

    /// Plan today from stored state alone.
    pub async fn generate_schedule(&self) -> MitraResult<Schedule> {
        let open_tasks = Query::newest_first().filter_eq("completed", false);
        let all = Query::all();

        let requirements = try_join_all(self.roster.agents().map(|agent| agent.requirements()));
        let tasks = self.store.fetch_records::<TodoRecord>(&open_tasks);
        let medications = self.store.fetch_records::<MedicationRecord>(&all);

        let (requirements, tasks, medications) = self
            .within_deadline("schedule generation fetch", async {
                tokio::try_join!(requirements, tasks, medications)
            })
            .await?;

        let schedule = build_schedule(
            &self.config,
            &requirements,
            &records(tasks),
            &records(medications),
            Utc::now(),
        );
        tracing::info!(
            activities = schedule.total_activities,
            balance_score = schedule.balance_score,
            unscheduled = schedule.insights.unscheduled_tasks.len(),
            "Generated schedule"
        );
        Ok(schedule)
    }

    /// Enrich a caller's own schedule with stored medications, workouts and
    /// urgent tasks.
    pub async fn merge_user_schedule(
        &self,
        user_items: Vec<ScheduleItem>,
    ) -> MitraResult<MergedSchedule> {
        // Storage order, not newest first
        let open_tasks = Query::all().filter_eq("completed", false);
        let recent_workouts = Query::newest_first().limit(self.config.workout_history_window);
        let all = Query::all();
        let recent_habits = Query::newest_first().limit(self.config.habit_window);

        let tasks = self.store.fetch_records::<TodoRecord>(&open_tasks);
        let workouts = self.store.fetch_records::<WorkoutRecord>(&recent_workouts);
        let medications = self.store.fetch_records::<MedicationRecord>(&all);
        let habits = self.store.fetch_records::<HabitRecord>(&recent_habits);

        let (tasks, workouts, medications, habits) = self
            .within_deadline("schedule merge fetch", async {
                tokio::try_join!(tasks, workouts, medications, habits)
            })
            .await?;
        tracing::debug!(
            user_items = user_items.len(),
            recent_workouts = workouts.len(),
            recent_habits = habits.len(),
            "Merging user schedule"
        );

        let tasks = records(tasks);
        let medications = records(medications);
        let merged = merge_schedule(
            &self.config,
            user_items,
            MergeSources {
                open_tasks: &tasks,
                medications: &medications,
                recent_workouts: workouts.len(),
            },
            Utc::now(),
        );
        tracing::info!(
            activities = merged.total_activities,
            ai_suggestions = merged.ai_suggestions,
            balance_score = merged.balance_score,
            "Merged user schedule"
        );
        Ok(merged)
    }

    async fn within_deadline<T>(
        &self,
        operation: &str,
        fetch: impl Future<Output = MitraResult<T>>,
    ) -> MitraResult<T> {
        match tokio::time::timeout(self.config.fetch_timeout, fetch).await {
            Ok(result) => result.inspect_err(|e| {
                tracing::error!(operation, error = %e, "Fetch failed");
            }),
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_ms = self.config.fetch_timeout.as_millis() as u64,
                    "Fetch timed out"
                );
                Err(MitraError::Storage(StorageError::Timeout {
                    operation: operation.to_string(),
                }))
            }
        }
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("roster", &self.roster)
            .field("activity_entries", &self.activity.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn records<T>(stored: Vec<Stored<T>>) -> Vec<T> {
    stored.into_iter().map(|s| s.record).collect()
}
