//! Fitness agent: workout logging and training cadence

use super::DomainAgent;
use crate::args::Args;
use async_trait::async_trait;
use chrono::Utc;
use mitra_core::{
    AgentAction, AgentKind, AgentResponse, ClockTime, Flexibility, MitraResult,
    RequirementDetail, ResponseCategory, ScheduleRequirement, TimeOfDay, TimeWindow,
    WorkoutRecord,
};
use mitra_storage::{DocumentStore, DocumentStoreExt, Query};
use serde_json::{json, Value};
use std::sync::Arc;

const SESSION_MINUTES: u32 = 30;
const WEEKLY_SESSIONS: u32 = 5;
const PLANNED_SESSION_MINUTES: u32 = 45;

pub struct FitnessAgent {
    store: Arc<dyn DocumentStore>,
    history_window: usize,
}

impl FitnessAgent {
    pub fn new(store: Arc<dyn DocumentStore>, history_window: usize) -> Self {
        Self {
            store,
            history_window,
        }
    }
}

#[async_trait]
impl DomainAgent for FitnessAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Fitness
    }

    async fn process(&self, args: &Value) -> MitraResult<AgentResponse> {
        let args = Args::new(args)?;
        let record = WorkoutRecord {
            exercise: args.required_text("exercise")?,
            sets: args.required_count("sets")?,
            reps: args.required_count("reps")?,
            weight: args.quantity("weight")?,
            is_pr: args.flag("is_pr"),
            timestamp: Utc::now(),
        };
        self.store.insert_record(&record).await?;

        Ok(AgentResponse::new(
            self.kind().display_name(),
            AgentAction::LoggedWorkout,
            ResponseCategory::Fitness,
            SESSION_MINUTES,
            self.kind().priority(),
        )
        .with_flexibility(Flexibility::High)
        .with_preferred_time(TimeOfDay::Morning)
        .with_data(json!({
            "exercise": record.exercise,
            "sets": record.sets,
            "reps": record.reps,
            "weight": record.weight,
            "is_pr": record.is_pr,
        })))
    }

    async fn requirements(&self) -> MitraResult<ScheduleRequirement> {
        let recent = self
            .store
            .fetch_records::<WorkoutRecord>(&Query::newest_first().limit(self.history_window))
            .await?;

        Ok(ScheduleRequirement::new(
            self.kind(),
            RequirementDetail::Fitness {
                recent_workouts: recent.len(),
                recommended_frequency: WEEKLY_SESSIONS,
                duration_minutes: PLANNED_SESSION_MINUTES,
                preferred_windows: vec![
                    TimeWindow::new(ClockTime::at(6, 0), ClockTime::at(8, 0)),
                    TimeWindow::new(ClockTime::at(17, 0), ClockTime::at(19, 0)),
                ],
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mitra_core::{Record, Stored};
    use mitra_test_utils::assertions::{assert_invalid_value, assert_missing_field};
    use mitra_test_utils::fixtures::seed_workouts;
    use mitra_test_utils::InMemoryStore;

    fn agent(store: &InMemoryStore) -> FitnessAgent {
        FitnessAgent::new(Arc::new(store.clone()), 7)
    }

    #[tokio::test]
    async fn test_process_logs_workout() -> MitraResult<()> {
        let store = InMemoryStore::new();
        let response = agent(&store)
            .process(&json!({"exercise": "Bench press", "sets": "3", "reps": "10", "weight": "60", "is_pr": "true"}))
            .await?;

        assert_eq!(response.agent, "Fitness Agent");
        assert_eq!(response.action, AgentAction::LoggedWorkout);
        assert_eq!(response.time_required_minutes, Some(30));
        assert_eq!(response.priority, Some(8));
        assert_eq!(response.flexibility, Some(Flexibility::High));
        assert_eq!(response.preferred_time, Some(TimeOfDay::Morning));
        assert_eq!(response.data["weight"], json!(60.0));
        assert_eq!(response.data["is_pr"], json!(true));

        let logged: Vec<Stored<WorkoutRecord>> = store.fetch_records(&Query::all()).await?;
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].record.exercise, "Bench press");
        assert_eq!(logged[0].record.sets, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_bodyweight_workout_has_null_weight() -> MitraResult<()> {
        let store = InMemoryStore::new();
        let response = agent(&store)
            .process(&json!({"exercise": "Pull-ups", "sets": 4, "reps": 8}))
            .await?;
        assert_eq!(response.data["weight"], Value::Null);
        assert_eq!(response.data["is_pr"], json!(false));
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_unparseable_counts() -> MitraResult<()> {
        let store = InMemoryStore::new();
        let result = agent(&store)
            .process(&json!({"exercise": "Squats", "sets": "three", "reps": "10"}))
            .await;
        assert_invalid_value(&result, "sets");

        let result = agent(&store).process(&json!({"sets": "3", "reps": "10"})).await;
        assert_missing_field(&result, "exercise");

        assert_eq!(store.count(WorkoutRecord::COLLECTION)?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_requirements_count_recent_history() -> MitraResult<()> {
        let store = InMemoryStore::new();
        seed_workouts(&store, 9).await?;

        let requirement = agent(&store).requirements().await?;
        assert_eq!(requirement.agent, AgentKind::Fitness);
        assert_eq!(requirement.priority, 8);
        assert_eq!(requirement.duration_minutes(), Some(45));
        match requirement.detail {
            RequirementDetail::Fitness {
                recent_workouts,
                recommended_frequency,
                preferred_windows,
                ..
            } => {
                assert_eq!(recent_workouts, 7);
                assert_eq!(recommended_frequency, 5);
                assert_eq!(preferred_windows[0].to_string(), "06:00-08:00");
            }
            other => panic!("unexpected detail {:?}", other),
        }
        Ok(())
    }
}
