//! Mitra Test Utilities
//!
//! Shared test infrastructure for the Mitra workspace:
//! - Proptest generators for schedule items and records
//! - A scripted intent classifier and a failure-injecting store
//! - Fixtures and store seeding helpers for common scenarios
//! - Assertions for schedule invariants

use async_trait::async_trait;
use mitra_core::{Collection, LlmError, MitraResult, RecordId, StorageError};
use mitra_llm::{Classification, IntentClassifier};
use mitra_storage::{Document, DocumentStore, Query};
use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Re-export the in-memory store from its source crate
pub use mitra_storage::InMemoryStore;

// Re-export core types for convenience
pub use mitra_core::{
    ActivityType, ClockTime, HabitRecord, JournalRecord, MedicationRecord, ScheduleItem,
    TaskPriority, TodoRecord, TransactionKind, WorkoutRecord,
};

// ============================================================================
// MOCK PROVIDERS
// ============================================================================

/// Classifier that replays a fixed script of classifications in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClassifier {
    script: Arc<Mutex<VecDeque<MitraResult<Classification>>>>,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful classification.
    pub fn then(self, classification: Classification) -> Self {
        self.push(Ok(classification));
        self
    }

    /// Queue a provider failure.
    pub fn then_fail(self, error: LlmError) -> Self {
        self.push(Err(error.into()));
        self
    }

    fn push(&self, entry: MitraResult<Classification>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(entry);
        }
    }

    /// Entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(&self, _message: &str) -> MitraResult<Classification> {
        let next = self
            .script
            .lock()
            .map_err(|_| LlmError::InvalidResponse {
                provider: "scripted".to_string(),
                reason: "script lock poisoned".to_string(),
            })?
            .pop_front();
        next.unwrap_or_else(|| {
            Err(LlmError::InvalidResponse {
                provider: "scripted".to_string(),
                reason: "script exhausted".to_string(),
            }
            .into())
        })
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}

/// Store wrapper that fails or stalls queries on chosen collections and
/// otherwise delegates to an [`InMemoryStore`].
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
    inner: InMemoryStore,
    failing: HashSet<Collection>,
    stalling: HashSet<Collection>,
}

impl FailingStore {
    pub fn new(inner: InMemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Queries on `collection` return `StorageError::QueryFailed`.
    pub fn fail_queries_on(mut self, collection: Collection) -> Self {
        self.failing.insert(collection);
        self
    }

    /// Queries on `collection` never complete on their own.
    pub fn stall_queries_on(mut self, collection: Collection) -> Self {
        self.stalling.insert(collection);
        self
    }

    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn add(&self, collection: Collection, data: Value) -> MitraResult<RecordId> {
        self.inner.add(collection, data).await
    }

    async fn query(&self, collection: Collection, query: &Query) -> MitraResult<Vec<Document>> {
        if self.stalling.contains(&collection) {
            tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
        }
        if self.failing.contains(&collection) {
            return Err(StorageError::QueryFailed {
                collection,
                reason: "injected failure".to_string(),
            }
            .into());
        }
        self.inner.query(collection, query).await
    }

    async fn delete(&self, collection: Collection, id: RecordId) -> MitraResult<bool> {
        self.inner.delete(collection, id).await
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for Mitra types.

    use super::*;
    use proptest::prelude::*;

    /// Any time of day.
    pub fn arb_clock_time() -> impl Strategy<Value = ClockTime> {
        (0u32..24 * 60).prop_filter_map("in range", ClockTime::from_minutes)
    }

    /// A time on the hour.
    pub fn arb_hour_time() -> impl Strategy<Value = ClockTime> {
        (0u32..24).prop_filter_map("in range", ClockTime::from_hour)
    }

    pub fn arb_activity_type() -> impl Strategy<Value = ActivityType> {
        prop_oneof![
            Just(ActivityType::Task),
            Just(ActivityType::Fitness),
            Just(ActivityType::Medication),
            Just(ActivityType::Wellness),
            Just(ActivityType::Break),
            Just(ActivityType::User),
        ]
    }

    pub fn arb_task_priority() -> impl Strategy<Value = TaskPriority> {
        prop_oneof![
            Just(TaskPriority::High),
            Just(TaskPriority::Medium),
            Just(TaskPriority::Low),
        ]
    }

    /// Medication timing text, including unrecognized phrasing.
    pub fn arb_medication_time_text() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("morning".to_string()),
            Just("Afternoon".to_string()),
            Just("evening".to_string()),
            Just("NIGHT".to_string()),
            "[a-z ]{0,12}",
        ]
    }

    /// Free activity text, sometimes mentioning exercise keywords.
    pub fn arb_activity_text() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z ]{1,20}",
            Just("Morning workout".to_string()),
            Just("Gym session".to_string()),
            Just("Light EXERCISE".to_string()),
        ]
    }

    pub fn arb_schedule_item() -> impl Strategy<Value = ScheduleItem> {
        (
            arb_clock_time(),
            5u32..240,
            arb_activity_text(),
            arb_activity_type(),
            1u8..=10,
            any::<bool>(),
        )
            .prop_map(|(time, duration, activity, activity_type, priority, flexible)| {
                let mut item = ScheduleItem::new(time, duration, activity, activity_type, "User")
                    .with_priority(priority);
                item.flexible = flexible;
                item
            })
    }

    /// Caller-supplied schedule, as it would arrive over the wire.
    pub fn arb_user_schedule(max: usize) -> impl Strategy<Value = Vec<ScheduleItem>> {
        prop::collection::vec(
            (arb_hour_time(), 15u32..180, arb_activity_text())
                .prop_map(|(time, duration, activity)| ScheduleItem::user(time, duration, activity)),
            0..=max,
        )
    }

    pub fn arb_task_text() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z ]{1,16}",
            Just("Call the bank".to_string()),
            Just("Team meeting".to_string()),
            Just("Finish report".to_string()),
            Just("urgent: email landlord".to_string()),
        ]
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built records and seeded stores for common scenarios.

    use super::*;
    use chrono::Utc;
    use mitra_storage::DocumentStoreExt;

    pub fn todo(task: &str, priority: TaskPriority) -> TodoRecord {
        TodoRecord {
            task: task.to_string(),
            priority,
            completed: false,
            timestamp: Utc::now(),
        }
    }

    pub fn medication(medicine: &str, time: &str) -> MedicationRecord {
        MedicationRecord {
            medicine: medicine.to_string(),
            time: time.to_string(),
            dose: String::new(),
            taken_today: false,
            timestamp: Utc::now(),
        }
    }

    pub fn workout(exercise: &str, sets: u32, reps: u32) -> WorkoutRecord {
        WorkoutRecord {
            exercise: exercise.to_string(),
            sets,
            reps,
            weight: None,
            is_pr: false,
            timestamp: Utc::now(),
        }
    }

    pub fn habit(habit: &str) -> HabitRecord {
        HabitRecord {
            habit: habit.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn journal(content: &str) -> JournalRecord {
        JournalRecord {
            title: String::new(),
            content: content.to_string(),
            mood: "neutral".to_string(),
            timestamp: Utc::now(),
        }
    }

    /// A user block parsed from `"HH:MM"`.
    #[track_caller]
    pub fn user_item(time: &str, activity: &str, duration: u32) -> ScheduleItem {
        let time = time.parse().expect("fixture time must be HH:MM");
        ScheduleItem::user(time, duration, activity)
    }

    /// Store holding the given todos and medications.
    pub async fn seeded_store(
        todos: &[TodoRecord],
        medications: &[MedicationRecord],
    ) -> MitraResult<InMemoryStore> {
        let store = InMemoryStore::new();
        for todo in todos {
            store.insert_record(todo).await?;
        }
        for medication in medications {
            store.insert_record(medication).await?;
        }
        Ok(store)
    }

    /// Add `count` workouts to a store.
    pub async fn seed_workouts(store: &InMemoryStore, count: usize) -> MitraResult<()> {
        for i in 0..count {
            store
                .insert_record(&workout("Squats", 3, 10 + i as u32))
                .await?;
        }
        Ok(())
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for schedule invariants and error categories.

    use super::*;
    use mitra_core::{MitraError, ValidationError};

    /// Assert items are ordered non-decreasing by time of day.
    #[track_caller]
    pub fn assert_chronological(items: &[ScheduleItem]) {
        for pair in items.windows(2) {
            assert!(
                pair[0].time <= pair[1].time,
                "schedule out of order: {} ({}) before {} ({})",
                pair[0].time,
                pair[0].activity,
                pair[1].time,
                pair[1].activity
            );
        }
    }

    /// Assert every medication item is pinned at top priority.
    #[track_caller]
    pub fn assert_medications_fixed(items: &[ScheduleItem]) {
        for item in items
            .iter()
            .filter(|i| i.activity_type == ActivityType::Medication)
        {
            assert!(!item.flexible, "medication {:?} is flexible", item.activity);
            assert_eq!(item.priority, 10, "medication {:?} priority", item.activity);
        }
    }

    /// Assert a balance score lies in `[0, 100]`.
    #[track_caller]
    pub fn assert_balance_in_range(score: f64) {
        assert!(
            (0.0..=100.0).contains(&score),
            "balance score {} out of range",
            score
        );
    }

    /// Assert no two items share a start time.
    #[track_caller]
    pub fn assert_no_shared_slots(items: &[ScheduleItem]) {
        let mut seen = HashSet::new();
        for item in items {
            assert!(
                seen.insert(item.time),
                "two items start at {}",
                item.time
            );
        }
    }

    /// Assert that a MitraResult is a Storage error.
    #[track_caller]
    pub fn assert_storage_error<T: std::fmt::Debug>(result: &MitraResult<T>) {
        match result {
            Err(MitraError::Storage(_)) => {}
            other => panic!("Expected Storage error, got: {:?}", other),
        }
    }

    /// Assert that a MitraResult is a storage timeout.
    #[track_caller]
    pub fn assert_timeout<T: std::fmt::Debug>(result: &MitraResult<T>) {
        match result {
            Err(MitraError::Storage(StorageError::Timeout { .. })) => {}
            other => panic!("Expected storage Timeout, got: {:?}", other),
        }
    }

    /// Assert that a MitraResult is an invalid-value validation error on `field`.
    #[track_caller]
    pub fn assert_invalid_value<T: std::fmt::Debug>(result: &MitraResult<T>, field: &str) {
        match result {
            Err(MitraError::Validation(ValidationError::InvalidValue { field: f, .. })) => {
                assert_eq!(f, field, "Wrong field in InvalidValue error");
            }
            other => panic!("Expected InvalidValue for {:?}, got: {:?}", field, other),
        }
    }

    /// Assert that a MitraResult is a missing-field validation error on `field`.
    #[track_caller]
    pub fn assert_missing_field<T: std::fmt::Debug>(result: &MitraResult<T>, field: &str) {
        match result {
            Err(MitraError::Validation(ValidationError::RequiredFieldMissing { field: f })) => {
                assert_eq!(f, field, "Wrong field in RequiredFieldMissing error");
            }
            other => panic!("Expected RequiredFieldMissing for {:?}, got: {:?}", field, other),
        }
    }
}
