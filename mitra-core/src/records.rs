//! Persisted record shapes, one per storage collection

use crate::enums::{TaskPriority, TransactionKind};
use crate::{RecordId, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named document collections in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    GymLogs,
    Todos,
    Finance,
    Journal,
    Medications,
    Lifestyle,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::GymLogs,
        Collection::Todos,
        Collection::Finance,
        Collection::Journal,
        Collection::Medications,
        Collection::Lifestyle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::GymLogs => "gym_logs",
            Collection::Todos => "todos",
            Collection::Finance => "finance",
            Collection::Journal => "journal",
            Collection::Medications => "medications",
            Collection::Lifestyle => "lifestyle",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record type bound to the collection it lives in.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;
}

// ============================================================================
// RECORDS
// ============================================================================

/// One logged exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WorkoutRecord {
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    /// Kilograms; absent for bodyweight work.
    pub weight: Option<f64>,
    pub is_pr: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub timestamp: Timestamp,
}

impl Record for WorkoutRecord {
    const COLLECTION: Collection = Collection::GymLogs;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TodoRecord {
    pub task: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub completed: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub timestamp: Timestamp,
}

impl Record for TodoRecord {
    const COLLECTION: Collection = Collection::Todos;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FinanceRecord {
    pub item: String,
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
    pub category: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub timestamp: Timestamp,
}

impl Record for FinanceRecord {
    const COLLECTION: Collection = Collection::Finance;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JournalRecord {
    #[serde(default)]
    pub title: String,
    pub content: String,
    pub mood: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub timestamp: Timestamp,
}

impl Record for JournalRecord {
    const COLLECTION: Collection = Collection::Journal;
}

/// A standing medication. `time` keeps the caller's wording ("morning",
/// "night", ...) and is mapped to a clock slot when scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MedicationRecord {
    pub medicine: String,
    pub time: String,
    #[serde(default)]
    pub dose: String,
    #[serde(default)]
    pub taken_today: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub timestamp: Timestamp,
}

impl Record for MedicationRecord {
    const COLLECTION: Collection = Collection::Medications;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HabitRecord {
    pub habit: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub timestamp: Timestamp,
}

impl Record for HabitRecord {
    const COLLECTION: Collection = Collection::Lifestyle;
}

/// A record together with the id the store assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: T,
}
