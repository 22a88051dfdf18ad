//! Schedule items and the two schedule documents built from them

use crate::clock::ClockTime;
use crate::enums::ActivityType;
use crate::Timestamp;
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Longest block a day can hold.
pub const MAX_ITEM_MINUTES: u32 = 24 * 60;

/// Priority every medication block carries.
pub const MEDICATION_PRIORITY: u8 = 10;

fn default_priority() -> u8 {
    5
}

fn default_flexible() -> bool {
    true
}

fn default_agent() -> String {
    "User".to_string()
}

fn day_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let minutes = u32::deserialize(deserializer)?;
    if minutes > MAX_ITEM_MINUTES {
        return Err(de::Error::custom(format!(
            "duration {} exceeds {} minutes",
            minutes, MAX_ITEM_MINUTES
        )));
    }
    Ok(minutes)
}

// ============================================================================
// SCHEDULE ITEM
// ============================================================================

/// One time-slotted block of a day.
///
/// Items supplied by a caller may omit everything except `time`, `activity`
/// and `duration`; the rest defaults to a flexible user block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "08:00"))]
    pub time: ClockTime,
    #[serde(rename = "duration", deserialize_with = "day_minutes")]
    pub duration_minutes: u32,
    pub activity: String,
    #[serde(rename = "type", default)]
    pub activity_type: ActivityType,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default = "default_flexible")]
    pub flexible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub alternative_times: Vec<ClockTime>,
    #[serde(default = "default_agent")]
    pub agent: String,
    #[serde(rename = "addedByAI", default)]
    pub added_by_ai: bool,
}

impl ScheduleItem {
    /// A flexible block owned by `agent` with the default priority.
    pub fn new(
        time: ClockTime,
        duration_minutes: u32,
        activity: impl Into<String>,
        activity_type: ActivityType,
        agent: impl Into<String>,
    ) -> Self {
        Self {
            time,
            duration_minutes,
            activity: activity.into(),
            activity_type,
            priority: default_priority(),
            flexible: true,
            alternative_times: Vec::new(),
            agent: agent.into(),
            added_by_ai: false,
        }
    }

    /// A caller-owned block, as it would arrive over the wire with defaults.
    pub fn user(time: ClockTime, duration_minutes: u32, activity: impl Into<String>) -> Self {
        Self::new(
            time,
            duration_minutes,
            activity,
            ActivityType::User,
            default_agent(),
        )
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Pin the block so nothing may move it.
    pub fn fixed(mut self) -> Self {
        self.flexible = false;
        self
    }

    pub fn with_alternatives(mut self, times: Vec<ClockTime>) -> Self {
        self.alternative_times = times;
        self
    }

    pub fn suggested(mut self) -> Self {
        self.added_by_ai = true;
        self
    }

    /// Apply the rules every medication block obeys, whoever supplied it.
    pub fn normalized(self) -> Self {
        if self.activity_type == ActivityType::Medication {
            self.with_priority(MEDICATION_PRIORITY).fixed()
        } else {
            self
        }
    }

    /// Case-insensitive substring match of the activity text.
    pub fn mentions_any(&self, needles: &[&str]) -> bool {
        let text = self.activity.to_lowercase();
        needles.iter().any(|needle| text.contains(needle))
    }
}

// ============================================================================
// CLEAN-SLATE SCHEDULE
// ============================================================================

/// Summary attached to a generated schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInsights {
    /// "Good" or "Needs Improvement".
    pub work_life_balance: String,
    /// Rendered as `"N minutes"`.
    pub total_work_time: String,
    pub health_score: String,
    pub recommendations: Vec<String>,
    /// High-priority tasks that did not fit before the end of the workday.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unscheduled_tasks: Vec<String>,
}

/// A day planned from stored state alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub date: NaiveDate,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub generated_at: Timestamp,
    pub total_activities: usize,
    #[serde(rename = "schedule")]
    pub items: Vec<ScheduleItem>,
    pub insights: ScheduleInsights,
    pub balance_score: f64,
}

// ============================================================================
// MERGED SCHEDULE
// ============================================================================

/// Summary attached to a merged schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MergeInsights {
    /// Human-readable suggestions, in the order they were produced.
    pub recommendations: Vec<String>,
    /// "Good Balance" or "Needs Improvement".
    pub work_life_balance: String,
    pub total_work_time: u32,
    pub total_health_time: u32,
    pub ai_enhancements: String,
}

/// A caller's day enriched with stored medications, workouts and tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MergedSchedule {
    pub date: NaiveDate,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub generated_at: Timestamp,
    pub total_activities: usize,
    pub user_activities: usize,
    pub ai_suggestions: usize,
    #[serde(rename = "schedule")]
    pub items: Vec<ScheduleItem>,
    pub insights: MergeInsights,
    pub balance_score: f64,
}
