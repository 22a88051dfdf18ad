//! Enum types for Mitra schedule items and records

use crate::clock::ClockTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// SCHEDULE ENUMS
// ============================================================================

/// Kind of block placed on a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Task,
    Fitness,
    Medication,
    Wellness,
    Break,
    /// Supplied by the caller rather than generated.
    #[default]
    User,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Task => "task",
            ActivityType::Fitness => "fitness",
            ActivityType::Medication => "medication",
            ActivityType::Wellness => "wellness",
            ActivityType::Break => "break",
            ActivityType::User => "user",
        }
    }

    /// Fitness, medication and wellness blocks count toward health time.
    pub fn is_health(&self) -> bool {
        matches!(
            self,
            ActivityType::Fitness | ActivityType::Medication | ActivityType::Wellness
        )
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How freely an agent's suggested block may be moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Flexibility {
    None,
    Low,
    Medium,
    High,
}

// ============================================================================
// RECORD ENUMS
// ============================================================================

/// Priority of a to-do entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl TaskPriority {
    /// Read free priority text. Anything other than high or medium is low.
    pub fn from_text(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "high" => TaskPriority::High,
            "medium" => TaskPriority::Medium,
            _ => TaskPriority::Low,
        }
    }

    /// Numeric priority used on schedule items and agent responses.
    pub fn score(&self) -> u8 {
        match self {
            TaskPriority::High => 10,
            TaskPriority::Medium => 7,
            TaskPriority::Low => 5,
        }
    }

    /// High-priority work leaves little room to move.
    pub fn flexibility(&self) -> Flexibility {
        match self {
            TaskPriority::High => Flexibility::Low,
            _ => Flexibility::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Part of the day a medication is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Fixed clock slot for this part of the day.
    pub fn slot(&self) -> ClockTime {
        match self {
            TimeOfDay::Morning => ClockTime::at(8, 0),
            TimeOfDay::Afternoon => ClockTime::at(14, 0),
            TimeOfDay::Evening => ClockTime::at(18, 0),
            TimeOfDay::Night => ClockTime::at(22, 0),
        }
    }

    /// Map free text onto a part of the day. Unrecognized text is `None`.
    pub fn recognize(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "morning" => Some(TimeOfDay::Morning),
            "afternoon" => Some(TimeOfDay::Afternoon),
            "evening" => Some(TimeOfDay::Evening),
            "night" => Some(TimeOfDay::Night),
            _ => None,
        }
    }

    /// Clock slot for free text, falling back to the morning slot.
    pub fn slot_for(text: &str) -> ClockTime {
        Self::recognize(text).unwrap_or(TimeOfDay::Morning).slot()
    }
}

/// Direction of a finance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Expense,
    Income,
}

impl TransactionKind {
    /// Read free type text. Only "income" counts as income.
    pub fn from_text(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "income" => TransactionKind::Income,
            _ => TransactionKind::Expense,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
