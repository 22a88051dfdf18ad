//! Agent identity, responses and scheduling requirements

use crate::clock::ClockTime;
use crate::enums::{Flexibility, TimeOfDay};
use crate::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// AGENT IDENTITY
// ============================================================================

/// The closed set of domain agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Fitness,
    Task,
    Finance,
    Journal,
    Healthcare,
}

impl AgentKind {
    pub const ALL: [AgentKind; 5] = [
        AgentKind::Fitness,
        AgentKind::Task,
        AgentKind::Finance,
        AgentKind::Journal,
        AgentKind::Healthcare,
    ];

    /// Lowercase wire name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Fitness => "fitness",
            AgentKind::Task => "task",
            AgentKind::Finance => "finance",
            AgentKind::Journal => "journal",
            AgentKind::Healthcare => "healthcare",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentKind::Fitness => "Fitness Agent",
            AgentKind::Task => "Task Agent",
            AgentKind::Finance => "Finance Agent",
            AgentKind::Journal => "Journal Agent",
            AgentKind::Healthcare => "Healthcare Agent",
        }
    }

    /// Non-negotiability on a 1-10 scale. Healthcare outranks everything.
    pub fn priority(&self) -> u8 {
        match self {
            AgentKind::Fitness => 8,
            AgentKind::Task => 9,
            AgentKind::Finance => 6,
            AgentKind::Journal => 5,
            AgentKind::Healthcare => 10,
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What an agent did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AgentAction {
    LoggedWorkout,
    AddedTask,
    LoggedTransaction,
    WroteJournal,
    ScheduledMedication,
    AddedHabit,
    None,
}

/// Life area an agent response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ResponseCategory {
    Fitness,
    Productivity,
    Finance,
    Wellness,
    Health,
    Lifestyle,
}

// ============================================================================
// AGENT RESPONSE
// ============================================================================

/// Normalized scheduling hint emitted for every processed event.
///
/// Never persisted. The neutral no-op response only carries `agent` and
/// `action`, every other field is omitted from the wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub agent: String,
    pub action: AgentAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ResponseCategory>,
    #[serde(rename = "timeRequired", default, skip_serializing_if = "Option::is_none")]
    pub time_required_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flexibility: Option<Flexibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "08:00"))]
    pub scheduled_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = DateTime))]
    pub deadline: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: Value,
}

impl AgentResponse {
    pub fn new(
        agent: impl Into<String>,
        action: AgentAction,
        category: ResponseCategory,
        time_required_minutes: u32,
        priority: u8,
    ) -> Self {
        Self {
            agent: agent.into(),
            action,
            category: Some(category),
            time_required_minutes: Some(time_required_minutes),
            priority: Some(priority),
            flexibility: None,
            preferred_time: None,
            scheduled_time: None,
            deadline: None,
            data: Value::Null,
        }
    }

    /// The response for an intent nobody handles.
    pub fn unknown() -> Self {
        Self {
            agent: "unknown".to_string(),
            action: AgentAction::None,
            category: None,
            time_required_minutes: None,
            priority: None,
            flexibility: None,
            preferred_time: None,
            scheduled_time: None,
            deadline: None,
            data: Value::Null,
        }
    }

    pub fn with_flexibility(mut self, flexibility: Flexibility) -> Self {
        self.flexibility = Some(flexibility);
        self
    }

    pub fn with_preferred_time(mut self, when: TimeOfDay) -> Self {
        self.preferred_time = Some(when);
        self
    }

    pub fn with_scheduled_time(mut self, at: ClockTime) -> Self {
        self.scheduled_time = Some(at);
        self
    }

    pub fn with_deadline(mut self, deadline: Timestamp) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn is_noop(&self) -> bool {
        self.action == AgentAction::None
    }
}

// ============================================================================
// SCHEDULE REQUIREMENTS
// ============================================================================

/// Half-open window of preferred clock time, rendered as `"06:00-08:00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeWindow {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Cadence summary an agent derives from its recent history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequirement {
    pub agent: AgentKind,
    pub priority: u8,
    #[serde(flatten)]
    pub detail: RequirementDetail,
}

/// Per-agent body of a [`ScheduleRequirement`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RequirementDetail {
    Fitness {
        recent_workouts: usize,
        /// Sessions per week.
        recommended_frequency: u32,
        duration_minutes: u32,
        preferred_windows: Vec<TimeWindow>,
    },
    Task {
        pending_tasks: usize,
        total_estimated_minutes: u32,
    },
    Finance {
        review: String,
        duration_minutes: u32,
        preferred_slot: String,
    },
    Journal {
        /// Entries per week.
        recommended_frequency: u32,
        duration_minutes: u32,
        preferred_window: TimeWindow,
    },
    Healthcare {
        medication_count: usize,
        critical_times: Vec<ClockTime>,
    },
}

impl ScheduleRequirement {
    pub fn new(agent: AgentKind, detail: RequirementDetail) -> Self {
        Self {
            agent,
            priority: agent.priority(),
            detail,
        }
    }

    /// Minutes the agent wants blocked out, if it asks for a block at all.
    pub fn duration_minutes(&self) -> Option<u32> {
        match &self.detail {
            RequirementDetail::Fitness {
                duration_minutes, ..
            }
            | RequirementDetail::Finance {
                duration_minutes, ..
            }
            | RequirementDetail::Journal {
                duration_minutes, ..
            } => Some(*duration_minutes),
            RequirementDetail::Task {
                total_estimated_minutes,
                ..
            } => Some(*total_estimated_minutes),
            RequirementDetail::Healthcare { .. } => None,
        }
    }
}
