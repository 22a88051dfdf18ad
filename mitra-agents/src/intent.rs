//! Supported intents and where they are routed

use mitra_core::{AgentError, AgentKind};
use std::fmt;
use std::str::FromStr;

/// The closed set of intents the coordinator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    LogWorkout,
    AddTask,
    LogFinance,
    WriteJournal,
    AddMedication,
    AddHabit,
    GenerateSchedule,
}

/// Handler an intent is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentTarget {
    Agent(AgentKind),
    Habit,
    Schedule,
}

impl Intent {
    pub const ALL: [Intent; 7] = [
        Intent::LogWorkout,
        Intent::AddTask,
        Intent::LogFinance,
        Intent::WriteJournal,
        Intent::AddMedication,
        Intent::AddHabit,
        Intent::GenerateSchedule,
    ];

    /// Tool name used by the classifier.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::LogWorkout => "log_workout",
            Intent::AddTask => "add_task",
            Intent::LogFinance => "log_finance",
            Intent::WriteJournal => "write_journal",
            Intent::AddMedication => "add_medication",
            Intent::AddHabit => "add_habit",
            Intent::GenerateSchedule => "generate_schedule",
        }
    }

    pub fn target(&self) -> IntentTarget {
        match self {
            Intent::LogWorkout => IntentTarget::Agent(AgentKind::Fitness),
            Intent::AddTask => IntentTarget::Agent(AgentKind::Task),
            Intent::LogFinance => IntentTarget::Agent(AgentKind::Finance),
            Intent::WriteJournal => IntentTarget::Agent(AgentKind::Journal),
            Intent::AddMedication => IntentTarget::Agent(AgentKind::Healthcare),
            Intent::AddHabit => IntentTarget::Habit,
            Intent::GenerateSchedule => IntentTarget::Schedule,
        }
    }

    /// The domain agent behind this intent, if any.
    pub fn agent(&self) -> Option<AgentKind> {
        match self.target() {
            IntentTarget::Agent(kind) => Some(kind),
            IntentTarget::Habit | IntentTarget::Schedule => None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intent {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.name() == s)
            .ok_or_else(|| AgentError::UnsupportedIntent {
                name: s.to_string(),
            })
    }
}
