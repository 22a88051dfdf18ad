//! Mitra Agents - Intent Routing and Day Planning
//!
//! - Five domain agents that record events and summarize cadence
//! - The closed set of supported intents
//! - A coordinator that routes intents and keeps an activity log
//! - Clean-slate schedule generation, user-schedule merging and balance
//!   scoring

pub mod activity;
pub mod agents;
pub mod args;
pub mod coordinator;
pub mod intent;
pub mod schedule;

pub use activity::{ActivityEntry, ActivityLog};
pub use agents::{
    estimate_task_minutes, infer_deadline, AgentRoster, DomainAgent, FinanceAgent, FitnessAgent,
    HealthcareAgent, JournalAgent, LifestyleAgent, TaskAgent,
};
pub use args::Args;
pub use coordinator::{Coordinator, Dispatched};
pub use intent::{Intent, IntentTarget};
pub use schedule::{balance_score, build_schedule, merge_schedule, CategoryCounts, MergeSources};
