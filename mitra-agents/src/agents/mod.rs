//! Domain agents.
//!
//! Each agent records one kind of event and summarizes its recent history
//! as a [`ScheduleRequirement`]. The set of agents is closed: the roster
//! holds exactly one of each [`AgentKind`].

use async_trait::async_trait;
use mitra_core::{AgentKind, AgentResponse, MitraResult, PlannerConfig, ScheduleRequirement};
use mitra_storage::DocumentStore;
use serde_json::Value;
use std::sync::Arc;

pub mod finance;
pub mod fitness;
pub mod healthcare;
pub mod journal;
pub mod lifestyle;
pub mod task;

pub use finance::FinanceAgent;
pub use fitness::FitnessAgent;
pub use healthcare::HealthcareAgent;
pub use journal::JournalAgent;
pub use lifestyle::LifestyleAgent;
pub use task::{estimate_task_minutes, infer_deadline, TaskAgent};

/// Capability shared by the five domain agents.
#[async_trait]
pub trait DomainAgent: Send + Sync {
    fn kind(&self) -> AgentKind;

    /// Persist one event and return the scheduling hint derived from it.
    async fn process(&self, args: &Value) -> MitraResult<AgentResponse>;

    /// Summarize recent history as a cadence requirement.
    async fn requirements(&self) -> MitraResult<ScheduleRequirement>;
}

/// One instance of every domain agent, sharing a store.
pub struct AgentRoster {
    fitness: FitnessAgent,
    task: TaskAgent,
    finance: FinanceAgent,
    journal: JournalAgent,
    healthcare: HealthcareAgent,
}

impl AgentRoster {
    pub fn new(store: Arc<dyn DocumentStore>, config: &PlannerConfig) -> Self {
        Self {
            fitness: FitnessAgent::new(store.clone(), config.workout_history_window),
            task: TaskAgent::new(store.clone()),
            finance: FinanceAgent::new(store.clone()),
            journal: JournalAgent::new(store.clone()),
            healthcare: HealthcareAgent::new(store),
        }
    }

    pub fn get(&self, kind: AgentKind) -> &dyn DomainAgent {
        match kind {
            AgentKind::Fitness => &self.fitness,
            AgentKind::Task => &self.task,
            AgentKind::Finance => &self.finance,
            AgentKind::Journal => &self.journal,
            AgentKind::Healthcare => &self.healthcare,
        }
    }

    /// Every agent, in [`AgentKind::ALL`] order.
    pub fn agents(&self) -> impl Iterator<Item = &dyn DomainAgent> + '_ {
        AgentKind::ALL.into_iter().map(|kind| self.get(kind))
    }
}

impl std::fmt::Debug for AgentRoster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(AgentKind::ALL.iter().map(AgentKind::display_name))
            .finish()
    }
}
