//! Healthcare agent: medication schedule

use super::DomainAgent;
use crate::args::Args;
use async_trait::async_trait;
use chrono::Utc;
use mitra_core::{
    AgentAction, AgentKind, AgentResponse, Flexibility, MedicationRecord, MitraResult,
    RequirementDetail, ResponseCategory, ScheduleRequirement, TimeOfDay,
};
use mitra_storage::{DocumentStore, DocumentStoreExt, Query};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct HealthcareAgent {
    store: Arc<dyn DocumentStore>,
}

impl HealthcareAgent {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DomainAgent for HealthcareAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Healthcare
    }

    async fn process(&self, args: &Value) -> MitraResult<AgentResponse> {
        let args = Args::new(args)?;
        let record = MedicationRecord {
            medicine: args.required_text("medicine")?,
            time: args.required_text("time")?,
            dose: args.text_or("dose", ""),
            taken_today: false,
            timestamp: Utc::now(),
        };
        self.store.insert_record(&record).await?;

        Ok(AgentResponse::new(
            self.kind().display_name(),
            AgentAction::ScheduledMedication,
            ResponseCategory::Health,
            5,
            self.kind().priority(),
        )
        .with_flexibility(Flexibility::None)
        .with_scheduled_time(TimeOfDay::slot_for(&record.time))
        .with_data(json!({
            "medicine": record.medicine,
            "time": record.time,
            "dose": record.dose,
        })))
    }

    async fn requirements(&self) -> MitraResult<ScheduleRequirement> {
        let medications = self
            .store
            .fetch_records::<MedicationRecord>(&Query::all())
            .await?;

        Ok(ScheduleRequirement::new(
            self.kind(),
            RequirementDetail::Healthcare {
                medication_count: medications.len(),
                critical_times: [
                    TimeOfDay::Morning,
                    TimeOfDay::Afternoon,
                    TimeOfDay::Evening,
                    TimeOfDay::Night,
                ]
                .iter()
                .map(TimeOfDay::slot)
                .collect(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mitra_core::ClockTime;
    use mitra_test_utils::assertions::assert_missing_field;
    use mitra_test_utils::fixtures::{medication, seeded_store};
    use mitra_test_utils::InMemoryStore;

    #[tokio::test]
    async fn test_medication_maps_to_fixed_slot() -> MitraResult<()> {
        let agent = HealthcareAgent::new(Arc::new(InMemoryStore::new()));

        let night = agent
            .process(&json!({"medicine": "Aspirin", "time": "night", "dose": "100mg"}))
            .await?;
        assert_eq!(night.scheduled_time, Some(ClockTime::at(22, 0)));
        assert_eq!(night.flexibility, Some(Flexibility::None));
        assert_eq!(night.priority, Some(10));
        assert_eq!(night.data["dose"], "100mg");

        let unknown = agent
            .process(&json!({"medicine": "Vitamin D", "time": "with breakfast"}))
            .await?;
        assert_eq!(unknown.scheduled_time, Some(ClockTime::at(8, 0)));
        Ok(())
    }

    #[tokio::test]
    async fn test_time_is_required() {
        let agent = HealthcareAgent::new(Arc::new(InMemoryStore::new()));
        let result = agent.process(&json!({"medicine": "Aspirin"})).await;
        assert_missing_field(&result, "time");
    }

    #[tokio::test]
    async fn test_requirements_list_critical_times() -> MitraResult<()> {
        let store = seeded_store(
            &[],
            &[medication("Aspirin", "morning"), medication("Metformin", "evening")],
        )
        .await?;
        let requirement = HealthcareAgent::new(Arc::new(store)).requirements().await?;

        assert_eq!(requirement.priority, 10);
        match requirement.detail {
            RequirementDetail::Healthcare {
                medication_count,
                critical_times,
            } => {
                assert_eq!(medication_count, 2);
                let times: Vec<String> = critical_times.iter().map(|t| t.to_string()).collect();
                assert_eq!(times, vec!["08:00", "14:00", "18:00", "22:00"]);
            }
            other => panic!("unexpected detail {:?}", other),
        }
        Ok(())
    }
}
