//! Finance agent: income and expense ledger

use super::DomainAgent;
use crate::args::Args;
use async_trait::async_trait;
use chrono::Utc;
use mitra_core::{
    AgentAction, AgentKind, AgentResponse, FinanceRecord, MitraResult, RequirementDetail,
    ResponseCategory, ScheduleRequirement, TransactionKind,
};
use mitra_storage::{DocumentStore, DocumentStoreExt};
use serde_json::{json, Value};
use std::sync::Arc;

/// Expenses above this amount are flagged with a raised priority.
const LARGE_EXPENSE: f64 = 1000.0;
const LARGE_EXPENSE_PRIORITY: u8 = 8;

pub struct FinanceAgent {
    store: Arc<dyn DocumentStore>,
}

impl FinanceAgent {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn priority_for(&self, record: &FinanceRecord) -> u8 {
        if record.kind == TransactionKind::Expense && record.amount > LARGE_EXPENSE {
            LARGE_EXPENSE_PRIORITY
        } else {
            self.kind().priority()
        }
    }
}

#[async_trait]
impl DomainAgent for FinanceAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Finance
    }

    async fn process(&self, args: &Value) -> MitraResult<AgentResponse> {
        let args = Args::new(args)?;
        let record = FinanceRecord {
            item: args.required_text("item")?,
            amount: args.required_quantity("amount")?,
            kind: args
                .text("type")
                .map(|t| TransactionKind::from_text(&t))
                .unwrap_or_default(),
            category: args.text_or("category", "General"),
            timestamp: Utc::now(),
        };
        self.store.insert_record(&record).await?;

        Ok(AgentResponse::new(
            self.kind().display_name(),
            AgentAction::LoggedTransaction,
            ResponseCategory::Finance,
            5,
            self.priority_for(&record),
        )
        .with_data(json!({
            "item": record.item,
            "amount": record.amount,
            "type": record.kind,
            "category": record.category,
        })))
    }

    async fn requirements(&self) -> MitraResult<ScheduleRequirement> {
        Ok(ScheduleRequirement::new(
            self.kind(),
            RequirementDetail::Finance {
                review: "Weekly budget review".to_string(),
                duration_minutes: 30,
                preferred_slot: "Sunday evening".to_string(),
            },
        ))
    }
}
