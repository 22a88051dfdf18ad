//! Property-Based Tests for User Schedule Preservation
//!
//! Whatever the caller posts to `/optimize-schedule`, every caller item comes
//! back unchanged and the result is ordered by start time.

use mitra_core::MergedSchedule;
use mitra_test_utils::assertions::assert_chronological;
use mitra_test_utils::generators::arb_user_schedule;
use mitra_test_utils::InMemoryStore;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[path = "support/app.rs"]
mod support;
use support::{app, post_json};

fn test_runtime() -> Result<Runtime, TestCaseError> {
    Runtime::new().map_err(|e| TestCaseError::fail(format!("Failed to create runtime: {}", e)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_caller_items_survive_the_round_trip(user_items in arb_user_schedule(8)) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let app = app(Arc::new(InMemoryStore::new()), None);
            let reply = post_json(&app, "/optimize-schedule", &json!({"userSchedule": user_items}))
                .await
                .map_err(|e| TestCaseError::fail(format!("Request failed: {}", e)))?;
            prop_assert!(reply.status.is_success(), "status {}", reply.status);

            let merged: MergedSchedule = serde_json::from_value(reply.body)
                .map_err(|e| TestCaseError::fail(format!("Failed to parse response: {}", e)))?;

            prop_assert_eq!(merged.user_activities, user_items.len());
            prop_assert_eq!(merged.ai_suggestions, 0);
            prop_assert_eq!(merged.items.len(), user_items.len());
            for item in &user_items {
                prop_assert!(merged.items.contains(item), "lost {:?}", item);
            }
            assert_chronological(&merged.items);
            Ok(())
        })?;
    }
}
