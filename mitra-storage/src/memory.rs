//! In-memory document store.

use crate::{Direction, Document, DocumentStore, Query};
use async_trait::async_trait;
use chrono::DateTime;
use mitra_core::{new_record_id, Collection, MitraResult, RecordId, StorageError};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Process-local store keeping each collection in insertion order.
///
/// Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<Document>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: Collection) -> MitraResult<usize> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(collections.get(&collection).map_or(0, Vec::len))
    }
}

/// Order two field values. Missing fields sort first, RFC 3339 strings
/// compare as instants, numbers numerically.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => {
            match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn add(&self, collection: Collection, data: Value) -> MitraResult<RecordId> {
        if !data.is_object() {
            return Err(StorageError::InsertFailed {
                collection,
                reason: "document body must be a JSON object".to_string(),
            }
            .into());
        }

        let id = new_record_id();
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        collections
            .entry(collection)
            .or_default()
            .push(Document { id, data });
        Ok(id)
    }

    async fn query(&self, collection: Collection, query: &Query) -> MitraResult<Vec<Document>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        let Some(documents) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<Document> = documents
            .iter()
            .filter(|doc| {
                query
                    .filters
                    .iter()
                    .all(|filter| doc.data.get(&filter.field) == Some(&filter.value))
            })
            .cloned()
            .collect();

        if let Some(order) = &query.order {
            matched.sort_by(|a, b| {
                let ordering = compare_values(a.data.get(&order.field), b.data.get(&order.field));
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    async fn delete(&self, collection: Collection, id: RecordId) -> MitraResult<bool> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        Ok(documents.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_rejects_non_objects() {
        let store = InMemoryStore::new();
        let result = store.add(Collection::Finance, json!([1, 2, 3])).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_filter_order_limit() -> MitraResult<()> {
        let store = InMemoryStore::new();
        store
            .add(
                Collection::Todos,
                json!({"task": "a", "completed": false, "timestamp": "2026-10-01T09:00:00Z"}),
            )
            .await?;
        store
            .add(
                Collection::Todos,
                json!({"task": "b", "completed": true, "timestamp": "2026-10-02T09:00:00Z"}),
            )
            .await?;
        store
            .add(
                Collection::Todos,
                json!({"task": "c", "completed": false, "timestamp": "2026-10-03T09:00:00.250Z"}),
            )
            .await?;

        let open = store
            .query(
                Collection::Todos,
                &Query::newest_first().filter_eq("completed", false),
            )
            .await?;
        let tasks: Vec<_> = open.iter().map(|d| d.data["task"].clone()).collect();
        assert_eq!(tasks, vec![json!("c"), json!("a")]);

        let latest = store
            .query(Collection::Todos, &Query::newest_first().limit(1))
            .await?;
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].data["task"], "c");
        Ok(())
    }

    #[tokio::test]
    async fn test_unordered_query_keeps_insertion_order() -> MitraResult<()> {
        let store = InMemoryStore::new();
        for name in ["first", "second", "third"] {
            store.add(Collection::Lifestyle, json!({"habit": name})).await?;
        }
        let habits = store.query(Collection::Lifestyle, &Query::all()).await?;
        let names: Vec<_> = habits.iter().map(|d| d.data["habit"].clone()).collect();
        assert_eq!(names, vec![json!("first"), json!("second"), json!("third")]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() -> MitraResult<()> {
        let store = InMemoryStore::new();
        let id = store.add(Collection::Finance, json!({"item": "Coffee"})).await?;
        assert!(store.delete(Collection::Finance, id).await?);
        assert!(!store.delete(Collection::Finance, id).await?);
        assert_eq!(store.count(Collection::Finance)?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_collections_are_isolated() -> MitraResult<()> {
        let store = InMemoryStore::new();
        store.add(Collection::Journal, json!({"content": "hi"})).await?;
        assert_eq!(store.count(Collection::Journal)?, 1);
        assert_eq!(store.count(Collection::Finance)?, 0);
        assert!(store.query(Collection::Finance, &Query::all()).await?.is_empty());
        Ok(())
    }

    #[test]
    fn test_compare_values_handles_mixed_precision_timestamps() {
        let early = json!("2026-10-01T09:00:00.500Z");
        let late = json!("2026-10-01T09:00:01Z");
        assert_eq!(compare_values(Some(&early), Some(&late)), Ordering::Less);
        assert_eq!(compare_values(None, Some(&late)), Ordering::Less);
        assert_eq!(
            compare_values(Some(&json!(2)), Some(&json!(10))),
            Ordering::Less
        );
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Limit never yields more documents than requested or stored.
        #[test]
        fn prop_limit_bounds_result(count in 0usize..20, limit in 0usize..25) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            let len = rt.block_on(async {
                let store = InMemoryStore::new();
                for i in 0..count {
                    store.add(Collection::GymLogs, json!({"sets": i})).await?;
                }
                let docs = store
                    .query(Collection::GymLogs, &Query::all().order_by_desc("sets").limit(limit))
                    .await?;
                MitraResult::Ok(docs.len())
            }).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(len, count.min(limit));
        }
    }
}
