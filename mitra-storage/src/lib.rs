//! Mitra Storage - Document Store Contract
//!
//! Records live in named collections of schemaless JSON documents. The
//! coordinator only ever needs three operations: `add`, `query` with
//! equality filters plus optional ordering and limit, and `delete`.
//! [`DocumentStoreExt`] layers typed access over the raw contract.

use async_trait::async_trait;
use mitra_core::{Collection, MitraResult, Record, RecordId, Stored, StorageError};
use serde_json::Value;

pub mod memory;

pub use memory::InMemoryStore;

// ============================================================================
// QUERY
// ============================================================================

/// Sort direction for [`OrderBy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Equality filter on a top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

/// Collection query. An empty query returns every document in insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order = Some(OrderBy {
            field: field.into(),
            direction: Direction::Descending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Newest first by the `timestamp` field.
    pub fn newest_first() -> Self {
        Self::all().order_by_desc("timestamp")
    }
}

/// A stored document: the id assigned on insert plus the raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: RecordId,
    pub data: Value,
}

// ============================================================================
// STORE CONTRACT
// ============================================================================

/// Collection-scoped document store. Each call is atomic on its own.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a JSON object and return its new id.
    async fn add(&self, collection: Collection, data: Value) -> MitraResult<RecordId>;

    /// Run a query against one collection.
    async fn query(&self, collection: Collection, query: &Query) -> MitraResult<Vec<Document>>;

    /// Delete a document. Returns whether anything was removed; deleting an
    /// unknown id is not an error.
    async fn delete(&self, collection: Collection, id: RecordId) -> MitraResult<bool>;
}

/// Typed helpers over [`DocumentStore`].
#[async_trait]
pub trait DocumentStoreExt: DocumentStore {
    /// Serialize and insert a record into its collection.
    async fn insert_record<R: Record>(&self, record: &R) -> MitraResult<RecordId> {
        let data = serde_json::to_value(record).map_err(|e| StorageError::InsertFailed {
            collection: R::COLLECTION,
            reason: e.to_string(),
        })?;
        self.add(R::COLLECTION, data).await
    }

    /// Query a record's collection and decode every document.
    async fn fetch_records<R: Record>(&self, query: &Query) -> MitraResult<Vec<Stored<R>>> {
        let documents = self.query(R::COLLECTION, query).await?;
        documents
            .into_iter()
            .map(|Document { id, data }| -> MitraResult<Stored<R>> {
                let record = serde_json::from_value(data).map_err(|e| {
                    StorageError::QueryFailed {
                        collection: R::COLLECTION,
                        reason: format!("document {} does not decode: {}", id, e),
                    }
                })?;
                Ok(Stored { id, record })
            })
            .collect()
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}
