//! Document store access
//!
//! - `DocumentStore`: the four primitives the service needs from storage
//! - `MongoStore`: production implementation over a shared MongoDB client
//! - `MemoryStore`: in-process implementation used by tests

pub mod memory;
pub mod mongo;
pub mod schemas;

pub use memory::MemoryStore;
pub use mongo::{IntoIndexes, MongoClient, MongoStore};

use async_trait::async_trait;
use bson::{Bson, Document};

use crate::types::Result;

/// Storage primitives over named, schemaless collections.
///
/// Every document handed back has its internal `_id` removed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// First document matching `filter`
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>>;

    /// All documents matching `filter`
    async fn find_many(&self, collection: &str, filter: Document) -> Result<Vec<Document>>;

    /// Distinct values of `field` across the collection
    async fn distinct(&self, collection: &str, field: &str) -> Result<Vec<Bson>>;

    /// Atomically set `fields` on the document matching `filter`, inserting it
    /// (with the filter's key fields) when absent
    async fn upsert_one(&self, collection: &str, filter: Document, fields: Document) -> Result<()>;
}
