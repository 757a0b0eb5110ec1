//! In-memory document store
//!
//! Mirrors the subset of MongoDB semantics the service relies on: top-level
//! equality filters, insertion-ordered scans, distinct values in first-seen
//! order, and upserts that hold the collection lock for the whole
//! find-then-write.

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use super::DocumentStore;
use crate::types::{ApiError, Result};

/// `DocumentStore` held entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<Document>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document, assigning an `_id` like the real store would
    pub fn insert(&self, collection: &str, mut document: Document) {
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    /// Raw contents of a collection, `_id` included
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .get(collection)
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }

    /// Simulate losing the storage connection
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Database("memory store offline".to_string()));
        }
        Ok(())
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

fn strip_id(document: &Document) -> Document {
    let mut document = document.clone();
    document.remove("_id");
    document
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>> {
        self.check_online()?;
        Ok(self.collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|d| matches(d, &filter))
                .map(strip_id)
        }))
    }

    async fn find_many(&self, collection: &str, filter: Document) -> Result<Vec<Document>> {
        self.check_online()?;
        Ok(self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches(d, &filter))
                    .map(strip_id)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn distinct(&self, collection: &str, field: &str) -> Result<Vec<Bson>> {
        self.check_online()?;
        let mut values: Vec<Bson> = Vec::new();
        if let Some(docs) = self.collections.get(collection) {
            for value in docs.iter().filter_map(|d| d.get(field)) {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }
        Ok(values)
    }

    async fn upsert_one(&self, collection: &str, filter: Document, fields: Document) -> Result<()> {
        self.check_online()?;
        let mut docs = self.collections.entry(collection.to_string()).or_default();

        match docs.iter_mut().find(|d| matches(d, &filter)) {
            Some(existing) => {
                for (key, value) in fields {
                    existing.insert(key, value);
                }
            }
            None => {
                let mut created = Document::new();
                created.insert("_id", ObjectId::new());
                for (key, value) in filter.into_iter().chain(fields) {
                    created.insert(key, value);
                }
                docs.push(created);
            }
        }

        Ok(())
    }
}
