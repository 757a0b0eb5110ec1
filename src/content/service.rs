//! Content read operations
//!
//! Each operation is a single store read. Documents pass through untouched
//! apart from the storage identifier, which the store already strips.

use bson::{doc, Bson, Document};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use super::{DomainFamily, DomainSummary};
use crate::db::DocumentStore;
use crate::types::{ApiError, Result};

/// Convert a stored document into a JSON body
pub fn document_to_json(document: Document) -> Value {
    Bson::Document(document).into_relaxed_extjson()
}

/// Read-only access to both content families
#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn DocumentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The family's introduction document
    pub async fn introduction(&self, family: DomainFamily) -> Result<Value> {
        self.store
            .find_one(family.introduction_collection(), doc! {})
            .await?
            .map(document_to_json)
            .ok_or_else(|| ApiError::NotFound(format!("{} introduction not found", family.label())))
    }

    /// The family's workflow document
    pub async fn workflow(&self, family: DomainFamily) -> Result<Value> {
        self.store
            .find_one(family.workflow_collection(), doc! {})
            .await?
            .map(document_to_json)
            .ok_or_else(|| ApiError::NotFound(format!("{} workflow not found", family.label())))
    }

    /// Distinct domains across the family's records, sorted by slug
    pub async fn list_domains(&self, family: DomainFamily) -> Result<Vec<DomainSummary>> {
        let values = self
            .store
            .distinct(family.records_collection(), "domain_slug")
            .await?;

        let slugs: BTreeSet<String> = values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(slug) => Some(slug),
                other => {
                    debug!("Skipping non-string domain_slug {:?} in {}", other, family.label());
                    None
                }
            })
            .collect();

        Ok(slugs.into_iter().map(DomainSummary::from_slug).collect())
    }

    /// All records of one domain as `{domain, algorithms|protocols}`
    pub async fn domain(&self, family: DomainFamily, domain_slug: &str) -> Result<Value> {
        let records = self
            .store
            .find_many(family.records_collection(), doc! { "domain_slug": domain_slug })
            .await?;

        if records.is_empty() {
            return Err(ApiError::NotFound(format!("No {} found", family.records_key())));
        }

        let items: Vec<Value> = records.into_iter().map(document_to_json).collect();
        let mut body = json!({ "domain": DomainSummary::from_slug(domain_slug) });
        if let Value::Object(ref mut map) = body {
            map.insert(family.records_key().to_string(), Value::Array(items));
        }

        Ok(body)
    }

    /// A single algorithm or protocol by slug
    pub async fn record(&self, family: DomainFamily, slug: &str) -> Result<Value> {
        self.store
            .find_one(family.records_collection(), doc! { "slug": slug })
            .await?
            .map(document_to_json)
            .ok_or_else(|| ApiError::NotFound(format!("{} not found", family.record_noun())))
    }
}
