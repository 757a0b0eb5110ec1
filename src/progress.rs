//! Learning progress tracking
//!
//! The platform has no accounts yet, so every update is recorded under one
//! fixed user. Records are keyed by `(user_id, slug)` and overwritten in place.

use bson::DateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::db::schemas::{ProgressDoc, USER_PROGRESS_COLLECTION};
use crate::db::DocumentStore;
use crate::types::{ApiError, Result};

/// Identity every progress record is stored under
pub const DEFAULT_USER_ID: &str = "default_user";

/// Body of `POST /api/me/progress`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub domain: String,
    pub slug: String,
    pub read_completed: bool,
    pub quiz_completed: bool,
    #[serde(default)]
    pub quiz_score: f64,
}

impl ProgressUpdate {
    /// Parse and validate a raw JSON body
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let update: Self = serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidInput(format!("Invalid progress update: {}", e)))?;
        update.validate()?;
        Ok(update)
    }

    fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(ApiError::InvalidInput("domain must not be empty".to_string()));
        }
        if self.slug.trim().is_empty() {
            return Err(ApiError::InvalidInput("slug must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Acknowledgement returned after a successful write
#[derive(Debug, Clone, Serialize)]
pub struct ProgressAck {
    pub status: &'static str,
}

impl ProgressAck {
    pub fn success() -> Self {
        Self { status: "success" }
    }
}

/// Writes progress records
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn DocumentStore>,
}

impl ProgressService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Upsert the progress record for `update.slug`
    pub async fn update(&self, update: ProgressUpdate) -> Result<ProgressAck> {
        let record = ProgressDoc {
            user_id: DEFAULT_USER_ID.to_string(),
            slug: update.slug,
            domain: update.domain,
            read_completed: update.read_completed,
            quiz_completed: update.quiz_completed,
            quiz_score: update.quiz_score,
            updated_at: DateTime::now(),
        };

        self.store
            .upsert_one(
                USER_PROGRESS_COLLECTION,
                record.key_filter(),
                record.set_fields(),
            )
            .await?;

        debug!(slug = %record.slug, score = record.quiz_score, "Progress recorded");
        Ok(ProgressAck::success())
    }
}
