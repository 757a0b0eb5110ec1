//! User progress document schema
//!
//! One document per `(user_id, slug)`; every write replaces the mutable fields
//! and stamps `updated_at`.

use bson::{doc, DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for user progress
pub const USER_PROGRESS_COLLECTION: &str = "user_progress";

/// Progress document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProgressDoc {
    /// Owner of the record
    pub user_id: String,

    /// Algorithm or protocol slug the progress refers to
    pub slug: String,

    /// Domain family label sent by the client
    pub domain: String,

    pub read_completed: bool,

    pub quiz_completed: bool,

    #[serde(default)]
    pub quiz_score: f64,

    /// Server time of the latest write
    pub updated_at: DateTime,
}

impl ProgressDoc {
    /// Filter identifying this record
    pub fn key_filter(&self) -> Document {
        doc! {
            "user_id": &self.user_id,
            "slug": &self.slug,
        }
    }

    /// Fields overwritten on every upsert
    pub fn set_fields(&self) -> Document {
        doc! {
            "domain": &self.domain,
            "read_completed": self.read_completed,
            "quiz_completed": self.quiz_completed,
            "quiz_score": self.quiz_score,
            "updated_at": self.updated_at,
        }
    }
}

impl IntoIndexes for ProgressDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "user_id": 1, "slug": 1 },
            Some(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_slug_unique".to_string())
                    .build(),
            ),
        )]
    }
}
