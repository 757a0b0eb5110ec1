//! MongoDB client and store implementation

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures_util::TryStreamExt;
use mongodb::{options::IndexOptions, Client, Database, IndexModel};
use tracing::{debug, info, warn};

use super::DocumentStore;
use crate::types::{ApiError, Result};

/// Trait for schemas that provide index definitions
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Create a new MongoDB client.
    ///
    /// An unparsable URI is a configuration error. An unreachable server is
    /// only logged: the driver connects lazily and requests will surface the
    /// failure until it comes back.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB");

        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| ApiError::Config(format!("Invalid MongoDB URI: {}", e)))?;

        match client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
        {
            Ok(_) => info!("Connected to MongoDB database '{}'", db_name),
            Err(e) => warn!("MongoDB ping failed, continuing: {}", e),
        }

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Get the database name
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// Handle to the configured database
    pub fn database(&self) -> Database {
        self.client.database(&self.db_name)
    }

    /// Apply schema-defined indexes to a collection
    pub async fn ensure_indexes<T: IntoIndexes>(&self, collection_name: &str) -> Result<()> {
        let schema_indices = T::into_indices();

        if schema_indices.is_empty() {
            return Ok(());
        }

        let indices: Vec<IndexModel> = schema_indices
            .into_iter()
            .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
            .collect();

        self.database()
            .collection::<Document>(collection_name)
            .create_indexes(indices)
            .await
            .map_err(|e| ApiError::Database(format!("Failed to create indexes: {}", e)))?;

        debug!("Indexes ensured on '{}'", collection_name);
        Ok(())
    }
}

/// `DocumentStore` backed by MongoDB
#[derive(Clone)]
pub struct MongoStore {
    mongo: MongoClient,
}

impl MongoStore {
    pub fn new(mongo: MongoClient) -> Self {
        Self { mongo }
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.mongo.database().collection::<Document>(name)
    }
}

/// Projection that hides the storage identifier
fn without_id() -> Document {
    doc! { "_id": 0 }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>> {
        self.collection(collection)
            .find_one(filter)
            .projection(without_id())
            .await
            .map_err(|e| ApiError::Database(format!("Find failed on {}: {}", collection, e)))
    }

    async fn find_many(&self, collection: &str, filter: Document) -> Result<Vec<Document>> {
        let cursor = self
            .collection(collection)
            .find(filter)
            .projection(without_id())
            .await
            .map_err(|e| ApiError::Database(format!("Find failed on {}: {}", collection, e)))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| ApiError::Database(format!("Cursor failed on {}: {}", collection, e)))
    }

    async fn distinct(&self, collection: &str, field: &str) -> Result<Vec<Bson>> {
        self.collection(collection)
            .distinct(field, doc! {})
            .await
            .map_err(|e| ApiError::Database(format!("Distinct failed on {}: {}", collection, e)))
    }

    async fn upsert_one(&self, collection: &str, filter: Document, fields: Document) -> Result<()> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .upsert(true)
            .await
            .map_err(|e| ApiError::Database(format!("Upsert failed on {}: {}", collection, e)))?;

        debug!(
            matched = result.matched_count,
            upserted = result.upserted_id.is_some(),
            "Upsert on {}",
            collection
        );
        Ok(())
    }
}

