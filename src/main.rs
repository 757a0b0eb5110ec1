//! Quantum Learning API server

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};

use quantum_learning_api::{
    config::Args,
    db::{schemas::{ProgressDoc, USER_PROGRESS_COLLECTION}, MongoClient, MongoStore},
    logging, server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init_tracing(&args.log_level, args.log_json);

    // Refuse to start without a storage connection string
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Quantum Learning Platform API v{}", env!("CARGO_PKG_VERSION"));
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("Database: {}", args.db_name);
    info!("======================================");

    let mongo = match MongoClient::new(args.mongo_uri(), &args.db_name).await {
        Ok(client) => client,
        Err(e) => {
            error!("MongoDB client setup failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = mongo
        .ensure_indexes::<ProgressDoc>(USER_PROGRESS_COLLECTION)
        .await
    {
        warn!("Could not ensure progress indexes: {}", e);
    }

    let state = Arc::new(server::AppState::new(
        mongo.db_name(),
        Arc::new(MongoStore::new(mongo.clone())),
    ));

    if let Err(e) = server::run(state, args.listen).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }

    info!("Server stopped");
    Ok(())
}
