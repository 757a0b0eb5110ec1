//! Configuration for the learning API
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;

/// Default storage namespace when DB_NAME is not set
pub const DEFAULT_DB_NAME: &str = "quantum_learning";

/// Quantum Learning Platform API
#[derive(Parser, Debug, Clone)]
#[command(name = "quantum-learning-api")]
#[command(about = "Backend API for the QML & QKD learning platform")]
pub struct Args {
    /// MongoDB connection URI (required)
    #[arg(long, env = "MONGO_URI")]
    pub mongo_uri: Option<String>,

    /// MongoDB database name
    #[arg(long, env = "DB_NAME", default_value = DEFAULT_DB_NAME)]
    pub db_name: String,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8000")]
    pub listen: SocketAddr,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,
}

impl Args {
    /// Connection URI, present once `validate` has passed
    pub fn mongo_uri(&self) -> &str {
        self.mongo_uri.as_deref().unwrap_or_default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        match self.mongo_uri.as_deref().map(str::trim) {
            None | Some("") => {
                return Err("MONGO_URI environment variable not set".to_string());
            }
            Some(_) => {}
        }

        if self.db_name.trim().is_empty() {
            return Err("DB_NAME must not be empty".to_string());
        }

        Ok(())
    }
}
