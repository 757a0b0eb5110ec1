//! Quantum Learning API
//!
//! Backend for the QML & QKD learning platform. Serves educational content
//! straight out of MongoDB and records learner progress.
//!
//! ## Modules
//!
//! - **content**: introductions, workflows, domain listings and algorithm /
//!   protocol records for both domain families
//! - **progress**: upsert of per-slug learning progress
//! - **db**: the `DocumentStore` seam with MongoDB and in-memory backends
//! - **routes** / **server**: hyper HTTP surface

pub mod config;
pub mod content;
pub mod db;
pub mod logging;
pub mod progress;
pub mod routes;
pub mod server;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{ApiError, Result};
