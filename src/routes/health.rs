//! Status and health endpoints
//!
//! None of these touch storage:
//! - `/` reports the service, its database namespace and the content modules
//! - `/health`, `/healthz` are liveness probes
//! - `/version` reports build information for deployment verification

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::json_response;
use crate::content::DomainFamily;
use crate::server::AppState;

/// Body of `GET /`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    /// Configured database name
    pub database: String,
    /// Supported domain families
    pub modules: Vec<&'static str>,
}

impl StatusResponse {
    pub fn running(database: &str) -> Self {
        Self {
            status: "running",
            database: database.to_string(),
            modules: DomainFamily::ALL.iter().map(|f| f.label()).collect(),
        }
    }
}

/// Handle the root status endpoint (/)
pub fn status(state: &AppState) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &StatusResponse::running(&state.db_name))
}

/// Liveness body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: &'static str,
    pub timestamp: String,
}

/// Handle liveness probe (/health, /healthz)
pub fn health_check() -> Response<Full<Bytes>> {
    let response = HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    json_response(StatusCode::OK, &response)
}

/// Version information for deployment verification
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    /// Cargo package version
    pub version: &'static str,
    /// Git commit hash (short)
    pub commit: &'static str,
    /// Git commit hash (full)
    pub commit_full: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Service name
    pub service: &'static str,
}

/// Handle version endpoint (/version)
pub fn version_info() -> Response<Full<Bytes>> {
    let response = VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
        commit_full: option_env!("GIT_COMMIT_FULL").unwrap_or("unknown"),
        build_time: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        service: env!("CARGO_PKG_NAME"),
    };
    json_response(StatusCode::OK, &response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body() {
        let body = serde_json::to_value(StatusResponse::running("quantum_learning")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": "running",
                "database": "quantum_learning",
                "modules": ["QML", "QKD"],
            })
        );
    }

    #[test]
    fn test_version_names_service() {
        let response = version_info();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
