//! Request access logging
//!
//! One structured event per handled request, emitted through `tracing` so it
//! lands in the same JSON stream as everything else when `LOG_JSON` is set.

use hyper::{Method, StatusCode};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{info, warn};

/// Access event for a single request
#[derive(Debug, Clone)]
pub struct AccessEvent {
    /// HTTP method
    pub method: Method,
    /// Request path (without query string)
    pub path: String,
    /// Remote peer, when known
    pub peer: Option<SocketAddr>,
    started: Instant,
}

impl AccessEvent {
    /// Start timing a request
    pub fn start(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            peer: None,
            started: Instant::now(),
        }
    }

    /// Set the remote peer
    pub fn with_peer(mut self, peer: SocketAddr) -> Self {
        self.peer = Some(peer);
        self
    }

    /// Milliseconds since `start`
    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Emit the event with the final status
    pub fn finish(self, status: StatusCode) {
        let duration_ms = self.elapsed_ms();
        let peer = self
            .peer
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());

        if status.is_server_error() {
            warn!(
                method = %self.method,
                path = %self.path,
                status = status.as_u16(),
                duration_ms,
                peer = %peer,
                "request failed"
            );
        } else {
            info!(
                method = %self.method,
                path = %self.path,
                status = status.as_u16(),
                duration_ms,
                peer = %peer,
                "request handled"
            );
        }
    }
}
