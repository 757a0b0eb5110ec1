//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo, one task per accepted connection.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::content::ContentService;
use crate::db::DocumentStore;
use crate::logging::AccessEvent;
use crate::progress::ProgressService;
use crate::routes::{self, Route};
use crate::types::{ApiError, Result};

/// Shared application state
///
/// Built once at startup; the store handle inside is shared by every
/// connection task.
pub struct AppState {
    /// Database namespace reported by the status endpoint
    pub db_name: String,
    /// Content reads for both domain families
    pub content: ContentService,
    /// Progress writes
    pub progress: ProgressService,
}

impl AppState {
    pub fn new(db_name: impl Into<String>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            db_name: db_name.into(),
            content: ContentService::new(Arc::clone(&store)),
            progress: ProgressService::new(store),
        }
    }
}

/// Start the HTTP server and serve until Ctrl-C
pub async fn run(state: Arc<AppState>, listen: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(listen).await?;
    info!("Listening on {}", listen);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, addr)) => {
                    let state = Arc::clone(&state);
                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);

                        let service = service_fn(move |req| {
                            let state = Arc::clone(&state);
                            async move { Ok::<_, Infallible>(handle_request(state, Some(addr), req).await) }
                        });

                        if let Err(err) = http1::Builder::new()
                            .title_case_headers(true)
                            .serve_connection(io, service)
                            .await
                        {
                            debug!("Error serving connection from {}: {:?}", addr, err);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {:?}", e);
                }
            },
            _ = &mut shutdown => {
                info!("Shutdown signal received, no longer accepting connections");
                break;
            }
        }
    }

    Ok(())
}

/// Route one request and render its response.
///
/// Generic over the body so tests can drive it without a socket.
pub async fn handle_request<B>(
    state: Arc<AppState>,
    peer: Option<SocketAddr>,
    req: Request<B>,
) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let mut access = AccessEvent::start(req.method().clone(), req.uri().path());
    if let Some(peer) = peer {
        access = access.with_peer(peer);
    }

    let response = if *req.method() == Method::OPTIONS {
        routes::preflight_response()
    } else {
        match dispatch(&state, req).await {
            Ok(response) => response,
            Err(err) => {
                if err.status_code().is_server_error() {
                    error!(path = %access.path, "Request failed: {}", err);
                }
                routes::error_response(&err)
            }
        }
    };

    access.finish(response.status());
    response
}

async fn dispatch<B>(state: &AppState, req: Request<B>) -> Result<Response<Full<Bytes>>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let route = Route::resolve(req.method(), req.uri().path())?;

    match route {
        Route::Status => Ok(routes::status(state)),
        Route::Health => Ok(routes::health_check()),
        Route::Version => Ok(routes::version_info()),
        Route::Introduction(family) => routes::content::introduction(state, family).await,
        Route::Workflow(family) => routes::content::workflow(state, family).await,
        Route::Domains(family) => routes::content::domains(state, family).await,
        Route::Domain(family, slug) => routes::content::domain(state, family, &slug).await,
        Route::Record(family, slug) => routes::content::record(state, family, &slug).await,
        Route::UpdateProgress => {
            let body = read_body(req).await?;
            routes::update_progress(state, &body).await
        }
    }
}

async fn read_body<B>(req: Request<B>) -> Result<Bytes>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    req.into_body()
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| ApiError::InvalidInput(format!("Failed to read request body: {}", e)))
}
