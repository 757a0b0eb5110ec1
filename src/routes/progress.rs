//! Progress endpoint

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};

use super::json_response;
use crate::progress::ProgressUpdate;
use crate::server::AppState;
use crate::types::Result;

/// POST /api/me/progress
///
/// The body is fully validated before the store is touched.
pub async fn update_progress(state: &AppState, body: &[u8]) -> Result<Response<Full<Bytes>>> {
    let update = ProgressUpdate::from_json(body)?;
    let ack = state.progress.update(update).await?;
    Ok(json_response(StatusCode::OK, &ack))
}
