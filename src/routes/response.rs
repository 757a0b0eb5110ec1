//! JSON response builders
//!
//! Every response carries the permissive CORS origin header.

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE,
};
use hyper::{Response, StatusCode};
use serde::Serialize;
use tracing::error;

use crate::types::ApiError;

/// Error body shape for all non-2xx responses
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
    code: &'static str,
}

fn build(status: StatusCode, body: Bytes, content_type: Option<&'static str>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    if let Some(content_type) = content_type {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

/// Serialize `body` as a JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(bytes) => build(status, Bytes::from(bytes), Some("application/json")),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            error_response(&ApiError::Internal(format!("serialization failed: {}", e)))
        }
    }
}

/// Render an error as `{detail, code}` with its status
pub fn error_response(err: &ApiError) -> Response<Full<Bytes>> {
    let body = ErrorBody {
        detail: err.public_message(),
        code: err.code(),
    };
    let bytes = serde_json::to_vec(&body)
        .unwrap_or_else(|_| br#"{"detail":"Internal server error","code":"internal_error"}"#.to_vec());

    let mut response = build(err.status_code(), Bytes::from(bytes), Some("application/json"));
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// CORS preflight response
pub fn preflight_response() -> Response<Full<Bytes>> {
    let mut response = build(StatusCode::OK, Bytes::new(), None);
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    response
}
