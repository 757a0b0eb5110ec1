//! Content endpoints for both domain families

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};

use super::json_response;
use crate::content::DomainFamily;
use crate::server::AppState;
use crate::types::Result;

/// GET /api/{family}/introduction
pub async fn introduction(state: &AppState, family: DomainFamily) -> Result<Response<Full<Bytes>>> {
    let document = state.content.introduction(family).await?;
    Ok(json_response(StatusCode::OK, &document))
}

/// GET /api/{family}/workflow
pub async fn workflow(state: &AppState, family: DomainFamily) -> Result<Response<Full<Bytes>>> {
    let document = state.content.workflow(family).await?;
    Ok(json_response(StatusCode::OK, &document))
}

/// GET /api/{family}/domains
pub async fn domains(state: &AppState, family: DomainFamily) -> Result<Response<Full<Bytes>>> {
    let domains = state.content.list_domains(family).await?;
    Ok(json_response(StatusCode::OK, &domains))
}

/// GET /api/{family}/domains/{domain_slug}
pub async fn domain(
    state: &AppState,
    family: DomainFamily,
    domain_slug: &str,
) -> Result<Response<Full<Bytes>>> {
    let detail = state.content.domain(family, domain_slug).await?;
    Ok(json_response(StatusCode::OK, &detail))
}

/// GET /api/qml/algorithms/{slug} and /api/qkd/protocols/{slug}
pub async fn record(
    state: &AppState,
    family: DomainFamily,
    slug: &str,
) -> Result<Response<Full<Bytes>>> {
    let record = state.content.record(family, slug).await?;
    Ok(json_response(StatusCode::OK, &record))
}
