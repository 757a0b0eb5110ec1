//! HTTP routes
//!
//! | Method | Path | Route |
//! |---|---|---|
//! | GET | `/` | service status |
//! | GET | `/health`, `/healthz` | liveness |
//! | GET | `/version` | build info |
//! | GET | `/api/{qml,qkd}/introduction` | introduction document |
//! | GET | `/api/{qml,qkd}/workflow` | workflow document |
//! | GET | `/api/{qml,qkd}/domains` | domain list |
//! | GET | `/api/{qml,qkd}/domains/{domain_slug}` | domain detail |
//! | GET | `/api/qml/algorithms/{slug}` | single algorithm |
//! | GET | `/api/qkd/protocols/{slug}` | single protocol |
//! | POST | `/api/me/progress` | progress upsert |

pub mod content;
pub mod health;
pub mod progress;
pub mod response;

pub use health::{health_check, status, version_info};
pub use progress::update_progress;
pub use response::{error_response, json_response, preflight_response};

use hyper::Method;

use crate::content::DomainFamily;
use crate::types::{ApiError, Result};

/// A matched route with its decoded path parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Status,
    Health,
    Version,
    Introduction(DomainFamily),
    Workflow(DomainFamily),
    Domains(DomainFamily),
    Domain(DomainFamily, String),
    Record(DomainFamily, String),
    UpdateProgress,
}

impl Route {
    /// Match a request line against the routing table.
    ///
    /// A known path requested with another method is `MethodNotAllowed`;
    /// anything else unmatched is `NotFound`.
    pub fn resolve(method: &Method, path: &str) -> Result<Self> {
        match match_path(path) {
            Some((route, allowed)) if *method == allowed => Ok(route),
            Some(_) => Err(ApiError::MethodNotAllowed),
            None => Err(ApiError::NotFound("Not Found".to_string())),
        }
    }
}

fn match_path(path: &str) -> Option<(Route, Method)> {
    match path {
        "/" => return Some((Route::Status, Method::GET)),
        "/health" | "/healthz" => return Some((Route::Health, Method::GET)),
        "/version" => return Some((Route::Version, Method::GET)),
        "/api/me/progress" => return Some((Route::UpdateProgress, Method::POST)),
        _ => {}
    }

    let rest = path.strip_prefix("/api/")?;
    let segments: Vec<&str> = rest.split('/').collect();
    let (family_segment, tail) = segments.split_first()?;
    let family = DomainFamily::from_segment(family_segment)?;

    let route = match tail {
        ["introduction"] => Route::Introduction(family),
        ["workflow"] => Route::Workflow(family),
        ["domains"] => Route::Domains(family),
        ["domains", slug] => Route::Domain(family, path_param(slug)?),
        [kind, slug] if *kind == family.records_key() => Route::Record(family, path_param(slug)?),
        _ => return None,
    };

    Some((route, Method::GET))
}

/// Percent-decode a single path segment; empty or invalid segments don't match
fn path_param(segment: &str) -> Option<String> {
    if segment.is_empty() {
        return None;
    }
    urlencoding::decode(segment).ok().map(|s| s.into_owned())
}
