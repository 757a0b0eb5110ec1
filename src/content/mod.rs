//! Educational content catalog
//!
//! Two domain families share one shape: an introduction document, a workflow
//! document, and a collection of records (algorithms for QML, protocols for
//! QKD) grouped by `domain_slug`.

pub mod service;

pub use service::ContentService;

use serde::Serialize;

use crate::db::schemas::{
    QKD_INTRODUCTION_COLLECTION, QKD_PROTOCOLS_COLLECTION, QKD_WORKFLOW_COLLECTION,
    QML_ALGORITHMS_COLLECTION, QML_INTRODUCTION_COLLECTION, QML_WORKFLOW_COLLECTION,
};

/// A content domain family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainFamily {
    /// Quantum machine learning
    Qml,
    /// Quantum key distribution
    Qkd,
}

impl DomainFamily {
    /// Every supported family, in display order
    pub const ALL: [DomainFamily; 2] = [DomainFamily::Qml, DomainFamily::Qkd];

    /// Parse the lowercase path segment (`qml`, `qkd`)
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "qml" => Some(Self::Qml),
            "qkd" => Some(Self::Qkd),
            _ => None,
        }
    }

    /// Uppercase label used in the status endpoint and messages
    pub fn label(self) -> &'static str {
        match self {
            Self::Qml => "QML",
            Self::Qkd => "QKD",
        }
    }

    pub fn introduction_collection(self) -> &'static str {
        match self {
            Self::Qml => QML_INTRODUCTION_COLLECTION,
            Self::Qkd => QKD_INTRODUCTION_COLLECTION,
        }
    }

    pub fn workflow_collection(self) -> &'static str {
        match self {
            Self::Qml => QML_WORKFLOW_COLLECTION,
            Self::Qkd => QKD_WORKFLOW_COLLECTION,
        }
    }

    pub fn records_collection(self) -> &'static str {
        match self {
            Self::Qml => QML_ALGORITHMS_COLLECTION,
            Self::Qkd => QKD_PROTOCOLS_COLLECTION,
        }
    }

    /// Plural record name: the domain detail key and the record path segment
    pub fn records_key(self) -> &'static str {
        match self {
            Self::Qml => "algorithms",
            Self::Qkd => "protocols",
        }
    }

    /// Singular record name for messages
    pub fn record_noun(self) -> &'static str {
        match self {
            Self::Qml => "Algorithm",
            Self::Qkd => "Protocol",
        }
    }
}

/// `{slug, title}` pair derived from a `domain_slug`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DomainSummary {
    pub slug: String,
    pub title: String,
}

impl DomainSummary {
    pub fn from_slug(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let title = slug_title(&slug);
        Self { slug, title }
    }
}

/// Human title for a slug: hyphens become spaces, then each alphabetic run
/// starts upper-case and continues lower-case.
///
/// `"variational-circuits"` → `"Variational Circuits"`.
pub fn slug_title(slug: &str) -> String {
    let mut title = String::with_capacity(slug.len());
    let mut in_word = false;

    for c in slug.chars() {
        let c = if c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if in_word {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(c);
            in_word = false;
        }
    }

    title
}
