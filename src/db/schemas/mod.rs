//! Collection names and typed schemas
//!
//! Content collections are schemaless and filled by the content pipeline;
//! only the progress collection has a shape owned by this service.

mod progress;

pub use progress::{ProgressDoc, USER_PROGRESS_COLLECTION};

pub const QML_INTRODUCTION_COLLECTION: &str = "qml_introduction";
pub const QML_WORKFLOW_COLLECTION: &str = "qml_workflow";
pub const QML_ALGORITHMS_COLLECTION: &str = "qml_algorithms";

pub const QKD_INTRODUCTION_COLLECTION: &str = "qkd_introduction";
pub const QKD_WORKFLOW_COLLECTION: &str = "qkd_workflow";
pub const QKD_PROTOCOLS_COLLECTION: &str = "qkd_protocols";
