//! Per-file error type for metadata parsing.
//!
//! These errors never abort a run: the aggregator logs them and skips the
//! offending file. Everything above the per-file level uses `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document is not an object, or the object has no project-type key.
    #[error("{path} has no project type entry")]
    MissingProjectType { path: PathBuf },

    #[error("{path}: project '{project_type}' is not an object")]
    NotAnObject { path: PathBuf, project_type: String },

    #[error("{path}: field '{field}' has the wrong type: {source}")]
    Field {
        path: PathBuf,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
