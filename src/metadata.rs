//! `metadata.json` parsing.
//!
//! A metadata file is a single-entry object keyed by project type:
//!
//! ```json
//! { "application": { "name": "Endoscopy Tool Tracking", "tags": ["healthcare AI", "video"] } }
//! ```
//!
//! The first key in file order is the project type. Unknown fields are ignored.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::MetadataError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub project_type: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

pub fn parse_metadata_file(path: &Path) -> Result<Metadata, MetadataError> {
    let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_metadata(path, &content)
}

pub fn parse_metadata(path: &Path, content: &str) -> Result<Metadata, MetadataError> {
    let value: Value = serde_json::from_str(content).map_err(|source| MetadataError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let (project_type, body) = value
        .as_object()
        .and_then(|obj| obj.iter().next())
        .ok_or_else(|| MetadataError::MissingProjectType {
            path: path.to_path_buf(),
        })?;

    let body = body
        .as_object()
        .ok_or_else(|| MetadataError::NotAnObject {
            path: path.to_path_buf(),
            project_type: project_type.clone(),
        })?;

    Ok(Metadata {
        project_type: project_type.clone(),
        name: field(path, body, "name")?,
        description: field(path, body, "description")?,
        tags: field::<Vec<String>>(path, body, "tags")?.unwrap_or_default(),
    })
}

/// Read an optional field. `null` is treated like a missing field.
fn field<T: DeserializeOwned>(
    path: &Path,
    body: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<T>, MetadataError> {
    match body.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|source| MetadataError::Field {
                path: path.to_path_buf(),
                field: name,
                source,
            }),
    }
}
