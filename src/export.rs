//! JSON artifact output for the static site.
//!
//! Every file is pretty-printed with two-space indentation and a trailing
//! newline. All maps are `BTreeMap`s, so the same inputs always produce the
//! same bytes.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::models::TagsMap;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Write `value` to `path`, creating parent directories as needed.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = to_json(value)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Read a tags file previously written by the tags generator.
pub fn read_tags(path: &Path) -> Result<TagsMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tags file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse tags file: {}", path.display()))
}
