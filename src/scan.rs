//! Metadata file discovery.
//!
//! Walks each component directory (e.g. `applications/`) under the repo root
//! and returns every `metadata.json` that survives the exclusion rules,
//! sorted by path so downstream output is deterministic.

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;

pub const METADATA_FILE: &str = "metadata.json";

/// A discovered metadata file and the component type it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFile {
    pub component_type: String,
    pub path: PathBuf,
}

pub fn find_metadata_files(root: &Path, config: &Config) -> Result<Vec<MetadataFile>> {
    let mut default_excludes = vec!["**/.git/**".to_string(), "**/node_modules/**".to_string()];
    default_excludes.extend(config.scan.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut files = Vec::new();

    for component_type in &config.paths.component_types {
        let component_dir = root.join(component_type);
        if !component_dir.is_dir() {
            tracing::warn!("Component directory not found: {}", component_dir.display());
            continue;
        }

        let walker = WalkDir::new(&component_dir)
            .follow_links(config.scan.follow_symlinks)
            .sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || entry.file_name() != METADATA_FILE {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&component_dir).unwrap_or(path);
            let rel_str = relative.to_string_lossy().replace('\\', "/");

            if exclude_set.is_match(&rel_str) {
                continue;
            }

            // Repo-relative, so the checkout location can't trigger a match.
            let from_root = path.strip_prefix(root).unwrap_or(path);
            let path_str = from_root.to_string_lossy();
            if let Some(hit) = config
                .scan
                .exclude_substrings
                .iter()
                .find(|s| path_str.contains(s.as_str()))
            {
                tracing::debug!("Excluded {} (matches '{}')", path.display(), hit);
                continue;
            }

            files.push(MetadataFile {
                component_type: component_type.clone(),
                path: path.to_path_buf(),
            });
        }
    }

    // Sort for deterministic ordering
    files.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
