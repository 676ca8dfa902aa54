//! App cards for the "applications by category" page.
//!
//! One card per application directory, plus a placeholder card for any
//! tagged application that lives elsewhere in the tree.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Config;
use crate::export;
use crate::metadata::{self, Metadata};
use crate::models::{AppCard, TagsMap};
use crate::readme;
use crate::scan::METADATA_FILE;

pub const NO_DESCRIPTION: &str = "No description available.";
const APPLICATIONS_DIR: &str = "applications";
const DESCRIPTION_SENTENCES: usize = 2;

pub type AppCards = BTreeMap<String, AppCard>;

/// Split `vendor/app` names. Names without a `/` have no vendor.
pub fn split_vendor(name: &str) -> (String, String) {
    let parts: Vec<&str> = name.split('/').collect();
    if parts.len() > 1 {
        (parts[0].to_string(), parts[1].to_string())
    } else {
        (String::new(), name.to_string())
    }
}

fn placeholder(name: &str) -> AppCard {
    let (vendor, app_title) = split_vendor(name);
    AppCard {
        name: name.to_string(),
        description: NO_DESCRIPTION.to_string(),
        image_url: None,
        vendor,
        app_title,
    }
}

/// Build cards for every application directory, then fill in placeholders
/// for titles from `tags` that have no card yet.
pub fn build_cards(root: &Path, config: &Config, tags: &TagsMap) -> Result<AppCards> {
    let app_root = root.join(APPLICATIONS_DIR);
    let mut cards = AppCards::new();

    if app_root.is_dir() {
        let mut dirs: Vec<_> = std::fs::read_dir(&app_root)
            .with_context(|| format!("Failed to list {}", app_root.display()))?
            .filter_map(|entry| match entry {
                Ok(e) => Some(e.path()),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", app_root.display(), e);
                    None
                }
            })
            .filter(|p| p.is_dir())
            .filter(|p| {
                p.file_name()
                    .is_some_and(|n| !n.to_string_lossy().starts_with('.'))
            })
            .collect();
        dirs.sort();

        for dir in dirs {
            let card = card_for_dir(&dir, root, config);
            cards.insert(card.name.clone(), card);
        }
    } else {
        tracing::warn!("Applications directory not found: {}", app_root.display());
    }

    for name in tags.keys() {
        if !cards.contains_key(name) {
            cards.insert(name.clone(), placeholder(name));
        }
    }

    Ok(cards)
}

fn card_for_dir(dir: &Path, root: &Path, config: &Config) -> AppCard {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    tracing::debug!("Processing app: {}", dir_name);

    let metadata_path = dir.join(METADATA_FILE);
    let metadata: Option<Metadata> = if metadata_path.is_file() {
        match metadata::parse_metadata_file(&metadata_path) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::error!("Failed to parse metadata: {}", e);
                None
            }
        }
    } else {
        None
    };

    let readme_path = readme::find_readme(dir, root);
    let readme_content = readme_path.as_ref().and_then(|p| match std::fs::read_to_string(p) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::error!("Error reading README for {}: {}", dir_name, e);
            None
        }
    });

    let description = metadata
        .as_ref()
        .and_then(|m| m.description.clone())
        .filter(|d| !d.trim().is_empty())
        .or_else(|| {
            readme_content
                .as_deref()
                .and_then(|c| readme::first_sentences(c, DESCRIPTION_SENTENCES))
        })
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let image_url = match (&readme_path, &readme_content) {
        (Some(path), Some(content)) => readme::first_image(content).map(|target| {
            let url = readme::image_url(
                &target,
                path,
                root,
                config.output.image_base_url.as_deref(),
            );
            tracing::debug!("Found image for {}: {}", dir_name, url);
            url
        }),
        _ => None,
    };

    let name = metadata
        .and_then(|m| m.name)
        .unwrap_or(dir_name);
    let (vendor, app_title) = split_vendor(&name);

    AppCard {
        name,
        description,
        image_url,
        vendor,
        app_title,
    }
}

/// Load the tags mapping from disk for a standalone cards run.
///
/// A missing or unreadable tags file only means there are no placeholder
/// cards, so it is logged rather than returned.
pub fn load_tags_or_empty(path: &Path) -> TagsMap {
    match export::read_tags(path) {
        Ok(tags) => tags,
        Err(e) => {
            tracing::error!("Error loading tags data: {:#}", e);
            TagsMap::new()
        }
    }
}

/// Build the cards and write the app-cards file.
pub fn generate_cards(root: &Path, config: &Config, tags: &TagsMap) -> Result<AppCards> {
    let cards = build_cards(root, config, tags)?;
    let path = config.app_cards_path(root);
    export::write_json(&path, &cards)?;
    tracing::info!(
        "Generated {} with {} applications",
        path.display(),
        cards.len()
    );
    Ok(cards)
}
