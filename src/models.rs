//! Core data types for the catalog pipeline.
//!
//! Records are read from `metadata.json` files. Aggregates are derived from
//! records. The `Serialize` types are written verbatim to the site's
//! `_data` directory.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Application title to its ordered tag list, as written to the tags file.
pub type TagsMap = BTreeMap<String, Vec<String>>;

/// One application found under a component directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRecord {
    pub title: String,
    /// Ordered: main category, subcategory, then related tags.
    pub tags: Vec<String>,
    pub component_type: String,
    /// Repo-relative README path of the application page.
    pub page_path: String,
    pub url: String,
}

impl AppRecord {
    /// The main category, if the first tag is present and non-blank.
    pub fn main_category(&self) -> Option<&str> {
        self.tags
            .first()
            .map(|t| t.as_str())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn subcategory(&self) -> Option<&str> {
        self.tags.get(1).map(|t| t.as_str())
    }

    pub fn related_tags(&self) -> &[String] {
        self.tags.get(2..).unwrap_or(&[])
    }
}

/// Everything observed for one main category during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryAggregate {
    pub subcategories: BTreeSet<String>,
    pub related_tags: BTreeSet<String>,
    pub count: usize,
}

/// A `{name, query}` pair used by the front-end to build tag searches.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagLink {
    pub name: String,
    pub query: String,
}

/// One row of the tag-categories file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagCategory {
    pub title: String,
    pub icon: String,
    pub is_primary: bool,
    pub count: usize,
    pub subcategories: Vec<TagLink>,
    pub related_tags: Vec<TagLink>,
}

/// One entry of the app-cards file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AppCard {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub vendor: String,
    pub app_title: String,
}
