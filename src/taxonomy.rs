//! Tag taxonomy aggregation.
//!
//! Every application's tag list is read positionally. The first tag is the
//! main category, the second the subcategory, and the rest are related tags.
//! The aggregator groups these into a two-level taxonomy. It counts
//! membership per category using a small alias table and produces the rows
//! of the tag-categories file.
//!
//! ```text
//! metadata.json ──▶ AppRecord ──▶ Taxonomy ──▶ Vec<TagCategory>
//!                                    │
//!                                    └──▶ TagsMap (title → tags)
//! ```

use anyhow::Result;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::config::{CategoryEntry, Config};
use crate::export;
use crate::metadata;
use crate::models::{AppRecord, CategoryAggregate, TagCategory, TagLink, TagsMap};
use crate::scan;

const UNTITLED: &str = "Untitled";
const FALLBACK_ICON: &str = "label";

/// Case-insensitive lookup over the curated category entries.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    entries: HashMap<String, CategoryEntry>,
}

impl CategoryTable {
    pub fn new(entries: &[CategoryEntry]) -> Self {
        let entries = entries
            .iter()
            .map(|e| {
                let mut entry = e.clone();
                entry.aliases = e
                    .aliases
                    .iter()
                    .map(|a| a.trim().to_lowercase())
                    .filter(|a| !a.is_empty())
                    .collect();
                (e.key.to_lowercase(), entry)
            })
            .collect();
        Self { entries }
    }

    pub fn lookup(&self, category: &str) -> Option<&CategoryEntry> {
        self.entries.get(&category.to_lowercase())
    }

    /// The configured spelling of a curated category, or `category` itself.
    pub fn canonical<'a>(&'a self, category: &'a str) -> &'a str {
        self.lookup(category).map_or(category, |e| e.key.as_str())
    }

    pub fn is_primary(&self, category: &str) -> bool {
        self.lookup(category).is_some()
    }

    pub fn title(&self, category: &str) -> String {
        match self.lookup(category) {
            Some(entry) => entry.title.clone(),
            None => title_case(category),
        }
    }

    pub fn icon(&self, category: &str) -> String {
        self.lookup(category)
            .map(|e| e.icon.clone())
            .unwrap_or_else(|| FALLBACK_ICON.to_string())
    }

    /// Whether any of `tags` places an application in `category`.
    ///
    /// A tag matches on equality with the category name, equality with an
    /// alias, or when it contains an alias. Comparison is case-insensitive.
    pub fn matches(&self, category: &str, tags: &[String]) -> bool {
        let category = category.to_lowercase();
        let aliases: &[String] = self
            .lookup(&category)
            .map(|e| e.aliases.as_slice())
            .unwrap_or(&[]);

        tags.iter().any(|tag| {
            let tag = tag.to_lowercase();
            tag == category || aliases.iter().any(|a| tag == *a || tag.contains(a.as_str()))
        })
    }
}

/// Capitalize the first letter of every word and lowercase the rest.
///
/// A word starts at any letter that does not follow another letter, so
/// `"healthcare AI"` becomes `"Healthcare Ai"` and `"3d video"` becomes
/// `"3D Video"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

/// Counters for one discovery + parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub files_found: usize,
    pub skipped: usize,
    pub untagged: usize,
}

/// Discover and parse every metadata file under the configured components.
///
/// Files that fail to parse are logged and skipped. Files without tags are
/// dropped silently. Neither aborts the run.
pub fn collect_records(root: &Path, config: &Config) -> Result<(Vec<AppRecord>, ScanReport)> {
    let files = scan::find_metadata_files(root, config)?;
    let mut report = ScanReport {
        files_found: files.len(),
        ..ScanReport::default()
    };
    let mut records = Vec::new();

    for file in files {
        let metadata = match metadata::parse_metadata_file(&file.path) {
            Ok(m) => m,
            Err(e) => {
                tracing::error!("Failed to process metadata: {}", e);
                report.skipped += 1;
                continue;
            }
        };

        if metadata.tags.is_empty() {
            report.untagged += 1;
            continue;
        }

        let dir = file.path.parent().unwrap_or(root);
        let rel_dir = dir.strip_prefix(root).unwrap_or(dir);
        let page_path = format!("{}/README.md", rel_dir.to_string_lossy().replace('\\', "/"));

        records.push(AppRecord {
            title: metadata.name.unwrap_or_else(|| UNTITLED.to_string()),
            tags: metadata.tags,
            component_type: file.component_type,
            url: format!("./{}", page_path),
            page_path,
        });
    }

    Ok((records, report))
}

/// The aggregated view of all records in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    pub tags: TagsMap,
    pub categories: BTreeMap<String, CategoryAggregate>,
}

/// Group records by main category and count alias-matched membership.
///
/// Curated categories group under their configured key whatever the case of
/// the tag. Records without a main category do not appear anywhere in the result.
pub fn aggregate(records: &[AppRecord], table: &CategoryTable) -> Taxonomy {
    let mut taxonomy = Taxonomy::default();
    let categorized: Vec<&AppRecord> = records
        .iter()
        .filter(|r| r.main_category().is_some())
        .collect();

    for record in &categorized {
        let Some(main) = record.main_category() else {
            continue;
        };
        taxonomy
            .tags
            .insert(record.title.clone(), record.tags.clone());

        let agg = taxonomy
            .categories
            .entry(table.canonical(main).to_string())
            .or_default();
        if let Some(sub) = record.subcategory() {
            agg.subcategories.insert(sub.to_string());
        }
        agg.related_tags
            .extend(record.related_tags().iter().cloned());
    }

    for (category, agg) in taxonomy.categories.iter_mut() {
        agg.count = categorized
            .iter()
            .filter(|r| table.matches(category, &r.tags))
            .count();
    }

    taxonomy
}

impl Taxonomy {
    /// Build the tag-categories rows.
    ///
    /// Rows are ordered primary first, then by title. A row is kept only if
    /// it is primary or has at least one subcategory. Related tags are
    /// sorted and capped at `related_limit`.
    pub fn tag_categories(&self, table: &CategoryTable, related_limit: usize) -> Vec<TagCategory> {
        let mut rows: Vec<TagCategory> = self
            .categories
            .iter()
            .map(|(category, agg)| TagCategory {
                title: table.title(category),
                icon: table.icon(category),
                is_primary: table.is_primary(category),
                count: agg.count,
                subcategories: agg
                    .subcategories
                    .iter()
                    .map(|sub| link(sub, category))
                    .collect(),
                related_tags: agg
                    .related_tags
                    .iter()
                    .take(related_limit)
                    .map(|tag| link(tag, category))
                    .collect(),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.is_primary
                .cmp(&a.is_primary)
                .then_with(|| a.title.cmp(&b.title))
        });
        rows.retain(|row| row.is_primary || !row.subcategories.is_empty());
        rows
    }
}

fn link(tag: &str, category: &str) -> TagLink {
    TagLink {
        name: title_case(tag),
        query: format!("{} {}", tag, category),
    }
}

/// Result of a tags run, for the CLI summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagsReport {
    pub scan: ScanReport,
    pub applications: usize,
    pub categories: usize,
}

/// Scan, aggregate and build the category rows without writing anything.
pub fn build(root: &Path, config: &Config) -> Result<(Taxonomy, Vec<TagCategory>, ScanReport)> {
    let (records, scan_report) = collect_records(root, config)?;
    let table = CategoryTable::new(&config.categories);
    let taxonomy = aggregate(&records, &table);
    let rows = taxonomy.tag_categories(&table, config.output.related_tag_limit);
    Ok((taxonomy, rows, scan_report))
}

/// Run the full tags pipeline and write the tags and tag-categories files.
pub fn generate_tags(root: &Path, config: &Config) -> Result<(Taxonomy, TagsReport)> {
    let (taxonomy, rows, scan_report) = build(root, config)?;

    let tags_path = config.tags_path(root);
    export::write_json(&tags_path, &taxonomy.tags)?;
    tracing::info!(
        "Generated {} with {} tagged applications",
        tags_path.display(),
        taxonomy.tags.len()
    );

    let categories_path = config.categories_path(root);
    export::write_json(&categories_path, &rows)?;
    tracing::info!(
        "Generated {} with {} categories",
        categories_path.display(),
        rows.len()
    );

    let report = TagsReport {
        scan: scan_report,
        applications: taxonomy.tags.len(),
        categories: rows.len(),
    };
    Ok((taxonomy, report))
}
