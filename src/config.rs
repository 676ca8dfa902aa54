use anyhow::{Context, Result};
use globset::Glob;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            scan: ScanConfig::default(),
            output: OutputConfig::default(),
            categories: default_categories(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_component_types")]
    pub component_types: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: None,
            data_dir: default_data_dir(),
            component_types: default_component_types(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("doc/website/docs/_data")
}
fn default_component_types() -> Vec<String> {
    vec!["applications".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    /// Any metadata path containing one of these substrings is skipped.
    #[serde(default = "default_exclude_substrings")]
    pub exclude_substrings: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_substrings: default_exclude_substrings(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_exclude_substrings() -> Vec<String> {
    ["{{", "data_writer", "operator", "xr_hello_holoscan"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_tags_file")]
    pub tags_file: String,
    #[serde(default = "default_categories_file")]
    pub categories_file: String,
    #[serde(default = "default_app_cards_file")]
    pub app_cards_file: String,
    #[serde(default = "default_related_tag_limit")]
    pub related_tag_limit: usize,
    #[serde(default)]
    pub image_base_url: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            tags_file: default_tags_file(),
            categories_file: default_categories_file(),
            app_cards_file: default_app_cards_file(),
            related_tag_limit: default_related_tag_limit(),
            image_base_url: None,
        }
    }
}

fn default_tags_file() -> String {
    "tmp_tags.json".to_string()
}
fn default_categories_file() -> String {
    "tmp_tag-categories.json".to_string()
}
fn default_app_cards_file() -> String {
    "app_cards.json".to_string()
}
fn default_related_tag_limit() -> usize {
    6
}

/// A manually curated main category. Categories listed here are "primary".
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub key: String,
    pub title: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

fn default_icon() -> String {
    "label".to_string()
}

fn entry(key: &str, title: &str, icon: &str, aliases: &[&str]) -> CategoryEntry {
    CategoryEntry {
        key: key.to_string(),
        title: title.to_string(),
        icon: icon.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn default_categories() -> Vec<CategoryEntry> {
    vec![
        entry(
            "healthcare AI",
            "Healthcare AI",
            "medical_services",
            &["healthcare", "medical"],
        ),
        entry(
            "computer vision and perception",
            "Computer Vision",
            "visibility",
            &["computer vision", "perception"],
        ),
        entry(
            "natural language and conversational AI",
            "NLP & Conversational",
            "chat",
            &["natural language", "conversational", "nlp"],
        ),
        entry(
            "networking and distributed computing",
            "Networking",
            "hub",
            &["networking", "distributed computing"],
        ),
        entry(
            "signal processing",
            "Signal Processing",
            "radar",
            &["signal processing", "radar"],
        ),
        entry(
            "tools and other specialized applications",
            "Specialized Tools",
            "tune",
            &[],
        ),
        entry(
            "extended reality",
            "Extended Reality",
            "view_in_ar",
            &["extended reality", "mixed reality", "augmented reality", "virtual reality"],
        ),
        entry(
            "visualization",
            "Visualization",
            "auto_awesome_motion",
            &["visualization"],
        ),
    ]
}

impl Config {
    /// Output directory for every generated artifact.
    pub fn data_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.data_dir)
    }

    pub fn tags_path(&self, root: &Path) -> PathBuf {
        self.data_dir(root).join(&self.output.tags_file)
    }

    pub fn categories_path(&self, root: &Path) -> PathBuf {
        self.data_dir(root).join(&self.output.categories_file)
    }

    pub fn app_cards_path(&self, root: &Path) -> PathBuf {
        self.data_dir(root).join(&self.output.app_cards_file)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load the config at `path`, or fall back to built-in defaults when the
/// file does not exist. A file that exists but fails to parse is an error.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::info!(
            "No config file at {}, using built-in defaults",
            path.display()
        );
        Ok(Config::default())
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.output.related_tag_limit == 0 {
        anyhow::bail!("output.related_tag_limit must be > 0");
    }

    if config.paths.component_types.is_empty() {
        anyhow::bail!("paths.component_types must not be empty");
    }

    for (field, value) in [
        ("output.tags_file", &config.output.tags_file),
        ("output.categories_file", &config.output.categories_file),
        ("output.app_cards_file", &config.output.app_cards_file),
    ] {
        if value.trim().is_empty() {
            anyhow::bail!("{} must not be empty", field);
        }
    }

    let mut seen = HashSet::new();
    for category in &config.categories {
        if category.key.trim().is_empty() {
            anyhow::bail!("categories: key must not be empty");
        }
        if !seen.insert(category.key.to_lowercase()) {
            anyhow::bail!("categories: duplicate key '{}'", category.key);
        }
    }

    for pattern in &config.scan.exclude_globs {
        Glob::new(pattern)
            .with_context(|| format!("scan.exclude_globs: invalid glob '{}'", pattern))?;
    }

    Ok(())
}
