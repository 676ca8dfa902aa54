//! # Catalog CLI (`catalog`)
//!
//! Generates the JSON data files behind the documentation site's tag
//! sidebar and application cards.
//!
//! ## Usage
//!
//! ```bash
//! catalog [--config ./config/catalog.toml] [--root <repo>] [command]
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `catalog build` | Tags, tag categories and app cards (default) |
//! | `catalog tags` | Tags and tag categories |
//! | `catalog cards` | App cards, using the tags file on disk |
//! | `catalog categories` | Print the category table without writing files |
//!
//! Logging goes to stderr and honours `RUST_LOG` (default `info`).

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use docs_catalog::config::{self, Config};
use docs_catalog::models::TagsMap;
use docs_catalog::{cards, repo, summary, taxonomy};

/// Pre-compute the application catalog for the documentation site.
///
/// Scans `metadata.json` and `README.md` files under the repository's
/// application directories and writes JSON into the site's `_data` directory.
#[derive(Parser)]
#[command(name = "catalog", version)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Optional: built-in defaults are used when the file does not exist.
    #[arg(long, global = true, default_value = "./config/catalog.toml")]
    config: PathBuf,

    /// Repository root. Defaults to `paths.root`, then the enclosing Git repository.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate tags, tag categories and app cards.
    Build,

    /// Generate the tags file and the tag-categories file.
    Tags,

    /// Generate the app-cards file.
    ///
    /// Placeholder cards are added for every application listed in the
    /// existing tags file.
    Cards,

    /// Print the category table to stdout without writing any files.
    Categories,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;
    let root = repo::resolve_root(cli.root.as_deref(), &cfg)?;
    tracing::info!("Repository root: {}", root.display());

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => {
            let tags = run_tags(&root, &cfg)?;
            run_cards(&root, &cfg, &tags)?;
        }
        Commands::Tags => {
            run_tags(&root, &cfg)?;
        }
        Commands::Cards => {
            let tags = cards::load_tags_or_empty(&cfg.tags_path(&root));
            run_cards(&root, &cfg, &tags)?;
        }
        Commands::Categories => {
            let (_, rows, report) = taxonomy::build(&root, &cfg)?;
            summary::print_categories(&rows);
            if report.skipped > 0 {
                println!("({} metadata files skipped)", report.skipped);
            }
        }
    }

    Ok(())
}

fn run_tags(root: &Path, cfg: &Config) -> Result<TagsMap> {
    let (tax, report) = taxonomy::generate_tags(root, cfg)?;
    println!(
        "tags: metadata files: {}, skipped: {}, untagged: {}, applications: {}, categories: {}",
        report.scan.files_found,
        report.scan.skipped,
        report.scan.untagged,
        report.applications,
        report.categories
    );
    Ok(tax.tags)
}

fn run_cards(root: &Path, cfg: &Config, tags: &TagsMap) -> Result<()> {
    let cards = cards::generate_cards(root, cfg, tags)?;
    println!("cards: applications: {}", cards.len());
    Ok(())
}
