//! # docs-catalog
//!
//! Pre-computes the application catalog of a documentation site.
//!
//! The site's front-end renders a tag sidebar and an "applications by
//! category" page. Rather than walk the repository in the browser, this
//! crate scans every `metadata.json` and `README.md` under the application
//! directories once, at site build time, and writes three JSON files into the
//! site's `_data` directory.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────────────────┐
//! │ scan         │──▶│ taxonomy    │──▶│ tmp_tags.json            │
//! │ metadata.json│   │ aggregate   │──▶│ tmp_tag-categories.json  │
//! └──────────────┘   └──────┬──────┘   └──────────────────────────┘
//!                           │ tags
//! ┌──────────────┐   ┌──────▼──────┐   ┌──────────────────────────┐
//! │ readme       │──▶│ cards       │──▶│ app_cards.json           │
//! └──────────────┘   └─────────────┘   └──────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! catalog                  # tags, tag categories and app cards
//! catalog tags             # tags + tag categories only
//! catalog cards            # app cards, reading the existing tags file
//! catalog categories       # print the category table, write nothing
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and the built-in category table |
//! | [`repo`] | Repository root resolution |
//! | [`scan`] | `metadata.json` discovery |
//! | [`metadata`] | `metadata.json` parsing |
//! | [`taxonomy`] | Tag aggregation and category rows |
//! | [`readme`] | README lookup, description and image extraction |
//! | [`cards`] | App cards |
//! | [`export`] | JSON output |
//! | [`summary`] | Category table for the terminal |

pub mod cards;
pub mod config;
pub mod error;
pub mod export;
pub mod metadata;
pub mod models;
pub mod readme;
pub mod repo;
pub mod scan;
pub mod summary;
pub mod taxonomy;
