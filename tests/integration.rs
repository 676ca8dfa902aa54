use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn catalog_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("catalog");
    path
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn app(name: &str, tags: &[&str]) -> String {
    serde_json::json!({ "application": { "name": name, "language": "C++", "tags": tags } })
        .to_string()
}

fn setup_test_repo() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join(".git")).unwrap();

    write(
        root,
        "applications/endoscopy/metadata.json",
        &app(
            "Endoscopy Tool Tracking",
            &["Healthcare AI", "Video", "Endoscopy", "Surgical AI"],
        ),
    );
    write(
        root,
        "applications/endoscopy/README.md",
        "# Endoscopy Tool Tracking\n\n![demo](docs/demo.png)\n\n\
         Tracks surgical tools in endoscopy video. Runs in real time. Uses an LSTM.\n",
    );
    write(
        root,
        "applications/ultrasound/cpp/metadata.json",
        &app(
            "Ultrasound Segmentation",
            &["Healthcare AI", "Ultrasound", "Segmentation"],
        ),
    );
    write(
        root,
        "applications/volume/metadata.json",
        &app(
            "NVIDIA/Volume Rendering",
            &["Visualization", "Volume", "Medical Imaging", "Rendering"],
        ),
    );
    write(
        root,
        "applications/radar/metadata.json",
        &app(
            "Radar Pipeline",
            &["Signal Processing", "Radar", "g", "f", "e", "d", "c", "b", "a"],
        ),
    );
    write(root, "applications/robot/metadata.json", &app("Robot", &["Robotics"]));
    write(
        root,
        "applications/astro/metadata.json",
        &app("Telescope", &["astronomy", "Imaging"]),
    );
    write(root, "applications/untagged/metadata.json", &app("Untagged", &[]));
    write(root, "applications/broken/metadata.json", "{ not json");
    write(
        root,
        "applications/{{ cookiecutter.project_slug }}/metadata.json",
        &app("Template", &["Healthcare AI", "Template"]),
    );
    write(
        root,
        "applications/my_operator/metadata.json",
        &app("Operator Demo", &["Healthcare AI", "Operators"]),
    );

    tmp
}

fn run_catalog(root: &Path, config: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = catalog_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config)
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run catalog binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn no_config(root: &Path) -> PathBuf {
    root.join("config/missing.toml")
}

fn data_dir(root: &Path) -> PathBuf {
    root.join("doc/website/docs/_data")
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_build_writes_all_artifacts() {
    let tmp = setup_test_repo();
    let root = tmp.path();

    let (stdout, stderr, success) = run_catalog(root, &no_config(root), &[]);
    assert!(success, "build failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("applications: 6"), "got: {}", stdout);
    assert!(stdout.contains("categories: 4"), "got: {}", stdout);

    let data = data_dir(root);
    assert!(data.join("tmp_tags.json").exists());
    assert!(data.join("tmp_tag-categories.json").exists());
    assert!(data.join("app_cards.json").exists());
}

#[test]
fn test_categories_sorted_primary_first() {
    let tmp = setup_test_repo();
    let root = tmp.path();
    run_catalog(root, &no_config(root), &["tags"]);

    let categories = read_json(&data_dir(root).join("tmp_tag-categories.json"));
    let rows = categories.as_array().unwrap();
    let titles: Vec<&str> = rows.iter().map(|r| r["title"].as_str().unwrap()).collect();
    assert_eq!(
        titles,
        ["Healthcare AI", "Signal Processing", "Visualization", "Astronomy"]
    );

    let primary: Vec<bool> = rows.iter().map(|r| r["isPrimary"].as_bool().unwrap()).collect();
    assert_eq!(primary, [true, true, true, false]);

    assert_eq!(rows[0]["icon"], "medical_services");
    assert_eq!(rows[3]["icon"], "label");

    // Volume Rendering's "Medical Imaging" tag aliases into healthcare.
    assert_eq!(rows[0]["count"], 3);
    assert_eq!(rows[2]["count"], 1);

    assert_eq!(
        rows[0]["subcategories"],
        serde_json::json!([
            { "name": "Ultrasound", "query": "Ultrasound healthcare AI" },
            { "name": "Video", "query": "Video healthcare AI" }
        ])
    );
}

#[test]
fn test_related_tags_sorted_and_capped() {
    let tmp = setup_test_repo();
    let root = tmp.path();
    run_catalog(root, &no_config(root), &["tags"]);

    let categories = read_json(&data_dir(root).join("tmp_tag-categories.json"));
    let signal = categories
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["title"] == "Signal Processing")
        .unwrap();
    let related: Vec<&str> = signal["relatedTags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(related, ["A", "B", "C", "D", "E", "F"]);
}

#[test]
fn test_bad_and_untagged_files_skipped() {
    let tmp = setup_test_repo();
    let root = tmp.path();

    let (stdout, stderr, success) = run_catalog(root, &no_config(root), &["tags"]);
    assert!(success, "tags failed: {}", stderr);
    assert!(stdout.contains("skipped: 1"), "got: {}", stdout);
    assert!(stdout.contains("untagged: 1"), "got: {}", stdout);
    assert!(stderr.contains("Failed to process"), "got: {}", stderr);
    assert_eq!(
        stderr.matches("broken/metadata.json").count(),
        1,
        "failing path should be logged once, got: {}",
        stderr
    );

    let tags = read_json(&data_dir(root).join("tmp_tags.json"));
    let tags = tags.as_object().unwrap();
    assert!(!tags.contains_key("Untagged"));
    assert!(!tags.contains_key("Template"));
    assert!(!tags.contains_key("Operator Demo"));
    assert_eq!(
        tags["Radar Pipeline"][0],
        "Signal Processing",
        "tag order must be preserved"
    );
}

#[test]
fn test_rerun_is_byte_identical() {
    let tmp = setup_test_repo();
    let root = tmp.path();
    let data = data_dir(root);

    run_catalog(root, &no_config(root), &[]);
    let first: Vec<String> = ["tmp_tags.json", "tmp_tag-categories.json", "app_cards.json"]
        .iter()
        .map(|f| fs::read_to_string(data.join(f)).unwrap())
        .collect();

    run_catalog(root, &no_config(root), &[]);
    let second: Vec<String> = ["tmp_tags.json", "tmp_tag-categories.json", "app_cards.json"]
        .iter()
        .map(|f| fs::read_to_string(data.join(f)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_app_cards_content() {
    let tmp = setup_test_repo();
    let root = tmp.path();
    run_catalog(root, &no_config(root), &["build"]);

    let cards = read_json(&data_dir(root).join("app_cards.json"));

    let endo = &cards["Endoscopy Tool Tracking"];
    assert_eq!(
        endo["description"],
        "Tracks surgical tools in endoscopy video. Runs in real time."
    );
    assert_eq!(endo["image_url"], "applications/endoscopy/docs/demo.png");
    assert_eq!(endo["vendor"], "");

    let volume = &cards["NVIDIA/Volume Rendering"];
    assert_eq!(volume["vendor"], "NVIDIA");
    assert_eq!(volume["app_title"], "Volume Rendering");
    assert_eq!(volume["description"], "No description available.");
    assert!(volume["image_url"].is_null());

    // Metadata lives in cpp/, so the directory card is keyed by dir name and
    // the tagged title gets a placeholder.
    assert!(cards.get("ultrasound").is_some());
    assert_eq!(
        cards["Ultrasound Segmentation"]["description"],
        "No description available."
    );
}

#[test]
fn test_cards_reads_existing_tags_file() {
    let tmp = setup_test_repo();
    let root = tmp.path();

    let (_, stderr, success) = run_catalog(root, &no_config(root), &["cards"]);
    assert!(success, "cards without tags file failed: {}", stderr);
    let cards = read_json(&data_dir(root).join("app_cards.json"));
    assert!(cards.get("Ultrasound Segmentation").is_none());

    run_catalog(root, &no_config(root), &["tags"]);
    let (stdout, _, success) = run_catalog(root, &no_config(root), &["cards"]);
    assert!(success);
    assert!(stdout.contains("cards: applications:"));
    let cards = read_json(&data_dir(root).join("app_cards.json"));
    assert!(cards.get("Ultrasound Segmentation").is_some());
}

#[test]
fn test_categories_command_writes_nothing() {
    let tmp = setup_test_repo();
    let root = tmp.path();

    let (stdout, _, success) = run_catalog(root, &no_config(root), &["categories"]);
    assert!(success);
    assert!(stdout.contains("Healthcare AI"));
    assert!(stdout.contains("1 metadata files skipped"));
    assert!(!data_dir(root).exists());
}

#[test]
fn test_config_overrides() {
    let tmp = setup_test_repo();
    let root = tmp.path();
    let config = root.join("config/catalog.toml");
    write(
        root,
        "config/catalog.toml",
        r#"
[paths]
data_dir = "site/_data"

[output]
related_tag_limit = 2
categories_file = "categories.json"

[[categories]]
key = "robotics"
title = "Robotics & Control"
icon = "precision_manufacturing"
aliases = ["robot"]
"#,
    );

    let (stdout, stderr, success) = run_catalog(root, &config, &["tags"]);
    assert!(success, "tags failed: stdout={}, stderr={}", stdout, stderr);

    let categories = read_json(&root.join("site/_data/categories.json"));
    let rows = categories.as_array().unwrap();
    assert_eq!(rows[0]["title"], "Robotics & Control");
    assert_eq!(rows[0]["isPrimary"], true);
    assert_eq!(rows[0]["icon"], "precision_manufacturing");

    // Healthcare is no longer curated: title-cased and non-primary.
    let health = rows.iter().find(|r| r["title"] == "Healthcare Ai").unwrap();
    assert_eq!(health["isPrimary"], false);
    assert_eq!(health["count"], 2);

    let signal = rows.iter().find(|r| r["title"] == "Signal Processing").unwrap();
    assert_eq!(signal["relatedTags"].as_array().unwrap().len(), 2);
}

#[test]
fn test_invalid_config_fails() {
    let tmp = setup_test_repo();
    let root = tmp.path();
    write(root, "config/catalog.toml", "[output]\nrelated_tag_limit = 0\n");

    let (_, stderr, success) = run_catalog(root, &root.join("config/catalog.toml"), &["tags"]);
    assert!(!success);
    assert!(stderr.contains("related_tag_limit"), "got: {}", stderr);
}

#[test]
fn test_root_discovered_from_git() {
    let tmp = setup_test_repo();
    let root = tmp.path();

    let output = Command::new(catalog_binary())
        .arg("--config")
        .arg(no_config(root))
        .arg("tags")
        .current_dir(root.join("applications/endoscopy"))
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(data_dir(root).join("tmp_tags.json").exists());
}
