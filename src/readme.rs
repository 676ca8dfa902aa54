//! README helpers for app cards: locating the README, pulling a short
//! description out of it, and resolving its first image to a URL.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::path::{Component, Path, PathBuf};

const README: &str = "README.md";
const APPLICATIONS_DIR: &str = "applications";
const MAX_PARENT_HOPS: usize = 3;

/// Find the README that documents the application in `app_dir`.
///
/// Checks the app directory and its `python/` and `cpp/` variants first,
/// then up to three ancestors. The ancestor walk never climbs past an
/// `applications` directory or the repo root.
pub fn find_readme(app_dir: &Path, root: &Path) -> Option<PathBuf> {
    let mut candidates = vec![
        app_dir.join(README),
        app_dir.join("python").join(README),
        app_dir.join("cpp").join(README),
    ];

    let mut dir = app_dir;
    for _ in 0..MAX_PARENT_HOPS {
        if dir.file_name().is_some_and(|n| n == APPLICATIONS_DIR) || dir == root {
            break;
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
        candidates.push(dir.join(README));
    }

    candidates.into_iter().find(|p| p.is_file())
}

/// Extract the first `max_sentences` sentences of the first prose paragraph.
pub fn first_sentences(markdown: &str, max_sentences: usize) -> Option<String> {
    prose_paragraphs(markdown)
        .iter()
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .find(|p| !p.is_empty())
        .map(|p| cut_sentences(&p, max_sentences))
}

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    options
}

/// Plain text of every top-level paragraph, in document order.
///
/// Paragraphs inside quotes, lists and footnotes are not prose. Emphasis,
/// link and code markers disappear with the parse, and image alt text is
/// dropped.
fn prose_paragraphs(markdown: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut container_depth = 0usize;
    let mut image_depth = 0usize;

    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph if container_depth == 0 => {
                    in_paragraph = true;
                    current.clear();
                }
                Tag::BlockQuote { .. } | Tag::List { .. } | Tag::FootnoteDefinition { .. } => {
                    container_depth += 1;
                }
                Tag::Image { .. } => image_depth += 1,
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Paragraph if in_paragraph => {
                    in_paragraph = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                TagEnd::BlockQuote { .. } | TagEnd::List { .. } | TagEnd::FootnoteDefinition => {
                    container_depth = container_depth.saturating_sub(1);
                }
                TagEnd::Image => image_depth = image_depth.saturating_sub(1),
                _ => {}
            },
            Event::Text(text) | Event::Code(text) if in_paragraph && image_depth == 0 => {
                current.push_str(&text);
            }
            Event::SoftBreak | Event::HardBreak if in_paragraph => current.push(' '),
            _ => {}
        }
    }
    paragraphs
}

/// Truncate after the `max`-th sentence terminator (`.`, `!` or `?`
/// followed by whitespace or end of text).
fn cut_sentences(text: &str, max: usize) -> String {
    let mut seen = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
            if at_boundary {
                seen += 1;
                if seen >= max {
                    return text[..i + c.len_utf8()].to_string();
                }
            }
        }
    }
    text.to_string()
}

/// The target of the first markdown `![alt](src)` or HTML `<img src="...">`.
pub fn first_image(markdown: &str) -> Option<String> {
    let src_re = Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#).ok()?;

    for event in Parser::new_ext(markdown, markdown_options()) {
        let target = match event {
            Event::Start(Tag::Image { dest_url, .. }) => dest_url.trim().to_string(),
            Event::Html(html) | Event::InlineHtml(html) => match src_re.captures(&html) {
                Some(caps) => caps[1].trim().to_string(),
                None => continue,
            },
            _ => continue,
        };
        if !target.is_empty() {
            return Some(target);
        }
    }
    None
}

/// Resolve an image reference found in `readme_path` to a URL.
///
/// Absolute `http(s)` URLs pass through. Anything else is resolved against
/// the README's directory (or the repo root for `/`-prefixed paths), made
/// repo-relative and joined onto `base_url` when one is configured.
pub fn image_url(target: &str, readme_path: &Path, root: &Path, base_url: Option<&str>) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        return target.to_string();
    }

    let resolved = match target.strip_prefix('/') {
        Some(from_root) => root.join(from_root),
        None => readme_path
            .parent()
            .unwrap_or(root)
            .join(target),
    };
    let resolved = normalize(&resolved);
    let root = normalize(root);
    let relative = resolved.strip_prefix(&root).unwrap_or(&resolved);

    let rel = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    match base_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), rel),
        None => rel,
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}
