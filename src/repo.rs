use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Pick the repository root: `--root`, then `paths.root`, then the nearest
/// ancestor of the current directory that holds a `.git` entry.
pub fn resolve_root(cli_root: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let root = match cli_root.or(config.paths.root.as_deref()) {
        Some(root) => root.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            find_git_root(&cwd).with_context(|| {
                format!(
                    "No Git repository found above {}. Run inside a Git repository or pass --root.",
                    cwd.display()
                )
            })?
        }
    };

    if !root.is_dir() {
        bail!("Repository root does not exist: {}", root.display());
    }
    Ok(root)
}

/// Walk up from `start` to the first directory containing `.git`.
///
/// `.git` may be a file (worktrees, submodules), so only existence is checked.
pub fn find_git_root(start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        if dir.join(".git").exists() {
            return Ok(dir.to_path_buf());
        }
    }
    bail!("not inside a Git repository: {}", start.display())
}
