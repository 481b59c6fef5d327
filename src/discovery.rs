// src/discovery.rs
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::lang::Lang;

/// Directories skipped unless default exclusions are disabled.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git/",
    ".svn/",
    ".hg/",
    "node_modules/",
    "__pycache__/",
    ".vscode/",
    ".idea/",
    "vendor/",
    "third_party/",
    "external/",
];

/// Exclusion patterns. A path is excluded if a pattern is a substring of it,
/// or glob-matches the whole path or its file name.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    raw: Vec<String>,
    globs: Vec<Pattern>,
}

impl ExcludeSet {
    #[must_use]
    pub fn new(patterns: &[String], include_defaults: bool) -> Self {
        let mut raw: Vec<String> = if include_defaults {
            DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect()
        } else {
            Vec::new()
        };
        raw.extend(patterns.iter().cloned());

        let globs = raw
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(glob) => Some(glob),
                Err(e) => {
                    debug!(pattern = %p, error = %e, "exclude used as substring only");
                    None
                }
            })
            .collect();

        Self { raw, globs }
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.raw
    }

    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        let full = normalize_path(path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.raw.iter().any(|p| full.contains(p.as_str()))
            || self
                .globs
                .iter()
                .any(|g| g.matches(&full) || g.matches(&name))
    }

    /// Directories are tested with a trailing slash so `vendor/` prunes them.
    fn is_excluded_dir(&self, path: &Path) -> bool {
        let with_slash = PathBuf::from(format!("{}/", normalize_path(path)));
        self.is_excluded(path) || self.is_excluded(&with_slash)
    }
}

/// Finds C/C++ sources under `root`. Exclusions are matched against paths
/// relative to `root`; a file root is returned as is.
///
/// # Errors
/// Returns error if `root` does not exist.
pub fn discover(root: &Path, excludes: &ExcludeSet) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "input path does not exist"),
            root,
        ));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let rel = e.path().strip_prefix(root).unwrap_or(e.path());
            e.depth() == 0
                || if e.file_type().is_dir() {
                    !excludes.is_excluded_dir(rel)
                } else {
                    !excludes.is_excluded(rel)
                }
        });

    let mut files = Vec::new();
    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && Lang::from_path(entry.path()).is_some() {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                debug!(error = %e, "walk error");
                errors += 1;
            }
        }
    }
    if errors > 0 {
        warn!("encountered {errors} errors during file walk");
    }
    Ok(files)
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
