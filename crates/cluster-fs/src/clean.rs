//! Guarded removal of caches and build debris
//!
//! Walks a root directory, removes directories and files whose names match
//! glob patterns, and never touches a protected system path.

use crate::{Error, Result};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name patterns removed when the caller supplies none.
pub const DEFAULT_PATTERNS: &[&str] = &[
    "__pycache__",
    "*.pyc",
    "*.pyo",
    ".pytest_cache",
    ".mypy_cache",
    ".ruff_cache",
];

/// Directory names removed when the caller supplies none.
pub const DEFAULT_DIRS: &[&str] = &[".ansible", ".pytest_cache", ".mypy_cache", ".ruff_cache"];

/// Paths that are never removed, whatever matches.
pub const PROTECTED_PATHS: &[&str] = &["/", "/root", "/home", "/usr", "/etc", "/var", "/opt"];

/// What to remove and whether to actually do it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOptions {
    /// Glob patterns matched against entry names, files or directories
    pub patterns: Vec<String>,
    /// Glob patterns matched against directory names only
    pub dirs: Vec<String>,
    /// Report what would be removed without removing anything
    pub dry_run: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect(),
            dirs: DEFAULT_DIRS.iter().map(|s| s.to_string()).collect(),
            dry_run: false,
        }
    }
}

/// A path that matched but was left in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Removed paths, or paths that would be removed in a dry run
    pub removed: Vec<PathBuf>,
    /// Matched paths that could not or must not be removed
    pub skipped: Vec<SkippedPath>,
    pub dry_run: bool,
}

/// Whether `path` must never be removed.
///
/// A path that cannot be resolved counts as protected, as does any
/// filesystem root.
pub fn is_protected(path: &Path) -> bool {
    let resolved = match dunce::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(_) => return true,
    };

    if PROTECTED_PATHS.iter().any(|p| resolved == Path::new(p)) {
        return true;
    }

    resolved.parent().is_none()
}

/// Remove matching directories, then matching names, under `root`.
///
/// Fails only if `root` itself is protected or a pattern is invalid;
/// individual removal failures are recorded in the report.
pub fn clean(root: &Path, options: &CleanOptions) -> Result<CleanReport> {
    if is_protected(root) {
        return Err(Error::ProtectedPath {
            path: root.to_path_buf(),
        });
    }
    let root = dunce::canonicalize(root).map_err(|e| Error::io(root, e))?;

    let dir_matchers = compile_patterns(&options.dirs)?;
    let name_matchers = compile_patterns(&options.patterns)?;

    tracing::info!(root = %root.display(), dry_run = options.dry_run, "Starting cleanup");

    let mut report = CleanReport {
        dry_run: options.dry_run,
        ..CleanReport::default()
    };

    for path in find_matches(&root, &dir_matchers, true) {
        remove_path(&path, options.dry_run, &mut report);
    }
    for path in find_matches(&root, &name_matchers, false) {
        remove_path(&path, options.dry_run, &mut report);
    }

    tracing::info!(
        removed = report.removed.len(),
        skipped = report.skipped.len(),
        "Cleanup complete"
    );
    Ok(report)
}

/// Compile a shell-style glob (`*`, `?`, `[...]`) matched against one name.
fn compile_pattern(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns.iter().map(|p| compile_pattern(p)).collect()
}

/// Collect matching entries below `root`, without descending into a match.
fn find_matches(root: &Path, matchers: &[Pattern], dirs_only: bool) -> Vec<PathBuf> {
    let mut matches = Vec::new();
    if matchers.is_empty() {
        return matches;
    }

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Could not read entry during cleanup walk: {}", e);
                continue;
            }
        };

        let is_dir = entry.file_type().is_dir();
        if dirs_only && !is_dir {
            continue;
        }

        let matched = {
            let name = entry.file_name().to_string_lossy();
            matchers.iter().any(|m| m.matches(&name))
        };
        if matched {
            matches.push(entry.into_path());
            if is_dir {
                walker.skip_current_dir();
            }
        }
    }

    matches
}

fn remove_path(path: &Path, dry_run: bool, report: &mut CleanReport) {
    if report.removed.iter().any(|done| path.starts_with(done)) {
        return;
    }

    if is_protected(path) {
        tracing::warn!(path = %path.display(), "Could not remove: protected path");
        report.skipped.push(SkippedPath {
            path: path.to_path_buf(),
            reason: "protected path".to_string(),
        });
        return;
    }

    if dry_run {
        tracing::info!(path = %path.display(), "Would remove");
        report.removed.push(path.to_path_buf());
        return;
    }

    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Removed");
            report.removed.push(path.to_path_buf());
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "Could not remove: {}", e);
            report.skipped.push(SkippedPath {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    }
}
