//! Outline file discovery from glob patterns.
//!
//! Callers hand over two pattern sets: the primary set (usually CLI
//! positionals) and a fallback set consulted only when the primary set
//! matches nothing. Matching walks the given root once and tests each file
//! against a compiled glob set, pruning dependency-manager and build
//! directories.
//!
//! Pattern *validation* errors (empty patterns, `<script>` injection) are
//! hard failures. Matching-time problems — an uncompilable glob, an
//! unreadable directory — are demoted to warnings on the returned
//! [`MatchOutcome`] and yield an empty match list: "no files" and "error"
//! are deliberately the same shape here, with the warning list as the side
//! channel for callers that care.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into during matching.
const IGNORED_DIRS: &[&str] = &["node_modules", ".git", "target"];

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("invalid pattern in {set} patterns: {pattern:?}")]
    InvalidPattern { set: &'static str, pattern: String },
}

/// Files matched by one resolution pass, plus any matching-time warnings.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    /// Deduplicated matches. Order follows the directory walk and is not
    /// guaranteed — callers must not assume any particular ordering.
    pub files: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Resolve primary patterns against `root`, falling back to the fallback
/// set when the primary set matches nothing.
pub fn resolve_patterns(
    primary: &[String],
    fallback: &[String],
    root: &Path,
) -> Result<MatchOutcome, PatternError> {
    check_patterns(primary, "primary")?;
    check_patterns(fallback, "fallback")?;

    let mut warnings = Vec::new();
    let mut files = match_patterns(primary, root, &mut warnings);
    if files.is_empty() {
        files = match_patterns(fallback, root, &mut warnings);
    }
    Ok(MatchOutcome { files, warnings })
}

fn check_patterns(patterns: &[String], set: &'static str) -> Result<(), PatternError> {
    for pattern in patterns {
        if pattern.trim().is_empty() || pattern.contains("<script>") {
            return Err(PatternError::InvalidPattern {
                set,
                pattern: pattern.clone(),
            });
        }
    }
    Ok(())
}

fn compile(patterns: &[String], warnings: &mut Vec<String>) -> Option<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(err) => {
                warnings.push(format!("cannot compile pattern {pattern:?}: {err}"));
                return None;
            }
        }
    }
    match builder.build() {
        Ok(set) => Some(set),
        Err(err) => {
            warnings.push(format!("cannot build glob set: {err}"));
            None
        }
    }
}

fn match_patterns(patterns: &[String], root: &Path, warnings: &mut Vec<String>) -> Vec<PathBuf> {
    if patterns.is_empty() {
        return Vec::new();
    }
    let Some(set) = compile(patterns, warnings) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warnings.push(format!("skipping unreadable entry: {err}"));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if set.is_match(relative) && seen.insert(relative.to_path_buf()) {
            files.push(entry.into_path());
        }
    }
    files
}

fn is_ignored(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn strings(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|p| p.to_string()).collect()
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "sidebars: []\n").unwrap();
    }

    #[test]
    fn primary_matches_win() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.outline.yaml");
        touch(tmp.path(), "__outlines__/b.yaml");

        let outcome = resolve_patterns(
            &strings(&["*.outline.yaml"]),
            &strings(&["__outlines__/**/*.yaml"]),
            tmp.path(),
        )
        .unwrap();
        assert_eq!(outcome.files.len(), 1);
        assert!(outcome.files[0].ends_with("a.outline.yaml"));
    }

    #[test]
    fn fallback_used_when_primary_empty() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "__outlines__/nested/b.yaml");

        let outcome = resolve_patterns(
            &strings(&["*.outline.yaml"]),
            &strings(&["__outlines__/**/*.yaml"]),
            tmp.path(),
        )
        .unwrap();
        assert_eq!(outcome.files.len(), 1);
        assert!(outcome.files[0].ends_with("b.yaml"));
    }

    #[test]
    fn neither_set_matching_yields_empty() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "unrelated.txt");

        let outcome = resolve_patterns(
            &strings(&["*.outline.yaml"]),
            &strings(&["__outlines__/**/*.yaml"]),
            tmp.path(),
        )
        .unwrap();
        assert!(outcome.files.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn recursive_glob_matches_root_level_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "top.outline.yaml");
        touch(tmp.path(), "sub/inner.outline.yaml");

        let outcome =
            resolve_patterns(&strings(&["**/*.outline.yaml"]), &[], tmp.path()).unwrap();
        assert_eq!(outcome.files.len(), 2);
    }

    #[test]
    fn dependency_directories_pruned() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "keep.outline.yaml");
        touch(tmp.path(), "node_modules/dep/skip.outline.yaml");
        touch(tmp.path(), "target/debug/skip.outline.yaml");

        let outcome =
            resolve_patterns(&strings(&["**/*.outline.yaml"]), &[], tmp.path()).unwrap();
        assert_eq!(outcome.files.len(), 1);
        assert!(outcome.files[0].ends_with("keep.outline.yaml"));
    }

    #[test]
    fn overlapping_patterns_deduplicate() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.outline.yaml");

        let outcome = resolve_patterns(
            &strings(&["*.outline.yaml", "**/*.outline.yaml"]),
            &[],
            tmp.path(),
        )
        .unwrap();
        assert_eq!(outcome.files.len(), 1);
    }

    #[test]
    fn empty_pattern_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_patterns(&strings(&["  "]), &[], tmp.path()).unwrap_err();
        let PatternError::InvalidPattern { set, .. } = err;
        assert_eq!(set, "primary");
    }

    #[test]
    fn script_injection_rejected_naming_the_set() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_patterns(
            &strings(&["*.yaml"]),
            &strings(&["<script>alert(1)</script>"]),
            tmp.path(),
        )
        .unwrap_err();
        let PatternError::InvalidPattern { set, pattern } = err;
        assert_eq!(set, "fallback");
        assert!(pattern.contains("<script>"));
    }

    #[test]
    fn uncompilable_glob_warns_and_returns_empty() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.outline.yaml");

        let outcome = resolve_patterns(&strings(&["a{b"]), &[], tmp.path()).unwrap();
        assert!(outcome.files.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("cannot compile"));
    }
}
