//! Cross-file duplicate sidebar label detection.
//!
//! Two outline files declaring a sidebar with the same label would fight
//! over one key in the generated sidebars module, so the build skips both
//! and warns. Labels are compared *slugified*: two labels that collide
//! after slugging would also collide in every derived artifact, so exact
//! string comparison would under-report.
//!
//! Only top-level sidebar labels participate. Nested category and topic
//! labels may repeat freely — their identity comes from the composed path,
//! not the label alone.

use crate::normalize::read_outline;
use crate::slug::slug;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Result of a duplicate scan.
#[derive(Debug, Default)]
pub struct DuplicateReport {
    /// Slugified label → files declaring a sidebar with that label.
    /// Restricted to labels present in two or more distinct files.
    pub duplicates: BTreeMap<String, BTreeSet<PathBuf>>,
    /// Files the scan could not inspect, with the reason. The detector
    /// tolerates races with earlier pipeline stages — a file validated a
    /// moment ago may be gone by now.
    pub skipped: Vec<(PathBuf, String)>,
}

impl DuplicateReport {
    /// Whether a sidebar with this (raw) label is in conflict.
    pub fn is_duplicate(&self, label: &str) -> bool {
        self.duplicates.contains_key(&slug(label))
    }
}

/// Scan the top-level sidebar labels of every file and report labels
/// declared in more than one file.
pub fn find_duplicate_labels(files: &[PathBuf]) -> DuplicateReport {
    let mut by_label: BTreeMap<String, BTreeSet<PathBuf>> = BTreeMap::new();
    let mut skipped = Vec::new();

    for file in files {
        if !file.exists() {
            skipped.push((file.clone(), "file not found or inaccessible".to_string()));
            continue;
        }
        let outline = match read_outline(file) {
            Ok(outline) => outline,
            Err(err) => {
                skipped.push((file.clone(), err.to_string()));
                continue;
            }
        };
        for sidebar in &outline.sidebars {
            by_label
                .entry(slug(&sidebar.label))
                .or_default()
                .insert(file.clone());
        }
    }

    let duplicates = by_label
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .collect();
    DuplicateReport {
        duplicates,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn same_label_in_two_files_reported() {
        let tmp = TempDir::new().unwrap();
        let a = write(
            &tmp,
            "a.outline.yaml",
            "sidebars:\n  - label: Getting started\n    items: [Intro]\n",
        );
        let b = write(
            &tmp,
            "b.outline.yaml",
            "sidebars:\n  - label: Getting started\n    items: [Setup]\n",
        );
        let c = write(
            &tmp,
            "c.outline.yaml",
            "sidebars:\n  - label: Reference\n    items: [API]\n",
        );

        let report = find_duplicate_labels(&[a.clone(), b.clone(), c]);
        assert_eq!(report.duplicates.len(), 1);
        let files = report.duplicates.get("getting-started").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&a));
        assert!(files.contains(&b));
        assert!(!report.duplicates.contains_key("reference"));
    }

    #[test]
    fn label_in_single_file_not_reported() {
        let tmp = TempDir::new().unwrap();
        let a = write(
            &tmp,
            "a.outline.yaml",
            "sidebars:\n  - label: Docs\n    items: [Intro]\n",
        );
        let report = find_duplicate_labels(&[a]);
        assert!(report.duplicates.is_empty());
    }

    #[test]
    fn same_label_twice_in_one_file_not_reported() {
        // duplicate detection is cross-file only
        let tmp = TempDir::new().unwrap();
        let a = write(
            &tmp,
            "a.outline.yaml",
            "sidebars:\n  - label: Docs\n    items: [One]\n  - label: Docs\n    items: [Two]\n",
        );
        let report = find_duplicate_labels(&[a]);
        assert!(report.duplicates.is_empty());
    }

    #[test]
    fn slugified_equality_catches_case_variants() {
        let tmp = TempDir::new().unwrap();
        let a = write(
            &tmp,
            "a.outline.yaml",
            "sidebars:\n  - label: Getting Started\n    items: [Intro]\n",
        );
        let b = write(
            &tmp,
            "b.outline.yaml",
            "sidebars:\n  - label: getting started\n    items: [Setup]\n",
        );
        let report = find_duplicate_labels(&[a, b]);
        assert!(report.duplicates.contains_key("getting-started"));
        assert!(report.is_duplicate("Getting Started"));
        assert!(report.is_duplicate("getting started"));
    }

    #[test]
    fn nested_label_collisions_permitted() {
        let tmp = TempDir::new().unwrap();
        let a = write(
            &tmp,
            "a.outline.yaml",
            "sidebars:\n  - label: Docs\n    items:\n      - Overview\n",
        );
        let b = write(
            &tmp,
            "b.outline.yaml",
            "sidebars:\n  - label: Guides\n    items:\n      - Overview\n",
        );
        let report = find_duplicate_labels(&[a, b]);
        assert!(report.duplicates.is_empty());
    }

    #[test]
    fn missing_file_skipped_with_reason() {
        let tmp = TempDir::new().unwrap();
        let a = write(
            &tmp,
            "a.outline.yaml",
            "sidebars:\n  - label: Docs\n    items: [Intro]\n",
        );
        let gone = tmp.path().join("gone.outline.yaml");
        let report = find_duplicate_labels(&[a, gone.clone()]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, gone);
        assert!(report.skipped[0].1.contains("not found"));
    }

    #[test]
    fn unparseable_file_skipped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let bad = write(&tmp, "bad.outline.yaml", "sidebars: [unclosed\n");
        let good = write(
            &tmp,
            "good.outline.yaml",
            "sidebars:\n  - label: Docs\n    items: [Intro]\n",
        );
        let report = find_duplicate_labels(&[bad.clone(), good]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, bad);
        assert!(report.duplicates.is_empty());
    }
}
