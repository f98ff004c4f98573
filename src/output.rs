//! CLI output formatting for all pipeline stages.
//!
//! Output is information-centric: entities lead with their identity
//! (sidebar label, document path), with filesystem detail as indented
//! context lines. Each stage has a `format_*` function (returns
//! `Vec<String>`) for testability and a `print_*` wrapper that writes to
//! stdout or stderr. Format functions are pure — no I/O, no side effects.
//!
//! ```text
//! ==> Validating 3 outline files
//! Invalid
//!     bad.outline.yaml
//!         "sidebars" is a required property
//!
//! WARNING: duplicated sidebar label "getting-started" in:
//!     a.outline.yaml
//!     b.outline.yaml
//!
//! Sidebars
//!     Docs (4 topics)
//! Documents
//!     intro
//!     cat/sub
//! ```

use crate::duplicates::DuplicateReport;
use crate::generate::BuildReport;
use crate::patterns::MatchOutcome;
use crate::types::OutputNode;
use crate::validate::Validation;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format pattern-resolution results: match count plus any matcher
/// warnings.
pub fn format_resolution(outcome: &MatchOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    for warning in &outcome.warnings {
        lines.push(format!("WARNING: {warning}"));
    }
    let noun = if outcome.files.len() == 1 {
        "outline file"
    } else {
        "outline files"
    };
    lines.push(format!("Found {} {}", outcome.files.len(), noun));
    lines
}

/// Format the validation partition. Valid files are listed only in verbose
/// mode; invalid files always appear with their error records indented.
pub fn format_validation(validation: &Validation, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if verbose && !validation.valid_files.is_empty() {
        lines.push("Valid".to_string());
        for file in &validation.valid_files {
            lines.push(format!("{}{}", indent(1), display_name(file)));
        }
    }
    if !validation.invalid_files.is_empty() {
        lines.push("Invalid".to_string());
        for invalid in &validation.invalid_files {
            lines.push(format!("{}{}", indent(1), display_name(&invalid.file)));
            for error in &invalid.errors {
                lines.push(format!("{}{}", indent(2), error.message));
            }
        }
    }
    lines
}

/// Format duplicate-label warnings and the detector's skip notices.
pub fn format_duplicates(report: &DuplicateReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (file, reason) in &report.skipped {
        lines.push(format!(
            "WARNING: skipping {}: {reason}",
            display_name(file)
        ));
    }
    for (label, files) in &report.duplicates {
        lines.push(format!(
            "WARNING: duplicated sidebar label {label:?} will not be generated; declared in:"
        ));
        for file in files {
            lines.push(format!("{}{}", indent(1), display_name(file)));
        }
    }
    lines
}

/// Format the build summary: sidebars with topic counts, then written
/// documents (verbose only), then skip notices.
pub fn format_build_report(report: &BuildReport, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for warning in &report.warnings {
        lines.push(format!("WARNING: {warning}"));
    }

    lines.push("Sidebars".to_string());
    for (label, nodes) in &report.sidebars {
        let topics = count_topics(nodes);
        let noun = if topics == 1 { "topic" } else { "topics" };
        lines.push(format!("{}{} ({} {})", indent(1), label, topics, noun));
    }
    for (label, file) in &report.skipped_sidebars {
        lines.push(format!(
            "{}{} (skipped, duplicated in {})",
            indent(1),
            label,
            display_name(file)
        ));
    }

    if verbose && !report.documents.is_empty() {
        lines.push("Documents".to_string());
        for doc in &report.documents {
            lines.push(format!("{}{}.md", indent(1), doc));
        }
    }

    let noun = if report.documents.len() == 1 {
        "topic document"
    } else {
        "topic documents"
    };
    lines.push(format!(
        "Generated {} sidebars, {} {}",
        report.sidebars.len(),
        report.documents.len(),
        noun
    ));
    lines
}

fn count_topics(nodes: &[OutputNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            OutputNode::Doc { .. } => 1,
            OutputNode::Category { items, .. } => count_topics(items),
            OutputNode::Link { .. } | OutputNode::Html { .. } => 0,
        })
        .sum()
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_resolution(outcome: &MatchOutcome) {
    print_lines(&format_resolution(outcome));
}

pub fn print_validation(validation: &Validation, verbose: bool) {
    print_lines(&format_validation(validation, verbose));
}

pub fn print_duplicates(report: &DuplicateReport) {
    print_lines(&format_duplicates(report));
}

pub fn print_build_report(report: &BuildReport, verbose: bool) {
    print_lines(&format_build_report(report, verbose));
}
