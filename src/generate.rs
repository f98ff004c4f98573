//! Sidebar building and artifact generation.
//!
//! The final pipeline stage. Takes the validated outline files, drops
//! sidebars whose label is duplicated across files, and walks each remaining
//! sidebar's item tree depth-first, emitting:
//!
//! - one [`OutputNode`] per item into the sidebars module
//! - one Markdown document per topic under the docs root
//!
//! ## Path composition
//!
//! Every node contributes to the document path of the topics below it:
//!
//! ```text
//! outline `path` prefix / category path-or-label / topic path / identifier
//! ```
//!
//! each segment slugged on the way in. The topic identifier is the first
//! defined of `slug`, `id`, `label`. Identifier collisions are resolved
//! against a run-scoped [`IdRegistry`] by suffixing a short number drawn
//! from a seeded source — inject a fixed seed in tests for reproducible
//! suffixes.
//!
//! ## Ordering
//!
//! Siblings build in declaration order and the output preserves it. Sidebar
//! *names* are sorted lexicographically across all contributing files before
//! building, so multi-file runs produce identical artifacts regardless of
//! discovery order.

use crate::duplicates::DuplicateReport;
use crate::normalize::{self, NormalizeError};
use crate::render;
use crate::slug::{SlugError, slug, slug_path};
use crate::types::{GeneratedIndex, Item, ItemKind, OutputNode};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("slug error: {0}")]
    Slug(#[from] SlugError),
    #[error("outline error: {0}")]
    Normalize(#[from] NormalizeError),
}

/// Where the build writes its artifacts.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Root directory for generated topic documents.
    pub docs_dir: PathBuf,
    /// Path of the generated sidebars module.
    pub sidebars_file: PathBuf,
}

/// Run-scoped registry of claimed document identifiers.
///
/// Owned by one build invocation and injected through the generation
/// context — never a process-wide static. The suffix source is a seeded
/// xorshift so collision handling is deterministic under
/// [`IdRegistry::with_seed`].
#[derive(Debug)]
pub struct IdRegistry {
    seen: HashSet<String>,
    state: u64,
}

impl IdRegistry {
    pub fn new() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as u64)
            .unwrap_or(0);
        Self::with_seed(nanos)
    }

    /// A registry with a fixed suffix sequence, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seen: HashSet::new(),
            // xorshift needs a non-zero state
            state: seed | 1,
        }
    }

    /// Claim `candidate`, suffixing with `-NNNN` until unique within this
    /// run.
    pub fn claim(&mut self, candidate: &str) -> String {
        if self.seen.insert(candidate.to_string()) {
            return candidate.to_string();
        }
        loop {
            let attempt = format!("{candidate}-{}", self.next_suffix());
            if self.seen.insert(attempt.clone()) {
                return attempt;
            }
        }
    }

    fn next_suffix(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x % 10_000
    }
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state threaded through one build invocation.
struct GenContext<'a> {
    docs_root: &'a Path,
    registry: IdRegistry,
    /// Document paths written, in write order.
    written: Vec<String>,
}

/// Everything a build produced, for reporting.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Sidebar label → built navigation nodes, as serialized into the
    /// sidebars module.
    pub sidebars: BTreeMap<String, Vec<OutputNode>>,
    /// Topic document paths written under the docs root, in write order.
    pub documents: Vec<String>,
    /// Sidebars dropped because their label is duplicated across files.
    pub skipped_sidebars: Vec<(String, PathBuf)>,
    /// Files that passed validation but could not be read back.
    pub warnings: Vec<String>,
}

/// Build all sidebars from the valid outline files and write both artifact
/// kinds: topic documents and the sidebars module.
pub fn build(
    files: &[PathBuf],
    duplicates: &DuplicateReport,
    options: &BuildOptions,
) -> Result<BuildReport, GenerateError> {
    build_seeded(files, duplicates, options, IdRegistry::new())
}

/// [`build`] with an injected registry, for deterministic collision
/// suffixes in tests.
pub fn build_seeded(
    files: &[PathBuf],
    duplicates: &DuplicateReport,
    options: &BuildOptions,
    registry: IdRegistry,
) -> Result<BuildReport, GenerateError> {
    let mut report = BuildReport::default();

    // Gather sidebars from every file first: the sidebar *names* sort
    // lexicographically across files before any building happens, so output
    // is deterministic however the files were discovered.
    let mut pending: Vec<(String, Option<String>, Item)> = Vec::new();
    for file in files {
        let outline = match normalize::read_outline(file) {
            Ok(outline) => outline,
            Err(err) => {
                report
                    .warnings
                    .push(format!("skipping {}: {err}", file.display()));
                continue;
            }
        };
        for sidebar in outline.sidebars {
            if duplicates.is_duplicate(&sidebar.label) {
                report
                    .skipped_sidebars
                    .push((sidebar.label.clone(), file.clone()));
                continue;
            }
            pending.push((sidebar.label.clone(), outline.path.clone(), sidebar));
        }
    }
    pending.sort_by(|a, b| a.0.cmp(&b.0));

    let mut ctx = GenContext {
        docs_root: &options.docs_dir,
        registry,
        written: Vec::new(),
    };
    for (label, prefix, sidebar) in pending {
        let parent = slug_path(prefix.as_deref().unwrap_or(""))?;
        let children = sidebar.items.as_deref().unwrap_or(&[]);
        let nodes = build_items(children, &parent, &mut ctx)?;
        report.sidebars.insert(label, nodes);
    }
    report.documents = ctx.written;

    write_sidebars_module(&report.sidebars, &options.sidebars_file)?;
    Ok(report)
}

/// Build one level of sidebar items, in declaration order.
fn build_items(
    items: &[Item],
    parent_path: &str,
    ctx: &mut GenContext<'_>,
) -> Result<Vec<OutputNode>, GenerateError> {
    items
        .iter()
        .map(|item| build_item(item, parent_path, ctx))
        .collect()
}

fn build_item(
    item: &Item,
    parent_path: &str,
    ctx: &mut GenContext<'_>,
) -> Result<OutputNode, GenerateError> {
    match item.kind() {
        ItemKind::Category => {
            let own = slug_path(item.path.as_deref().unwrap_or(&item.label))?;
            let child_parent = join_path(parent_path, &own);
            let children = build_items(item.items.as_deref().unwrap_or(&[]), &child_parent, ctx)?;
            let link = item
                .generated_index
                .then(|| GeneratedIndex::new(item.brief.clone()));
            Ok(OutputNode::Category {
                label: item.label.clone(),
                items: children,
                link,
            })
        }
        ItemKind::Html => Ok(OutputNode::Html {
            value: item.html.clone().unwrap_or_default(),
        }),
        ItemKind::Link => Ok(OutputNode::Link {
            label: item.label.clone(),
            href: item.href.clone().unwrap_or_default(),
        }),
        ItemKind::Topic => build_topic(item, parent_path, ctx),
    }
}

/// Build a topic: compute its document path, claim it, render, and write.
fn build_topic(
    item: &Item,
    parent_path: &str,
    ctx: &mut GenContext<'_>,
) -> Result<OutputNode, GenerateError> {
    let identifier = slug(item.identifier_source());
    let own_path = slug_path(item.path.as_deref().unwrap_or(""))?;
    let base = join_path(&join_path(parent_path, &own_path), &identifier);
    let doc_path = ctx.registry.claim(&base);

    let content = render::render_topic(item, &identifier);
    let target = ctx.docs_root.join(format!("{doc_path}.md"));
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&target, content)?;
    ctx.written.push(doc_path.clone());

    Ok(OutputNode::Doc {
        id: doc_path,
        label: item.label.clone(),
    })
}

/// Join two already-slugged path fragments, tolerating empty sides.
fn join_path(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (_, true) => parent.to_string(),
        _ => format!("{parent}/{child}"),
    }
}

/// Write the sidebars module: a source file that evaluates to the sidebar
/// mapping when loaded by the consuming static-site tool.
fn write_sidebars_module(
    sidebars: &BTreeMap<String, Vec<OutputNode>>,
    path: &Path,
) -> Result<(), GenerateError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(sidebars)?;
    fs::write(path, format!("module.exports = {json};\n"))?;
    Ok(())
}
