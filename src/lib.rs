//! # docsmith
//!
//! A documentation scaffolding generator. Your outline files are the data
//! source: declarative YAML documents describing sidebars, categories,
//! topics, links, and headings become a tree of Markdown topic files plus a
//! sidebars navigation module for a static-site generator.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! Every build runs the same sequence, each stage a function whose output
//! the next stage consumes:
//!
//! ```text
//! 1. Resolve    patterns  →  file list       (globs → concrete outline files)
//! 2. Validate   files     →  valid/invalid   (JSON Schema partition)
//! 3. Detect     files     →  duplicate map   (cross-file sidebar labels)
//! 4. Build      outlines  →  docs/ + sidebars.js
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Partial-failure tolerance**: an invalid file or a duplicated label
//!   never aborts the build — everything individually valid still generates,
//!   with diagnostics for the rest.
//! - **Determinism**: given the same files and schema, every stage produces
//!   the same output; sidebar names sort before building so multi-file runs
//!   are stable regardless of discovery order.
//! - **Testability**: each stage is a pure-ish function over explicit
//!   inputs, so tests exercise pipeline logic with nothing but a tempdir.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`patterns`] | Stage 1 — primary/fallback glob resolution over a pruned directory walk |
//! | [`validate`] | Stage 2 — JSON Schema validation, valid/invalid partition with error records |
//! | [`duplicates`] | Stage 3 — cross-file duplicate sidebar label detection |
//! | [`generate`] | Stage 4 — walks normalized items, writes topic docs and the sidebars module |
//! | [`normalize`] | Canonicalizes raw YAML item shapes into [`types::Item`] trees |
//! | [`slug`] | Label and path slugging — every on-disk identifier goes through here |
//! | [`render`] | Topic Markdown rendering: front matter, title, heading scaffold |
//! | [`types`] | Shared types: canonical items, output nodes, error records |
//! | [`output`] | CLI output formatting — pure `format_*` functions plus print wrappers |
//!
//! # Design Decisions
//!
//! ## Normalize First, Build Second
//!
//! Outline YAML is deliberately sugared: a bare string is a topic, a
//! single-key mapping is a category, a full mapping spells everything out.
//! All of that collapses into one canonical [`types::Item`] before any
//! building happens, so shape errors surface with outline context and the
//! builder dispatches on a single [`types::ItemKind`] classification instead
//! of re-probing properties at every node.
//!
//! ## Embedded Schema
//!
//! The outline schema ships inside the binary via `include_str!` — no
//! schema file to install or get out of sync. `--schema` swaps in an
//! alternative for repositories that extend the outline format.
//!
//! ## Skip-on-Conflict
//!
//! Two files declaring the same sidebar label would silently fight over one
//! key in the generated module. Neither wins: both are skipped with a
//! warning naming the files, and every other sidebar builds normally.
//!
//! ## No Runtime Templates
//!
//! Topic documents are rendered by plain Rust functions rather than a
//! template engine. The documents are small, the data is typed, and there
//! is no template directory to ship or get out of sync.

pub mod duplicates;
pub mod generate;
pub mod normalize;
pub mod output;
pub mod patterns;
pub mod render;
pub mod slug;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
