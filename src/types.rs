//! Shared types used across all pipeline stages.
//!
//! [`Item`] is the canonical outline node produced by the normalizer and
//! consumed by the builder. [`OutputNode`] is the wire shape serialized into
//! the generated sidebars module and must match what the consuming
//! static-site tool expects.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A canonical outline node.
///
/// Only the normalizer constructs these, which upholds two invariants the
/// rest of the pipeline relies on:
///
/// - `label` is trimmed and non-empty
/// - at most one of `items` / `headings` is present
///
/// A bare string in the source YAML becomes `Item { label, .. }` with
/// `items: None` — an *absent* child list is distinct from an explicitly
/// empty one, and only a non-empty `items` makes a node a category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    /// Display name and default identifier source. Trimmed, never empty.
    pub label: String,
    /// Explicit routing path segment, composed with ancestor paths.
    pub path: Option<String>,
    /// Identifier override; `slug` wins over `id`, both win over `label`.
    pub slug: Option<String>,
    pub id: Option<String>,
    /// Document title override; falls back to `label` when absent.
    pub title: Option<String>,
    /// Category auto-index description.
    pub brief: Option<String>,
    /// Present ⇒ this node is an external link. Non-empty.
    pub href: Option<String>,
    /// Present ⇒ this node is a raw HTML passthrough.
    pub html: Option<String>,
    /// Attach a generated index page to a category.
    pub generated_index: bool,
    /// Children of a category node. Mutually exclusive with `headings`.
    pub items: Option<Vec<Item>>,
    /// In-page heading scaffold of a topic node. Mutually exclusive with
    /// `items`. A heading's own children live in its `items`.
    pub headings: Option<Vec<Item>>,
    /// Arbitrary pass-through attributes, preserved for rendering.
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Node classification consumed by the builder.
///
/// Precedence: non-empty `items` → category; else `html` → html block; else
/// `href` → link; else topic. Classified once, matched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Category,
    Html,
    Link,
    Topic,
}

impl Item {
    /// Classify this node. An explicit empty `items` array is a topic, not
    /// a category.
    pub fn kind(&self) -> ItemKind {
        if self.items.as_ref().is_some_and(|items| !items.is_empty()) {
            ItemKind::Category
        } else if self.html.is_some() {
            ItemKind::Html
        } else if self.href.is_some() {
            ItemKind::Link
        } else {
            ItemKind::Topic
        }
    }

    /// Identifier source for topic documents: `slug` > `id` > `label`.
    pub fn identifier_source(&self) -> &str {
        self.slug
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or(&self.label)
    }
}

/// A parsed outline file: an optional routing prefix plus its sidebars.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    /// Routing prefix applied to every sidebar in this file.
    pub path: Option<String>,
    /// Top-level sidebars, each a normalized item whose `label` names the
    /// sidebar and whose `items` are its content tree.
    pub sidebars: Vec<Item>,
}

/// A node of the generated sidebars module.
///
/// Serializes to the exact shapes the consuming static-site tool loads:
/// `{type: "doc", id, label}`, `{type: "category", label, items, link?}`,
/// `{type: "link", label, href}`, `{type: "html", value}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputNode {
    Doc {
        id: String,
        label: String,
    },
    Category {
        label: String,
        items: Vec<OutputNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<GeneratedIndex>,
    },
    Link {
        label: String,
        href: String,
    },
    Html {
        value: String,
    },
}

/// The `link` attachment of a category with `generated_index: true`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeneratedIndex {
    #[serde(rename = "type")]
    pub link_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GeneratedIndex {
    /// `description` is attached only when `brief` was a non-empty string.
    pub fn new(description: Option<String>) -> Self {
        Self {
            link_type: "generated-index".to_string(),
            description: description.filter(|d| !d.is_empty()),
        }
    }
}

/// A schema violation (or read/parse failure) recorded against one file.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub message: String,
    pub instance_path: Option<String>,
    pub schema_path: Option<String>,
}

impl ErrorRecord {
    /// A record carrying only a message — used for read and parse failures
    /// where no schema location applies.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            instance_path: None,
            schema_path: None,
        }
    }
}

/// One invalid file with its validation errors, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidFile {
    pub file: PathBuf,
    pub errors: Vec<ErrorRecord>,
}
