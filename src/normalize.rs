//! Outline normalization: raw YAML shapes → canonical [`Item`] trees.
//!
//! Outline authors write items in several sugared forms:
//!
//! ```yaml
//! sidebars:
//!   - Plain string                    # sugar for {label: "Plain string"}
//!   - Shorthand:                      # sugar for {label: "Shorthand", items: [...]}
//!       - Child topic
//!   - label: Full form
//!     items:
//!       - Nested
//! ```
//!
//! This module reduces all of them to one canonical representation. The raw
//! value's shape is classified exactly once into [`RawShape`] and matched
//! exhaustively, so every accepted input form corresponds to one arm — no
//! repeated duck-typed property probing.
//!
//! Normalization is recursive and top-down: a node is normalized, then its
//! children (whichever of `items` / `headings` is present). It is pure: the
//! input [`serde_yaml::Value`] is never mutated.

use crate::types::{Item, Outline};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("invalid item: {0}")]
    InvalidItem(String),
    #[error("item label is empty after trimming")]
    EmptyLabel,
    #[error("item {0:?} has both `items` and `headings`")]
    ConflictingShape(String),
    #[error("invalid item shape: {0}")]
    InvalidShape(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Fields lifted out of the raw mapping into dedicated [`Item`] fields.
/// Everything else is preserved verbatim in `Item::extra`.
const KNOWN_FIELDS: &[&str] = &[
    "label",
    "path",
    "slug",
    "id",
    "title",
    "brief",
    "href",
    "html",
    "generated_index",
    "items",
    "headings",
];

/// The three accepted raw shapes of an outline item.
enum RawShape<'a> {
    /// A bare string: `- Introduction`.
    Scalar(&'a str),
    /// A mapping carrying an explicit `label` key.
    Labeled(&'a Mapping),
    /// A single-key mapping without `label`: `- Category: [a, b]` — the key
    /// is the label, the value must be the child array.
    KeyedShorthand(&'a Value, &'a Value),
}

fn classify(raw: &Value) -> Result<RawShape<'_>, NormalizeError> {
    match raw {
        Value::Null => Err(NormalizeError::InvalidItem("item is null".to_string())),
        Value::String(s) => Ok(RawShape::Scalar(s)),
        Value::Bool(_) | Value::Number(_) => Err(NormalizeError::InvalidItem(format!(
            "expected a string or mapping, got scalar {raw:?}"
        ))),
        Value::Sequence(_) => Err(NormalizeError::InvalidItem(
            "expected a string or mapping, got a sequence".to_string(),
        )),
        Value::Mapping(mapping) => {
            if mapping.get("label").is_some() {
                Ok(RawShape::Labeled(mapping))
            } else {
                let (key, value) = mapping.iter().next().ok_or_else(|| {
                    NormalizeError::InvalidItem("item mapping is empty".to_string())
                })?;
                Ok(RawShape::KeyedShorthand(key, value))
            }
        }
        Value::Tagged(_) => Err(NormalizeError::InvalidItem(
            "tagged YAML values are not valid items".to_string(),
        )),
    }
}

/// Normalize a raw YAML value into a canonical [`Item`].
pub fn normalize_item(raw: &Value) -> Result<Item, NormalizeError> {
    match classify(raw)? {
        RawShape::Scalar(label) => labeled_only(label),
        RawShape::KeyedShorthand(key, value) => {
            let label = key.as_str().ok_or_else(|| {
                NormalizeError::InvalidItem(format!("item key must be a string, got {key:?}"))
            })?;
            let children = value.as_sequence().ok_or_else(|| {
                NormalizeError::InvalidItem(format!(
                    "first property value must be an array (under {label:?})"
                ))
            })?;
            let mut item = labeled_only(label)?;
            item.items = Some(normalize_children(children)?);
            Ok(item)
        }
        RawShape::Labeled(mapping) => normalize_labeled(mapping),
    }
}

/// Build an item carrying nothing but its (trimmed, validated) label.
fn labeled_only(label: &str) -> Result<Item, NormalizeError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(NormalizeError::EmptyLabel);
    }
    Ok(Item {
        label: label.to_string(),
        ..Item::default()
    })
}

fn normalize_labeled(mapping: &Mapping) -> Result<Item, NormalizeError> {
    let label_value = mapping.get("label").ok_or_else(|| {
        NormalizeError::InvalidItem("mapping lost its label during classification".to_string())
    })?;
    let label = label_value
        .as_str()
        .ok_or_else(|| NormalizeError::InvalidShape("`label` must be a string".to_string()))?;
    let mut item = labeled_only(label)?;

    let items = child_sequence(mapping, "items", &item.label)?;
    let headings = child_sequence(mapping, "headings", &item.label)?;
    if items.is_some() && headings.is_some() {
        return Err(NormalizeError::ConflictingShape(item.label));
    }
    item.items = items.map(|children| normalize_children(children)).transpose()?;
    item.headings = headings
        .map(|children| normalize_children(children))
        .transpose()?;

    item.path = string_field(mapping, "path")?;
    item.slug = string_field(mapping, "slug")?;
    item.id = string_field(mapping, "id")?;
    item.title = string_field(mapping, "title")?;
    item.brief = string_field(mapping, "brief")?;
    item.html = string_field(mapping, "html")?;

    item.href = string_field(mapping, "href")?;
    if let Some(href) = &item.href
        && href.trim().is_empty()
    {
        return Err(NormalizeError::InvalidShape(format!(
            "`href` must be a non-empty string (item {:?})",
            item.label
        )));
    }

    if let Some(value) = mapping.get("generated_index") {
        item.generated_index = value.as_bool().ok_or_else(|| {
            NormalizeError::InvalidShape(format!(
                "`generated_index` must be a boolean (item {:?})",
                item.label
            ))
        })?;
    }

    item.extra = passthrough_attributes(mapping)?;
    Ok(item)
}

/// Look up `field` and require it to be a sequence when present. An explicit
/// `null` is present-but-wrong, same as any other non-sequence value.
fn child_sequence<'a>(
    mapping: &'a Mapping,
    field: &str,
    label: &str,
) -> Result<Option<&'a Vec<Value>>, NormalizeError> {
    match mapping.get(field) {
        None => Ok(None),
        Some(value) => value.as_sequence().map(Some).ok_or_else(|| {
            NormalizeError::InvalidShape(format!("`{field}` must be an array (item {label:?})"))
        }),
    }
}

fn normalize_children(children: &[Value]) -> Result<Vec<Item>, NormalizeError> {
    children.iter().map(normalize_item).collect()
}

fn string_field(mapping: &Mapping, field: &str) -> Result<Option<String>, NormalizeError> {
    match mapping.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| NormalizeError::InvalidShape(format!("`{field}` must be a string"))),
    }
}

/// Collect unrecognized attributes for template pass-through, preserving
/// their values verbatim.
fn passthrough_attributes(
    mapping: &Mapping,
) -> Result<BTreeMap<String, Value>, NormalizeError> {
    let mut extra = BTreeMap::new();
    for (key, value) in mapping {
        let key = key.as_str().ok_or_else(|| {
            NormalizeError::InvalidShape(format!("attribute keys must be strings, got {key:?}"))
        })?;
        if !KNOWN_FIELDS.contains(&key) {
            extra.insert(key.to_string(), value.clone());
        }
    }
    Ok(extra)
}

/// Parse a whole outline document: optional `path` prefix + `sidebars` list.
pub fn parse_outline(raw: &Value) -> Result<Outline, NormalizeError> {
    let mapping = raw.as_mapping().ok_or_else(|| {
        NormalizeError::InvalidItem("outline document must be a mapping".to_string())
    })?;
    let path = match mapping.get("path") {
        None => None,
        Some(value) => Some(
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| {
                    NormalizeError::InvalidShape("outline `path` must be a string".to_string())
                })?,
        ),
    };
    let sidebars = match mapping.get("sidebars") {
        None => Vec::new(),
        Some(value) => {
            let entries = value.as_sequence().ok_or_else(|| {
                NormalizeError::InvalidShape("`sidebars` must be an array".to_string())
            })?;
            normalize_children(entries)?
        }
    };
    Ok(Outline { path, sidebars })
}

/// Read and parse one outline file from disk.
pub fn read_outline(file: &Path) -> Result<Outline, NormalizeError> {
    let content = fs::read_to_string(file)?;
    let raw: Value = serde_yaml::from_str(&content)?;
    parse_outline(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemKind;

    fn yaml(source: &str) -> Value {
        serde_yaml::from_str(source).unwrap()
    }

    #[test]
    fn bare_string_becomes_label_without_items() {
        let item = normalize_item(&yaml("Hello")).unwrap();
        assert_eq!(item.label, "Hello");
        assert_eq!(item.items, None);
        assert_eq!(item.headings, None);
    }

    #[test]
    fn bare_string_is_trimmed() {
        let item = normalize_item(&yaml("'  Hello  '")).unwrap();
        assert_eq!(item.label, "Hello");
    }

    #[test]
    fn null_is_invalid() {
        assert!(matches!(
            normalize_item(&Value::Null),
            Err(NormalizeError::InvalidItem(_))
        ));
    }

    #[test]
    fn non_string_scalars_are_invalid() {
        assert!(matches!(
            normalize_item(&yaml("42")),
            Err(NormalizeError::InvalidItem(_))
        ));
        assert!(matches!(
            normalize_item(&yaml("true")),
            Err(NormalizeError::InvalidItem(_))
        ));
    }

    #[test]
    fn keyed_shorthand_expands_to_category_shape() {
        let item = normalize_item(&yaml("Category:\n  - a\n  - b")).unwrap();
        assert_eq!(item.label, "Category");
        let children = item.items.as_deref().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].label, "a");
        assert_eq!(children[1].label, "b");
        assert_eq!(children[0].items, None);
    }

    #[test]
    fn keyed_shorthand_requires_array_value() {
        let err = normalize_item(&yaml("Category: not-an-array")).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidItem(_)));
        assert!(err.to_string().contains("first property value"));
    }

    #[test]
    fn empty_label_rejected() {
        assert!(matches!(
            normalize_item(&yaml("label: '   '")),
            Err(NormalizeError::EmptyLabel)
        ));
        assert!(matches!(
            normalize_item(&yaml("'   '")),
            Err(NormalizeError::EmptyLabel)
        ));
    }

    #[test]
    fn both_items_and_headings_conflict() {
        let err = normalize_item(&yaml("label: x\nitems: []\nheadings: []")).unwrap_err();
        assert!(matches!(err, NormalizeError::ConflictingShape(label) if label == "x"));
    }

    #[test]
    fn items_must_be_an_array() {
        assert!(matches!(
            normalize_item(&yaml("label: x\nitems: nope")),
            Err(NormalizeError::InvalidShape(_))
        ));
        // explicit null is present-but-wrong
        assert!(matches!(
            normalize_item(&yaml("label: x\nitems: ~")),
            Err(NormalizeError::InvalidShape(_))
        ));
    }

    #[test]
    fn headings_must_be_an_array() {
        assert!(matches!(
            normalize_item(&yaml("label: x\nheadings: nope")),
            Err(NormalizeError::InvalidShape(_))
        ));
    }

    #[test]
    fn children_normalized_recursively() {
        let item = normalize_item(&yaml(
            "label: Top\nitems:\n  - Leaf\n  - Inner:\n      - Deep",
        ))
        .unwrap();
        let children = item.items.as_deref().unwrap();
        assert_eq!(children[0].label, "Leaf");
        assert_eq!(children[1].label, "Inner");
        assert_eq!(children[1].items.as_deref().unwrap()[0].label, "Deep");
    }

    #[test]
    fn invalid_grandchild_surfaces() {
        assert!(normalize_item(&yaml("label: Top\nitems:\n  - label: ''")).is_err());
    }

    #[test]
    fn empty_href_rejected() {
        assert!(matches!(
            normalize_item(&yaml("label: x\nhref: ''")),
            Err(NormalizeError::InvalidShape(_))
        ));
    }

    #[test]
    fn non_string_href_rejected() {
        assert!(matches!(
            normalize_item(&yaml("label: x\nhref: 7")),
            Err(NormalizeError::InvalidShape(_))
        ));
    }

    #[test]
    fn known_fields_are_lifted() {
        let item = normalize_item(&yaml(
            "label: x\npath: guides\nslug: custom\nid: xid\ntitle: Title\nbrief: Short\ngenerated_index: true",
        ))
        .unwrap();
        assert_eq!(item.path.as_deref(), Some("guides"));
        assert_eq!(item.slug.as_deref(), Some("custom"));
        assert_eq!(item.id.as_deref(), Some("xid"));
        assert_eq!(item.title.as_deref(), Some("Title"));
        assert_eq!(item.brief.as_deref(), Some("Short"));
        assert!(item.generated_index);
        assert!(item.extra.is_empty());
    }

    #[test]
    fn unknown_attributes_pass_through() {
        let item = normalize_item(&yaml("label: x\ntags: [a, b]\nsidebar_position: 3")).unwrap();
        assert_eq!(item.extra.len(), 2);
        assert!(item.extra.contains_key("tags"));
        assert_eq!(
            item.extra.get("sidebar_position"),
            Some(&yaml("3"))
        );
    }

    #[test]
    fn normalized_tree_never_violates_invariants() {
        let item = normalize_item(&yaml(
            "label: Top\nitems:\n  - First\n  - Second:\n      - Leaf\n  - label: Third\n    headings:\n      - H1",
        ))
        .unwrap();
        fn check(item: &Item) {
            assert!(!item.label.is_empty());
            assert!(!(item.items.is_some() && item.headings.is_some()));
            for child in item.items.iter().flatten().chain(item.headings.iter().flatten()) {
                check(child);
            }
        }
        check(&item);
    }

    #[test]
    fn classification_follows_kind_precedence() {
        let cat = normalize_item(&yaml("label: c\nitems: [a]")).unwrap();
        assert_eq!(cat.kind(), ItemKind::Category);
        let topic = normalize_item(&yaml("label: t\nitems: []")).unwrap();
        assert_eq!(topic.kind(), ItemKind::Topic);
        let link = normalize_item(&yaml("label: l\nhref: https://example.com")).unwrap();
        assert_eq!(link.kind(), ItemKind::Link);
        let html = normalize_item(&yaml("label: h\nhtml: '<hr/>'")).unwrap();
        assert_eq!(html.kind(), ItemKind::Html);
    }

    #[test]
    fn input_value_is_not_mutated() {
        let raw = yaml("label: '  padded  '\nitems:\n  - child");
        let before = raw.clone();
        let item = normalize_item(&raw).unwrap();
        assert_eq!(item.label, "padded");
        assert_eq!(raw, before);
    }

    #[test]
    fn outline_with_path_and_sidebars() {
        let outline = parse_outline(&yaml(
            "path: guides\nsidebars:\n  - label: Docs\n    items: [Intro]",
        ))
        .unwrap();
        assert_eq!(outline.path.as_deref(), Some("guides"));
        assert_eq!(outline.sidebars.len(), 1);
        assert_eq!(outline.sidebars[0].label, "Docs");
    }

    #[test]
    fn outline_without_sidebars_is_empty() {
        let outline = parse_outline(&yaml("path: guides")).unwrap();
        assert!(outline.sidebars.is_empty());
    }

    #[test]
    fn outline_must_be_a_mapping() {
        assert!(parse_outline(&yaml("- a\n- b")).is_err());
    }
}
