//! Shared test utilities for the docsmith test suite.
//!
//! Item constructors avoid repeating `..Item::default()` noise in every
//! test, and `outline_on_disk` writes a fixture outline file where the
//! pipeline stages expect to read one.

use crate::types::Item;
use std::fs;
use std::path::{Path, PathBuf};

/// An item carrying only a label — the canonical form of a bare string.
pub fn labeled(label: &str) -> Item {
    Item {
        label: label.to_string(),
        ..Item::default()
    }
}

/// A category-shaped item with the given children.
pub fn item_with_items(label: &str, items: Vec<Item>) -> Item {
    Item {
        items: Some(items),
        ..labeled(label)
    }
}

/// Write an outline fixture file and return its path.
pub fn outline_on_disk(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
