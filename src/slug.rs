//! Label and path slugging.
//!
//! Every identifier docsmith writes to disk or into the sidebars module goes
//! through this module. [`slug`] turns an arbitrary display label into a
//! URL- and filesystem-safe token; [`slug_path`] does the same per segment of
//! a `/`-separated routing path.
//!
//! ## Examples
//!
//! - `"Getting Started"` → `"getting-started"`
//! - `"Héllo, Wörld!"` → `"hello-world"`
//! - `"Guides/Advanced Topics"` → `"guides/advanced-topics"` (path-aware)
//!
//! Slugging is idempotent: `slug(slug(x)) == slug(x)`.

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Characters never allowed in a routing path, checked against the raw input
/// before any splitting or slugging takes place.
const UNSAFE_PATH_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SlugError {
    #[error("path contains character unsafe for filesystem paths: {0:?}")]
    UnsafeCharacter(char),
    #[error("path contains traversal sequence `..`: {0:?}")]
    Traversal(String),
}

/// Normalize an arbitrary label into a URL- and filesystem-safe slug.
///
/// Trims, lowercases, decomposes Unicode and drops combining marks, then
/// collapses every run of characters outside `[a-z0-9]` into a single `-`.
/// Leading and trailing separators are stripped. The empty string slugs to
/// the empty string.
pub fn slug(input: &str) -> String {
    let lowered = input.trim().to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut pending_sep = false;
    for ch in lowered.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            out.push(ch);
            pending_sep = false;
        } else {
            // `-` and every other non-alphanumeric character act as
            // separators, so runs collapse and edges strip naturally.
            pending_sep = true;
        }
    }
    out
}

/// Slug a `/`-separated routing path, one segment at a time.
///
/// Accepts `/` and `\` as segment separators (both normalize to `/`). The
/// raw input is rejected if it contains characters unsafe for filesystem
/// paths or a `..` traversal sequence — this check runs before any splitting
/// or slugging, so no segment can smuggle a traversal past it. Empty
/// segments (from doubled separators or segments that slug to nothing) are
/// dropped.
pub fn slug_path(input: &str) -> Result<String, SlugError> {
    if let Some(ch) = input.chars().find(|c| UNSAFE_PATH_CHARS.contains(c)) {
        return Err(SlugError::UnsafeCharacter(ch));
    }
    if input.contains("..") {
        return Err(SlugError::Traversal(input.to_string()));
    }

    let normalized = input.replace('\\', "/");
    let segments: Vec<String> = normalized
        .split('/')
        .map(slug)
        .filter(|segment| !segment.is_empty())
        .collect();
    Ok(segments.join("/"))
}
