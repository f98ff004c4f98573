//! Topic document rendering.
//!
//! Turns a topic [`Item`] into Markdown text: YAML front matter, a title
//! heading, optional descriptive paragraphs, and the nested heading
//! scaffold. Rendering is done in code rather than through a runtime
//! template engine — templates would be one more file to ship and get out
//! of sync, and the documents are small enough that format strings stay
//! readable.
//!
//! All functions here are pure: no I/O, no side effects. The builder owns
//! filesystem writes.

use crate::types::Item;

/// Render a complete topic document.
///
/// `slug` is the computed, collision-resolved identifier — it goes into the
/// front matter so the document can never disagree with its own path.
pub fn render_topic(item: &Item, slug: &str) -> String {
    let mut lines = Vec::new();

    lines.push("---".to_string());
    lines.push(format!("sidebar_label: {}", yaml_scalar(&item.label)));
    if !slug.is_empty() {
        lines.push(format!("slug: {slug}"));
    }
    lines.push("---".to_string());

    let title = item
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&item.label);
    lines.push(String::new());
    lines.push(format!("# {title}"));

    if let Some(brief) = non_empty(item.brief.as_deref()) {
        lines.push(String::new());
        lines.push(brief.to_string());
    }
    if let Some(description) = item
        .extra
        .get("description")
        .and_then(serde_yaml::Value::as_str)
        .and_then(|d| non_empty(Some(d)))
    {
        lines.push(String::new());
        lines.push(description.to_string());
    }

    if let Some(headings) = item.headings.as_deref() {
        lines.extend(render_headings(headings, 2));
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Render a heading scaffold. Headings start at level 2 (the title owns
/// level 1); a heading's children live in its `items` and render one level
/// deeper.
pub fn render_headings(items: &[Item], level: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for item in items {
        lines.push(String::new());
        lines.push(format!("{} {}", "#".repeat(level), item.label));
        if let Some(brief) = non_empty(item.brief.as_deref()) {
            lines.push(String::new());
            lines.push(brief.to_string());
        }
        if let Some(children) = item.items.as_deref() {
            lines.extend(render_headings(children, level + 1));
        }
    }
    lines
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Quote a front-matter scalar. Labels are author-controlled free text, so
/// always double-quote and escape rather than guessing which characters
/// YAML would accept bare.
fn yaml_scalar(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
