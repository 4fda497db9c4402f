//! Heading anchor extraction from markdown.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Extract heading anchors from markdown content.
///
/// Heading text is slugified the same way the rendering layer assigns
/// heading ids; duplicate slugs get `-1`, `-2`, ... suffixes in document
/// order.
pub(crate) fn heading_anchors(markdown: &str) -> Vec<String> {
    let mut anchors = Vec::new();
    let mut current: Option<String> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                current = Some(String::new());
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = current.take() {
                    push_unique(&mut anchors, slugify(&text));
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            _ => {}
        }
    }

    anchors
}

/// Append a slug, suffixing duplicates with `-1`, `-2`, ...
fn push_unique(anchors: &mut Vec<String>, slug: String) {
    if !anchors.iter().any(|a| *a == slug) {
        anchors.push(slug);
        return;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{slug}-{n}");
        if !anchors.iter().any(|a| *a == candidate) {
            anchors.push(candidate);
            return;
        }
        n += 1;
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single
/// dashes, and removes other non-alphanumeric characters.
fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    // Remove trailing dash if present
    if result.ends_with('-') {
        result.pop();
    }

    result
}
