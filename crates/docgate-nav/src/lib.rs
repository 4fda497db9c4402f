//! Navigation tree construction for docgate.
//!
//! Normalizes the declared sidebar specification into a validated [`NavTree`]:
//! bare document-id strings become leaves, `{ type = "category", ... }` tables
//! become categories with ordered children. Construction rejects malformed
//! entries, empty categories, and duplicate document ids with a [`SchemaError`]
//! that names the offending entry by its full path from the sidebar root
//! (e.g. `Guides > Quick Start`).
//!
//! Declared ordering is a rendering contract: it is preserved at every level
//! and never sorted.
//!
//! This crate is a pure transformation over already-loaded input. It performs
//! no I/O; parsing the configuration file that carries the spec is handled by
//! `docgate-config`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used when rendering entry paths in error messages.
const PATH_SEPARATOR: &str = " > ";

/// Raw declared form of a navigation entry.
///
/// Matches the shapes allowed in the `[nav]` section of `docgate.toml`:
///
/// ```toml
/// sidebar = [
///     "intro",
///     { type = "doc", id = "demo", label = "Live Demo" },
///     { type = "category", label = "Concepts", items = ["concepts/two-layer-trust"] },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NavEntrySpec {
    /// Bare document id, shorthand for a doc entry without an explicit label.
    Id(String),
    /// Structured entry with an explicit `type`.
    Item(ItemSpec),
}

/// Structured navigation entry forms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemSpec {
    /// Leaf entry referencing a single document.
    Doc {
        /// Document id the entry links to.
        id: String,
        /// Optional display label override.
        #[serde(default)]
        label: Option<String>,
    },
    /// Category grouping an ordered list of child entries.
    Category {
        /// Display label for the category.
        label: String,
        /// Child entries in rendering order. Missing or empty lists are
        /// rejected during [`NavTree::build`].
        #[serde(default)]
        items: Vec<NavEntrySpec>,
    },
}

impl From<&str> for NavEntrySpec {
    fn from(id: &str) -> Self {
        Self::Id(id.to_owned())
    }
}

/// Normalized navigation tree node.
///
/// The tagged representation makes leaf/category handling exhaustive at
/// compile time; consumers never shape-sniff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavEntry {
    /// Leaf entry owning exactly one document id.
    Leaf {
        /// Document id the entry links to.
        id: String,
        /// Declared display label, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Category owning an ordered, non-empty sequence of children.
    Category {
        /// Display label.
        label: String,
        /// Child entries in rendering order.
        children: Vec<NavEntry>,
    },
}

impl NavEntry {
    /// Display label for this entry.
    ///
    /// Leaves without a declared label fall back to a title derived from the
    /// document id: the last path segment, title-cased
    /// (`guides/quick-start` becomes `Quick Start`).
    #[must_use]
    pub fn display_label(&self) -> String {
        match self {
            Self::Leaf { id, label } => label
                .clone()
                .unwrap_or_else(|| derive_label(id)),
            Self::Category { label, .. } => label.clone(),
        }
    }
}

/// A leaf's document id together with its full path from the sidebar root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRef {
    /// Document id referenced by the leaf.
    pub id: String,
    /// Full path of display labels, e.g. `Guides > Quick Start`.
    pub path: EntryPath,
}

/// Path of an entry from the sidebar root, rendered as labels joined
/// with ` > `.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryPath(String);

impl EntryPath {
    fn from_segments(segments: &[String]) -> Self {
        Self(segments.join(PATH_SEPARATOR))
    }

    /// Path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Malformed navigation spec.
///
/// Always fatal to the build; raised during [`NavTree::build`] and never
/// recovered in-process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A leaf entry declared an empty document id.
    #[error("navigation entry '{path}' has an empty document id")]
    EmptyId {
        /// Path of the offending entry.
        path: EntryPath,
    },
    /// A category declared an empty label.
    #[error("category under '{parent}' has an empty label")]
    EmptyLabel {
        /// Path of the enclosing entry, or the sidebar root.
        parent: EntryPath,
    },
    /// A category declared no child entries.
    #[error("category '{path}' has no items")]
    EmptyCategory {
        /// Path of the offending category.
        path: EntryPath,
    },
    /// The same document id appeared under two leaves.
    #[error("duplicate document id '{id}' in navigation: '{first}' and '{second}'")]
    DuplicateId {
        /// The duplicated document id.
        id: String,
        /// Path of the first occurrence.
        first: EntryPath,
        /// Path of the second occurrence.
        second: EntryPath,
    },
}

/// Validated navigation tree with ordered roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavTree {
    roots: Vec<NavEntry>,
}

impl NavTree {
    /// Build a navigation tree from the declared spec.
    ///
    /// Normalizes every entry, preserving declared order at every level, and
    /// validates the whole tree in a single pass: leaf ids must be non-empty
    /// and unique across the tree, categories must have a label and at least
    /// one child. The first violation found is reported.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] naming the offending entry by its full path.
    pub fn build(spec: &[NavEntrySpec]) -> Result<Self, SchemaError> {
        let mut seen: HashMap<String, EntryPath> = HashMap::new();
        let mut segments: Vec<String> = Vec::new();
        let mut roots = Vec::with_capacity(spec.len());
        for entry in spec {
            roots.push(normalize(entry, &mut segments, &mut seen)?);
        }
        Ok(Self { roots })
    }

    /// Root entries in rendering order.
    #[must_use]
    pub fn roots(&self) -> &[NavEntry] {
        &self.roots
    }

    /// True if the tree has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Collect every leaf's document reference in depth-first order.
    ///
    /// The returned order matches the declared rendering order exactly.
    #[must_use]
    pub fn doc_refs(&self) -> Vec<DocRef> {
        let mut refs = Vec::new();
        let mut segments = Vec::new();
        for entry in &self.roots {
            collect_refs(entry, &mut segments, &mut refs);
        }
        refs
    }
}

/// Derive a display title from a document id.
///
/// Takes the last path segment and title-cases it, replacing `-` and `_`
/// with spaces: `guides/quick-start` becomes `Quick Start`.
#[must_use]
pub fn derive_label(id: &str) -> String {
    let slug = id.rsplit('/').next().unwrap_or(id);
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Normalize one spec entry, recursing into categories.
fn normalize(
    spec: &NavEntrySpec,
    segments: &mut Vec<String>,
    seen: &mut HashMap<String, EntryPath>,
) -> Result<NavEntry, SchemaError> {
    match spec {
        NavEntrySpec::Id(id) => normalize_leaf(id, None, segments, seen),
        NavEntrySpec::Item(ItemSpec::Doc { id, label }) => {
            normalize_leaf(id, label.as_deref(), segments, seen)
        }
        NavEntrySpec::Item(ItemSpec::Category { label, items }) => {
            if label.trim().is_empty() {
                return Err(SchemaError::EmptyLabel {
                    parent: parent_path(segments),
                });
            }
            segments.push(label.clone());
            if items.is_empty() {
                let path = EntryPath::from_segments(segments);
                segments.pop();
                return Err(SchemaError::EmptyCategory { path });
            }
            let mut children = Vec::with_capacity(items.len());
            for item in items {
                match normalize(item, segments, seen) {
                    Ok(child) => children.push(child),
                    Err(err) => {
                        segments.pop();
                        return Err(err);
                    }
                }
            }
            segments.pop();
            Ok(NavEntry::Category {
                label: label.clone(),
                children,
            })
        }
    }
}

/// Normalize a leaf, recording its id for duplicate detection.
fn normalize_leaf(
    id: &str,
    label: Option<&str>,
    segments: &mut Vec<String>,
    seen: &mut HashMap<String, EntryPath>,
) -> Result<NavEntry, SchemaError> {
    if id.trim().is_empty() {
        return Err(SchemaError::EmptyId {
            path: parent_path(segments),
        });
    }

    let display = label.map_or_else(|| derive_label(id), ToOwned::to_owned);
    segments.push(display);
    let path = EntryPath::from_segments(segments);
    segments.pop();

    if let Some(first) = seen.get(id) {
        return Err(SchemaError::DuplicateId {
            id: id.to_owned(),
            first: first.clone(),
            second: path,
        });
    }
    seen.insert(id.to_owned(), path);

    Ok(NavEntry::Leaf {
        id: id.to_owned(),
        label: label.map(ToOwned::to_owned),
    })
}

/// Path of the enclosing entry, or the sidebar root when at top level.
fn parent_path(segments: &[String]) -> EntryPath {
    if segments.is_empty() {
        EntryPath("sidebar".to_owned())
    } else {
        EntryPath::from_segments(segments)
    }
}

/// Depth-first leaf collection with path tracking.
fn collect_refs(entry: &NavEntry, segments: &mut Vec<String>, refs: &mut Vec<DocRef>) {
    match entry {
        NavEntry::Leaf { id, .. } => {
            segments.push(entry.display_label());
            refs.push(DocRef {
                id: id.clone(),
                path: EntryPath::from_segments(segments),
            });
            segments.pop();
        }
        NavEntry::Category { label, children } => {
            segments.push(label.clone());
            for child in children {
                collect_refs(child, segments, refs);
            }
            segments.pop();
        }
    }
}
