//! Content inventory scanning for docgate.
//!
//! Walks a documentation source tree, maps markdown files to document ids,
//! and records the heading anchors each document exposes. The resulting
//! [`ContentInventory`] is what the resolver checks references against.

use std::fs;
use std::path::{Path, PathBuf};

use docgate_resolve::ContentInventory;
use thiserror::Error;
use tracing::warn;

mod anchors;

use anchors::heading_anchors;

/// Errors that can occur while scanning a source tree.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Source directory not found: {0}")]
    SourceDirNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds a [`ContentInventory`] by walking the filesystem.
///
/// The scanner performs two steps per markdown file:
/// 1. Map the file path to a document id (`index.md` becomes the id of its
///    containing directory; the root `index.md` becomes the empty id)
/// 2. Read the file and extract heading anchors
///
/// A file that cannot be read still enters the inventory, with an unknown
/// anchor set, so a transient read failure downgrades anchor checks rather
/// than producing false broken-document errors.
pub struct InventoryScanner {
    source_dir: PathBuf,
}

impl InventoryScanner {
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the source tree and return the content inventory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::SourceDirNotFound`] if the source directory does
    /// not exist, or [`ScanError::Io`] if a directory cannot be listed.
    pub fn scan(&self) -> Result<ContentInventory, ScanError> {
        if !self.source_dir.is_dir() {
            return Err(ScanError::SourceDirNotFound(self.source_dir.clone()));
        }

        let mut inventory = ContentInventory::new();
        self.scan_directory(&self.source_dir, "", &mut inventory)?;
        Ok(inventory)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        id_prefix: &str,
        inventory: &mut ContentInventory,
    ) -> Result<(), ScanError> {
        // Sort entries by name so inventory contents do not depend on
        // readdir order
        let mut entries: Vec<_> = fs::read_dir(dir_path)?
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name = e.file_name().to_string_lossy().into_owned();
                (e.path(), is_dir, name)
            })
            .collect();
        entries.sort_by(|a, b| a.2.cmp(&b.2));

        for (path, is_dir, name) in entries {
            // Skip hidden files/dirs and underscore-prefixed partials
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            if is_dir {
                let child_prefix = if id_prefix.is_empty() {
                    name
                } else {
                    format!("{id_prefix}/{name}")
                };
                self.scan_directory(&path, &child_prefix, inventory)?;
            } else if path.extension().is_some_and(|e| e == "md") {
                let doc_id = file_path_to_id(Path::new(&name), id_prefix);
                scan_file(&path, doc_id, inventory);
            }
        }

        Ok(())
    }
}

fn scan_file(path: &Path, doc_id: String, inventory: &mut ContentInventory) {
    match fs::read_to_string(path) {
        Ok(content) => {
            inventory.insert_with_anchors(doc_id, heading_anchors(&content));
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to read document, anchors unknown");
            inventory.insert(doc_id);
        }
    }
}

/// Convert a markdown file path to a document id with an optional prefix.
///
/// Examples (with empty prefix):
/// - `index.md` -> `""`
/// - `guide.md` -> `"guide"`
///
/// Examples (with prefix `"domain"`):
/// - `index.md` -> `"domain"`
/// - `setup.md` -> `"domain/setup"`
fn file_path_to_id(file_name: &Path, prefix: &str) -> String {
    let name = file_name.to_string_lossy();
    let without_ext = name.strip_suffix(".md").unwrap_or(&name);
    let part = if without_ext == "index" {
        ""
    } else {
        without_ext
    };

    match (prefix.is_empty(), part.is_empty()) {
        (true, _) => part.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}/{part}"),
    }
}
