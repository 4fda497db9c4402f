//! Reference resolution for docgate.
//!
//! Cross-checks every navigation entry and declared link against the content
//! inventory, classifying each reference as resolved, broken, or warned.
//! The output [`ResolutionReport`] feeds the build gate: broken references
//! halt the build under the `throw` policy, warned references are advisory.
//!
//! Resolution is a pure in-memory pass. Report entries appear in discovery
//! order (depth-first over the navigation tree, then extra links in the order
//! given), so identical input always produces a byte-identical report.

mod inventory;
mod link;
mod report;

pub use inventory::ContentInventory;
pub use link::{LinkKind, LinkPolicy, LinkReference, SourcedLink};
pub use report::{ReportEntry, ResolutionReport, Status};

use docgate_nav::NavTree;

/// Resolve every reference in the tree and the extra links against the
/// inventory.
///
/// Sidebar leaves are checked as `internal-doc` references. Extra links
/// (navbar, footer, and optionally in-content cross-references supplied by
/// the content pipeline) are checked according to their [`LinkKind`]:
/// external URLs are accepted unconditionally and recorded for completeness,
/// internal references are validated against the inventory. Neither input is
/// mutated.
#[must_use]
pub fn resolve(
    tree: &NavTree,
    inventory: &ContentInventory,
    extra_links: &[SourcedLink],
) -> ResolutionReport {
    let mut entries = Vec::new();

    for doc_ref in tree.doc_refs() {
        let reference = LinkReference::internal_doc(&doc_ref.id);
        let (status, detail) = check_reference(&reference, inventory);
        entries.push(ReportEntry {
            origin: format!("sidebar > {}", doc_ref.path),
            reference,
            status,
            detail,
        });
    }

    for link in extra_links {
        let (status, detail) = check_reference(&link.reference, inventory);
        entries.push(ReportEntry {
            origin: link.origin.clone(),
            reference: link.reference.clone(),
            status,
            detail,
        });
    }

    let report = ResolutionReport::new(entries);
    tracing::debug!(
        resolved = report.resolved_count(),
        broken = report.broken_count(),
        warned = report.warned_count(),
        "reference resolution complete"
    );
    report
}

/// Check a single reference against the inventory.
fn check_reference(
    reference: &LinkReference,
    inventory: &ContentInventory,
) -> (Status, Option<String>) {
    match reference.kind {
        // Reachability of external URLs is out of scope; no network calls.
        LinkKind::ExternalUrl => (Status::Resolved, None),
        LinkKind::InternalDoc => {
            if inventory.contains(reference.doc_id()) {
                (Status::Resolved, None)
            } else {
                (
                    Status::Broken,
                    Some(format!(
                        "document '{}' does not exist",
                        reference.doc_id()
                    )),
                )
            }
        }
        LinkKind::InternalAnchor => {
            let doc_id = reference.doc_id();
            if !inventory.contains(doc_id) {
                return (
                    Status::Broken,
                    Some(format!("document '{doc_id}' does not exist")),
                );
            }
            // Fragment validation is best-effort: only warn when the
            // document's heading set is known and the anchor is absent.
            match (reference.fragment(), inventory.anchors(doc_id)) {
                (Some(fragment), Some(anchors)) if !anchors.contains(fragment) => (
                    Status::Warned,
                    Some(format!("anchor '#{fragment}' not found in '{doc_id}'")),
                ),
                _ => (Status::Resolved, None),
            }
        }
    }
}
