//! Resolution report.

use serde::Serialize;

use crate::link::LinkReference;

/// Verdict for a single checked reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The reference resolves (or is external and accepted).
    Resolved,
    /// An internal document reference with no matching inventory entry.
    Broken,
    /// An anchor whose document resolves but whose fragment does not.
    Warned,
}

/// One checked reference with its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Where the reference was declared, e.g. `sidebar > Guides > Quick Start`.
    pub origin: String,
    /// The reference that was checked.
    pub reference: LinkReference,
    /// Verdict.
    pub status: Status,
    /// Human-readable explanation for broken and warned entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Ordered list of checked references.
///
/// Entries appear in discovery order, so resolving identical input twice
/// yields byte-identical reports. Suitable for emission as a structured
/// build log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolutionReport {
    entries: Vec<ReportEntry>,
}

impl ResolutionReport {
    /// Create a report from checked entries.
    #[must_use]
    pub(crate) fn new(entries: Vec<ReportEntry>) -> Self {
        Self { entries }
    }

    /// All entries in discovery order.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Broken entries in discovery order.
    pub fn broken(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.status == Status::Broken)
    }

    /// Warned entries in discovery order.
    pub fn warned(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.status == Status::Warned)
    }

    /// True if any entry is broken.
    #[must_use]
    pub fn has_broken(&self) -> bool {
        self.broken().next().is_some()
    }

    /// True if any entry is warned.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.warned().next().is_some()
    }

    /// Number of resolved entries.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.count(Status::Resolved)
    }

    /// Number of broken entries.
    #[must_use]
    pub fn broken_count(&self) -> usize {
        self.count(Status::Broken)
    }

    /// Number of warned entries.
    #[must_use]
    pub fn warned_count(&self) -> usize {
        self.count(Status::Warned)
    }

    fn count(&self, status: Status) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}
