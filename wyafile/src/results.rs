/// This module holds the structured results handed back to the presentation layer.
///
/// The core never formats anything. A search returns a [`SearchOutcome`] that
/// owns plain paths (no borrowed corpus data), so it can outlive the scan pass:
/// ```rust,ignore
/// let outcome = wyafile::search(&config, &request);
/// for path in &outcome.matches {
///     println!("{}", path.display());
/// }
/// ```
/// Both result types derive `Serialize` for machine-readable output.
use serde::Serialize;
use std::path::PathBuf;

use crate::metrics::ScanStats;

/// The complete result of a scan followed by a search
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    /// The keyword as requested
    pub keyword: String,
    /// Deduplicated matching paths, in acceptance order
    pub matches: Vec<PathBuf>,
    /// Roots that yielded at least one file
    pub scanned_roots: Vec<PathBuf>,
    /// Number of files in the searched corpus
    pub files_indexed: usize,
    /// Merged scan counters
    pub stats: ScanStats,
}

impl SearchOutcome {
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Whether nothing at all was indexed, as opposed to nothing matching
    pub fn is_empty_scan(&self) -> bool {
        self.files_indexed == 0
    }
}
