use serde::Serialize;
use std::ops::AddAssign;
use tracing::info;

/// Counters collected by one indexer walk.
///
/// Each scan task owns its own `ScanStats`; the coordinator adds them together
/// after the join, so no counter is ever shared between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Directories whose entries were all enumerated
    pub directories_visited: u64,
    /// Directories excluded by a skip rule, and directory symlinks
    pub directories_skipped: u64,
    /// Directories that could not be opened or failed mid-iteration; these are
    /// never also counted as visited
    pub directories_failed: u64,
    /// Subdirectories not entered because the depth budget was spent
    pub depth_limit_hits: u64,
    /// Files loaded into the corpus
    pub files_indexed: u64,
    /// Files whose suffix is not on the allowlist
    pub files_ineligible: u64,
    /// Files over the size ceiling, or that could not be stat'd
    pub files_too_large: u64,
    /// Files that were empty or could not be read
    pub files_empty: u64,
    /// Bytes of content loaded
    pub bytes_loaded: u64,
}

impl ScanStats {
    pub fn new() -> Self {
        Default::default()
    }

    /// Files that were looked at, whatever happened to them
    pub fn files_seen(&self) -> u64 {
        self.files_indexed + self.files_ineligible + self.files_too_large + self.files_empty
    }

    /// Logs a one-line summary
    pub fn log_stats(&self) {
        info!(
            "Scan stats: directories visited/skipped/failed: {}/{}/{}, \
             depth limit hits: {}, \
             files indexed/ineligible/too large/empty: {}/{}/{}/{}, \
             bytes loaded: {}",
            self.directories_visited,
            self.directories_skipped,
            self.directories_failed,
            self.depth_limit_hits,
            self.files_indexed,
            self.files_ineligible,
            self.files_too_large,
            self.files_empty,
            self.bytes_loaded
        );
    }
}

impl AddAssign for ScanStats {
    fn add_assign(&mut self, other: Self) {
        self.directories_visited += other.directories_visited;
        self.directories_skipped += other.directories_skipped;
        self.directories_failed += other.directories_failed;
        self.depth_limit_hits += other.depth_limit_hits;
        self.files_indexed += other.files_indexed;
        self.files_ineligible += other.files_ineligible;
        self.files_too_large += other.files_too_large;
        self.files_empty += other.files_empty;
        self.bytes_loaded += other.bytes_loaded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assign_sums_every_counter() {
        let mut total = ScanStats {
            directories_visited: 2,
            files_indexed: 3,
            bytes_loaded: 100,
            ..ScanStats::new()
        };
        total += ScanStats {
            directories_visited: 1,
            directories_skipped: 1,
            directories_failed: 1,
            depth_limit_hits: 4,
            files_indexed: 2,
            files_ineligible: 5,
            files_too_large: 1,
            files_empty: 1,
            bytes_loaded: 50,
        };

        assert_eq!(total.directories_visited, 3);
        assert_eq!(total.directories_skipped, 1);
        assert_eq!(total.directories_failed, 1);
        assert_eq!(total.depth_limit_hits, 4);
        assert_eq!(total.files_indexed, 5);
        assert_eq!(total.bytes_loaded, 150);
        assert_eq!(total.files_seen(), 5 + 5 + 1 + 1);
    }
}
