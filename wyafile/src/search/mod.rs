/// This module implements the keyword search over a scanned corpus.
///
/// # Pipeline
///
/// A search request runs in two phases separated by a join:
/// ```text
/// roots ──► ScanCoordinator (one task per root) ──► merged Corpus
///                                                        │
///             deduplicated matches ◄── SearchEngine (one task per chunk)
/// ```
/// Nothing is streamed between the phases: the corpus is complete before the
/// first chunk is searched, and it is dropped when [`search`] returns.
///
/// # Parallel chunks
///
/// The corpus is split into at most `thread_count` contiguous chunks:
/// ```rust,ignore
/// let size = chunk_size(corpus.len(), workers); // ceil(len / workers), at least 1
/// ```
/// Workers send their hits over a channel as they finish. A single consumer
/// drains it and applies the (basename, content) dedup, so no lock is needed.
pub mod dedup;
pub mod engine;

pub use dedup::MatchDeduplicator;
pub use engine::{chunk_size, partition, MatchMode, SearchEngine};

use std::path::PathBuf;
use tracing::info;

use crate::config::IndexConfig;
use crate::coordinator::ScanCoordinator;
use crate::pool::WorkerPool;
use crate::results::SearchOutcome;

/// One search invocation: built once, never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub roots: Vec<PathBuf>,
    pub keyword: String,
    pub match_mode: MatchMode,
}

impl SearchRequest {
    pub fn new(roots: Vec<PathBuf>, keyword: impl Into<String>) -> Self {
        Self {
            roots,
            keyword: keyword.into(),
            match_mode: MatchMode::default(),
        }
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }
}

/// Scans every root of the request, then searches the merged corpus
pub fn search(config: &IndexConfig, request: &SearchRequest) -> SearchOutcome {
    search_on_pool(&WorkerPool::from_config(config), config, request)
}

/// Like [`search`], but both phases run on `pool`
pub fn search_on_pool(
    pool: &WorkerPool,
    config: &IndexConfig,
    request: &SearchRequest,
) -> SearchOutcome {
    info!(
        "Starting search for '{}' over {} roots",
        request.keyword,
        request.roots.len()
    );

    let scan = ScanCoordinator::from_config(config)
        .with_pool(pool.clone())
        .scan_all(&request.roots);
    let matches = SearchEngine::from_config(config)
        .with_pool(pool.clone())
        .with_match_mode(request.match_mode)
        .search(&scan.corpus, &request.keyword);

    SearchOutcome {
        keyword: request.keyword.clone(),
        matches,
        scanned_roots: scan.scanned_roots,
        files_indexed: scan.corpus.len(),
        stats: scan.stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchOrder;
    use std::num::NonZeroUsize;
    use tempfile::tempdir;

    #[test]
    fn test_search_pipeline() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "test line\nanother test\n").unwrap();
        std::fs::write(dir.path().join("b.txt"), "nothing here").unwrap();

        let config = IndexConfig {
            thread_count: NonZeroUsize::new(1).unwrap(),
            match_order: MatchOrder::Path,
            ..IndexConfig::default()
        };
        let request = SearchRequest::new(vec![dir.path().to_path_buf()], "TEST");

        let outcome = search(&config, &request);
        assert_eq!(outcome.keyword, "TEST");
        assert_eq!(outcome.files_indexed, 2);
        assert_eq!(outcome.matches.len(), 1);
        assert!(outcome.matches[0].ends_with("a.txt"));
        assert_eq!(outcome.scanned_roots.len(), 1);
        assert_eq!(outcome.stats.files_indexed, 2);
    }

    #[test]
    fn test_search_word_mode_request() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "testing").unwrap();

        let request = SearchRequest::new(vec![dir.path().to_path_buf()], "test")
            .with_match_mode(MatchMode::Word);
        let outcome = search(&IndexConfig::default(), &request);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.files_indexed, 1);
    }

    #[test]
    fn test_searches_share_a_session_pool() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "shared pool").unwrap();

        let config = IndexConfig::default();
        let pool = WorkerPool::new(NonZeroUsize::new(2).unwrap());
        let request = SearchRequest::new(vec![dir.path().to_path_buf()], "POOL");
        for _ in 0..3 {
            let outcome = search_on_pool(&pool, &config, &request);
            assert_eq!(outcome.matches.len(), 1);
        }
    }
}
