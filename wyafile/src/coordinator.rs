use rayon::prelude::*;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::IndexConfig;
use crate::corpus::Corpus;
use crate::errors::unify_path;
use crate::indexer::Indexer;
use crate::metrics::ScanStats;
use crate::pool::WorkerPool;

/// What one root contributed to a scan
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub root: PathBuf,
    pub corpus: Corpus,
    pub stats: ScanStats,
}

/// The merged output of scanning every root
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub corpus: Corpus,
    /// Roots that yielded at least one file, in request order
    pub scanned_roots: Vec<PathBuf>,
    pub stats: ScanStats,
}

/// Serializable view of a [`ScanOutcome`] without the file contents
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub files: Vec<PathBuf>,
    pub scanned_roots: Vec<PathBuf>,
    pub total_bytes: usize,
    pub stats: ScanStats,
}

impl ScanOutcome {
    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            files: self.corpus.paths().map(Path::to_path_buf).collect(),
            scanned_roots: self.scanned_roots.clone(),
            total_bytes: self.corpus.total_bytes(),
            stats: self.stats,
        }
    }
}

/// Fans an [`Indexer`] out over several roots and merges what they find
#[derive(Debug, Clone)]
pub struct ScanCoordinator {
    indexer: Indexer,
    pool: WorkerPool,
}

impl ScanCoordinator {
    pub fn new(indexer: Indexer, thread_count: NonZeroUsize) -> Self {
        Self {
            indexer,
            pool: WorkerPool::new(thread_count),
        }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(Indexer::from_config(config), config.thread_count)
    }

    /// Runs root scans on an existing pool instead of a private one
    pub fn with_pool(mut self, pool: WorkerPool) -> Self {
        self.pool = pool;
        self
    }

    /// Scans every root concurrently, one task per root.
    ///
    /// Each task clones its own indexer, so the walks share nothing. The per-root
    /// results are folded together only after every task has finished.
    pub fn scan_all<P: AsRef<Path> + Sync>(&self, roots: &[P]) -> ScanOutcome {
        info!("Scanning {} root directories", roots.len());

        if roots.is_empty() {
            return ScanOutcome::default();
        }

        let results: Vec<ScanResult> = self.pool.install(|| {
            roots
                .par_iter()
                .map(|root| self.scan_root(root.as_ref()))
                .collect()
        });

        let outcome = merge_results(results);
        outcome.stats.log_stats();
        info!(
            "Scan complete. Indexed {} files from {} of {} roots",
            outcome.corpus.len(),
            outcome.scanned_roots.len(),
            roots.len()
        );
        outcome
    }

    fn scan_root(&self, root: &Path) -> ScanResult {
        let mut indexer = self.indexer.clone();
        let corpus = indexer.scan(root);
        ScanResult {
            root: unify_path(root),
            corpus,
            stats: indexer.stats(),
        }
    }
}

/// Folds per-root results into one outcome, in the order given
pub fn merge_results(results: Vec<ScanResult>) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for result in results {
        outcome.stats += result.stats;
        if result.corpus.is_empty() {
            debug!("Root yielded no files: {}", result.root.display());
            continue;
        }
        outcome.scanned_roots.push(result.root);
        outcome.corpus.merge(result.corpus);
    }
    outcome
}
