use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{debug, info, trace, warn};

use super::dedup::MatchDeduplicator;
use crate::config::{IndexConfig, MatchOrder};
use crate::corpus::Corpus;
use crate::pool::WorkerPool;
use crate::text::{contains_lowercase, contains_word};

/// How a keyword is compared against file content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Case-insensitive substring containment
    #[default]
    Substring,
    /// The keyword must equal one ASCII-alphanumeric word of the content
    Word,
}

/// A corpus entry as seen by a search worker
pub type Entry<'a> = (&'a Path, &'a str);

/// Number of entries per chunk so that `len` entries fit in `workers` chunks
pub fn chunk_size(len: usize, workers: NonZeroUsize) -> usize {
    len.div_ceil(workers.get()).max(1)
}

/// Splits the corpus into contiguous chunks, at most one per worker.
///
/// Every entry lands in exactly one chunk, in corpus order.
pub fn partition(corpus: &Corpus, workers: NonZeroUsize) -> Vec<Vec<Entry<'_>>> {
    let entries: Vec<Entry<'_>> = corpus
        .iter()
        .map(|(path, content)| (path.as_path(), content.as_str()))
        .collect();
    let size = chunk_size(entries.len(), workers);
    entries.chunks(size).map(<[_]>::to_vec).collect()
}

/// Searches a corpus in parallel chunks and deduplicates the matches
#[derive(Debug, Clone)]
pub struct SearchEngine {
    pool: WorkerPool,
    match_mode: MatchMode,
    match_order: MatchOrder,
}

impl SearchEngine {
    pub fn new(worker_count: NonZeroUsize) -> Self {
        Self {
            pool: WorkerPool::new(worker_count),
            match_mode: MatchMode::default(),
            match_order: MatchOrder::default(),
        }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(config.thread_count).with_match_order(config.match_order)
    }

    /// Searches on an existing pool; chunk count follows its worker count
    pub fn with_pool(mut self, pool: WorkerPool) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn with_match_order(mut self, match_order: MatchOrder) -> Self {
        self.match_order = match_order;
        self
    }

    /// Returns the paths whose content contains `keyword`, ignoring case.
    ///
    /// Chunks are searched concurrently and their hits are merged through a
    /// channel by a single consumer, so the dedup state is never shared. With
    /// [`MatchOrder::Completion`] the result follows worker completion order and
    /// may differ between runs.
    pub fn search(&self, corpus: &Corpus, keyword: &str) -> Vec<PathBuf> {
        if keyword.is_empty() {
            warn!("Empty keyword provided");
            return Vec::new();
        }
        if corpus.is_empty() {
            debug!("Empty corpus, nothing to search");
            return Vec::new();
        }

        let needle = keyword.to_lowercase();
        let chunks = partition(corpus, self.pool.threads());
        info!(
            "Searching {} files for '{}' in {} chunks",
            corpus.len(),
            keyword,
            chunks.len()
        );

        let (tx, rx) = mpsc::channel();
        self.pool.install(|| {
            chunks.par_iter().for_each_with(tx, |tx, chunk| {
                let hits = self.search_chunk(chunk, &needle);
                // The receiver outlives every worker.
                let _ = tx.send(hits);
            });
        });

        let mut candidates: Vec<Entry<'_>> = rx.into_iter().flatten().collect();
        if self.match_order == MatchOrder::Path {
            candidates.sort_by(|a, b| a.0.cmp(b.0));
        }

        let mut dedup = MatchDeduplicator::new();
        for (path, content) in candidates {
            dedup.offer(path, content);
        }

        info!(
            "Search complete. {} of {} files matched '{}'",
            dedup.len(),
            corpus.len(),
            keyword
        );
        dedup.into_matches()
    }

    /// Scans one chunk sequentially, keeping chunk order
    fn search_chunk<'a>(&self, chunk: &[Entry<'a>], needle: &str) -> Vec<Entry<'a>> {
        let hits: Vec<Entry<'a>> = chunk
            .iter()
            .copied()
            .filter(|(_, content)| self.is_match(content, needle))
            .collect();
        trace!("Chunk of {} files produced {} hits", chunk.len(), hits.len());
        hits
    }

    fn is_match(&self, content: &str, needle: &str) -> bool {
        match self.match_mode {
            MatchMode::Substring => contains_lowercase(content, needle),
            MatchMode::Word => contains_word(content, needle),
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::from_config(&IndexConfig::default())
    }
}
