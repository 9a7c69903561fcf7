use once_cell::sync::OnceCell;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::IndexConfig;

/// A rayon pool with a fixed worker count, shared by every clone.
///
/// The pool is built on first use and lives as long as its last clone, so a
/// session can run many scans and searches on the same threads. If the pool
/// cannot be built, work runs on the global pool instead.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    threads: NonZeroUsize,
    pool: Arc<OnceCell<Option<ThreadPool>>>,
}

impl WorkerPool {
    pub fn new(threads: NonZeroUsize) -> Self {
        Self {
            threads,
            pool: Arc::new(OnceCell::new()),
        }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(config.thread_count)
    }

    pub fn threads(&self) -> NonZeroUsize {
        self.threads
    }

    /// Runs `op` on the pool, building it first if needed
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self.pool.get_or_init(|| build(self.threads)) {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

fn build(threads: NonZeroUsize) -> Option<ThreadPool> {
    match ThreadPoolBuilder::new()
        .num_threads(threads.get())
        .thread_name(|i| format!("wyafile-worker-{}", i))
        .build()
    {
        Ok(pool) => {
            debug!("Built a pool of {} threads", threads);
            Some(pool)
        }
        Err(e) => {
            warn!("Could not build a {}-thread pool, using the global pool: {}", threads, e);
            None
        }
    }
}
