pub mod config;
pub mod coordinator;
pub mod corpus;
pub mod errors;
pub mod filters;
pub mod indexer;
pub mod metrics;
pub mod pool;
pub mod results;
pub mod search;
pub mod text;

pub use crate::config::{ConfigOverrides, EncodingMode, IndexConfig, MatchOrder};
pub use coordinator::{ScanCoordinator, ScanOutcome, ScanResult, ScanSummary};
pub use corpus::Corpus;
pub use errors::{IndexError, IndexResult};
pub use filters::PathFilter;
pub use indexer::Indexer;
pub use metrics::ScanStats;
pub use pool::WorkerPool;
pub use results::SearchOutcome;
pub use search::{search, search_on_pool, MatchMode, SearchEngine, SearchRequest};
