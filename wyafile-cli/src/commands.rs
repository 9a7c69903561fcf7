use anyhow::Result;
use clap::{Args, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use wyafile::{
    ConfigOverrides, IndexConfig, IndexError, MatchMode, MatchOrder, ScanCoordinator,
    SearchRequest, WorkerPool,
};

use crate::render;
use crate::roots::resolve_roots;

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (YAML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<NonZeroUsize>,

    /// Maximum directory depth to descend
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// File suffixes to load (e.g. .txt,.csv)
    #[arg(short = 'e', long, value_delimiter = ',', global = true)]
    pub extensions: Option<Vec<String>>,

    /// Report matches sorted by path instead of completion order
    #[arg(long, global = true)]
    pub sorted: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl GlobalArgs {
    /// Loads the layered configuration and applies the command-line values
    pub fn load_config(&self) -> Result<IndexConfig> {
        let config = IndexConfig::load_from(self.config.as_deref())?.merge_with_cli(
            ConfigOverrides {
                extensions: self.extensions.clone(),
                max_depth: self.max_depth,
                thread_count: self.threads,
                match_order: self.sorted.then_some(MatchOrder::Path),
                log_level: self.log_level.clone(),
            },
        );
        config.validate()?;
        Ok(config)
    }
}

/// State that outlives a single command: the configuration and the worker pool
#[derive(Debug, Clone)]
pub struct Session {
    config: IndexConfig,
    pool: WorkerPool,
}

impl Session {
    pub fn new(config: IndexConfig) -> Self {
        let pool = WorkerPool::from_config(&config);
        Self { config, pool }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }
}

/// A runnable command
pub trait Operation {
    fn execute(&self, session: &Session) -> Result<()>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan directories for supported files and list what was loaded
    Scan(ScanArgs),
    /// Search directories for files containing a keyword
    Key(KeyArgs),
}

impl Command {
    pub fn operation(&self) -> &dyn Operation {
        match self {
            Command::Scan(args) => args,
            Command::Key(args) => args,
        }
    }

    pub fn execute(&self, session: &Session) -> Result<()> {
        self.operation().execute(session)
    }
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directories to scan (default: $WYAFILE_DIRS, else Documents/Desktop/Downloads)
    pub dirs: Vec<PathBuf>,

    /// Print the content of every loaded file
    #[arg(short, long)]
    pub contents: bool,

    /// Print scan statistics
    #[arg(short, long)]
    pub stats: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Operation for ScanArgs {
    fn execute(&self, session: &Session) -> Result<()> {
        let roots = resolve_roots(&self.dirs);
        let outcome = ScanCoordinator::from_config(session.config())
            .with_pool(session.pool().clone())
            .scan_all(&roots);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome.summary())?);
            return Ok(());
        }

        render::print_scan(&roots, &outcome, self.contents);
        if self.stats {
            render::print_stats(&outcome.stats);
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Keyword to search for, case-insensitive; several words are joined by spaces
    #[arg(required = true, num_args = 1..)]
    pub keyword: Vec<String>,

    /// Directory to search (can be specified multiple times)
    #[arg(short = 'd', long = "dir")]
    pub dirs: Vec<PathBuf>,

    /// Match whole words only
    #[arg(short, long)]
    pub word: bool,

    /// Print scan statistics
    #[arg(short, long)]
    pub stats: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl KeyArgs {
    /// Builds the immutable request for this invocation
    pub fn request(&self) -> Result<SearchRequest> {
        let keyword = self.keyword.join(" ");
        if keyword.trim().is_empty() {
            return Err(IndexError::invalid_keyword("keyword is empty").into());
        }

        let mode = if self.word {
            MatchMode::Word
        } else {
            MatchMode::Substring
        };
        Ok(SearchRequest::new(resolve_roots(&self.dirs), keyword).with_match_mode(mode))
    }
}

impl Operation for KeyArgs {
    fn execute(&self, session: &Session) -> Result<()> {
        let request = self.request()?;
        let outcome = wyafile::search_on_pool(session.pool(), session.config(), &request);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            return Ok(());
        }

        render::print_search(&request.roots, &outcome);
        if self.stats {
            render::print_stats(&outcome.stats);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_args(words: &[&str]) -> KeyArgs {
        KeyArgs {
            keyword: words.iter().map(|w| w.to_string()).collect(),
            dirs: vec![PathBuf::from("/tmp")],
            word: false,
            stats: false,
            json: false,
        }
    }

    #[test]
    fn test_request_joins_words() {
        let request = key_args(&["hello", "world"]).request().unwrap();
        assert_eq!(request.keyword, "hello world");
        assert_eq!(request.roots, vec![PathBuf::from("/tmp")]);
        assert_eq!(request.match_mode, MatchMode::Substring);
    }

    #[test]
    fn test_request_rejects_blank_keyword() {
        let err = key_args(&["  "]).request().unwrap_err();
        assert!(err.to_string().contains("Invalid keyword"));
    }

    #[test]
    fn test_global_args_override_config() {
        let args = GlobalArgs {
            threads: NonZeroUsize::new(3),
            max_depth: Some(2),
            sorted: true,
            ..GlobalArgs::default()
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.thread_count.get(), 3);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.match_order, MatchOrder::Path);
    }

    #[test]
    fn test_session_pool_follows_config() {
        let config = IndexConfig {
            thread_count: NonZeroUsize::new(3).unwrap(),
            ..IndexConfig::default()
        };
        let session = Session::new(config);
        assert_eq!(session.pool().threads().get(), 3);
        assert_eq!(session.clone().pool().threads().get(), 3);
    }

    #[test]
    fn test_global_args_reject_empty_extension() {
        let args = GlobalArgs {
            extensions: Some(vec![String::new()]),
            ..GlobalArgs::default()
        };
        assert!(args.load_config().is_err());
    }
}
