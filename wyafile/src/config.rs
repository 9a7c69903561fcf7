use ::config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{IndexError, IndexResult};

/// Suffixes of files that are loaded into the corpus
pub const DEFAULT_EXTENSIONS: &[&str] = &[".txt", ".csv"];

/// Directory-name substrings that exclude a whole subtree from scanning
pub const DEFAULT_SKIP_DIRECTORIES: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "node_modules",
    "__pycache__",
    ".cache",
    "Cache",
    "Library",
    "AppData",
    "$RECYCLE.BIN",
    "System Volume Information",
    ".Trash",
];

/// Recursion depth at which the walker stops descending
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Files larger than this many bytes are never loaded (1 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Order in which accepted matches are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOrder {
    /// Chunk results are merged as workers finish; not stable across runs
    #[default]
    Completion,
    /// Candidates are sorted by path before deduplication
    Path,
}

/// How file bytes that are not valid UTF-8 are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Invalid sequences are replaced with U+FFFD
    #[default]
    Lossy,
    /// Files with invalid UTF-8 are treated as unreadable
    Strict,
}

/// Configuration for a scan/search pass.
///
/// # Configuration Locations
///
/// The configuration is layered from these locations, later ones winning:
/// 1. Global `$CONFIG_DIR/wyafile/config.yaml`
/// 2. Local `.wyafile.yaml` in the current directory
/// 3. Custom config file specified via `--config`
///
/// # Configuration Format
///
/// ```yaml
/// # File suffixes to load (compared against the end of the path)
/// extensions: [".txt", ".csv", ".log"]
///
/// # Directory-name substrings whose subtrees are skipped
/// skip_directories: [".git", "node_modules"]
///
/// # Directories deeper than this are not visited
/// max_depth: 5
///
/// # Largest file that is loaded, in bytes
/// max_file_size: 1048576
///
/// # Worker count for scanning and searching (default: CPU cores)
/// thread_count: 4
///
/// # completion | path
/// match_order: completion
///
/// # lossy | strict
/// encoding: lossy
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// Every field has a default, so an empty file (or no file at all) is valid.
/// Command-line values take precedence, see [`IndexConfig::merge_with_cli`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Allowlisted file suffixes
    pub extensions: Vec<String>,

    /// Skip-rule substrings checked against directory basenames
    pub skip_directories: Vec<String>,

    /// Maximum recursion depth; the root is depth 0
    pub max_depth: usize,

    /// Maximum size of a loaded file in bytes
    pub max_file_size: u64,

    /// Number of workers for root scans and chunk searches
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    pub match_order: MatchOrder,

    pub encoding: EncodingMode,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            skip_directories: DEFAULT_SKIP_DIRECTORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            thread_count: default_thread_count(),
            match_order: MatchOrder::default(),
            encoding: EncodingMode::default(),
            log_level: default_log_level(),
        }
    }
}

/// Values given on the command line; `None` keeps the file value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub extensions: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub thread_count: Option<NonZeroUsize>,
    pub match_order: Option<MatchOrder>,
    pub log_level: Option<String>,
}

impl IndexConfig {
    /// Loads configuration, layering an explicit file over the default locations
    pub fn load_from(config_path: Option<&Path>) -> IndexResult<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(IndexError::file_not_found(path));
            }
        }

        let mut builder = ConfigBuilder::builder();

        let config_files = [
            dirs::config_dir().map(|p| p.join("wyafile/config.yaml")),
            Some(PathBuf::from(".wyafile.yaml")),
            config_path.map(PathBuf::from),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make every scan silently empty
    pub fn validate(&self) -> IndexResult<()> {
        if self.extensions.is_empty() {
            return Err(IndexError::invalid_config("extension allowlist is empty"));
        }
        if self.extensions.iter().any(|e| e.is_empty()) {
            return Err(IndexError::invalid_config("extension suffix is empty"));
        }
        // An empty substring is contained in every name and would skip everything.
        if self.skip_directories.iter().any(|s| s.is_empty()) {
            return Err(IndexError::invalid_config("skip-directory rule is empty"));
        }
        Ok(())
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: ConfigOverrides) -> Self {
        if let Some(extensions) = cli.extensions {
            self.extensions = extensions;
        }
        if let Some(max_depth) = cli.max_depth {
            self.max_depth = max_depth;
        }
        if let Some(thread_count) = cli.thread_count {
            self.thread_count = thread_count;
        }
        if let Some(match_order) = cli.match_order {
            self.match_order = match_order;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        self
    }
}
