/// This module defines the error types for wyafile.
///
/// # Where errors surface
///
/// Scanning and searching never fail as a whole. A missing root, an unreadable
/// directory or a file that cannot be opened only shrinks the result:
/// ```rust,ignore
/// let corpus = indexer.scan(Path::new("/does/not/exist"));
/// assert!(corpus.is_empty()); // no error, just nothing found
/// ```
///
/// Errors are still typed internally so that the walker can log *why* a file was
/// left out, and they are returned to callers from configuration loading and
/// request validation:
/// ```rust,ignore
/// match IndexConfig::load_from(Some(path)) {
///     Ok(config) => // Use config,
///     Err(IndexError::Config(e)) => // Malformed or missing file,
///     Err(e) => // Other errors
/// }
/// ```
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for indexing operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur while indexing or configuring a scan
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid UTF-8 in file {path}: {source}")]
    Encoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid keyword: {0}")]
    InvalidKeyword(String),
}

/// Canonicalize the path and strip UNC prefixes so that
/// comparisons on Windows are consistent.
pub fn unify_path(original: &Path) -> PathBuf {
    let canonical = original
        .canonicalize()
        .unwrap_or_else(|_| absolute_or_original(original));
    strip_unc_prefix(&canonical)
}

fn absolute_or_original(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Strips the Windows UNC prefix (\\?\) from a path if present
fn strip_unc_prefix(p: &Path) -> PathBuf {
    let s = p.display().to_string();
    if let Some(stripped) = s.strip_prefix(r"\\?\") {
        PathBuf::from(stripped)
    } else {
        p.to_path_buf()
    }
}

impl IndexError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn invalid_keyword(msg: impl Into<String>) -> Self {
        Self::InvalidKeyword(msg.into())
    }

    pub fn encoding_error(path: impl Into<PathBuf>, source: std::string::FromUtf8Error) -> Self {
        Self::Encoding {
            path: path.into(),
            source,
        }
    }

    /// Maps an io error raised while touching `path` to the closest variant
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::Io(err),
        }
    }
}
