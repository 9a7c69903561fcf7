use std::fs;
use std::path::Path;
use tracing::{debug, info, trace, warn};

use crate::config::{EncodingMode, IndexConfig};
use crate::corpus::Corpus;
use crate::errors::{unify_path, IndexError, IndexResult};
use crate::filters::PathFilter;
use crate::metrics::ScanStats;

/// Decodes file bytes into a String according to the encoding mode
fn decode_bytes(bytes: Vec<u8>, path: &Path, encoding_mode: EncodingMode) -> IndexResult<String> {
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => match encoding_mode {
            EncodingMode::Strict => Err(IndexError::encoding_error(path, e)),
            EncodingMode::Lossy => {
                warn!("Invalid UTF-8 replaced in file: {}", path.display());
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        },
    }
}

/// Reads a whole file as text
pub fn read_file_content(path: &Path, encoding_mode: EncodingMode) -> IndexResult<String> {
    let bytes = fs::read(path).map_err(|e| IndexError::from_io(path, e))?;
    decode_bytes(bytes, path, encoding_mode)
}

/// Recursive directory walker that loads eligible files for one root.
///
/// An indexer is owned by a single scan task. Nothing it does is reported as an
/// error: missing roots, unreadable directories and unreadable files all end up
/// as absent entries, and the reason is logged and counted in [`ScanStats`].
///
/// Symlinks to files are followed. Symlinks to directories are not descended
/// into, so a link back to an ancestor cannot load the same file under
/// several keys.
#[derive(Debug, Clone)]
pub struct Indexer {
    filter: PathFilter,
    max_depth: usize,
    encoding_mode: EncodingMode,
    stats: ScanStats,
}

impl Indexer {
    pub fn new(filter: PathFilter, max_depth: usize, encoding_mode: EncodingMode) -> Self {
        Self {
            filter,
            max_depth,
            encoding_mode,
            stats: ScanStats::new(),
        }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(
            PathFilter::from_config(config),
            config.max_depth,
            config.encoding,
        )
    }

    /// Counters accumulated by every scan this indexer has run
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Scans a root directory, keyed by absolute path
    pub fn scan(&mut self, root: &Path) -> Corpus {
        let root = unify_path(root);
        debug!("Scanning directory: {}", root.display());

        let corpus = self.walk(&root, 0, self.max_depth);

        if corpus.is_empty() {
            info!("No supported files found in directory: {}", root.display());
        } else {
            info!(
                "Found {} supported files in directory: {}",
                corpus.len(),
                root.display()
            );
        }
        corpus
    }

    /// Walks `path` at recursion level `depth`, returning what was loaded below it
    pub fn walk(&mut self, path: &Path, depth: usize, max_depth: usize) -> Corpus {
        let mut corpus = Corpus::new();

        if depth >= max_depth {
            trace!("Depth limit {} reached at {}", max_depth, path.display());
            self.stats.depth_limit_hits += 1;
            return corpus;
        }

        if !path.is_dir() {
            debug!(
                "Directory does not exist or is not a directory: {}",
                path.display()
            );
            return corpus;
        }

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot read directory {}: {}", path.display(), e);
                self.stats.directories_failed += 1;
                return corpus;
            }
        };
        let mut complete = true;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Enumeration is not retried; what was gathered so far is kept.
                    warn!("Error while reading directory {}: {}", path.display(), e);
                    self.stats.directories_failed += 1;
                    complete = false;
                    break;
                }
            };

            let entry_path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) if file_type.is_symlink() => match fs::metadata(&entry_path) {
                    Ok(metadata) if metadata.is_dir() => {
                        debug!("Not following directory symlink: {}", entry_path.display());
                        self.stats.directories_skipped += 1;
                        continue;
                    }
                    Ok(metadata) => metadata.file_type(),
                    Err(e) => {
                        trace!("Broken symlink {}: {}", entry_path.display(), e);
                        continue;
                    }
                },
                Ok(file_type) => file_type,
                Err(e) => {
                    trace!("Cannot stat {}: {}", entry_path.display(), e);
                    continue;
                }
            };

            if file_type.is_file() {
                if let Some(content) = self.load_file(&entry_path) {
                    corpus.insert(entry_path, content);
                }
            } else if file_type.is_dir() {
                if self.filter.should_skip_directory(&entry.file_name()) {
                    debug!("Skipping directory: {}", entry_path.display());
                    self.stats.directories_skipped += 1;
                    continue;
                }
                corpus.merge(self.walk(&entry_path, depth + 1, max_depth));
            }
        }

        if complete {
            self.stats.directories_visited += 1;
        }
        corpus
    }

    /// Applies the file filters and reads the file; `None` means "leave it out"
    fn load_file(&mut self, path: &Path) -> Option<String> {
        if !self.filter.is_eligible_file(path) {
            trace!("Ineligible file: {}", path.display());
            self.stats.files_ineligible += 1;
            return None;
        }

        if self.filter.should_skip_file(path) {
            debug!("Skipping large or unreadable file: {}", path.display());
            self.stats.files_too_large += 1;
            return None;
        }

        match read_file_content(path, self.encoding_mode) {
            Ok(content) if !content.is_empty() => {
                trace!("Successfully read: {}", path.display());
                self.stats.files_indexed += 1;
                self.stats.bytes_loaded += content.len() as u64;
                Some(content)
            }
            Ok(_) => {
                trace!("Empty file: {}", path.display());
                self.stats.files_empty += 1;
                None
            }
            Err(e) => {
                debug!("Could not read {}: {}", path.display(), e);
                self.stats.files_empty += 1;
                None
            }
        }
    }
}

impl Default for Indexer {
    fn default() -> Self {
        Self::from_config(&IndexConfig::default())
    }
}
