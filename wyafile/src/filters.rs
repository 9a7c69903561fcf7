/// This module implements the predicates that decide what the indexer visits.
///
/// # Three independent checks
///
/// 1. **Eligibility** looks only at the last characters of the path:
///    ```rust,ignore
///    filter.is_eligible_file(Path::new("notes.txt")); // true
///    filter.is_eligible_file(Path::new("notes.TXT")); // false, compare is exact
///    filter.is_eligible_file(Path::new(".txt"));      // true, no stem required
///    ```
///    It is a fixed-length suffix compare, not an extension parser.
///
/// 2. **Directory skip rules** are substrings of the directory basename:
///    ```rust,ignore
///    filter.should_skip_directory(".git");        // true
///    filter.should_skip_directory("my.github.io"); // true, ".git" is a substring
///    ```
///
/// 3. **Size** requires a stat; a stat that fails counts as too large, so the
///    walker never has to handle an error here.
///
/// None of these checks touch shared state, so one `PathFilter` can be cloned
/// into every scan task.
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use tracing::trace;

use crate::config::IndexConfig;

/// Static filtering rules for one scan pass
#[derive(Debug, Clone)]
pub struct PathFilter {
    extensions: Vec<String>,
    skip_directories: Vec<String>,
    max_file_size: u64,
}

impl PathFilter {
    pub fn new(
        extensions: Vec<String>,
        skip_directories: Vec<String>,
        max_file_size: u64,
    ) -> Self {
        Self {
            extensions,
            skip_directories,
            max_file_size,
        }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(
            config.extensions.clone(),
            config.skip_directories.clone(),
            config.max_file_size,
        )
    }

    /// Checks whether the path ends with one of the allowlisted suffixes.
    ///
    /// Paths shorter than the suffix can never match it.
    pub fn is_eligible_file(&self, path: &Path) -> bool {
        let bytes = path.as_os_str().as_encoded_bytes();
        self.extensions
            .iter()
            .any(|suffix| bytes.ends_with(suffix.as_bytes()))
    }

    /// Checks whether a directory basename contains any skip-rule substring
    pub fn should_skip_directory(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        self.skip_directories
            .iter()
            .any(|rule| name.contains(rule.as_str()))
    }

    /// Checks whether a file is too large to load, or cannot be stat'd at all
    pub fn should_skip_file(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(metadata) => metadata.len() > self.max_file_size,
            Err(e) => {
                trace!("Cannot stat {}: {}", path.display(), e);
                true
            }
        }
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::from_config(&IndexConfig::default())
    }
}
