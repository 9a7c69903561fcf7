//! Resolution of the directories a command runs against.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable holding a path list of default roots
pub const DIRS_ENV: &str = "WYAFILE_DIRS";

/// Expands a leading `~` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Roots used when a command names none.
///
/// `WYAFILE_DIRS` wins if set; otherwise the user's Documents, Desktop and
/// Downloads directories that exist; otherwise the home directory.
pub fn default_roots() -> Vec<PathBuf> {
    if let Some(list) = env::var_os(DIRS_ENV) {
        let roots: Vec<PathBuf> = env::split_paths(&list)
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| expand_home(&p))
            .collect();
        if !roots.is_empty() {
            return roots;
        }
    }

    let standard: Vec<PathBuf> = [dirs::document_dir(), dirs::desktop_dir(), dirs::download_dir()]
        .into_iter()
        .flatten()
        .filter(|p| p.is_dir())
        .collect();
    if !standard.is_empty() {
        return standard;
    }

    dirs::home_dir()
        .into_iter()
        .chain(env::current_dir().ok())
        .take(1)
        .collect()
}

/// The explicit roots if any were given, else the defaults
pub fn resolve_roots(explicit: &[PathBuf]) -> Vec<PathBuf> {
    if explicit.is_empty() {
        default_roots()
    } else {
        explicit.iter().map(|p| expand_home(p)).collect()
    }
}
