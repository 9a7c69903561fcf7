use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Accepts a match only if neither its basename nor its exact content was
/// accepted before. First occurrence wins; rejected records leave no trace.
#[derive(Debug, Default)]
pub struct MatchDeduplicator<'a> {
    seen_names: HashSet<&'a OsStr>,
    seen_contents: HashSet<&'a str>,
    accepted: Vec<&'a Path>,
}

impl<'a> MatchDeduplicator<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Offers a candidate; returns whether it was accepted
    pub fn offer(&mut self, path: &'a Path, content: &'a str) -> bool {
        let name = path.file_name().unwrap_or(path.as_os_str());
        if self.seen_names.contains(name) {
            trace!("Dropping {}: file name already matched", path.display());
            return false;
        }
        if self.seen_contents.contains(content) {
            trace!("Dropping {}: identical content already matched", path.display());
            return false;
        }

        self.seen_names.insert(name);
        self.seen_contents.insert(content);
        self.accepted.push(path);
        true
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Accepted paths in acceptance order
    pub fn into_matches(self) -> Vec<PathBuf> {
        self.accepted.into_iter().map(Path::to_path_buf).collect()
    }
}
