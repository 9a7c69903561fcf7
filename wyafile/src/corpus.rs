use std::collections::btree_map::{self, BTreeMap};
use std::path::{Path, PathBuf};

/// In-memory mapping from absolute file path to its text content.
///
/// Keys are unique by construction; a corpus is built by one scan pass and only
/// read afterwards. The map is ordered so that chunking for the search is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    files: BTreeMap<PathBuf, String>,
}

impl Corpus {
    pub fn new() -> Self {
        Default::default()
    }

    /// Inserts a file, returning the content previously stored under the path
    pub fn insert(&mut self, path: PathBuf, content: String) -> Option<String> {
        self.files.insert(path, content)
    }

    /// Moves every entry of `other` into this corpus; `other` wins on equal keys
    pub fn merge(&mut self, other: Corpus) {
        if self.files.is_empty() {
            self.files = other.files;
        } else {
            self.files.extend(other.files);
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PathBuf, String> {
        self.files.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Sum of the content lengths in bytes
    pub fn total_bytes(&self) -> usize {
        self.files.values().map(String::len).sum()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = (&'a PathBuf, &'a String);
    type IntoIter = btree_map::Iter<'a, PathBuf, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl IntoIterator for Corpus {
    type Item = (PathBuf, String);
    type IntoIter = btree_map::IntoIter<PathBuf, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl FromIterator<(PathBuf, String)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (PathBuf, String)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(entries: &[(&str, &str)]) -> Corpus {
        entries
            .iter()
            .map(|(p, c)| (PathBuf::from(p), c.to_string()))
            .collect()
    }

    #[test]
    fn test_merge_later_overwrites() {
        let mut first = corpus(&[("/a/x.txt", "one"), ("/a/y.txt", "two")]);
        let second = corpus(&[("/a/x.txt", "replaced"), ("/b/z.txt", "three")]);

        first.merge(second);
        assert_eq!(first.len(), 3);
        assert_eq!(first.get(Path::new("/a/x.txt")), Some("replaced"));
        assert_eq!(first.get(Path::new("/b/z.txt")), Some("three"));
    }

    #[test]
    fn test_merge_keeps_duplicate_content() {
        let mut first = corpus(&[("/a/x.txt", "same")]);
        first.merge(corpus(&[("/b/y.txt", "same")]));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_iteration_is_ordered_by_path() {
        let c = corpus(&[("/c.txt", "3"), ("/a.txt", "1"), ("/b.txt", "2")]);
        let paths: Vec<_> = c.paths().collect();
        assert_eq!(
            paths,
            vec![Path::new("/a.txt"), Path::new("/b.txt"), Path::new("/c.txt")]
        );
        assert_eq!(c.total_bytes(), 3);
    }
}
