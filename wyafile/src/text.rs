//! Text helpers shared by the indexer and the search engine.

/// Splits text into lowercase words of ASCII letters and digits.
///
/// Any other byte, including non-ASCII characters, separates words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

/// Case-insensitive substring test; `needle` must already be lowercase
pub fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Whole-word test; `needle` must already be lowercase
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    tokenize(haystack).iter().any(|word| word == needle)
}
