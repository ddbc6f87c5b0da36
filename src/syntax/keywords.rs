//! Keyword tables

use std::collections::HashMap;

use super::tokens::HighlightCategory;

/// Mapping from exact token text to a highlight category
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    words: HashMap<String, HighlightCategory>,
}

impl KeywordSet {
    /// Create an empty keyword set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single word; a word added twice keeps the last category
    pub fn add(&mut self, word: &str, category: HighlightCategory) {
        self.words.insert(word.to_string(), category);
    }

    /// Add every word of a list under one category
    pub fn add_all(&mut self, words: &[&str], category: HighlightCategory) {
        for word in words {
            self.add(word, category);
        }
    }

    /// Look up a whole identifier
    pub fn get(&self, word: &str) -> Option<HighlightCategory> {
        self.words.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        let mut set = KeywordSet::new();
        set.add_all(&["fn", "const"], HighlightCategory::Keyword);
        assert_eq!(set.get("fn"), Some(HighlightCategory::Keyword));
        assert_eq!(set.get("fnx"), None);
        assert_eq!(set.get("Fn"), None);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut set = KeywordSet::new();
        set.add("error", HighlightCategory::Keyword);
        set.add("error", HighlightCategory::PreprocessorLike);
        assert_eq!(set.get("error"), Some(HighlightCategory::PreprocessorLike));
        assert_eq!(set.len(), 1);
    }
}
