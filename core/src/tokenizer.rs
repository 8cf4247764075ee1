use crate::error::{Result, SearchError};
use std::collections::BTreeSet;

/// Split text on spaces, dropping the empty words produced by runs of spaces.
///
/// Only `' '` separates words; tabs and newlines are control characters and
/// end up inside a word, where [`is_valid_word`] rejects them.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid when it contains no ASCII control character (0x00..0x1F).
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < b' ')
}

/// Split text into words, failing on the first invalid one.
pub fn tokenize(text: &str) -> Result<Vec<&str>> {
    split_words(text)
        .map(|word| {
            if is_valid_word(word) {
                Ok(word)
            } else {
                Err(SearchError::InvalidTerm(word.to_string()))
            }
        })
        .collect()
}

/// Immutable set of words ignored in both documents and queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build from arbitrary strings. Empty strings are skipped, duplicates
    /// collapse, and any remaining word with control characters is an error.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() { continue; }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidTerm(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    pub fn from_text(text: &str) -> Result<Self> { Self::new(split_words(text)) }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &str> { self.words.iter().map(String::as_str) }

    /// Tokenize text and drop stop words. Validation covers every word,
    /// stop words included.
    pub fn tokenize_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        Ok(tokenize(text)?.into_iter().filter(|w| !self.contains(w)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_repeated_spaces() {
        let words: Vec<&str> = split_words("  funny   pet  ").collect();
        assert_eq!(words, vec!["funny", "pet"]);
    }

    #[test]
    fn rejects_control_characters() {
        assert!(is_valid_word("cat"));
        assert!(!is_valid_word("c\x12at"));
        assert_eq!(tokenize("big c\tat"), Err(SearchError::InvalidTerm("c\tat".into())));
    }

    #[test]
    fn stop_words_skip_empty_and_validate() {
        let stop = StopWords::new(["in", "", "the", "in"]).unwrap();
        assert_eq!(stop.len(), 2);
        assert!(StopWords::new(["in", "t\x01he"]).is_err());
    }

    #[test]
    fn tokenize_no_stop_filters() {
        let stop = StopWords::from_text("in the").unwrap();
        assert_eq!(stop.tokenize_no_stop("cat in the city").unwrap(), vec!["cat", "city"]);
    }
}
