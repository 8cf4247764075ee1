//! Query parsing: plus-words and minus-words.
//!
//! A query is parsed fresh for every call and borrows its words from the raw
//! query string, so no parse state outlives the call that produced it.

use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_words, StopWords};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWord<'q> {
    pub data: &'q str,
    pub is_minus: bool,
}

/// Parsed query. Both sets are sorted and free of duplicates and stop words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'q> {
    pub plus_words: BTreeSet<&'q str>,
    pub minus_words: BTreeSet<&'q str>,
}

impl Query<'_> {
    pub fn is_empty(&self) -> bool { self.plus_words.is_empty() && self.minus_words.is_empty() }
}

/// Classify a single raw word. Rejects a bare `-`, a leading `--`, and
/// words with control characters.
pub fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    let (data, is_minus) = match word.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (word, false),
    };
    if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
        return Err(SearchError::InvalidQuery(word.to_string()));
    }
    Ok(QueryWord { data, is_minus })
}

/// Parse a raw query. Stop words are validated like any other word but then
/// dropped, so `-the` with `the` as a stop word excludes nothing.
pub fn parse_query<'q>(text: &'q str, stop_words: &StopWords) -> Result<Query<'q>> {
    let mut query = Query::default();
    for word in split_words(text) {
        let word = parse_query_word(word)?;
        if stop_words.contains(word.data) { continue; }
        if word.is_minus {
            query.minus_words.insert(word.data);
        } else {
            query.plus_words.insert(word.data);
        }
    }
    Ok(query)
}
