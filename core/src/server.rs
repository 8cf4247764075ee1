//! The search server: document store, inverted index and TF-IDF ranking.
//!
//! Mutation (`add_document`, `remove_document`) takes `&mut self`, so the
//! store and the index are always observed in step. Every query method takes
//! `&self` and may be called from many threads at once.

use crate::concurrent::ConcurrentAccumulator;
use crate::config::{ExecutionPolicy, SearchConfig};
use crate::document::{compute_average_rating, Document, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::{parse_query, Query};
use crate::store::{term_frequencies, DocumentData, DocumentStore};
use crate::tokenizer::StopWords;
use crate::{DocId, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use rayon::prelude::*;
use std::collections::btree_map::{self, BTreeMap};
use std::iter::Copied;

static EMPTY_FREQUENCIES: BTreeMap<String, f64> = BTreeMap::new();

/// Filter applied to every candidate before it is scored. Any
/// `Fn(id, status, rating) -> bool` that can be shared across threads is one.
pub trait DocumentPredicate: Fn(DocId, DocumentStatus, i32) -> bool + Sync {}

impl<F> DocumentPredicate for F where F: Fn(DocId, DocumentStatus, i32) -> bool + Sync {}

/// Plus-words found in one document, borrowed from the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMatch<'a> {
    pub terms: Vec<&'a str>,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    store: DocumentStore,
    shard_count: usize,
    execution: ExecutionPolicy,
}

impl SearchServer {
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(&SearchConfig {
            stop_words: stop_words.into_iter().map(|w| w.as_ref().to_string()).collect(),
            ..SearchConfig::default()
        })
    }

    /// Stop words given as one space-separated string.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Self::new(crate::tokenizer::split_words(text))
    }

    pub fn with_config(config: &SearchConfig) -> Result<Self> {
        Ok(Self {
            stop_words: StopWords::new(&config.stop_words)?,
            index: InvertedIndex::new(),
            store: DocumentStore::new(),
            shard_count: config.shard_count.max(1),
            execution: config.execution,
        })
    }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    pub fn execution_policy(&self) -> ExecutionPolicy { self.execution }

    pub fn document_count(&self) -> usize { self.store.len() }

    /// Ids of all documents in ascending order.
    pub fn document_ids(&self) -> Copied<btree_map::Keys<'_, DocId, DocumentData>> { self.store.ids() }

    pub fn document_ids_by_insertion(&self) -> impl Iterator<Item = DocId> + '_ {
        self.store.ids_by_insertion()
    }

    /// Index a document. Nothing is written unless every check passes.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 || self.store.contains(id) {
            return Err(SearchError::InvalidId(id));
        }
        let words = self.stop_words.tokenize_no_stop(text)?;
        let rating = compute_average_rating(ratings)?;
        let freqs = term_frequencies(&words);

        self.index.insert_document(id, freqs.iter().map(|(term, &tf)| (term.as_str(), tf)));
        self.store.insert(id, rating, status, freqs);
        tracing::debug!(id, words = words.len(), rating, ?status, "document added");
        Ok(())
    }

    /// Remove a document and all its postings. Unknown ids are ignored.
    pub fn remove_document(&mut self, id: DocId) {
        let Some(data) = self.store.remove(id) else { return };
        self.index.remove_document(id, data.term_frequencies.keys().map(String::as_str));
        tracing::debug!(id, terms = data.term_frequencies.len(), "document removed");
    }

    /// Term frequencies of a document; empty for an unknown id.
    pub fn word_frequencies(&self, id: DocId) -> &BTreeMap<String, f64> {
        self.store.get(id).map_or(&EMPTY_FREQUENCIES, |data| &data.term_frequencies)
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, move |_, document_status, _| document_status == status)
    }

    pub fn find_top_documents_by<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(self.execution, raw_query, predicate)
    }

    /// Rank documents by TF-IDF relevance, then rating, keeping the best
    /// [`MAX_RESULT_DOCUMENT_COUNT`].
    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        let relevance = match policy {
            ExecutionPolicy::Sequential => self.score_sequential(&query, &predicate),
            ExecutionPolicy::Parallel => self.score_parallel(&query, &predicate),
        };
        let mut documents = self.exclude_minus_words(&query, relevance);
        sort_by_relevance(&mut documents);
        documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
        tracing::debug!(
            plus = query.plus_words.len(),
            minus = query.minus_words.len(),
            ?policy,
            hits = documents.len(),
            "query evaluated"
        );
        Ok(documents)
    }

    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<DocumentMatch<'_>> {
        self.match_document_with(self.execution, raw_query, id)
    }

    /// Plus-words of the query present in document `id`, or none at all if
    /// the document contains any minus-word.
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocId,
    ) -> Result<DocumentMatch<'_>> {
        let status = self.store.get(id).ok_or(SearchError::NotFound(id))?.status;
        let query = parse_query(raw_query, &self.stop_words)?;

        if query.minus_words.iter().any(|word| self.index.contains(word, id)) {
            return Ok(DocumentMatch { terms: Vec::new(), status });
        }
        let mut terms: Vec<&str> = match policy {
            ExecutionPolicy::Sequential => {
                query.plus_words.iter().filter_map(|word| self.matched_term(word, id)).collect()
            }
            ExecutionPolicy::Parallel => {
                let words: Vec<&str> = query.plus_words.iter().copied().collect();
                words.par_iter().filter_map(|word| self.matched_term(word, id)).collect()
            }
        };
        terms.sort_unstable();
        terms.dedup();
        Ok(DocumentMatch { terms, status })
    }

    fn matched_term(&self, word: &str, id: DocId) -> Option<&str> {
        if self.index.contains(word, id) { self.index.term(word) } else { None }
    }

    fn inverse_document_freq(&self, document_freq: usize) -> f64 {
        (self.store.len() as f64 / document_freq as f64).ln()
    }

    fn score_sequential<P: DocumentPredicate>(
        &self,
        query: &Query<'_>,
        predicate: &P,
    ) -> BTreeMap<DocId, f64> {
        let mut relevance = BTreeMap::new();
        for word in &query.plus_words {
            self.score_word(word, predicate, |id, score| {
                *relevance.entry(id).or_insert(0.0) += score;
            });
        }
        relevance
    }

    fn score_parallel<P: DocumentPredicate>(
        &self,
        query: &Query<'_>,
        predicate: &P,
    ) -> BTreeMap<DocId, f64> {
        let accumulator = ConcurrentAccumulator::new(self.shard_count);
        let words: Vec<&str> = query.plus_words.iter().copied().collect();
        words.par_iter().for_each(|word| {
            self.score_word(word, predicate, |id, score| accumulator.accumulate(id, score));
        });
        accumulator.snapshot()
    }

    /// Feed `tf * idf` of every posting of `word` that passes the predicate.
    fn score_word<P, F>(&self, word: &str, predicate: &P, mut add: F)
    where
        P: DocumentPredicate,
        F: FnMut(DocId, f64),
    {
        let Some(postings) = self.index.postings(word) else { return };
        let idf = self.inverse_document_freq(postings.len());
        for (&id, &tf) in postings {
            let Some(data) = self.store.get(id) else { continue };
            if predicate(id, data.status, data.rating) {
                add(id, tf * idf);
            }
        }
    }

    fn exclude_minus_words(&self, query: &Query<'_>, mut relevance: BTreeMap<DocId, f64>) -> Vec<Document> {
        for word in &query.minus_words {
            let Some(postings) = self.index.postings(word) else { continue };
            for id in postings.keys() {
                relevance.remove(id);
            }
        }
        relevance
            .into_iter()
            .filter_map(|(id, rel)| self.store.get(id).map(|data| Document::new(id, rel, data.rating)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = Copied<btree_map::Keys<'a, DocId, DocumentData>>;

    fn into_iter(self) -> Self::IntoIter { self.document_ids() }
}

/// Order by relevance descending; documents whose relevance is within
/// [`RELEVANCE_EPSILON`] of the first document of their run are ordered by
/// rating descending, then id ascending.
fn sort_by_relevance(documents: &mut [Document]) {
    documents.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then(b.rating.cmp(&a.rating))
            .then(a.id.cmp(&b.id))
    });
    let mut start = 0;
    while start < documents.len() {
        let anchor = documents[start].relevance;
        let end = documents[start..]
            .iter()
            .position(|d| (anchor - d.relevance).abs() >= RELEVANCE_EPSILON)
            .map_or(documents.len(), |offset| start + offset);
        documents[start..end].sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        start = end;
    }
}
