use crate::document::DocumentStatus;
use crate::DocId;
use std::collections::btree_map::{self, BTreeMap};
use std::iter::Copied;

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
    /// term -> occurrences / total words (stop words excluded).
    pub term_frequencies: BTreeMap<String, f64>,
    seq: u64,
}

/// Normalized frequency of each word: occurrences divided by word count.
pub fn term_frequencies(words: &[&str]) -> BTreeMap<String, f64> {
    let mut freqs = BTreeMap::new();
    if words.is_empty() {
        return freqs;
    }
    let inv_word_count = 1.0 / words.len() as f64;
    for word in words {
        *freqs.entry((*word).to_string()).or_insert(0.0) += inv_word_count;
    }
    freqs
}

/// Per-document metadata keyed by id, plus the order documents arrived in.
#[derive(Debug, Default, Clone)]
pub struct DocumentStore {
    documents: BTreeMap<DocId, DocumentData>,
    insertion_order: BTreeMap<u64, DocId>,
    next_seq: u64,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn contains(&self, id: DocId) -> bool { self.documents.contains_key(&id) }

    pub fn get(&self, id: DocId) -> Option<&DocumentData> { self.documents.get(&id) }

    /// Callers check for an existing id first; a clash replaces nothing and
    /// returns false.
    pub fn insert(
        &mut self,
        id: DocId,
        rating: i32,
        status: DocumentStatus,
        term_frequencies: BTreeMap<String, f64>,
    ) -> bool {
        if self.documents.contains_key(&id) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.insertion_order.insert(seq, id);
        self.documents.insert(id, DocumentData { rating, status, term_frequencies, seq });
        true
    }

    pub fn remove(&mut self, id: DocId) -> Option<DocumentData> {
        let data = self.documents.remove(&id)?;
        self.insertion_order.remove(&data.seq);
        Some(data)
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Copied<btree_map::Keys<'_, DocId, DocumentData>> { self.documents.keys().copied() }

    /// Ids in the order they were inserted.
    pub fn ids_by_insertion(&self) -> impl Iterator<Item = DocId> + '_ {
        self.insertion_order.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_sum_to_one() {
        let freqs = term_frequencies(&["cat", "dog", "cat", "owl"]);
        assert_eq!(freqs["cat"], 0.5);
        let total: f64 = freqs.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(term_frequencies(&[]).is_empty());
    }

    #[test]
    fn insertion_order_survives_removal() {
        let mut store = DocumentStore::new();
        for id in [7, 2, 5] {
            assert!(store.insert(id, 0, DocumentStatus::Actual, BTreeMap::new()));
        }
        assert!(!store.insert(2, 1, DocumentStatus::Banned, BTreeMap::new()));
        store.remove(2);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![5, 7]);
        assert_eq!(store.ids_by_insertion().collect::<Vec<_>>(), vec![7, 5]);
        assert!(store.remove(2).is_none());
    }
}
