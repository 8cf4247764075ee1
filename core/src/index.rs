use crate::DocId;
use std::collections::BTreeMap;

/// doc id -> normalized term frequency, ordered by doc id.
pub type PostingList = BTreeMap<DocId, f64>;

/// Term -> posting list. Terms whose last posting is removed are dropped.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: BTreeMap<String, PostingList>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Record every (term, tf) pair of one document.
    pub fn insert_document<'a, I>(&mut self, doc_id: DocId, term_freqs: I)
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        for (term, tf) in term_freqs {
            match self.postings.get_mut(term) {
                Some(list) => { list.insert(doc_id, tf); }
                None => {
                    self.postings.insert(term.to_string(), PostingList::from([(doc_id, tf)]));
                }
            }
        }
    }

    /// Drop `doc_id` from the posting lists of the given terms.
    pub fn remove_document<'a, I>(&mut self, doc_id: DocId, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for term in terms {
            let now_empty = match self.postings.get_mut(term) {
                Some(list) => {
                    list.remove(&doc_id);
                    list.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.postings.remove(term);
            }
        }
    }

    pub fn postings(&self, term: &str) -> Option<&PostingList> { self.postings.get(term) }

    /// The stored copy of `term`, borrowed from the index.
    pub fn term(&self, term: &str) -> Option<&str> {
        self.postings.get_key_value(term).map(|(k, _)| k.as_str())
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, BTreeMap::len)
    }

    pub fn contains(&self, term: &str, doc_id: DocId) -> bool {
        self.postings.get(term).is_some_and(|list| list.contains_key(&doc_id))
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }
}
