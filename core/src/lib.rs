//! In-memory full-text document index with TF-IDF ranking.
//!
//! Documents are tokenized on spaces, stop words are dropped, and each
//! remaining term is recorded in an inverted index together with its
//! normalized frequency. Queries consist of plus-words and `-`minus-words;
//! a document is ranked by the sum of `tf * idf` over the plus-words it
//! contains and dropped entirely if it contains any minus-word.

pub mod concurrent;
pub mod config;
pub mod document;
pub mod duplicates;
pub mod error;
pub mod index;
pub mod process;
pub mod query;
pub mod server;
pub mod store;
pub mod tokenizer;

pub use concurrent::ConcurrentAccumulator;
pub use config::{ExecutionPolicy, SearchConfig};
pub use document::{Document, DocumentStatus};
pub use duplicates::remove_duplicates;
pub use error::{Result, SearchError};
pub use process::{process_queries, process_queries_joined};
pub use server::{DocumentMatch, DocumentPredicate, SearchServer};

pub type DocId = i32;

/// Upper bound on the number of documents returned by a single search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevance values closer than this are considered equal when ranking.
pub const RELEVANCE_EPSILON: f64 = 1e-6;
