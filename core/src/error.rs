use crate::DocId;

pub type Result<T, E = SearchError> = std::result::Result<T, E>;

/// Errors returned by index mutation and query evaluation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Negative id, or an id that is already present.
    #[error("invalid document id {0}")]
    InvalidId(DocId),
    /// A word contains an ASCII control character.
    #[error("word {0:?} contains control characters")]
    InvalidTerm(String),
    /// Malformed minus-operator usage in a query word.
    #[error("invalid query word {0:?}")]
    InvalidQuery(String),
    #[error("document {0} does not exist")]
    NotFound(DocId),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
