use crate::error::{Result, SearchError};
use crate::DocId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// A single ranked search hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self { Self { id, relevance, rating } }
}

/// Truncating integer mean of the ratings. Negative sums round toward zero.
pub fn compute_average_rating(ratings: &[i32]) -> Result<i32> {
    if ratings.is_empty() {
        return Err(SearchError::InvalidInput("ratings list is empty".into()));
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    Ok((sum / ratings.len() as i64) as i32)
}
