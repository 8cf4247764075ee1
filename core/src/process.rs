//! Batch query evaluation on the rayon pool.

use crate::document::Document;
use crate::error::Result;
use crate::server::SearchServer;
use rayon::prelude::*;

/// Run every query through [`SearchServer::find_top_documents`] in parallel.
/// The i-th result list belongs to the i-th query. The first failing query
/// (in input order) fails the whole batch.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    let results: Vec<Result<Vec<Document>>> = queries
        .par_iter()
        .map(|query| {
            let query = query.as_ref();
            server.find_top_documents(query).inspect_err(|e| {
                tracing::warn!(query, error = %e, "batch query failed");
            })
        })
        .collect();
    results.into_iter().collect()
}

/// Like [`process_queries`] but flattened into one list, query by query.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}
