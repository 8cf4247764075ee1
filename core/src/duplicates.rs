use crate::server::SearchServer;
use crate::DocId;
use std::collections::BTreeSet;

/// Remove every document whose set of words (frequencies ignored) matches an
/// earlier-inserted document. Returns the removed ids in detection order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let mut seen: BTreeSet<Vec<&str>> = BTreeSet::new();
    let mut duplicates = Vec::new();
    for id in server.document_ids_by_insertion() {
        let words: Vec<&str> = server.word_frequencies(id).keys().map(String::as_str).collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }
    drop(seen);

    for &id in &duplicates {
        tracing::info!(id, "found duplicate document");
        server.remove_document(id);
    }
    duplicates
}
