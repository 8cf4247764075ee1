//! Property tests for ratings, term frequencies, ranking order and removal.

use proptest::prelude::*;
use search_core::{DocumentStatus, ExecutionPolicy, SearchServer, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]{1,3}", 1..12)
}

fn build(docs: &[(Vec<String>, i32)]) -> SearchServer {
    let mut server = SearchServer::new(["a", "b"]).unwrap();
    for (id, (text, rating)) in docs.iter().enumerate() {
        server.add_document(id as i32, &text.join(" "), DocumentStatus::Actual, &[*rating]).unwrap();
    }
    server
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn rating_is_truncating_mean(ratings in prop::collection::vec(-1000i32..1000, 1..20)) {
        let mut server = SearchServer::new(Vec::<String>::new()).unwrap();
        server.add_document(0, "word", DocumentStatus::Actual, &ratings).unwrap();
        let expected = ratings.iter().map(|&r| r as i64).sum::<i64>() / ratings.len() as i64;
        let docs = server.find_top_documents("word").unwrap();
        prop_assert_eq!(docs[0].rating as i64, expected);
    }

    #[test]
    fn frequencies_sum_to_one(text in words()) {
        let mut server = SearchServer::new(["a"]).unwrap();
        server.add_document(1, &text.join(" "), DocumentStatus::Actual, &[0]).unwrap();
        let freqs = server.word_frequencies(1);
        if !freqs.is_empty() {
            let total: f64 = freqs.values().sum();
            prop_assert!((total - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn top_documents_are_capped_and_sorted(
        docs in prop::collection::vec((words(), -5i32..5), 1..30),
        query in words(),
    ) {
        let server = build(&docs);
        for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
            let found = server.find_top_documents_with(policy, &query.join(" "), |_, _, _| true).unwrap();
            prop_assert!(found.len() <= MAX_RESULT_DOCUMENT_COUNT);
            for pair in found.windows(2) {
                prop_assert!(pair[0].relevance + 2.0 * RELEVANCE_EPSILON > pair[1].relevance);
            }
        }
    }

    #[test]
    fn removing_everything_empties_results(
        docs in prop::collection::vec((words(), 0i32..5), 1..20),
        query in words(),
    ) {
        let mut server = build(&docs);
        let ids: Vec<i32> = server.document_ids().collect();
        for id in ids {
            server.remove_document(id);
            server.remove_document(id);
        }
        prop_assert_eq!(server.document_count(), 0);
        prop_assert!(server.find_top_documents(&query.join(" ")).unwrap().is_empty());
    }
}
