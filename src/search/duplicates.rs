use std::collections::{BTreeSet, HashSet};
use crate::core::search_server::SearchServer;
use crate::core::types::DocId;

/// Ids that have the same set of words as an earlier inserted document.
/// Term frequencies, ratings and status are not compared.
pub fn find_duplicates(server: &SearchServer) -> Vec<DocId> {
    let mut seen: HashSet<BTreeSet<&str>> = HashSet::new();
    let mut duplicates = Vec::new();
    for doc_id in server {
        let words: BTreeSet<&str> = server.index().document_words(doc_id).collect();
        if !seen.insert(words) {
            duplicates.push(doc_id);
        }
    }
    duplicates
}

/// Remove every duplicate, keeping the earliest inserted document of each word
/// set. Returns the removed ids in insertion order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let duplicates = find_duplicates(server);
    for &doc_id in &duplicates {
        server.remove_document(doc_id.value());
        tracing::info!(doc_id = doc_id.value(), "Found duplicate document id {}", doc_id);
    }
    duplicates
}
