use rayon::prelude::*;
use crate::core::error::Result;
use crate::core::search_server::SearchServer;
use crate::search::results::ScoredDocument;

/// Run every query against the server on its worker pool.
///
/// Result `i` belongs to query `i`. The first failing query fails the batch.
pub fn process_queries<Q>(server: &SearchServer, queries: &[Q]) -> Result<Vec<Vec<ScoredDocument>>>
where
    Q: AsRef<str> + Sync,
{
    tracing::debug!(queries = queries.len(), "processing query batch");
    server.install(|| {
        queries
            .par_iter()
            .map(|query| server.find_top_documents(query.as_ref()))
            .collect()
    })
}

/// Like `process_queries`, with all results concatenated in query order.
pub fn process_queries_joined<Q>(server: &SearchServer, queries: &[Q]) -> Result<Vec<ScoredDocument>>
where
    Q: AsRef<str> + Sync,
{
    let per_query = process_queries(server, queries)?;
    Ok(per_query.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DocumentStatus;

    fn server() -> SearchServer {
        let mut server = SearchServer::new("and with").unwrap();
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (id, text) in texts.iter().enumerate() {
            server.add_document(id as i32 + 1, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }
        server
    }

    #[test]
    fn results_follow_query_order() {
        let server = server();
        let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair"];
        let results = process_queries(&server, &queries).unwrap();
        let sizes: Vec<usize> = results.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 5, 2]);
        for (query, result) in queries.iter().zip(&results) {
            assert_eq!(result, &server.find_top_documents(query).unwrap());
        }
    }

    #[test]
    fn joined_concatenates_in_order() {
        let server = server();
        let queries = vec![String::from("curly hair"), String::from("nasty rat -not")];
        let joined = process_queries_joined(&server, &queries).unwrap();
        let mut expected = server.find_top_documents("curly hair").unwrap();
        expected.extend(server.find_top_documents("nasty rat -not").unwrap());
        assert_eq!(joined, expected);
    }

    #[test]
    fn bad_query_fails_batch() {
        let server = server();
        assert!(process_queries(&server, &["curly", "--bad"]).is_err());
    }

    #[test]
    fn empty_batch() {
        let server = server();
        let none: [&str; 0] = [];
        assert!(process_queries_joined(&server, &none).unwrap().is_empty());
    }
}
