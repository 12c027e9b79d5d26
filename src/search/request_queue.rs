use crate::core::error::Result;
use crate::core::search_server::SearchServer;
use crate::core::stats::{RequestStats, RequestStatsSummary};
use crate::core::types::{DocId, DocumentStatus};
use crate::parallel::process_queries::process_queries;
use crate::search::results::ScoredDocument;

/// Runs find requests against a server and remembers how many of the most
/// recent ones came back empty.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    stats: RequestStats,
}

impl<'a> RequestQueue<'a> {
    /// Window size comes from the server's config.
    pub fn new(server: &'a SearchServer) -> Self {
        Self::with_window(server, server.config().request_window)
    }

    pub fn with_window(server: &'a SearchServer, window: usize) -> Self {
        RequestQueue {
            server,
            stats: RequestStats::new(window),
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        let result = self.server.find_top_documents(raw_query)?;
        self.stats.record(result.len());
        Ok(result)
    }

    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        let result = self.server.find_top_documents_with_status(raw_query, status)?;
        self.stats.record(result.len());
        Ok(result)
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let result = self.server.find_top_documents_by(raw_query, predicate)?;
        self.stats.record(result.len());
        Ok(result)
    }

    /// Run a batch on the server's pool and record one outcome per query, in
    /// query order. A failing batch records nothing.
    pub fn add_find_requests<Q>(&mut self, queries: &[Q]) -> Result<Vec<Vec<ScoredDocument>>>
    where
        Q: AsRef<str> + Sync,
    {
        let results = process_queries(self.server, queries)?;
        for result in &results {
            self.record_outcome(result.len());
        }
        Ok(results)
    }

    /// Record an outcome of a request run outside the queue.
    pub fn record_outcome(&mut self, found_documents: usize) {
        self.stats.record(found_documents);
    }

    pub fn no_result_requests(&self) -> usize {
        self.stats.no_result_requests()
    }

    pub fn summary(&self) -> RequestStatsSummary {
        self.stats.summary()
    }
}
