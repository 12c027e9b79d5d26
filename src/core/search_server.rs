use std::collections::{BTreeMap, HashMap};
use rayon::prelude::*;
use crate::analysis::analyzer::Analyzer;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, DocumentRecord, DocumentStatus, ExecutionPolicy};
use crate::index::inverted::InvertedIndex;
use crate::parallel::concurrent_map::ConcurrentMap;
use crate::query::ast::Query;
use crate::query::parser::QueryParser;
use crate::scoring::scorer::{Scorer, TermStats, TfIdfScorer};
use crate::search::results::{rank, ScoredDocument};

/// In-process search server: owns the index, document records and stop words.
///
/// Mutations take `&mut self` and queries take `&self`, so a query can never run
/// while a document is being added or removed. Any number of queries may run at
/// once from different threads.
pub struct SearchServer {
    config: Config,
    analyzer: Analyzer,
    index: InvertedIndex,
    documents: HashMap<DocId, DocumentRecord>,
    document_ids: Vec<DocId>, // insertion order
    scorer: Box<dyn Scorer>,
    pool: rayon::ThreadPool,
}

impl SearchServer {
    /// Server with stop words given as space separated text.
    pub fn new(stop_words_text: &str) -> Result<Self> {
        Self::with_config(StopWordFilter::from_text(stop_words_text)?, Config::default())
    }

    pub fn from_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(StopWordFilter::new(stop_words)?, Config::default())
    }

    pub fn with_config(stop_words: StopWordFilter, config: Config) -> Result<Self> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(|i| format!("search-worker-{}", i))
            .build()?;

        Ok(SearchServer {
            analyzer: Analyzer::whitespace(stop_words),
            index: InvertedIndex::new(),
            documents: HashMap::new(),
            document_ids: Vec::new(),
            scorer: Box::new(TfIdfScorer),
            pool,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn add_document(
        &mut self,
        document_id: i32,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if document_id < 0 {
            return Err(Error::invalid_argument(format!(
                "Document id {} is negative",
                document_id
            )));
        }
        let doc_id = DocId(document_id);
        if self.documents.contains_key(&doc_id) {
            return Err(Error::invalid_argument(format!(
                "Document with id {} already exists",
                document_id
            )));
        }

        let words = self.analyzer.analyze(document)?;
        self.index.add_document(doc_id, &words);
        self.documents.insert(doc_id, DocumentRecord::new(ratings, status));
        self.document_ids.push(doc_id);

        tracing::debug!(doc_id = document_id, words = words.len(), ?status, "added document");
        Ok(())
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_by(raw_query, move |_, document_status, _| document_status == status)
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query)?;
        let hits = self.find_all_documents(&query, &predicate);
        Ok(self.rank(hits))
    }

    /// Like `find_top_documents`, under the given policy.
    pub fn find_top_documents_with_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with_policy_status(policy, raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_with_policy_status(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(policy, raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        match policy {
            ExecutionPolicy::Sequential => self.find_top_documents_by(raw_query, predicate),
            ExecutionPolicy::Parallel => {
                let query = self.parse_query(raw_query)?;
                let hits = self.pool.install(|| self.par_find_all_documents(&query, &predicate));
                Ok(self.rank(hits))
            }
        }
    }

    /// Plus words of the query found in the document, sorted. Empty when any
    /// minus word is in the document.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: i32,
    ) -> Result<(Vec<&str>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, document_id)
    }

    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        document_id: i32,
    ) -> Result<(Vec<&str>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let doc_id = DocId(document_id);
        let status = self
            .documents
            .get(&doc_id)
            .map(|record| record.status)
            .ok_or_else(|| Error::out_of_range(format!("Document {} is not indexed", document_id)))?;

        let in_document = |word: &&str| self.index.term_freq(word, doc_id).is_some();
        let words: Vec<&str> = match policy {
            ExecutionPolicy::Sequential => {
                if query.minus_words.iter().any(in_document) {
                    return Ok((Vec::new(), status));
                }
                query
                    .plus_words
                    .iter()
                    .filter(|word| in_document(*word))
                    .filter_map(|word| self.index.canonical(word))
                    .collect()
            }
            ExecutionPolicy::Parallel => self.pool.install(|| {
                if query.minus_words.par_iter().any(in_document) {
                    return Vec::new();
                }
                query
                    .plus_words
                    .par_iter()
                    .filter(|word| in_document(*word))
                    .filter_map(|word| self.index.canonical(word))
                    .collect()
            }),
        };
        Ok((words, status))
    }

    /// Word -> term frequency of the document; empty for unknown ids.
    pub fn word_frequencies(&self, document_id: i32) -> BTreeMap<&str, f64> {
        self.index.word_frequencies(DocId(document_id))
    }

    /// Unknown ids are ignored.
    pub fn remove_document(&mut self, document_id: i32) {
        self.remove_document_with(ExecutionPolicy::Sequential, document_id)
    }

    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, document_id: i32) {
        let doc_id = DocId(document_id);
        if self.documents.remove(&doc_id).is_none() {
            return;
        }
        match policy {
            ExecutionPolicy::Sequential => {
                self.index.remove_document(doc_id);
            }
            ExecutionPolicy::Parallel => {
                let index = &mut self.index;
                self.pool.install(|| index.par_remove_document(doc_id));
            }
        }
        self.document_ids.retain(|&id| id != doc_id);
        tracing::debug!(doc_id = document_id, ?policy, "removed document");
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Document ids in insertion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.document_ids.iter().copied()
    }

    pub fn document(&self, document_id: i32) -> Option<&DocumentRecord> {
        self.documents.get(&DocId(document_id))
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Run `op` on the server's worker pool.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    fn parse_query<'q>(&self, raw_query: &'q str) -> Result<Query<'q>> {
        QueryParser::new(&self.analyzer).parse(raw_query)
    }

    fn inverse_document_freq(&self, word: &str) -> f64 {
        self.scorer.inverse_document_freq(&TermStats {
            doc_freq: self.index.doc_freq(word),
            total_docs: self.documents.len(),
        })
    }

    fn find_all_documents<P>(&self, query: &Query, predicate: &P) -> Vec<ScoredDocument>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = self.inverse_document_freq(word);
            for posting in postings.iter() {
                let record = &self.documents[&posting.doc_id];
                if predicate(posting.doc_id, record.status, record.rating) {
                    *document_to_relevance.entry(posting.doc_id).or_insert(0.0) +=
                        self.scorer.score(posting.term_freq, idf);
                }
            }
        }
        self.collect_hits(query, document_to_relevance)
    }

    fn par_find_all_documents<P>(&self, query: &Query, predicate: &P) -> Vec<ScoredDocument>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance: ConcurrentMap<DocId, f64> = ConcurrentMap::new(self.config.concurrent_buckets);
        query.plus_words.par_iter().for_each(|word| {
            let Some(postings) = self.index.postings(word) else {
                return;
            };
            let idf = self.inverse_document_freq(word);
            for posting in postings.iter() {
                let record = &self.documents[&posting.doc_id];
                if predicate(posting.doc_id, record.status, record.rating) {
                    *relevance.access(posting.doc_id) += self.scorer.score(posting.term_freq, idf);
                }
            }
        });
        self.collect_hits(query, relevance.into_ordinary_map())
    }

    fn collect_hits(&self, query: &Query, mut document_to_relevance: BTreeMap<DocId, f64>) -> Vec<ScoredDocument> {
        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for posting in postings.iter() {
                    document_to_relevance.remove(&posting.doc_id);
                }
            }
        }
        document_to_relevance
            .into_iter()
            .map(|(doc_id, relevance)| {
                ScoredDocument::new(doc_id, relevance, self.documents[&doc_id].rating)
            })
            .collect()
    }

    fn rank(&self, hits: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
        rank(hits, self.config.max_result_document_count, self.config.relevance_epsilon)
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    fn server_with_cities() -> SearchServer {
        let mut server = SearchServer::new("in the").unwrap();
        server.add_document(1, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
        server.add_document(2, "white rabbit in the new york city", DocumentStatus::Actual, &[10, 20, 30]).unwrap();
        server.add_document(3, "bold dog under the new main city bridge", DocumentStatus::Actual, &[3, 5, 7]).unwrap();
        server
    }

    #[test]
    fn relevance_values() {
        let server = server_with_cities();
        let found = server.find_top_documents("cat new city").unwrap();
        let ids: Vec<i32> = found.iter().map(|d| d.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!((found[0].relevance - 0.549306).abs() < 1e-6);
        assert!((found[1].relevance - 0.081093).abs() < 1e-6);
        assert!((found[2].relevance - 0.0579236).abs() < 1e-6);
    }

    #[test]
    fn parallel_find_matches_sequential() {
        let server = server_with_cities();
        let all = |_: DocId, _: DocumentStatus, _: i32| true;
        let seq = server.find_top_documents_with(ExecutionPolicy::Sequential, "cat new -bridge city", all).unwrap();
        let par = server.find_top_documents_with(ExecutionPolicy::Parallel, "cat new -bridge city", all).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.iter().map(|d| d.id).collect::<Vec<_>>(), par.iter().map(|d| d.id).collect::<Vec<_>>());
        for (a, b) in seq.iter().zip(&par) {
            assert!((a.relevance - b.relevance).abs() < 1e-12);
        }
    }

    #[test]
    fn negative_and_duplicate_ids_rejected() {
        let mut server = server_with_cities();
        let err = server.add_document(-1, "x", DocumentStatus::Actual, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = server.add_document(1, "x", DocumentStatus::Actual, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(server.document_count(), 3);
    }

    #[test]
    fn failed_add_leaves_no_trace() {
        let mut server = SearchServer::new("").unwrap();
        let err = server.add_document(4, "good b\x02ad", DocumentStatus::Actual, &[1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(server.document_count(), 0);
        assert!(server.index().postings("good").is_none());
        server.add_document(4, "good", DocumentStatus::Actual, &[1]).unwrap();
    }

    #[test]
    fn match_words_borrow_from_index() {
        let server = server_with_cities();
        let query = String::from("city cat");
        let (words, status) = server.match_document(&query, 1).unwrap();
        assert_eq!(words, vec!["cat", "city"]);
        assert_eq!(status, DocumentStatus::Actual);
        drop(query);
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn ids_iterate_in_insertion_order() {
        let mut server = SearchServer::new("").unwrap();
        for id in [5, 1, 3] {
            server.add_document(id, "word", DocumentStatus::Actual, &[]).unwrap();
        }
        server.remove_document(1);
        let ids: Vec<i32> = (&server).into_iter().map(|id| id.0).collect();
        assert_eq!(ids, vec![5, 3]);
    }

    #[test]
    fn stop_words_excluded_from_document() {
        let mut server = SearchServer::new("in the").unwrap();
        server.add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
        assert!(server.find_top_documents("in").unwrap().is_empty());
        let found = server.find_top_documents("cat").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, DocId(42));
        let freqs = server.word_frequencies(42);
        assert_eq!(freqs.keys().copied().collect::<Vec<_>>(), vec!["cat", "city"]);
    }

    #[test]
    fn minus_word_vetoes_document() {
        let server = server_with_cities();
        let found = server.find_top_documents("city -rabbit").unwrap();
        let ids: Vec<i32> = found.iter().map(|d| d.id.0).collect();
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&2));

        let (words, _) = server.match_document("city new -rabbit", 2).unwrap();
        assert!(words.is_empty());
        let (words, _) = server
            .match_document_with(ExecutionPolicy::Parallel, "city new -rabbit", 2)
            .unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn stop_word_in_query_is_ignored() {
        let server = server_with_cities();
        assert_eq!(
            server.find_top_documents("cat the").unwrap(),
            server.find_top_documents("cat").unwrap()
        );
        let (words, _) = server.match_document("-the cat", 1).unwrap();
        assert_eq!(words, vec!["cat"]);
    }

    #[test]
    fn ranking_uses_stop_words_under() {
        let mut server = SearchServer::new("in the under").unwrap();
        server.add_document(1, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
        server.add_document(2, "bold dog under the main city bridge", DocumentStatus::Actual, &[3, 5, 7]).unwrap();
        server.add_document(3, "white rabbit in the new york city", DocumentStatus::Actual, &[10, 20, 30]).unwrap();
        let ids: Vec<i32> = server
            .find_top_documents("cat new city")
            .unwrap()
            .iter()
            .map(|d| d.id.0)
            .collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn ratings_are_averaged() {
        let mut server = SearchServer::new("").unwrap();
        server.add_document(1, "alpha", DocumentStatus::Actual, &[5, 7]).unwrap();
        server.add_document(2, "alpha beta", DocumentStatus::Actual, &[-4, -5, -8]).unwrap();
        server.add_document(3, "alpha gamma", DocumentStatus::Actual, &[]).unwrap();
        assert_eq!(server.document(1).unwrap().rating, 6);
        assert_eq!(server.document(2).unwrap().rating, -5);
        assert_eq!(server.document(3).unwrap().rating, 0);
    }

    #[test]
    fn status_and_predicate_filters() {
        let mut server = SearchServer::new("").unwrap();
        server.add_document(1, "fluffy cat", DocumentStatus::Actual, &[1]).unwrap();
        server.add_document(2, "fluffy dog", DocumentStatus::Banned, &[2]).unwrap();
        server.add_document(3, "fluffy bird", DocumentStatus::Irrelevant, &[3]).unwrap();
        server.add_document(4, "fluffy rat", DocumentStatus::Actual, &[4]).unwrap();

        let banned = server.find_top_documents_with_status("fluffy", DocumentStatus::Banned).unwrap();
        assert_eq!(banned.iter().map(|d| d.id.0).collect::<Vec<_>>(), vec![2]);
        assert!(server.find_top_documents_with_status("fluffy", DocumentStatus::Removed).unwrap().is_empty());

        let even = server.find_top_documents_by("fluffy", |id, _, _| id.0 % 2 == 0).unwrap();
        let mut ids: Vec<i32> = even.iter().map(|d| d.id.0).collect();
        ids.sort();
        assert_eq!(ids, vec![2, 4]);

        let rated = server
            .find_top_documents_with(ExecutionPolicy::Parallel, "fluffy", |_, _, rating| rating >= 3)
            .unwrap();
        assert_eq!(rated.iter().map(|d| d.id.0).collect::<Vec<_>>(), vec![4, 3]);
    }

    #[test]
    fn results_capped_at_five() {
        let mut server = SearchServer::new("").unwrap();
        for id in 0..8 {
            server.add_document(id, "same words", DocumentStatus::Actual, &[id]).unwrap();
        }
        let found = server.find_top_documents("same").unwrap();
        assert_eq!(found.len(), 5);
        assert_eq!(found.iter().map(|d| d.rating).collect::<Vec<_>>(), vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn bad_queries_rejected() {
        let server = server_with_cities();
        for query in ["cat --city", "cat -", "ca\x01t"] {
            let err = server.find_top_documents(query).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn removal_keeps_index_consistent() {
        for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
            let mut server = server_with_cities();
            assert_eq!(server.index().doc_freq("new"), 2);
            server.remove_document_with(policy, 2);

            assert_eq!(server.document_count(), 2);
            assert_eq!(server.index().doc_freq("new"), 1);
            assert_eq!(server.index().doc_freq("city"), 2);
            assert!(server.index().postings("rabbit").is_none());
            assert!(server.word_frequencies(2).is_empty());
            assert!(server.document(2).is_none());
            let err = server.match_document("city", 2).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange);
            assert!(server.find_top_documents("rabbit").unwrap().is_empty());

            server.remove_document_with(policy, 2);
            assert_eq!(server.document_count(), 2);
        }
    }

    #[test]
    fn query_is_checked_before_document_id() {
        let server = SearchServer::new("").unwrap();
        let err = server.match_document("cat --bad", 7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = server
            .match_document_with(ExecutionPolicy::Parallel, "cat --bad", 7)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = server.match_document("cat", 7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn policy_shorthands_agree_across_policies() {
        let mut server = server_with_cities();
        server.add_document(4, "grey cat in the old city", DocumentStatus::Banned, &[4]).unwrap();
        server.add_document(5, "new cat bridge", DocumentStatus::Banned, &[-2]).unwrap();

        let seq = server.find_top_documents_with_policy(ExecutionPolicy::Sequential, "cat new city").unwrap();
        let par = server.find_top_documents_with_policy(ExecutionPolicy::Parallel, "cat new city").unwrap();
        assert_eq!(seq.iter().map(|d| d.id.0).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(seq.iter().map(|d| d.id).collect::<Vec<_>>(), par.iter().map(|d| d.id).collect::<Vec<_>>());
        assert_eq!(seq, server.find_top_documents("cat new city").unwrap());

        let seq = server
            .find_top_documents_with_policy_status(ExecutionPolicy::Sequential, "cat new city", DocumentStatus::Banned)
            .unwrap();
        let par = server
            .find_top_documents_with_policy_status(ExecutionPolicy::Parallel, "cat new city", DocumentStatus::Banned)
            .unwrap();
        assert_eq!(seq.iter().map(|d| d.id.0).collect::<Vec<_>>(), vec![5, 4]);
        assert_eq!(seq.len(), par.len());
        for (a, b) in seq.iter().zip(&par) {
            assert_eq!(a.id, b.id);
            assert!((a.relevance - b.relevance).abs() < 1e-12);
        }
    }

    #[test]
    fn parallel_match_equals_sequential() {
        let server = server_with_cities();
        for id in 1..=3 {
            let seq = server.match_document_with(ExecutionPolicy::Sequential, "new city cat bridge", id).unwrap();
            let par = server.match_document_with(ExecutionPolicy::Parallel, "new city cat bridge", id).unwrap();
            assert_eq!(seq, par);
        }
    }
}
