pub mod core;
pub mod analysis;
pub mod index;
pub mod scoring;
pub mod search;
pub mod query;
pub mod parallel;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::search_server::SearchServer;
pub use crate::core::types::{DocId, DocumentStatus, ExecutionPolicy};
pub use crate::search::results::ScoredDocument;

/*
┌──────────────────────────────── CORE LAYER ────────────────────────────────┐
│                                                                            │
│  struct SearchServer                                                       │
│    config: Config                      // ranking limits, buckets, window  │
│    analyzer: Analyzer                  // tokenizer + stop words           │
│    index: InvertedIndex                // word -> postings, doc -> words   │
│    documents: HashMap<DocId, Record>   // rating + status                  │
│    document_ids: Vec<DocId>            // insertion order                  │
│    scorer: Box<dyn Scorer>             // tf-idf                           │
│    pool: rayon::ThreadPool             // parallel policy + batches        │
│                                                                            │
└────────────────────────────────────────────────────────────────────────────┘
          │ add / remove                          │ find / match
          ▼                                       ▼
┌──────── INDEX LAYER ─────────┐      ┌────────── QUERY LAYER ──────────────┐
│ WordInterner  str <-> WordId │      │ QueryParser -> Query{plus, minus}   │
│ PostingList   sorted by doc  │      │ ConcurrentMap<DocId, f64>  (par)    │
│ forward map   doc -> tf      │      │ rank(): epsilon ties, rating, top-N │
└──────────────────────────────┘      └─────────────────────────────────────┘
          │                                       │
          ▼                                       ▼
┌────────────────────────────── SEARCH LAYER ────────────────────────────────┐
│ RequestQueue  sliding window of empty results                              │
│ process_queries / process_queries_joined   rayon batch over the pool       │
│ find_duplicates / remove_duplicates        same word set, keep earliest    │
└────────────────────────────────────────────────────────────────────────────┘
*/
