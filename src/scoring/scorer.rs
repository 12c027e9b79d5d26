/// Scorer trait
pub trait Scorer: Send + Sync {
    /// Weight of a word across the collection.
    fn inverse_document_freq(&self, stats: &TermStats) -> f64;

    /// Contribution of one word to one document's relevance.
    fn score(&self, term_freq: f64, inverse_document_freq: f64) -> f64;
}

/// Collection statistics for one word, taken at query time
#[derive(Debug, Clone, Copy)]
pub struct TermStats {
    pub doc_freq: usize,      // Documents currently containing the word
    pub total_docs: usize,    // Documents currently in the index
}

/// TF-IDF Scorer: tf * ln(N / df), tf already normalized by document length
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScorer;

impl Scorer for TfIdfScorer {
    fn inverse_document_freq(&self, stats: &TermStats) -> f64 {
        if stats.doc_freq == 0 {
            return 0.0;
        }
        (stats.total_docs as f64 / stats.doc_freq as f64).ln()
    }

    fn score(&self, term_freq: f64, inverse_document_freq: f64) -> f64 {
        term_freq * inverse_document_freq
    }
}
