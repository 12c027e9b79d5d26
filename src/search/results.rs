use std::cmp::Ordering;
use std::fmt;
use serde::{Serialize, Deserialize};
use crate::core::types::DocId;

/// Document with relevance score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl ScoredDocument {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        ScoredDocument { id, relevance, rating }
    }
}

impl fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Order hits by relevance descending and cut to `limit`.
///
/// A tie group starts at the highest remaining relevance and takes every
/// following hit less than `epsilon` below it; the group is ordered by rating
/// descending. Hits `epsilon` or more apart never swap.
pub fn rank(mut hits: Vec<ScoredDocument>, limit: usize, epsilon: f64) -> Vec<ScoredDocument> {
    hits.sort_by(|a, b| by_relevance(a, b).then_with(|| a.id.cmp(&b.id)));

    let mut start = 0;
    while start < hits.len() {
        let mut end = start + 1;
        while end < hits.len() && hits[start].relevance - hits[end].relevance < epsilon {
            end += 1;
        }
        if end - start > 1 {
            hits[start..end].sort_by(|a, b| {
                b.rating
                    .cmp(&a.rating)
                    .then_with(|| by_relevance(a, b))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        start = end;
    }

    hits.truncate(limit);
    hits
}

fn by_relevance(a: &ScoredDocument, b: &ScoredDocument) -> Ordering {
    b.relevance.total_cmp(&a.relevance)
}
