use crate::core::types::DocId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_freq: f64,  // Share of the document's words equal to this term
}

/// Posting list for a term
/// Note: Sorted by doc_id, so iteration order is deterministic
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    pub postings: Vec<Posting>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            postings: Vec::new(),
        }
    }

    pub fn add_posting(&mut self, posting: Posting) {
        match self.postings.binary_search_by_key(&posting.doc_id, |p| p.doc_id) {
            Ok(pos) => {
                self.postings[pos] = posting;
            }
            Err(pos) => {
                self.postings.insert(pos, posting);
            }
        }
    }

    /// Returns the removed posting, if the document was listed.
    pub fn remove(&mut self, doc_id: DocId) -> Option<Posting> {
        match self.postings.binary_search_by_key(&doc_id, |p| p.doc_id) {
            Ok(pos) => Some(self.postings.remove(pos)),
            Err(_) => None,
        }
    }

    pub fn get(&self, doc_id: DocId) -> Option<f64> {
        self.postings
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .ok()
            .map(|pos| self.postings[pos].term_freq)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Posting> {
        self.postings.iter()
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Number of documents containing the term
    pub fn doc_freq(&self) -> usize {
        self.postings.len()
    }
}
