use std::collections::{BTreeMap, HashMap};
use rayon::prelude::*;
use crate::core::types::DocId;
use crate::index::interner::{WordId, WordInterner};
use crate::index::posting::{Posting, PostingList};

/// Inverted index with its forward mirror.
///
/// `postings` maps word -> (doc -> tf) and `forward` maps doc -> (word -> tf).
/// Both are only ever changed together by `add_document` / `remove_document`, so
/// every (word, doc, tf) triple present in one is present in the other.
/// Words whose posting list becomes empty are pruned from `postings`.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    words: WordInterner,
    postings: HashMap<WordId, PostingList>,
    forward: HashMap<DocId, BTreeMap<WordId, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Index a document given its already analyzed words.
    ///
    /// The caller guarantees `doc_id` is not indexed yet. A document without words
    /// gets an empty forward entry and no postings.
    pub fn add_document(&mut self, doc_id: DocId, words: &[&str]) {
        debug_assert!(!self.forward.contains_key(&doc_id));

        let mut term_freqs: BTreeMap<WordId, f64> = BTreeMap::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                let id = self.words.intern(word);
                *term_freqs.entry(id).or_insert(0.0) += inv_word_count;
            }
        }

        for (&word, &term_freq) in &term_freqs {
            self.postings
                .entry(word)
                .or_insert_with(PostingList::new)
                .add_posting(Posting { doc_id, term_freq });
        }
        self.forward.insert(doc_id, term_freqs);
    }

    /// Purge the document by walking its forward entry.
    /// Returns false when the document was not indexed.
    pub fn remove_document(&mut self, doc_id: DocId) -> bool {
        let Some(term_freqs) = self.forward.remove(&doc_id) else {
            return false;
        };
        for word in term_freqs.keys() {
            if let Some(list) = self.postings.get_mut(word) {
                list.remove(doc_id);
                if list.is_empty() {
                    self.postings.remove(word);
                }
            }
        }
        true
    }

    /// Same result as `remove_document`, with the posting lists scanned on the
    /// rayon pool.
    pub fn par_remove_document(&mut self, doc_id: DocId) -> bool {
        let Some(term_freqs) = self.forward.remove(&doc_id) else {
            return false;
        };
        self.postings
            .par_iter_mut()
            .filter(|(word, _)| term_freqs.contains_key(*word))
            .for_each(|(_, list)| {
                list.remove(doc_id);
            });
        for word in term_freqs.keys() {
            if self.postings.get(word).is_some_and(PostingList::is_empty) {
                self.postings.remove(word);
            }
        }
        true
    }

    pub fn contains_document(&self, doc_id: DocId) -> bool {
        self.forward.contains_key(&doc_id)
    }

    /// Posting list of `word`, `None` when no current document contains it.
    pub fn postings(&self, word: &str) -> Option<&PostingList> {
        let id = self.words.get(word)?;
        self.postings.get(&id)
    }

    pub fn doc_freq(&self, word: &str) -> usize {
        self.postings(word).map_or(0, PostingList::doc_freq)
    }

    pub fn term_freq(&self, word: &str, doc_id: DocId) -> Option<f64> {
        let id = self.words.get(word)?;
        self.forward.get(&doc_id)?.get(&id).copied()
    }

    /// The indexed copy of `word`, if any current document contains it.
    pub fn canonical(&self, word: &str) -> Option<&str> {
        let id = self.words.get(word)?;
        self.postings.contains_key(&id).then(|| self.words.resolve(id))
    }

    /// Word -> tf of one document, ordered by word. Empty for unknown ids.
    pub fn word_frequencies(&self, doc_id: DocId) -> BTreeMap<&str, f64> {
        self.forward
            .get(&doc_id)
            .map(|term_freqs| {
                term_freqs
                    .iter()
                    .map(|(&id, &tf)| (self.words.resolve(id), tf))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Distinct words of one document in no particular order.
    pub fn document_words(&self, doc_id: DocId) -> impl Iterator<Item = &str> + '_ {
        self.forward
            .get(&doc_id)
            .into_iter()
            .flat_map(|term_freqs| term_freqs.keys())
            .map(|&id| self.words.resolve(id))
    }

    pub fn doc_count(&self) -> usize {
        self.forward.len()
    }

    /// Number of words with at least one posting
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }
}
