use std::collections::HashMap;

/// Handle of an interned word
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordId(pub u32);

/// Owns exactly one copy of every word the index has seen.
///
/// Postings and the forward index refer to words by `WordId`; text goes back out
/// as `&str` borrowed from here. Words are never forgotten, so a `WordId` stays
/// valid for the life of the index even after all its documents are removed.
#[derive(Debug, Default)]
pub struct WordInterner {
    ids: HashMap<Box<str>, WordId>,
    words: Vec<Box<str>>,
}

impl WordInterner {
    pub fn new() -> Self {
        WordInterner::default()
    }

    pub fn intern(&mut self, word: &str) -> WordId {
        if let Some(&id) = self.ids.get(word) {
            return id;
        }
        let id = WordId(self.words.len() as u32);
        let owned: Box<str> = word.into();
        self.words.push(owned.clone());
        self.ids.insert(owned, id);
        id
    }

    pub fn get(&self, word: &str) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    pub fn resolve(&self, id: WordId) -> &str {
        &self.words[id.0 as usize]
    }
}
