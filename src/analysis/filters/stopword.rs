use std::collections::HashSet;
use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::core::error::{Error, Result};

/// Immutable set of words dropped from documents and queries.
#[derive(Debug, Clone, Default)]
pub struct StopWordFilter {
    stop_words: HashSet<String>,
}

impl StopWordFilter {
    /// Build from any collection of words. Empty strings are skipped, words with
    /// control characters are rejected.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = HashSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(Error::invalid_argument(format!("Stop word {:?} is invalid", word)));
            }
            words.insert(word.to_string());
        }
        Ok(StopWordFilter { stop_words: words })
    }

    /// Build from space separated text, e.g. `"in the under"`.
    pub fn from_text(text: &str) -> Result<Self> {
        StopWordFilter::new(split_into_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn filter<'a>(&self, words: Vec<&'a str>) -> Vec<&'a str> {
        words.into_iter()
            .filter(|word| !self.contains(word))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}
