/// One parsed word of a raw query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWord<'q> {
    pub text: &'q str,
    pub is_minus: bool,
    pub is_stop: bool,
}

/// Parsed query: required and forbidden words, both sorted and duplicate free.
/// Words borrow from the raw query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'q> {
    pub plus_words: Vec<&'q str>,
    pub minus_words: Vec<&'q str>,
}

impl<'q> Query<'q> {
    pub fn new() -> Self {
        Query::default()
    }

    pub fn push(&mut self, word: QueryWord<'q>) {
        if word.is_stop {
            return;
        }
        if word.is_minus {
            self.minus_words.push(word.text);
        } else {
            self.plus_words.push(word.text);
        }
    }

    /// Sort and collapse duplicates.
    pub fn normalize(&mut self) {
        self.plus_words.sort_unstable();
        self.plus_words.dedup();
        self.minus_words.sort_unstable();
        self.minus_words.dedup();
    }

    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}
