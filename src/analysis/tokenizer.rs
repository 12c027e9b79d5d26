pub trait Tokenizer: Send + Sync {
    /// Split `text` into words borrowed from it.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Splits on the ASCII space only. Tabs, newlines and other control bytes stay
/// inside the word so validation can reject it.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        split_into_words(text)
    }
}

pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ')
        .filter(|word| !word.is_empty())
        .collect()
}

/// A word is valid when it has no byte in `0x00..0x20`.
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < b' ')
}
