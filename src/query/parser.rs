use crate::analysis::analyzer::Analyzer;
use crate::analysis::tokenizer::is_valid_word;
use crate::core::error::{Error, Result};
use crate::query::ast::{Query, QueryWord};

/// Query parser for converting raw query text into plus and minus words
pub struct QueryParser<'a> {
    analyzer: &'a Analyzer,
}

impl<'a> QueryParser<'a> {
    pub fn new(analyzer: &'a Analyzer) -> Self {
        QueryParser { analyzer }
    }

    /// Parse a query string
    /// Examples:
    /// - "cat city" -> plus words [cat, city]
    /// - "cat -city" -> plus [cat], minus [city]
    /// - "cat --city", "cat -", "ca\x01t" -> InvalidArgument
    pub fn parse<'q>(&self, input: &'q str) -> Result<Query<'q>> {
        let mut query = Query::new();
        for token in self.analyzer.tokenize(input) {
            query.push(self.parse_word(token)?);
        }
        query.normalize();
        tracing::trace!(
            plus = query.plus_words.len(),
            minus = query.minus_words.len(),
            "parsed query"
        );
        Ok(query)
    }

    pub fn parse_word<'q>(&self, token: &'q str) -> Result<QueryWord<'q>> {
        if token.is_empty() {
            return Err(Error::invalid_argument("Query word is empty"));
        }
        let (text, is_minus) = match token.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (token, false),
        };
        if text.is_empty() || text.starts_with('-') || !is_valid_word(text) {
            return Err(Error::invalid_argument(format!("Query word {:?} is invalid", token)));
        }
        Ok(QueryWord {
            text,
            is_minus,
            is_stop: self.analyzer.is_stop_word(text),
        })
    }
}
