pub mod tokenizer;
pub mod analyzer;
pub mod filters;