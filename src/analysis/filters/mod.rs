pub mod stopword;