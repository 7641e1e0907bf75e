// file: src/search/mod.rs
// description: query parsing, scoring and ranked search module exports
// reference: internal module structure

pub mod engine;
pub mod scorer;
pub mod tokenizer;

pub use engine::Searcher;
pub use scorer::Scorer;
pub use tokenizer::{ParsedQuery, QueryParser};
