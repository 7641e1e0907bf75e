// file: src/index/mod.rs
// description: search index store module exports
// reference: internal module structure

mod builder;
mod encode;
pub mod stats;
pub mod store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::OPTIONAL_TABLES;
pub use stats::IndexStats;
pub use store::SearchIndex;
