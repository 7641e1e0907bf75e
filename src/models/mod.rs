// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod object;
pub mod posting;
pub mod search_result;

pub use document::{DocId, Document};
pub use object::{ObjectEntry, ObjectKind, ObjectPriority, ObjectType};
pub use posting::{PostingList, TitleRef};
pub use search_result::{MatchSource, SearchResult};
