// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod exporter;
pub mod index;
pub mod models;
pub mod parser;
pub mod search;
pub mod utils;

pub use catalog::{CatalogLoader, IndexCatalog, IndexDiff, IndexScanner, ScannedIndex};
pub use config::{CatalogConfig, Config, ExportConfig, IndexConfig, SearchConfig};
pub use error::{FormatError, IndexError, Result};
pub use exporter::{ExportManifest, JsonExporter};
pub use index::{IndexStats, SearchIndex};
pub use models::{
    DocId, Document, MatchSource, ObjectEntry, ObjectKind, ObjectPriority, ObjectType,
    PostingList, SearchResult, TitleRef,
};
pub use search::{ParsedQuery, QueryParser, Scorer, Searcher};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let index = SearchIndex::load(r#"Search.setIndex({docnames:["index"],terms:{hello:0},objects:{}})"#)
            .unwrap();
        let results = Searcher::new(&index, &config.search).search("hello");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].link(&config.index.file_suffix), "index.html");
    }

    #[test]
    fn test_index_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchIndex>();
        assert_send_sync::<IndexCatalog>();
    }
}
