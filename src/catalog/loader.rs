// file: src/catalog/loader.rs
// description: concurrent loading of every discovered search index
// reference: bounded concurrency with futures buffer_unordered on tokio

use super::progress::ProgressTracker;
use super::scanner::{IndexScanner, ScannedIndex};
use super::{CatalogEntry, IndexCatalog, LoadFailure};
use crate::config::CatalogConfig;
use crate::error::{IndexError, Result};
use crate::index::SearchIndex;
use crate::utils::OperationTimer;
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Loads slower than this are logged as warnings.
const SLOW_LOAD: Duration = Duration::from_secs(2);

pub struct CatalogLoader {
    config: CatalogConfig,
    show_progress: bool,
    colored: bool,
}

impl CatalogLoader {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            show_progress: true,
            colored: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool, colored: bool) -> Self {
        self.show_progress = show_progress;
        self.colored = colored;
        self
    }

    /// Loads the catalog rooted at the configured directory.
    pub async fn load(&self) -> Result<IndexCatalog> {
        let root = self.config.root.clone();
        self.load_from(&root).await
    }

    /// Scans `root` and loads each index found. Versions that fail to load
    /// are recorded as failures, not errors.
    pub async fn load_from(&self, root: &Path) -> Result<IndexCatalog> {
        let timer = OperationTimer::new("catalog load");

        let scanner = IndexScanner::new(self.config.clone());
        let scan_root = root.to_path_buf();
        let scanned = tokio::task::spawn_blocking(move || scanner.scan(&scan_root))
            .await
            .map_err(|e| IndexError::Validation(format!("Index scanning task failed: {}", e)))??;

        if scanned.is_empty() {
            warn!("No search indexes found under {}", root.display());
        }

        let progress = Arc::new(if self.show_progress {
            ProgressTracker::new(scanned.len(), self.colored)
        } else {
            ProgressTracker::hidden(scanned.len())
        });

        let parallel = self.config.parallel_loads.max(1);
        info!("Loading {} indexes with {} concurrent tasks", scanned.len(), parallel);

        let outcomes: Vec<std::result::Result<CatalogEntry, LoadFailure>> =
            stream::iter(scanned.into_iter().map(|scanned| {
                let progress = progress.clone();
                async move { load_one(scanned, &progress).await }
            }))
            .buffer_unordered(parallel)
            .collect()
            .await;

        let mut catalog = IndexCatalog::default();
        for outcome in outcomes {
            match outcome {
                Ok(entry) => catalog.insert(entry),
                Err(failure) => catalog.failures.push(failure),
            }
        }
        catalog.failures.sort_by(|a, b| a.version.cmp(&b.version));

        progress.finish();
        catalog.stats = progress.get_stats();
        info!("Catalog load: {}", catalog.stats.format());
        timer.finish_with_count(catalog.len());

        Ok(catalog)
    }
}

async fn load_one(
    scanned: ScannedIndex,
    progress: &ProgressTracker,
) -> std::result::Result<CatalogEntry, LoadFailure> {
    let timer = OperationTimer::new(&format!("load {}", scanned.version));

    let outcome = match tokio::fs::read_to_string(&scanned.path).await {
        Ok(source) => tokio::task::spawn_blocking(move || SearchIndex::load(&source))
            .await
            .unwrap_or_else(|e| {
                Err(IndexError::Validation(format!("Index loading task failed: {}", e)))
            }),
        Err(source) => Err(IndexError::FileOperation {
            path: scanned.path.clone(),
            source,
        }),
    };

    timer.warn_if_slow(SLOW_LOAD, &scanned.path.display().to_string());

    match outcome {
        Ok(index) => {
            progress.inc_loaded(&scanned.version, scanned.size);
            Ok(CatalogEntry {
                version: scanned.version,
                path: scanned.path,
                index: Arc::new(index),
                load_time: timer.finish(),
            })
        }
        Err(e) => {
            progress.inc_failed(&scanned.version);
            error!("Failed to load {}: {}", scanned.path.display(), e);
            Err(LoadFailure {
                version: scanned.version,
                path: scanned.path,
                error: e.to_string(),
                load_time: timer.finish(),
            })
        }
    }
}
