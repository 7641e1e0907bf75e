// file: src/catalog/mod.rs
// description: per-version collection of loaded search indexes
// reference: internal module structure

pub mod diff;
pub mod loader;
pub mod progress;
pub mod scanner;

pub use diff::{IndexDiff, TitleChange};
pub use loader::CatalogLoader;
pub use progress::{LoadStats, ProgressTracker};
pub use scanner::{IndexScanner, ROOT_VERSION, ScannedIndex};

use crate::error::{IndexError, Result};
use crate::index::SearchIndex;
use crate::utils::{HealthCheck, HealthReport};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub version: String,
    pub path: PathBuf,
    pub index: Arc<SearchIndex>,
    pub load_time: Duration,
}

/// A version whose index could not be loaded. It stays unavailable.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub version: String,
    pub path: PathBuf,
    pub error: String,
    pub load_time: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct IndexCatalog {
    entries: BTreeMap<String, CatalogEntry>,
    pub(crate) failures: Vec<LoadFailure>,
    pub stats: LoadStats,
}

impl IndexCatalog {
    pub fn insert(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.version.clone(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loaded version labels in ascending order.
    pub fn versions(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn entry(&self, version: &str) -> Option<&CatalogEntry> {
        self.entries.get(version)
    }

    pub fn get(&self, version: &str) -> Result<&SearchIndex> {
        self.entries
            .get(version)
            .map(|entry| entry.index.as_ref())
            .ok_or_else(|| IndexError::VersionNotFound(version.to_string()))
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    pub fn diff(&self, from: &str, to: &str) -> Result<IndexDiff> {
        Ok(IndexDiff::between(self.get(from)?, self.get(to)?))
    }

    /// Loaded indexes are healthy, or degraded when optional tables are
    /// absent. Failed loads are unhealthy.
    pub fn health(&self) -> HealthReport {
        let mut checks: Vec<HealthCheck> = self
            .entries
            .values()
            .map(|entry| {
                let missing = entry.index.missing_optional_tables();
                if missing.is_empty() {
                    HealthCheck::healthy(&entry.version, entry.load_time)
                } else {
                    HealthCheck::degraded(
                        &entry.version,
                        format!("missing tables: {}", missing.join(", ")),
                        entry.load_time,
                    )
                }
            })
            .collect();

        checks.extend(self.failures.iter().map(|failure| {
            HealthCheck::unhealthy(&failure.version, failure.error.clone(), failure.load_time)
        }));

        HealthReport::new(checks, env!("CARGO_PKG_VERSION").to_string())
    }
}
