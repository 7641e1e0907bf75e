// file: src/catalog/scanner.rs
// description: discovers search index files below a documentation root
// reference: https://docs.rs/walkdir

use crate::config::CatalogConfig;
use crate::error::Result;
use crate::utils::Validator;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Label given to an index found directly in the catalog root.
pub const ROOT_VERSION: &str = "latest";

pub struct IndexScanner {
    config: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedIndex {
    pub path: PathBuf,
    /// Parent directory relative to the root, e.g. `v1.2/html`
    pub version: String,
    pub size: u64,
}

impl IndexScanner {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// Finds every index file under `root`, sorted by version label.
    pub fn scan(&self, root: &Path) -> Result<Vec<ScannedIndex>> {
        Validator::validate_directory(root)?;
        info!("Scanning for {} under {}", self.config.file_name, root.display());

        let max_size = (self.config.max_file_size_mb as u64) * 1024 * 1024;
        let mut found = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file()
                || entry.file_name().to_str() != Some(self.config.file_name.as_str())
            {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);

            if self.should_skip(&relative.to_string_lossy()) {
                debug!("Skipping index: {}", path.display());
                continue;
            }

            let Ok(metadata) = entry.metadata() else {
                continue;
            };

            let size = metadata.len();
            if size > max_size {
                warn!(
                    "Skipping large index ({} MB): {}",
                    size / 1024 / 1024,
                    path.display()
                );
                continue;
            }

            let version = version_label(relative);
            if let Err(e) = Validator::validate_version_label(&version) {
                warn!("Skipping index with unusable version label: {}", e);
                continue;
            }

            found.push(ScannedIndex {
                path: path.to_path_buf(),
                version,
                size,
            });
        }

        found.sort_by(|a, b| a.version.cmp(&b.version));
        info!("Found {} search indexes", found.len());
        Ok(found)
    }

    fn should_skip(&self, relative_path: &str) -> bool {
        let relative_path = Validator::sanitize_file_path(relative_path);

        self.config.skip_patterns.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                relative_path.ends_with(suffix)
            } else {
                relative_path.contains(pattern.as_str())
            }
        })
    }
}

fn version_label(relative: &Path) -> String {
    let parent = relative
        .parent()
        .map(|p| Validator::sanitize_file_path(&p.to_string_lossy()))
        .unwrap_or_default();

    if parent.is_empty() {
        ROOT_VERSION.to_string()
    } else {
        parent
    }
}
