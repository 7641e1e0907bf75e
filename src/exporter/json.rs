// file: src/exporter/json.rs
// description: json export of loaded search indexes with a manifest

use crate::catalog::IndexCatalog;
use crate::error::{IndexError, Result};
use crate::index::SearchIndex;
use crate::utils::Validator;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MANIFEST_FILE: &str = "export_manifest.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedIndex {
    pub name: String,
    pub file: String,
    pub fingerprint: String,
    pub documents: usize,
    pub terms: usize,
    pub objects: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub indexes: Vec<ExportedIndex>,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| IndexError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes `<name>.json` and a manifest describing it.
    pub fn export(&self, index: &SearchIndex, name: &str, pretty: bool) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let exported = self.write_index(index, name, pretty)?;
        self.write_manifest(vec![exported], pretty)
    }

    /// Writes every loaded version of a catalog under one manifest.
    pub fn export_catalog(&self, catalog: &IndexCatalog, pretty: bool) -> Result<ExportManifest> {
        info!(
            "Exporting {} catalogued indexes to {:?}",
            catalog.len(),
            self.output_dir
        );

        let exported = catalog
            .entries()
            .map(|entry| self.write_index(&entry.index, &entry.version, pretty))
            .collect::<Result<Vec<_>>>()?;

        self.write_manifest(exported, pretty)
    }

    fn write_index(&self, index: &SearchIndex, name: &str, pretty: bool) -> Result<ExportedIndex> {
        Validator::validate_version_label(name)?;

        let file = format!("{}.json", file_stem(name));
        let value = index.to_json_value();
        self.write_json(&file, &value, pretty)?;

        let stats = index.stats();
        Ok(ExportedIndex {
            name: name.to_string(),
            file,
            fingerprint: index.fingerprint().to_string(),
            documents: stats.documents,
            terms: stats.terms,
            objects: stats.objects,
        })
    }

    fn write_manifest(&self, indexes: Vec<ExportedIndex>, pretty: bool) -> Result<ExportManifest> {
        let mut files: Vec<String> = indexes.iter().map(|i| i.file.clone()).collect();
        files.push(MANIFEST_FILE.to_string());

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            indexes,
            files,
        };
        self.write_json(MANIFEST_FILE, &manifest, pretty)?;

        info!("Export complete: {} indexes exported", manifest.indexes.len());
        Ok(manifest)
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T, pretty: bool) -> Result<()> {
        let body = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        let path = self.output_dir.join(file);
        fs::write(&path, body).map_err(|source| IndexError::FileOperation { path, source })
    }
}

/// Flattens nested version labels such as `v2.0/html` into one file name.
fn file_stem(name: &str) -> String {
    Validator::sanitize_file_path(name).replace('/', "_")
}
