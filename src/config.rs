// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{IndexError, Result};
use crate::search::Scorer;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub index: IndexConfig,
    pub search: SearchConfig,
    pub catalog: CatalogConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    pub path: PathBuf,
    /// Suffix of rendered pages, used when building result links.
    pub file_suffix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub limit: usize,
    /// Shortest query word that also matches stored terms containing it.
    pub partial_match_min_len: usize,
    pub stemming: bool,
    #[serde(default)]
    pub scorer: Scorer,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub root: PathBuf,
    pub file_name: String,
    pub parallel_loads: usize,
    pub max_file_size_mb: usize,
    #[serde(default)]
    pub skip_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub pretty: bool,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SPHINX_INDEX")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| IndexError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| IndexError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            index: IndexConfig {
                path: PathBuf::from("docs/_build/html/searchindex.js"),
                file_suffix: ".html".to_string(),
            },
            search: SearchConfig::default(),
            catalog: CatalogConfig {
                root: PathBuf::from("./versions"),
                file_name: "searchindex.js".to_string(),
                parallel_loads: 4,
                max_file_size_mb: 50,
                skip_patterns: vec!["_sources/".to_string(), ".git/".to_string()],
            },
            export: ExportConfig {
                output_dir: PathBuf::from("./exports"),
                pretty: false,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.catalog.parallel_loads == 0 {
            return Err(IndexError::Config(
                "parallel_loads must be greater than 0".to_string(),
            ));
        }

        if self.catalog.max_file_size_mb == 0 {
            return Err(IndexError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        if self.search.limit == 0 {
            return Err(IndexError::Config(
                "search limit must be greater than 0".to_string(),
            ));
        }

        if self.search.partial_match_min_len == 0 {
            return Err(IndexError::Config(
                "partial_match_min_len must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: 10,
            partial_match_min_len: 3,
            stemming: true,
            scorer: Scorer::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = Config::default_config();
        config.catalog.parallel_loads = 0;
        assert!(matches!(config.validate(), Err(IndexError::Config(_))));

        let mut config = Config::default_config();
        config.search.limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.search.partial_match_min_len = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[index]
path = "build/searchindex.js"
file_suffix = ".html"

[search]
limit = 25
partial_match_min_len = 3
stemming = false

[search.scorer]
term = 8

[catalog]
root = "versions"
file_name = "searchindex.js"
parallel_loads = 2
max_file_size_mb = 10

[export]
output_dir = "out"
pretty = true
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.search.limit, 25);
        assert!(!config.search.stemming);
        assert_eq!(config.search.scorer.term, 8);
        assert_eq!(config.search.scorer.title, 15);
        assert!(config.catalog.skip_patterns.is_empty());
        assert!(config.export.pretty);
    }
}
