// file: src/utils/validation.rs
// description: input validation for index files, version labels and queries
// reference: input validation patterns

use crate::error::{IndexError, Result};
use std::fs;
use std::path::Path;

/// Longest query accepted by the search commands.
pub const MAX_QUERY_LENGTH: usize = 512;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            IndexError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(IndexError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(IndexError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(IndexError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Index files are emitted as `.js`; exported copies use `.json`.
    pub fn validate_index_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("js") | Some("json") => Ok(()),
            _ => Err(IndexError::Validation(format!(
                "File is not a search index: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_content_not_empty(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(IndexError::Validation("Content is empty".to_string()));
        }
        Ok(())
    }

    pub fn validate_query(query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(IndexError::Validation("Query is empty".to_string()));
        }

        if query.chars().count() > MAX_QUERY_LENGTH {
            return Err(IndexError::Validation(format!(
                "Query too long (max {} characters)",
                MAX_QUERY_LENGTH
            )));
        }

        Ok(())
    }

    /// A result limit of zero would make every search come back empty.
    pub fn validate_limit(limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(IndexError::Validation(
                "Result limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Version labels double as export file names.
    pub fn validate_version_label(label: &str) -> Result<()> {
        if label.trim().is_empty() {
            return Err(IndexError::Validation(
                "Version label is empty".to_string(),
            ));
        }

        if label.split('/').any(|part| part == "..") || label.starts_with('/') {
            return Err(IndexError::Validation(format!(
                "Version label escapes the catalog root: {}",
                label
            )));
        }

        Ok(())
    }

    pub fn sanitize_file_path(path: &str) -> String {
        path.replace('\\', "/")
            .replace("//", "/")
            .trim()
            .trim_matches('/')
            .to_string()
    }

    pub fn truncate_text(text: &str, max_length: usize) -> String {
        if text.chars().count() <= max_length {
            text.to_string()
        } else {
            let cut: String = text.chars().take(max_length).collect();
            format!("{}...", cut)
        }
    }
}
