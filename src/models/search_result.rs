// file: src/models/search_result.rs
// description: Ranked search hit model
// reference: Mirrors the result tuples produced by the documentation search widget

use crate::utils::Validator;
use serde::{Deserialize, Serialize};

/// Which part of the index produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Object,
    Title,
    IndexEntry,
    Term,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Document name, e.g. `api/cirq_iqm.iqm_sampler`
    pub docname: String,

    /// Displayed title; object hits show the object's full name
    pub title: String,

    /// Fragment including the leading `#`, empty for whole-page hits
    pub anchor: String,

    /// Short description, e.g. `Python class, in cirq_iqm.iqm_sampler`
    pub description: Option<String>,

    /// Relevance score (higher ranks first)
    pub score: i64,

    /// Source file of the page
    pub filename: String,

    pub source: MatchSource,
}

impl SearchResult {
    pub fn new(
        docname: String,
        title: String,
        anchor: String,
        description: Option<String>,
        score: i64,
        filename: String,
        source: MatchSource,
    ) -> Self {
        Self {
            docname,
            title,
            anchor,
            description,
            score,
            filename,
            source,
        }
    }

    /// Link relative to the documentation root.
    pub fn link(&self, file_suffix: &str) -> String {
        format!("{}{}{}", self.docname, file_suffix, self.anchor)
    }

    /// Identity used to drop duplicate hits from different sources.
    pub(crate) fn dedup_key(&self) -> (&str, &str, &str, Option<&str>, &str) {
        (
            &self.docname,
            &self.title,
            &self.anchor,
            self.description.as_deref(),
            &self.filename,
        )
    }

    /// Format as a summary string for display
    pub fn format_summary(&self, file_suffix: &str, max_description_len: usize) -> String {
        let description = self
            .description
            .as_deref()
            .map(|text| Validator::truncate_text(text, max_description_len))
            .unwrap_or_default();

        format!(
            "Score: {} | {} ({})\n{}\n",
            self.score,
            self.title,
            self.link(file_suffix),
            description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler_hit() -> SearchResult {
        SearchResult::new(
            "api/cirq_iqm.iqm_sampler.IQMSampler".to_string(),
            "cirq_iqm.iqm_sampler.IQMSampler".to_string(),
            "#cirq_iqm.iqm_sampler.IQMSampler".to_string(),
            Some("Python class, in cirq_iqm.iqm_sampler.IQMSampler".to_string()),
            31,
            "api/cirq_iqm.iqm_sampler.IQMSampler.rst".to_string(),
            MatchSource::Object,
        )
    }

    #[test]
    fn test_search_result_creation() {
        let result = sampler_hit();

        assert_eq!(result.score, 31);
        assert_eq!(result.source, MatchSource::Object);
        assert_eq!(
            result.link(".html"),
            "api/cirq_iqm.iqm_sampler.IQMSampler.html#cirq_iqm.iqm_sampler.IQMSampler"
        );
    }

    #[test]
    fn test_format_summary() {
        let summary = sampler_hit().format_summary(".html", 12);
        assert!(summary.contains("Score: 31"));
        assert!(summary.contains("cirq_iqm.iqm_sampler.IQMSampler"));
        assert!(summary.contains("Python class..."));
    }
}
