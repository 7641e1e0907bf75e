// file: src/index/stats.rs
// description: summary counts for a loaded index
// reference: internal data structures

use super::store::SearchIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub documents: usize,
    pub terms: usize,
    pub title_terms: usize,
    pub postings: usize,
    pub objects: usize,
    pub objects_by_kind: BTreeMap<String, usize>,
    pub section_titles: usize,
    pub index_entries: usize,
    pub generator_version: Option<u64>,
    pub fingerprint: String,
}

impl IndexStats {
    pub fn collect(index: &SearchIndex) -> Self {
        let mut objects_by_kind = BTreeMap::new();
        for object in index.objects() {
            *objects_by_kind.entry(object.kind.to_string()).or_insert(0) += 1;
        }

        let postings = index
            .terms()
            .chain(index.title_terms())
            .map(|(_, postings)| postings.len())
            .sum();

        Self {
            documents: index.len(),
            terms: index.terms().count(),
            title_terms: index.title_terms().count(),
            postings,
            objects: index.objects().len(),
            objects_by_kind,
            section_titles: index.all_titles().len(),
            index_entries: index.index_entries().len(),
            generator_version: index.generator_version(),
            fingerprint: index.fingerprint().to_string(),
        }
    }

    /// Postings per document; zero for an empty index.
    pub fn postings_per_document(&self) -> f64 {
        if self.documents == 0 {
            return 0.0;
        }
        self.postings as f64 / self.documents as f64
    }

    pub fn format(&self) -> String {
        let mut output = format!(
            "Documents: {}\n\
             Terms: {} ({} title terms)\n\
             Postings: {} ({:.1} per document)\n\
             Objects: {}\n",
            self.documents,
            self.terms,
            self.title_terms,
            self.postings,
            self.postings_per_document(),
            self.objects
        );

        for (kind, count) in &self.objects_by_kind {
            output.push_str(&format!("  {}: {}\n", kind, count));
        }

        output.push_str(&format!(
            "Section titles: {}\nIndex entries: {}\nGenerator version: {}\nFingerprint: {}\n",
            self.section_titles,
            self.index_entries,
            self.generator_version
                .map(|v| v.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            self.fingerprint
        ));

        output
    }
}
