// file: src/models/document.rs
// description: document entries of a search index
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a document in the index's `docnames` table.
///
/// Only meaningful within the index it came from; a rebuild renumbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(pub usize);

impl DocId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for DocId {
    fn from(value: usize) -> Self {
        DocId(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    /// Source-relative name without suffix, e.g. `api/cirq_iqm.devices`.
    pub docname: String,
    /// Source file the page was built from, e.g. `api/cirq_iqm.devices.rst`.
    pub filename: String,
    pub title: String,
}

impl Document {
    pub fn new(id: DocId, docname: String, filename: String, title: String) -> Self {
        Self {
            id,
            docname,
            filename,
            title,
        }
    }

    /// Relative URL of the rendered page.
    pub fn page_url(&self, file_suffix: &str) -> String {
        format!("{}{}", self.docname, file_suffix)
    }
}
