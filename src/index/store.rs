// file: src/index/store.rs
// description: immutable search index with term, prefix and object lookups
// reference: internal data structures

use super::builder;
use super::stats::IndexStats;
use crate::error::{IndexError, Result};
use crate::models::{DocId, Document, ObjectEntry, ObjectType, PostingList, TitleRef};
use crate::parser;
use crate::search::tokenizer::QueryParser;
use crate::utils::Validator;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// A loaded, validated `searchindex.js`.
///
/// Every document index held by a posting list, object, title or index
/// entry is guaranteed to point into [`SearchIndex::documents`].
#[derive(Debug, Clone)]
pub struct SearchIndex {
    pub(crate) documents: Vec<Document>,
    pub(crate) terms: HashMap<String, PostingList>,
    pub(crate) title_terms: HashMap<String, PostingList>,
    pub(crate) objects: Vec<ObjectEntry>,
    pub(crate) object_types: BTreeMap<usize, ObjectType>,
    pub(crate) all_titles: BTreeMap<String, Vec<TitleRef>>,
    pub(crate) index_entries: BTreeMap<String, Vec<TitleRef>>,
    pub(crate) env_version: BTreeMap<String, serde_json::Value>,
    pub(crate) fingerprint: String,
    pub(crate) missing_optional: Vec<&'static str>,
}

impl SearchIndex {
    /// Parses and validates the contents of a `searchindex.js` file.
    pub fn load(source: &str) -> Result<Self> {
        let (raw, json) = parser::parse(source)?;
        let index = builder::build(raw, &json)?;
        Ok(index)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Validator::validate_file_path(path)?;
        Validator::validate_index_extension(path)?;

        let source = fs::read_to_string(path).map_err(|source| IndexError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;
        Validator::validate_content_not_empty(&source)?;

        let index = Self::load(&source)?;
        info!(
            "Loaded {} ({} documents, {} terms, {} objects)",
            path.display(),
            index.len(),
            index.terms.len(),
            index.objects.len()
        );
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.documents.get(id.index())
    }

    /// Documents containing `term` in their body or title, by ascending id.
    ///
    /// The term is lower-cased; both the literal token and its stem are
    /// looked up since the builder stores stems.
    pub fn query(&self, term: &str) -> Vec<&Document> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let stemmed = QueryParser::default().stem(&term);
        let mut candidates = vec![term.as_str()];
        if stemmed != term {
            candidates.push(stemmed.as_str());
        }

        let hits: BTreeSet<DocId> = candidates
            .into_iter()
            .flat_map(|key| self.postings(key).into_iter().chain(self.title_postings(key)))
            .flat_map(|postings| postings.iter())
            .collect();

        debug!("Query `{}` matched {} documents", term, hits.len());
        self.resolve(hits)
    }

    /// Documents containing any body or title term that starts with `prefix`.
    pub fn query_prefix(&self, prefix: &str) -> Vec<&Document> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }

        let hits: BTreeSet<DocId> = self
            .terms
            .iter()
            .chain(self.title_terms.iter())
            .filter(|(term, _)| term.starts_with(&prefix))
            .flat_map(|(_, postings)| postings.iter())
            .collect();

        self.resolve(hits)
    }

    fn resolve(&self, hits: BTreeSet<DocId>) -> Vec<&Document> {
        hits.into_iter().filter_map(|id| self.document(id)).collect()
    }

    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    pub fn title_postings(&self, term: &str) -> Option<&PostingList> {
        self.title_terms.get(term)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.terms.iter().map(|(term, postings)| (term.as_str(), postings))
    }

    pub fn title_terms(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.title_terms
            .iter()
            .map(|(term, postings)| (term.as_str(), postings))
    }

    /// Title terms whose posting list contains `doc`, sorted.
    pub fn title_terms_for(&self, doc: DocId) -> Vec<&str> {
        let mut terms: Vec<&str> = self
            .title_terms()
            .filter(|(_, postings)| postings.contains(doc))
            .map(|(term, _)| term)
            .collect();
        terms.sort_unstable();
        terms
    }

    /// Objects sorted by full name.
    pub fn objects(&self) -> &[ObjectEntry] {
        &self.objects
    }

    pub fn objects_named(&self, full_name: &str) -> Vec<&ObjectEntry> {
        self.objects
            .iter()
            .filter(|object| object.full_name() == full_name)
            .collect()
    }

    /// Case-insensitive substring match over full object names.
    pub fn find_objects(&self, fragment: &str) -> Vec<&ObjectEntry> {
        let fragment = fragment.trim().to_lowercase();
        if fragment.is_empty() {
            return Vec::new();
        }

        self.objects
            .iter()
            .filter(|object| object.full_name().to_lowercase().contains(&fragment))
            .collect()
    }

    pub fn objects_in(&self, doc: DocId) -> Vec<&ObjectEntry> {
        self.objects.iter().filter(|object| object.doc == doc).collect()
    }

    pub fn object_type(&self, type_index: usize) -> Option<&ObjectType> {
        self.object_types.get(&type_index)
    }

    pub fn object_types(&self) -> &BTreeMap<usize, ObjectType> {
        &self.object_types
    }

    /// Role used to expand an object's `-` anchor shorthand.
    pub fn object_role(&self, object: &ObjectEntry) -> String {
        self.object_type(object.type_index)
            .map(|ty| ty.role.clone())
            .unwrap_or_else(|| object.kind.to_string())
    }

    pub fn all_titles(&self) -> &BTreeMap<String, Vec<TitleRef>> {
        &self.all_titles
    }

    pub fn index_entries(&self) -> &BTreeMap<String, Vec<TitleRef>> {
        &self.index_entries
    }

    pub fn env_version(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.env_version
    }

    /// Environment version of the builder itself, if recorded.
    pub fn generator_version(&self) -> Option<u64> {
        self.env_version.get("sphinx").and_then(|v| v.as_u64())
    }

    /// SHA-256 of the normalized index body.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn missing_optional_tables(&self) -> &[&'static str] {
        &self.missing_optional
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats::collect(self)
    }
}
