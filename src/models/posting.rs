// file: src/models/posting.rs
// description: posting lists and title references
// reference: internal data structures

use super::document::DocId;
use serde::{Deserialize, Serialize};

/// Sorted, duplicate-free set of documents containing a term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingList(Vec<DocId>);

impl PostingList {
    pub fn new(mut docs: Vec<DocId>) -> Self {
        docs.sort_unstable();
        docs.dedup();
        Self(docs)
    }

    pub fn docs(&self) -> &[DocId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, doc: DocId) -> bool {
        self.0.binary_search(&doc).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = DocId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<DocId> for PostingList {
    fn from_iter<T: IntoIterator<Item = DocId>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A section title or index entry pointing into a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRef {
    pub doc: DocId,
    pub anchor: Option<String>,
    /// Index entries marked as the main reference rank ahead of the rest.
    pub is_main: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_list_is_sorted_and_deduplicated() {
        let list = PostingList::new(vec![DocId(5), DocId(1), DocId(5), DocId(3)]);
        assert_eq!(list.docs(), &[DocId(1), DocId(3), DocId(5)]);
        assert!(list.contains(DocId(3)));
        assert!(!list.contains(DocId(2)));
    }

    #[test]
    fn test_collect_into_posting_list() {
        let list: PostingList = [DocId(2), DocId(2), DocId(0)].into_iter().collect();
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
    }
}
