// file: src/catalog/diff.rs
// description: compares two loaded indexes by document, object and term
// reference: internal data structures

use crate::index::SearchIndex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleChange {
    pub docname: String,
    pub old_title: String,
    pub new_title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexDiff {
    pub added_documents: Vec<String>,
    pub removed_documents: Vec<String>,
    pub retitled_documents: Vec<TitleChange>,
    pub added_objects: Vec<String>,
    pub removed_objects: Vec<String>,
    pub added_terms: usize,
    pub removed_terms: usize,
}

impl IndexDiff {
    pub fn between(old: &SearchIndex, new: &SearchIndex) -> Self {
        let old_titles = titles_by_docname(old);
        let new_titles = titles_by_docname(new);

        let (added_documents, removed_documents) = set_changes(
            old_titles.keys().copied().collect(),
            new_titles.keys().copied().collect(),
        );

        let retitled_documents = old_titles
            .iter()
            .filter_map(|(docname, old_title)| {
                let new_title = new_titles.get(docname)?;
                (old_title != new_title).then(|| TitleChange {
                    docname: docname.to_string(),
                    old_title: old_title.to_string(),
                    new_title: new_title.to_string(),
                })
            })
            .collect();

        let (added_objects, removed_objects) = set_changes(object_names(old), object_names(new));

        let old_terms: BTreeSet<&str> = old.terms().map(|(term, _)| term).collect();
        let new_terms: BTreeSet<&str> = new.terms().map(|(term, _)| term).collect();

        Self {
            added_documents,
            removed_documents,
            retitled_documents,
            added_objects,
            removed_objects,
            added_terms: new_terms.difference(&old_terms).count(),
            removed_terms: old_terms.difference(&new_terms).count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added_documents.is_empty()
            && self.removed_documents.is_empty()
            && self.retitled_documents.is_empty()
            && self.added_objects.is_empty()
            && self.removed_objects.is_empty()
            && self.added_terms == 0
            && self.removed_terms == 0
    }

    pub fn format(&self) -> String {
        if self.is_empty() {
            return "No differences\n".to_string();
        }

        let mut output = String::new();
        for docname in &self.added_documents {
            output.push_str(&format!("+ document {}\n", docname));
        }
        for docname in &self.removed_documents {
            output.push_str(&format!("- document {}\n", docname));
        }
        for change in &self.retitled_documents {
            output.push_str(&format!(
                "~ document {}: \"{}\" -> \"{}\"\n",
                change.docname, change.old_title, change.new_title
            ));
        }
        for name in &self.added_objects {
            output.push_str(&format!("+ object {}\n", name));
        }
        for name in &self.removed_objects {
            output.push_str(&format!("- object {}\n", name));
        }
        output.push_str(&format!(
            "terms: +{} -{}\n",
            self.added_terms, self.removed_terms
        ));
        output
    }
}

fn titles_by_docname(index: &SearchIndex) -> BTreeMap<&str, &str> {
    index
        .documents()
        .iter()
        .map(|doc| (doc.docname.as_str(), doc.title.as_str()))
        .collect()
}

fn object_names(index: &SearchIndex) -> BTreeSet<String> {
    index.objects().iter().map(|object| object.full_name()).collect()
}

fn set_changes<T: Ord + ToString>(old: BTreeSet<T>, new: BTreeSet<T>) -> (Vec<String>, Vec<String>) {
    let added = new.difference(&old).map(ToString::to_string).collect();
    let removed = old.difference(&new).map(ToString::to_string).collect();
    (added, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::fixtures::{JSON_INDEX, LEGACY_INDEX};
    use pretty_assertions::assert_eq;

    const NEXT_RELEASE: &str = r#"Search.setIndex({docnames:["API","api/cirq_iqm","user_guide"],filenames:["API.rst","api/cirq_iqm.rst","user_guide.rst"],titles:["API reference","cirq_iqm","User guide"],terms:{cirq_iqm:1,iqm:[1,2],rout:2,transpil:2},objects:{"":[[1,0,0,"-","cirq_iqm"]],cirq_iqm:[[1,1,1,"","transpile"]]},objtypes:{"0":"py:module","1":"py:function"},objnames:{"0":["py","module","Python module"],"1":["py","function","Python function"]},titleterms:{}})"#;

    #[test]
    fn test_diff_of_index_with_itself_is_empty() {
        let index = SearchIndex::load(JSON_INDEX).unwrap();
        let diff = IndexDiff::between(&index, &index);
        assert!(diff.is_empty());
        assert_eq!(diff.format(), "No differences\n");
    }

    #[test]
    fn test_encodings_of_same_docs_do_not_differ() {
        let legacy = SearchIndex::load(LEGACY_INDEX).unwrap();
        let json = SearchIndex::load(JSON_INDEX).unwrap();
        assert!(IndexDiff::between(&legacy, &json).is_empty());
    }

    #[test]
    fn test_diff_between_releases() {
        let old = SearchIndex::load(LEGACY_INDEX).unwrap();
        let new = SearchIndex::load(NEXT_RELEASE).unwrap();
        let diff = IndexDiff::between(&old, &new);

        assert!(diff.added_documents.is_empty());
        assert_eq!(diff.removed_documents.len(), 5);
        assert!(diff.removed_documents.contains(&"changelog".to_string()));
        assert_eq!(
            diff.retitled_documents,
            vec![TitleChange {
                docname: "API".to_string(),
                old_title: "API Reference".to_string(),
                new_title: "API reference".to_string(),
            }]
        );
        assert_eq!(diff.added_objects, vec!["cirq_iqm.transpile"]);
        assert_eq!(diff.removed_objects.len(), 5);
        assert_eq!(diff.added_terms, 1);
        assert_eq!(diff.removed_terms, 11);
        assert!(diff.format().contains("+ object cirq_iqm.transpile"));
    }
}
