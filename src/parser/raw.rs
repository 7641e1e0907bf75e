// file: src/parser/raw.rs
// description: serde mirror of the searchindex.js tables before validation
// reference: https://docs.rs/serde

use crate::error::FormatError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Every table is optional here so that a missing key surfaces as
/// [`FormatError::MissingKey`] instead of a generic decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIndex {
    pub docnames: Option<Vec<String>>,
    pub filenames: Option<Vec<String>>,
    pub titles: Option<Vec<String>>,
    pub terms: Option<HashMap<String, RawPostings>>,
    pub titleterms: Option<HashMap<String, RawPostings>>,
    pub objects: Option<HashMap<String, RawObjectGroup>>,
    pub objtypes: Option<HashMap<String, String>>,
    pub objnames: Option<HashMap<String, (String, String, String)>>,
    pub envversion: Option<BTreeMap<String, serde_json::Value>>,
    pub alltitles: Option<HashMap<String, Vec<RawTitleRef>>>,
    pub indexentries: Option<HashMap<String, Vec<RawTitleRef>>>,
}

/// `[doc, anchor]`, or `[doc, anchor, is_main]` for newer index entries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTitleRef {
    Pair(usize, Option<String>),
    Flagged(usize, Option<String>, bool),
}

impl RawTitleRef {
    pub fn into_parts(self) -> (usize, Option<String>, bool) {
        match self {
            RawTitleRef::Pair(doc, anchor) => (doc, anchor, true),
            RawTitleRef::Flagged(doc, anchor, is_main) => (doc, anchor, is_main),
        }
    }
}

/// Builders write a lone document index instead of a one-element array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPostings {
    One(usize),
    Many(Vec<usize>),
}

impl RawPostings {
    pub fn into_vec(self) -> Vec<usize> {
        match self {
            RawPostings::One(doc) => vec![doc],
            RawPostings::Many(docs) => docs,
        }
    }
}

/// Objects grouped under their dotted prefix.
///
/// Newer builders emit rows `[doc, type, priority, anchor, name]`; older
/// ones key each row by name and drop the trailing element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawObjectGroup {
    Rows(Vec<(usize, usize, i64, String, String)>),
    Named(BTreeMap<String, (usize, usize, i64, String)>),
}

/// One object row with its name attached, whichever shape it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObjectRow {
    pub doc: usize,
    pub type_index: usize,
    pub priority: i64,
    pub anchor: String,
    pub name: String,
}

impl RawObjectGroup {
    pub fn into_rows(self) -> Vec<RawObjectRow> {
        match self {
            RawObjectGroup::Rows(rows) => rows
                .into_iter()
                .map(|(doc, type_index, priority, anchor, name)| RawObjectRow {
                    doc,
                    type_index,
                    priority,
                    anchor,
                    name,
                })
                .collect(),
            RawObjectGroup::Named(named) => named
                .into_iter()
                .map(|(name, (doc, type_index, priority, anchor))| RawObjectRow {
                    doc,
                    type_index,
                    priority,
                    anchor,
                    name,
                })
                .collect(),
        }
    }
}

impl RawIndex {
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        serde_json::from_str(json).map_err(|e| FormatError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postings_accept_scalar_and_array() {
        let raw = RawIndex::from_json(r#"{"terms":{"a":3,"b":[1,2]}}"#).unwrap();
        let terms = raw.terms.unwrap();
        assert_eq!(terms["a"].clone().into_vec(), vec![3]);
        assert_eq!(terms["b"].clone().into_vec(), vec![1, 2]);
    }

    #[test]
    fn test_object_rows_and_named_groups() {
        let raw = RawIndex::from_json(
            r#"{"objects":{
                "":[[1,0,0,"-","cirq_iqm"]],
                "cirq_iqm.devices.adonis":{"Adonis":[4,1,1,""]}
            }}"#,
        )
        .unwrap();
        let mut objects = raw.objects.unwrap();

        let rows = objects.remove("").unwrap().into_rows();
        assert_eq!(rows[0].name, "cirq_iqm");
        assert_eq!(rows[0].anchor, "-");

        let named = objects.remove("cirq_iqm.devices.adonis").unwrap().into_rows();
        assert_eq!(named[0].name, "Adonis");
        assert_eq!(named[0].doc, 4);
        assert_eq!(named[0].type_index, 1);
    }

    #[test]
    fn test_missing_tables_decode_as_none() {
        let raw = RawIndex::from_json("{}").unwrap();
        assert!(raw.docnames.is_none());
        assert!(raw.alltitles.is_none());
    }

    #[test]
    fn test_wrong_shape_is_a_json_error() {
        let err = RawIndex::from_json(r#"{"docnames":"index"}"#).unwrap_err();
        assert!(matches!(err, FormatError::Json(_)));
    }

    #[test]
    fn test_title_refs_allow_null_anchor() {
        let raw =
            RawIndex::from_json(r#"{"alltitles":{"Changelog":[[26,null],[26,"version-1"]]}}"#)
                .unwrap();
        let mut titles = raw.alltitles.unwrap();
        let refs: Vec<_> = titles
            .remove("Changelog")
            .unwrap()
            .into_iter()
            .map(RawTitleRef::into_parts)
            .collect();
        assert_eq!(refs[0], (26, None, true));
        assert_eq!(refs[1], (26, Some("version-1".to_string()), true));
    }

    #[test]
    fn test_index_entries_with_main_flag() {
        let raw = RawIndex::from_json(r#"{"indexentries":{"module":[[1,"module-a",false]]}}"#)
            .unwrap();
        let entries = raw.indexentries.unwrap();
        assert_eq!(
            entries["module"][0].clone().into_parts(),
            (1, Some("module-a".to_string()), false)
        );
    }
}
