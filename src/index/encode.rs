// file: src/index/encode.rs
// description: serializes a loaded index back into the builder's json layout
// reference: https://docs.rs/serde_json

use super::store::SearchIndex;
use crate::models::{PostingList, TitleRef};
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, HashMap};

impl SearchIndex {
    /// Strict-JSON form of the index using the row layout for objects.
    ///
    /// The result loads back through [`SearchIndex::load`] unchanged.
    pub fn to_json_value(&self) -> Value {
        let docnames: Vec<&str> = self.documents.iter().map(|d| d.docname.as_str()).collect();
        let filenames: Vec<&str> = self.documents.iter().map(|d| d.filename.as_str()).collect();
        let titles: Vec<&str> = self.documents.iter().map(|d| d.title.as_str()).collect();

        let mut objects: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
        for object in &self.objects {
            objects.entry(object.prefix.as_str()).or_default().push(json!([
                object.doc.index(),
                object.type_index,
                object.priority.raw(),
                object.anchor,
                object.name,
            ]));
        }

        let mut objtypes = Map::new();
        let mut objnames = Map::new();
        for (index, ty) in &self.object_types {
            objtypes.insert(index.to_string(), json!(format!("{}:{}", ty.domain, ty.role)));
            objnames.insert(index.to_string(), json!([ty.domain, ty.role, ty.label]));
        }

        json!({
            "docnames": docnames,
            "filenames": filenames,
            "titles": titles,
            "terms": postings_value(&self.terms),
            "titleterms": postings_value(&self.title_terms),
            "objects": objects,
            "objtypes": objtypes,
            "objnames": objnames,
            "envversion": self.env_version,
            "alltitles": title_refs_value(&self.all_titles),
            "indexentries": title_refs_value(&self.index_entries),
        })
    }
}

fn postings_value(table: &HashMap<String, PostingList>) -> Value {
    let sorted: BTreeMap<&str, Value> = table
        .iter()
        .map(|(term, postings)| {
            let value = match postings.docs() {
                [single] => json!(single.index()),
                docs => json!(docs.iter().map(|d| d.index()).collect::<Vec<_>>()),
            };
            (term.as_str(), value)
        })
        .collect();
    json!(sorted)
}

fn title_refs_value(table: &BTreeMap<String, Vec<TitleRef>>) -> Value {
    let mut map = Map::new();
    for (title, refs) in table {
        let rows: Vec<Value> = refs
            .iter()
            .map(|r| {
                if r.is_main {
                    json!([r.doc.index(), r.anchor])
                } else {
                    json!([r.doc.index(), r.anchor, false])
                }
            })
            .collect();
        map.insert(title.clone(), Value::Array(rows));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::fixtures::LEGACY_INDEX;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encoded_index_reloads_with_same_content() {
        let original = SearchIndex::load(LEGACY_INDEX).unwrap();
        let encoded = serde_json::to_string(&original.to_json_value()).unwrap();
        let reloaded = SearchIndex::load(&encoded).unwrap();

        assert_eq!(original.documents(), reloaded.documents());
        assert_eq!(original.objects(), reloaded.objects());
        assert_eq!(original.terms, reloaded.terms);
        assert_eq!(original.title_terms, reloaded.title_terms);
        assert_eq!(original.generator_version(), reloaded.generator_version());
    }

    #[test]
    fn test_single_postings_are_scalars() {
        let index = SearchIndex::load(LEGACY_INDEX).unwrap();
        let value = index.to_json_value();

        assert_eq!(value["terms"]["iqmsampl"], json!(6));
        assert_eq!(value["terms"]["adoni"], json!([3, 4]));
        assert_eq!(value["objects"][""][0], json!([1, 0, 0, "-", "cirq_iqm"]));
    }
}
