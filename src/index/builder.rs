// file: src/index/builder.rs
// description: validates raw tables and assembles the in-memory index
// reference: internal data structures

use super::store::SearchIndex;
use crate::error::FormatError;
use crate::models::{
    DocId, Document, ObjectEntry, ObjectKind, ObjectPriority, ObjectType, PostingList, TitleRef,
};
use crate::parser::{RawIndex, RawObjectGroup, RawPostings, RawTitleRef};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Tables an index may omit; their absence degrades search quality only.
pub const OPTIONAL_TABLES: [&str; 7] = [
    "filenames",
    "titles",
    "titleterms",
    "objtypes",
    "objnames",
    "alltitles",
    "indexentries",
];

pub(crate) fn build(raw: RawIndex, json: &str) -> Result<SearchIndex, FormatError> {
    let missing_optional = missing_optional_tables(&raw);

    let docnames = raw.docnames.ok_or(FormatError::MissingKey("docnames"))?;
    let raw_terms = raw.terms.ok_or(FormatError::MissingKey("terms"))?;
    let raw_objects = raw.objects.ok_or(FormatError::MissingKey("objects"))?;

    let count = docnames.len();
    let filenames = column_or_docnames("filenames", raw.filenames, &docnames)?;
    let titles = column_or_docnames("titles", raw.titles, &docnames)?;

    let documents: Vec<Document> = docnames
        .into_iter()
        .zip(filenames)
        .zip(titles)
        .enumerate()
        .map(|(id, ((docname, filename), title))| {
            Document::new(DocId(id), docname, filename, title)
        })
        .collect();

    let terms = postings_table("terms", raw_terms, count)?;
    let title_terms = postings_table("titleterms", raw.titleterms.unwrap_or_default(), count)?;

    let object_types = object_types(raw.objtypes, raw.objnames);
    let objects = object_table(raw_objects, &object_types, count)?;

    let all_titles = title_table("alltitles", raw.alltitles.unwrap_or_default(), count)?;
    let index_entries = title_table("indexentries", raw.indexentries.unwrap_or_default(), count)?;

    debug!(
        "Built index: {} documents, {} terms, {} objects",
        count,
        terms.len(),
        objects.len()
    );

    Ok(SearchIndex {
        documents,
        terms,
        title_terms,
        objects,
        object_types,
        all_titles,
        index_entries,
        env_version: raw.envversion.unwrap_or_default(),
        fingerprint: fingerprint(json),
        missing_optional,
    })
}

fn missing_optional_tables(raw: &RawIndex) -> Vec<&'static str> {
    let present = [
        raw.filenames.is_some(),
        raw.titles.is_some(),
        raw.titleterms.is_some(),
        raw.objtypes.is_some(),
        raw.objnames.is_some(),
        raw.alltitles.is_some(),
        raw.indexentries.is_some(),
    ];

    OPTIONAL_TABLES
        .iter()
        .zip(present)
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect()
}

fn column_or_docnames(
    table: &'static str,
    column: Option<Vec<String>>,
    docnames: &[String],
) -> Result<Vec<String>, FormatError> {
    match column {
        Some(values) if values.len() != docnames.len() => Err(FormatError::LengthMismatch {
            table,
            expected: docnames.len(),
            found: values.len(),
        }),
        Some(values) => Ok(values),
        None => Ok(docnames.to_vec()),
    }
}

fn check_doc(table: &'static str, key: &str, doc: usize, count: usize) -> Result<DocId, FormatError> {
    if doc < count {
        Ok(DocId(doc))
    } else {
        Err(FormatError::DanglingReference {
            table,
            key: key.to_string(),
            doc,
            documents: count,
        })
    }
}

fn postings_table(
    table: &'static str,
    raw: HashMap<String, RawPostings>,
    count: usize,
) -> Result<HashMap<String, PostingList>, FormatError> {
    raw.into_iter()
        .map(|(term, postings)| {
            let docs = postings
                .into_vec()
                .into_iter()
                .map(|doc| check_doc(table, &term, doc, count))
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, FormatError>((term, PostingList::new(docs)))
        })
        .collect()
}

/// Merges `objnames` (preferred, carries labels) with `objtypes`.
fn object_types(
    objtypes: Option<HashMap<String, String>>,
    objnames: Option<HashMap<String, (String, String, String)>>,
) -> BTreeMap<usize, ObjectType> {
    let mut types = BTreeMap::new();

    for (key, qualified) in objtypes.unwrap_or_default() {
        if let Ok(index) = key.parse::<usize>() {
            types.insert(index, ObjectType::from_qualified(&qualified));
        }
    }

    for (key, (domain, role, label)) in objnames.unwrap_or_default() {
        if let Ok(index) = key.parse::<usize>() {
            types.insert(
                index,
                ObjectType {
                    domain,
                    role,
                    label,
                },
            );
        }
    }

    types
}

fn object_table(
    raw: HashMap<String, RawObjectGroup>,
    types: &BTreeMap<usize, ObjectType>,
    count: usize,
) -> Result<Vec<ObjectEntry>, FormatError> {
    let mut objects = Vec::new();

    for (prefix, group) in raw {
        for row in group.into_rows() {
            let key = if prefix.is_empty() {
                row.name.clone()
            } else {
                format!("{}.{}", prefix, row.name)
            };
            let doc = check_doc("objects", &key, row.doc, count)?;

            let kind = match types.get(&row.type_index) {
                Some(ty) => ty.kind(),
                None if types.is_empty() => ObjectKind::Other(format!("type-{}", row.type_index)),
                None => {
                    return Err(FormatError::UnknownObjectType {
                        prefix: prefix.clone(),
                        name: row.name,
                        type_index: row.type_index,
                    });
                }
            };

            objects.push(ObjectEntry {
                prefix: prefix.clone(),
                name: row.name,
                doc,
                kind,
                type_index: row.type_index,
                priority: ObjectPriority::from_raw(row.priority),
                anchor: row.anchor,
            });
        }
    }

    objects.sort_by(|a, b| {
        a.full_name()
            .cmp(&b.full_name())
            .then(a.doc.cmp(&b.doc))
            .then(a.type_index.cmp(&b.type_index))
    });

    Ok(objects)
}

fn title_table(
    table: &'static str,
    raw: HashMap<String, Vec<RawTitleRef>>,
    count: usize,
) -> Result<BTreeMap<String, Vec<TitleRef>>, FormatError> {
    raw.into_iter()
        .map(|(title, refs)| {
            let refs = refs
                .into_iter()
                .map(|title_ref| {
                    let (doc, anchor, is_main) = title_ref.into_parts();
                    Ok::<_, FormatError>(TitleRef {
                        doc: check_doc(table, &title, doc, count)?,
                        anchor,
                        is_main,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, FormatError>((title, refs))
        })
        .collect()
}

fn fingerprint(json: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    format!("{:x}", hasher.finalize())
}
