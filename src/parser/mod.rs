// file: src/parser/mod.rs
// description: searchindex.js parsing module exports
// reference: internal module structure

pub mod envelope;
pub mod literal;
pub mod raw;

pub use raw::{RawIndex, RawObjectGroup, RawObjectRow, RawPostings, RawTitleRef};

use crate::error::FormatError;

/// Normalizes a `searchindex.js` file (either encoding) into strict JSON.
pub fn normalize(source: &str) -> Result<String, FormatError> {
    let body = envelope::unwrap(source)?;
    literal::to_json(body)
}

/// Parses a `searchindex.js` file into its unvalidated tables.
pub fn parse(source: &str) -> Result<(RawIndex, String), FormatError> {
    let json = normalize(source)?;
    let raw = RawIndex::from_json(&json)?;
    Ok((raw, json))
}
