// file: src/parser/envelope.rs
// description: strips the Search.setIndex(...) wrapper around an index body
// reference: https://docs.rs/regex

use crate::error::FormatError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SET_INDEX_CALL: Regex = Regex::new(
        r"(?s)^\s*Search\s*\.\s*setIndex\s*\(\s*(.*?)\s*\)\s*;?\s*$"
    ).expect("SET_INDEX_CALL regex is valid");
}

/// Returns the object-literal body of a `searchindex.js` file.
///
/// Accepts either the registry call emitted by the documentation builder or
/// a bare `{...}` object, which is what the exporter writes.
pub fn unwrap(source: &str) -> Result<&str, FormatError> {
    let source = source.trim_start_matches('\u{feff}');

    let body = if let Some(captures) = SET_INDEX_CALL.captures(source) {
        captures.get(1).map(|m| m.as_str()).unwrap_or_default()
    } else {
        let trimmed = source.trim();
        if trimmed.starts_with("Search") {
            return Err(FormatError::Envelope(
                "registry call is not closed".to_string(),
            ));
        }
        trimmed
    };

    if body.is_empty() {
        return Err(FormatError::Envelope("index body is empty".to_string()));
    }

    if !body.starts_with('{') || !body.ends_with('}') {
        return Err(FormatError::Envelope(format!(
            "body must be an object, found `{}`",
            preview(body)
        )));
    }

    Ok(body)
}

fn preview(body: &str) -> String {
    body.chars().take(24).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_registry_call() {
        let body = unwrap("Search.setIndex({docnames:[\"index\"]})").unwrap();
        assert_eq!(body, "{docnames:[\"index\"]}");
    }

    #[test]
    fn test_unwrap_with_semicolon_and_whitespace() {
        let body = unwrap("\u{feff}  Search.setIndex( {\"a\":1} );\n").unwrap();
        assert_eq!(body, "{\"a\":1}");
    }

    #[test]
    fn test_unwrap_bare_object() {
        assert_eq!(unwrap("  {\"a\":1}\n").unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_truncated_call_is_rejected() {
        let err = unwrap("Search.setIndex({docnames:[\"index\"]").unwrap_err();
        assert!(matches!(err, FormatError::Envelope(_)));
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert!(unwrap("Search.setIndex([1, 2])").is_err());
        assert!(unwrap("").is_err());
        assert!(unwrap("Search.setIndex()").is_err());
    }
}
