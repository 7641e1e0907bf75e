// file: src/search/tokenizer.rs
// description: query splitting, stop-word removal and stemming
// reference: https://docs.rs/rust-stemmers

use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

lazy_static! {
    // Anything that is not a letter, digit or underscore separates words.
    static ref WORD_SEPARATOR: Regex = Regex::new(r"[^\p{L}\p{N}_]+")
        .expect("WORD_SEPARATOR regex is valid");

    static ref DIGITS_ONLY: Regex = Regex::new(r"^\d+$")
        .expect("DIGITS_ONLY regex is valid");

    // English stop words skipped by the documentation builder.
    static ref STOPWORDS: HashSet<&'static str> = [
        "a", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
        "near", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there",
        "these", "they", "this", "to", "was", "will", "with",
    ]
    .into_iter()
    .collect();
}

/// A free-text query split into the pieces each search pass needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Whole query, trimmed and lower-cased.
    pub text: String,
    /// Whitespace separated tokens, lower-cased and unstemmed.
    pub object_terms: Vec<String>,
    /// Stemmed words every hit must contain.
    pub search_terms: Vec<String>,
    /// Stemmed words no hit may contain (written as `-word`).
    pub excluded_terms: Vec<String>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.object_terms.is_empty()
    }
}

pub struct QueryParser {
    stemmer: Option<Stemmer>,
}

impl QueryParser {
    pub fn new(stemming: bool) -> Self {
        let stemmer = if stemming {
            Some(Stemmer::create(Algorithm::English))
        } else {
            None
        };
        Self { stemmer }
    }

    pub fn parse(&self, query: &str) -> ParsedQuery {
        let text = query.trim().to_lowercase();
        let mut parsed = ParsedQuery {
            text: text.clone(),
            ..ParsedQuery::default()
        };

        for token in text.split_whitespace() {
            let (excluded, token) = match token.strip_prefix('-') {
                Some(rest) if !rest.is_empty() => (true, rest),
                _ => (false, token),
            };

            if !excluded {
                push_unique(&mut parsed.object_terms, token.to_string());
            }

            for word in split_words(token) {
                if is_stopword(word) || DIGITS_ONLY.is_match(word) {
                    continue;
                }

                let stemmed = self.stem(word);
                if excluded {
                    push_unique(&mut parsed.excluded_terms, stemmed);
                } else {
                    push_unique(&mut parsed.search_terms, stemmed);
                }
            }
        }

        parsed
    }

    pub fn stem(&self, word: &str) -> String {
        match &self.stemmer {
            Some(stemmer) => stemmer.stem(word).into_owned(),
            None => word.to_string(),
        }
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Splits text into the word units the builder indexes.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    WORD_SEPARATOR.split(text).filter(|word| !word.is_empty())
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

fn push_unique(terms: &mut Vec<String>, term: String) {
    if !terms.contains(&term) {
        terms.push(term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_stems_and_drops_stopwords() {
        let parser = QueryParser::new(true);
        let parsed = parser.parse("Routing of the Devices");

        assert_eq!(parsed.text, "routing of the devices");
        assert_eq!(parsed.search_terms, vec!["rout", "devic"]);
        assert_eq!(parsed.object_terms, vec!["routing", "of", "the", "devices"]);
        assert!(parsed.excluded_terms.is_empty());
    }

    #[test]
    fn test_dotted_names_stay_whole_for_objects() {
        let parser = QueryParser::new(true);
        let parsed = parser.parse("cirq_iqm.iqm_sampler");

        assert_eq!(parsed.object_terms, vec!["cirq_iqm.iqm_sampler"]);
        assert_eq!(parsed.search_terms, vec!["cirq_iqm", "iqm_sampl"]);
    }

    #[test]
    fn test_excluded_terms() {
        let parser = QueryParser::new(true);
        let parsed = parser.parse("device -adonis");

        assert_eq!(parsed.search_terms, vec!["devic"]);
        assert_eq!(parsed.excluded_terms, vec!["adoni"]);
        assert_eq!(parsed.object_terms, vec!["device"]);
    }

    #[test]
    fn test_digits_are_not_search_terms() {
        let parser = QueryParser::new(true);
        let parsed = parser.parse("2021 release");

        assert_eq!(parsed.search_terms, vec!["releas"]);
        assert_eq!(parsed.object_terms, vec!["2021", "release"]);
    }

    #[test]
    fn test_stemming_can_be_disabled() {
        let parser = QueryParser::new(false);
        assert_eq!(parser.parse("devices").search_terms, vec!["devices"]);
    }

    #[test]
    fn test_empty_query() {
        let parsed = QueryParser::default().parse("   ");
        assert!(parsed.is_empty());
        assert!(parsed.search_terms.is_empty());
    }

    #[test]
    fn test_split_words() {
        let words: Vec<&str> = split_words("map_operation(op, 'x')").collect();
        assert_eq!(words, vec!["map_operation", "op", "x"]);
    }
}
