// file: src/search/engine.rs
// description: ranks free-text queries against a loaded index
// reference: mirrors the ranking of the documentation theme's search widget

use super::scorer::Scorer;
use super::tokenizer::{ParsedQuery, QueryParser};
use crate::config::SearchConfig;
use crate::index::SearchIndex;
use crate::models::{DocId, MatchSource, ObjectEntry, PostingList, SearchResult};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

pub struct Searcher<'a> {
    index: &'a SearchIndex,
    parser: QueryParser,
    scorer: Scorer,
    limit: usize,
    partial_match_min_len: usize,
}

impl<'a> Searcher<'a> {
    pub fn new(index: &'a SearchIndex, config: &SearchConfig) -> Self {
        Self {
            index,
            parser: QueryParser::new(config.stemming),
            scorer: config.scorer.clone(),
            limit: config.limit,
            partial_match_min_len: config.partial_match_min_len.max(1),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Runs every search pass and returns hits ordered by score, then title.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let parsed = self.parser.parse(query);
        if parsed.is_empty() {
            return Vec::new();
        }

        let mut normal = Vec::new();
        let mut secondary = Vec::new();

        normal.extend(self.title_results(&parsed.text));

        let (main_entries, other_entries) = self.index_entry_results(&parsed.text);
        normal.extend(main_entries);
        secondary.extend(other_entries);

        for term in &parsed.object_terms {
            normal.extend(self.object_results(term, &parsed.object_terms));
        }
        if parsed.object_terms.len() > 1 {
            let joined = parsed.object_terms.join(" ");
            normal.extend(self.object_results(&joined, &parsed.object_terms));
        }

        normal.extend(self.term_results(&parsed));

        normal.sort_by(by_score_then_title);
        secondary.sort_by(by_score_then_title);

        let merged: Vec<SearchResult> = normal.into_iter().chain(secondary).collect();
        let mut seen = HashSet::new();
        let first_seen: Vec<bool> = merged.iter().map(|r| seen.insert(r.dedup_key())).collect();

        let results: Vec<SearchResult> = merged
            .into_iter()
            .zip(first_seen)
            .filter_map(|(result, first)| first.then_some(result))
            .take(self.limit)
            .collect();

        debug!("Query `{}` produced {} results", parsed.text, results.len());
        results
    }

    /// Objects whose lower-cased full name contains `term`.
    fn object_results(&self, term: &str, object_terms: &[String]) -> Vec<SearchResult> {
        let others: Vec<&String> = object_terms.iter().filter(|t| t.as_str() != term).collect();

        self.index
            .objects()
            .iter()
            .filter_map(|object| self.score_object(object, term, &others))
            .collect()
    }

    fn score_object(
        &self,
        object: &ObjectEntry,
        term: &str,
        others: &[&String],
    ) -> Option<SearchResult> {
        let full_name = object.full_name();
        let full_lower = full_name.to_lowercase();
        if !full_lower.contains(term) {
            return None;
        }

        let last = full_lower.rsplit('.').next().unwrap_or(&full_lower);
        let mut score = 0;
        if full_lower == term || last == term {
            score += self.scorer.obj_name_match;
        } else if last.contains(term) {
            score += self.scorer.obj_partial_match;
        }

        let document = self.index.document(object.doc)?;
        let label = self
            .index
            .object_type(object.type_index)
            .map(|ty| ty.label.clone())
            .unwrap_or_else(|| object.kind.to_string());

        if !others.is_empty() {
            let haystack = format!(
                "{} {} {} {}",
                object.prefix, object.name, label, document.title
            )
            .to_lowercase();
            if others.iter().any(|other| !haystack.contains(other.as_str())) {
                return None;
            }
        }

        score += self.scorer.priority_bonus(object.priority);
        let anchor = object.resolved_anchor(&self.index.object_role(object));

        Some(SearchResult::new(
            document.docname.clone(),
            full_name,
            format!("#{}", anchor),
            Some(format!("{}, in {}", label, document.title)),
            score,
            document.filename.clone(),
            MatchSource::Object,
        ))
    }

    /// Section titles covering at least half of their text with the query.
    fn title_results(&self, text: &str) -> Vec<SearchResult> {
        let mut results = Vec::new();

        for (title, refs) in self.index.all_titles() {
            if !covers(title, text) {
                continue;
            }

            for title_ref in refs {
                let Some(document) = self.index.document(title_ref.doc) else {
                    continue;
                };

                let is_page_title = document.title == *title;
                let score = Scorer::coverage(
                    self.scorer.title,
                    text.chars().count(),
                    title.chars().count(),
                ) + i64::from(is_page_title);
                let display = if is_page_title {
                    title.clone()
                } else {
                    format!("{} > {}", document.title, title)
                };

                results.push(SearchResult::new(
                    document.docname.clone(),
                    display,
                    anchor_fragment(title_ref.anchor.as_deref()),
                    None,
                    score,
                    document.filename.clone(),
                    MatchSource::Title,
                ));
            }
        }

        results
    }

    /// Index entries matched like titles; non-main entries come back second.
    fn index_entry_results(&self, text: &str) -> (Vec<SearchResult>, Vec<SearchResult>) {
        let mut main = Vec::new();
        let mut other = Vec::new();

        for (entry, refs) in self.index.index_entries() {
            if !covers(entry, text) {
                continue;
            }

            let score = Scorer::coverage(
                self.scorer.index_entry,
                text.chars().count(),
                entry.chars().count(),
            );

            for entry_ref in refs {
                let Some(document) = self.index.document(entry_ref.doc) else {
                    continue;
                };

                let result = SearchResult::new(
                    document.docname.clone(),
                    document.title.clone(),
                    anchor_fragment(entry_ref.anchor.as_deref()),
                    None,
                    score,
                    document.filename.clone(),
                    MatchSource::IndexEntry,
                );

                if entry_ref.is_main {
                    main.push(result);
                } else {
                    other.push(result);
                }
            }
        }

        (main, other)
    }

    /// Full-text pass over body and title terms.
    fn term_results(&self, parsed: &ParsedQuery) -> Vec<SearchResult> {
        if parsed.search_terms.is_empty() {
            return Vec::new();
        }

        let mut scores: BTreeMap<DocId, HashMap<&str, i64>> = BTreeMap::new();

        for word in &parsed.search_terms {
            for (postings, weight) in self.postings_for(word) {
                for doc in postings.iter() {
                    let entry = scores
                        .entry(doc)
                        .or_default()
                        .entry(word.as_str())
                        .or_insert(weight);
                    *entry = (*entry).max(weight);
                }
            }
        }

        let long_terms: Vec<&str> = parsed
            .search_terms
            .iter()
            .map(String::as_str)
            .filter(|word| word.chars().count() >= self.partial_match_min_len)
            .collect();
        let required: Vec<&str> = if long_terms.is_empty() {
            parsed.search_terms.iter().map(String::as_str).collect()
        } else {
            long_terms
        };

        let mut results = Vec::new();
        for (doc, word_scores) in scores {
            if !required.iter().all(|word| word_scores.contains_key(word)) {
                continue;
            }
            if self.is_excluded(doc, &parsed.excluded_terms) {
                continue;
            }
            let Some(document) = self.index.document(doc) else {
                continue;
            };

            let score = word_scores.values().copied().max().unwrap_or(0);
            results.push(SearchResult::new(
                document.docname.clone(),
                document.title.clone(),
                String::new(),
                None,
                score,
                document.filename.clone(),
                MatchSource::Term,
            ));
        }

        results
    }

    /// Posting lists hit by `word` together with the weight of each hit.
    fn postings_for(&self, word: &str) -> Vec<(&'a PostingList, i64)> {
        let mut hits = Vec::new();
        let partial = word.chars().count() >= self.partial_match_min_len;

        match self.index.postings(word) {
            Some(postings) => hits.push((postings, self.scorer.term)),
            None if partial => hits.extend(
                self.index
                    .terms()
                    .filter(|(term, _)| term.contains(word))
                    .map(|(_, postings)| (postings, self.scorer.partial_term)),
            ),
            None => {}
        }

        match self.index.title_postings(word) {
            Some(postings) => hits.push((postings, self.scorer.title)),
            None if partial => hits.extend(
                self.index
                    .title_terms()
                    .filter(|(term, _)| term.contains(word))
                    .map(|(_, postings)| (postings, self.scorer.partial_title)),
            ),
            None => {}
        }

        hits
    }

    fn is_excluded(&self, doc: DocId, excluded: &[String]) -> bool {
        excluded.iter().any(|term| {
            self.index
                .postings(term)
                .is_some_and(|postings| postings.contains(doc))
                || self
                    .index
                    .title_postings(term)
                    .is_some_and(|postings| postings.contains(doc))
        })
    }
}

/// True when `target` contains the query and the query spans at least half of it.
fn covers(target: &str, text: &str) -> bool {
    let target_lower = target.trim().to_lowercase();
    target_lower.contains(text) && text.chars().count() * 2 >= target_lower.chars().count()
}

fn anchor_fragment(anchor: Option<&str>) -> String {
    match anchor {
        Some(anchor) if !anchor.is_empty() => format!("#{}", anchor),
        _ => String::new(),
    }
}

fn by_score_then_title(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| a.docname.cmp(&b.docname))
        .then_with(|| a.anchor.cmp(&b.anchor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::fixtures::{JSON_INDEX, LEGACY_INDEX};
    use pretty_assertions::assert_eq;

    fn search(source: &str, query: &str) -> Vec<SearchResult> {
        let index = SearchIndex::load(source).unwrap();
        Searcher::new(&index, &SearchConfig::default()).search(query)
    }

    fn from(results: &[SearchResult], source: MatchSource) -> Vec<String> {
        results
            .iter()
            .filter(|r| r.source == source)
            .map(|r| r.docname.clone())
            .collect()
    }

    #[test]
    fn test_exact_object_name_outranks_term_hits() {
        let results = search(JSON_INDEX, "adonis");

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].title, "cirq_iqm.devices.adonis");
        assert_eq!(results[0].anchor, "#module-cirq_iqm.devices.adonis");
        assert_eq!(results[0].score, 26);
        assert_eq!(results[0].source, MatchSource::Object);
        assert_eq!(
            results[0].description.as_deref(),
            Some("Python module, in cirq_iqm.devices.adonis")
        );

        assert_eq!(results[1].title, "cirq_iqm.devices.adonis.Adonis");
        assert_eq!(results[1].score, 16);

        assert_eq!(
            from(&results, MatchSource::Term),
            vec!["api/cirq_iqm.devices.adonis", "api/cirq_iqm.devices.adonis.Adonis"]
        );
        assert!(results[2..].iter().all(|r| r.score == 15));
    }

    #[test]
    fn test_partial_object_match() {
        let results = search(JSON_INDEX, "sampler");

        assert_eq!(results[0].title, "cirq_iqm.iqm_sampler.IQMSampler");
        assert_eq!(results[0].score, 11);
        assert_eq!(results[0].source, MatchSource::Object);
        assert_eq!(
            results[0].link(".html"),
            "api/cirq_iqm.iqm_sampler.IQMSampler.html#cirq_iqm.iqm_sampler.IQMSampler"
        );
        assert_eq!(from(&results, MatchSource::Term), vec!["api/cirq_iqm.iqm_sampler.IQMSampler"]);
    }

    #[test]
    fn test_excluded_terms_drop_documents() {
        let results = search(JSON_INDEX, "devices -adonis");
        assert_eq!(
            from(&results, MatchSource::Term),
            vec!["api/cirq_iqm.devices", "user_guide"]
        );
    }

    #[test]
    fn test_stopwords_alone_find_nothing() {
        assert!(search(JSON_INDEX, "the").is_empty());
        assert!(search(JSON_INDEX, "   ").is_empty());
    }

    #[test]
    fn test_absent_word_finds_nothing() {
        assert!(search(JSON_INDEX, "teleportation").is_empty());
    }

    #[test]
    fn test_page_title_hit_absorbs_duplicate_term_hit() {
        let results = search(JSON_INDEX, "changelog");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, MatchSource::Title);
        assert_eq!(results[0].title, "Changelog");
        assert_eq!(results[0].score, 16);
        assert_eq!(results[0].anchor, "");
    }

    #[test]
    fn test_section_title_hit() {
        let results = search(JSON_INDEX, "Routing and optimization");

        assert_eq!(results[0].source, MatchSource::Title);
        assert_eq!(results[0].title, "User guide > Routing and optimization");
        assert_eq!(results[0].anchor, "#routing-and-optimization");
        assert_eq!(results[0].score, 15);
        assert_eq!(from(&results, MatchSource::Term), vec!["user_guide"]);
    }

    #[test]
    fn test_section_title_score_scales_with_coverage() {
        let results = search(JSON_INDEX, "and optimization");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source, MatchSource::Title);
        assert_eq!(results[0].title, "User guide > Routing and optimization");
        assert_eq!(results[0].anchor, "#routing-and-optimization");
        assert_eq!(results[0].score, 10);
        assert_eq!(results[1].source, MatchSource::Term);
        assert_eq!(results[1].score, 5);
    }

    #[test]
    fn test_dotted_query_matches_objects_by_whole_name() {
        let results = search(JSON_INDEX, "cirq_iqm.iqm_sampler");

        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "cirq_iqm.iqm_sampler.IQMSampler",
                "cirq_iqm.iqm_sampler.IQMSampler.run_sweep"
            ]
        );
        assert!(results.iter().all(|r| r.source == MatchSource::Object && r.score == 5));
    }

    #[test]
    fn test_index_entry_hit() {
        let results = search(JSON_INDEX, "cirq_iqm");

        assert_eq!(results[0].source, MatchSource::IndexEntry);
        assert_eq!(results[0].score, 100);
        assert_eq!(results[0].docname, "api/cirq_iqm");
        assert_eq!(results[0].anchor, "#module-cirq_iqm");
    }

    #[test]
    fn test_every_search_term_is_required() {
        let results = search(JSON_INDEX, "quantum routing");
        assert_eq!(from(&results, MatchSource::Term), vec!["user_guide"]);
    }

    #[test]
    fn test_partial_term_match() {
        let results = search(LEGACY_INDEX, "sampl");
        let hit = results
            .iter()
            .find(|r| r.source == MatchSource::Term)
            .unwrap();
        assert_eq!(hit.docname, "api/cirq_iqm.iqm_sampler.IQMSampler");
        assert_eq!(hit.score, 7);
    }

    #[test]
    fn test_limit_truncates() {
        let index = SearchIndex::load(JSON_INDEX).unwrap();
        let results = Searcher::new(&index, &SearchConfig::default())
            .with_limit(2)
            .search("cirq_iqm");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_is_deterministic_across_loads() {
        assert_eq!(search(JSON_INDEX, "iqm devices"), search(JSON_INDEX, "iqm devices"));
    }
}
