//! Keyword retrieval over the knowledge base.
//!
//! Scoring is fixed: a matching single-string field scores 0.9, a matching
//! list element scores 0.8. Results are stable-sorted by descending score so
//! ties keep scan order.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::knowledge::{FieldValue, KnowledgeBase, PhaseProfile, Section};
use crate::phase::PhaseLabel;

/// Default number of snippets returned by a search.
pub const DEFAULT_LIMIT: usize = 3;

const TEXT_FIELD_SCORE: f64 = 0.9;
const LIST_ITEM_SCORE: f64 = 0.8;

/// A single retrieval hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSnippet {
    pub content: String,
    pub section: Section,
    pub key: String,
    /// Phase label the snippet was found under
    pub phase: String,
    /// Relevance (0.0-1.0)
    pub relevance_score: f64,
}

/// Scans phase profiles for query terms.
#[derive(Debug, Clone)]
pub struct Retriever {
    knowledge: Arc<KnowledgeBase>,
}

impl Retriever {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// Search one phase's profile. An empty result means "no grounding found".
    pub fn search(&self, query: &str, phase: &PhaseLabel, limit: usize) -> Vec<KnowledgeSnippet> {
        let terms = tokenize(query);
        let profile = self.knowledge.profile_for(phase);
        let mut results = scan_profile(profile, phase.as_str(), &terms);
        let matched = results.len();
        rank(&mut results, limit);

        debug!(phase = %phase, matched, returned = results.len(), "knowledge search");
        results
    }

    /// Search every known phase, in cycle order, with the same ranking.
    pub fn search_all(&self, query: &str, limit: usize) -> Vec<KnowledgeSnippet> {
        let terms = tokenize(query);
        let mut results: Vec<KnowledgeSnippet> = self
            .knowledge
            .phases()
            .flat_map(|(phase, profile)| scan_profile(profile, phase.as_str(), &terms))
            .collect();
        let matched = results.len();
        rank(&mut results, limit);

        debug!(matched, returned = results.len(), "knowledge search across phases");
        results
    }
}

/// Lowercase whitespace-delimited terms.
pub fn tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

fn matches_any(text: &str, terms: &[String]) -> bool {
    let haystack = text.to_lowercase();
    terms.iter().any(|term| haystack.contains(term.as_str()))
}

fn scan_profile(profile: &PhaseProfile, phase: &str, terms: &[String]) -> Vec<KnowledgeSnippet> {
    if terms.is_empty() {
        return Vec::new();
    }

    let snippet = |content: &str, section: Section, key: &str, score: f64| KnowledgeSnippet {
        content: content.to_string(),
        section,
        key: key.to_string(),
        phase: phase.to_string(),
        relevance_score: score,
    };

    let mut results = Vec::new();
    for field in profile.fields() {
        match field.value {
            FieldValue::Text(text) => {
                if !text.is_empty() && matches_any(text, terms) {
                    results.push(snippet(text, field.section, field.key, TEXT_FIELD_SCORE));
                }
            }
            FieldValue::List(items) => {
                for item in items.iter().filter(|item| matches_any(item, terms)) {
                    results.push(snippet(item, field.section, field.key, LIST_ITEM_SCORE));
                }
            }
        }
    }
    results
}

fn rank(results: &mut Vec<KnowledgeSnippet>, limit: usize) {
    // sort_by is stable: equal scores keep scan order
    results.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(limit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;

    fn retriever() -> Retriever {
        Retriever::new(Arc::new(KnowledgeBase::builtin()))
    }

    #[test]
    fn test_tokenize_lowercases() {
        assert_eq!(tokenize("  Client   PRESENTATION "), ["client", "presentation"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_no_matching_terms_returns_empty() {
        let hits = retriever().search("xyzzy qwv", &Phase::Ovulation.into(), DEFAULT_LIMIT);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_empty_query_returns_empty() {
        let hits = retriever().search("", &Phase::Luteal.into(), DEFAULT_LIMIT);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_text_fields_rank_above_list_items() {
        // "estrogen" hits the hormones string; "presentation" hits list items
        let hits = retriever().search("presentation estrogen", &Phase::Ovulation.into(), 10);
        assert_eq!(hits[0].section, Section::PhaseInfo);
        assert_eq!(hits[0].key, "hormones");
        assert_eq!(hits[0].relevance_score, 0.9);
        assert!(hits[1..].iter().all(|h| h.relevance_score == 0.8));
    }

    #[test]
    fn test_ties_keep_scan_order() {
        let hits = retriever().search("presentation", &Phase::Ovulation.into(), 10);
        let contents: Vec<_> = hits.iter().map(|h| h.content.as_str()).collect();
        assert_eq!(contents, ["schedule presentations", "presentation"]);
        assert_eq!(hits[0].section, Section::Productivity);
        assert_eq!(hits[1].section, Section::TaskRecommendations);
        assert_eq!(hits[1].key, "good");
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let hits = retriever().search("CRAMP", &Phase::Menstruation.into(), DEFAULT_LIMIT);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "possible cramps");
        assert_eq!(hits[0].phase, "menstruation");
    }

    #[test]
    fn test_limit_truncates() {
        let hits = retriever().search("a e", &Phase::Follicular.into(), 2);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_unrecognized_phase_searches_unknown_profile() {
        let hits = retriever().search("feel", &PhaseLabel::parse("phase7"), DEFAULT_LIMIT);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].phase, "phase7");
    }

    #[test]
    fn test_search_all_spans_phases() {
        let hits = retriever().search_all("headaches cramps", 10);
        let phases: Vec<_> = hits.iter().map(|h| h.phase.as_str()).collect();
        assert_eq!(phases, ["menstruation", "luteal"]);
    }
}
