//! Fuzzy ranking of options against a free-text query.
//!
//! Two rankers are provided:
//! - [`SubsequenceRanker`]: subsequence matching through `nucleo-matcher`.
//!   Options whose keys do not contain the query characters in order are
//!   dropped. This is the default.
//! - [`SimilarityRanker`]: Jaro-Winkler similarity through `rapidfuzz`, with a
//!   minimum score below which options are dropped.
//!
//! Both score the `title` key first and then `value`, keep the best key score
//! per option, and order by descending score. Ties keep the input order.

use formkit_model::SelectOption;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher as NucleoMatcher, Utf32Str};
use rapidfuzz::distance::jaro_winkler;

/// Option fields a query is matched against, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Title,
    Value,
}

impl SearchKey {
    pub const DEFAULT: [Self; 2] = [Self::Title, Self::Value];

    pub fn field<'a>(&self, option: &'a SelectOption) -> &'a str {
        match self {
            Self::Title => &option.title,
            Self::Value => &option.value,
        }
    }
}

/// Orders candidates for a non-empty query.
///
/// Implementations must be pure: the same query and candidates always give
/// the same order. Candidates that do not match are left out.
pub trait Ranker {
    fn rank<'a>(&self, query: &str, candidates: Vec<&'a SelectOption>) -> Vec<&'a SelectOption>;
}

/// Rank `candidates` for `query`.
///
/// An empty query skips the ranker and returns the candidates unchanged.
pub fn rank<'a>(
    ranker: &dyn Ranker,
    query: &str,
    candidates: Vec<&'a SelectOption>,
) -> Vec<&'a SelectOption> {
    if query.is_empty() {
        return candidates;
    }
    ranker.rank(query, candidates)
}

/// Keep scored candidates and sort them best first.
///
/// `score` is called once per key; the best key score wins.
fn order_by_score<'a, F>(candidates: Vec<&'a SelectOption>, mut score: F) -> Vec<&'a SelectOption>
where
    F: FnMut(&str) -> Option<u32>,
{
    let mut scored: Vec<(u32, &SelectOption)> = candidates
        .into_iter()
        .filter_map(|option| {
            SearchKey::DEFAULT
                .iter()
                .filter_map(|key| score(key.field(option)))
                .max()
                .map(|best| (best, option))
        })
        .collect();
    // sort_by is stable, so equal scores keep candidate order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, option)| option).collect()
}

/// Subsequence ranker backed by `nucleo-matcher`.
///
/// Matching is case-insensitive. Whitespace in the query separates atoms that
/// must all match.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsequenceRanker;

impl Ranker for SubsequenceRanker {
    fn rank<'a>(&self, query: &str, candidates: Vec<&'a SelectOption>) -> Vec<&'a SelectOption> {
        let mut matcher = NucleoMatcher::new(Config::DEFAULT);
        let pattern = Pattern::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let mut buf = Vec::new();
        order_by_score(candidates, |haystack| {
            buf.clear();
            pattern.score(Utf32Str::new(haystack, &mut buf), &mut matcher)
        })
    }
}

/// Default minimum similarity for [`SimilarityRanker`].
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.7;

/// Similarity ranker backed by `rapidfuzz` Jaro-Winkler.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker {
    min_score: f64,
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIMILARITY)
    }
}

impl SimilarityRanker {
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }

    fn similarity(query: &str, key: &str) -> f64 {
        jaro_winkler::similarity(normalize(query).chars(), normalize(key).chars())
    }
}

impl Ranker for SimilarityRanker {
    fn rank<'a>(&self, query: &str, candidates: Vec<&'a SelectOption>) -> Vec<&'a SelectOption> {
        order_by_score(candidates, |key| {
            let score = Self::similarity(query, key);
            // scaled so scores order as integers
            (score >= self.min_score).then(|| (score * 1_000_000.0).round() as u32)
        })
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<SelectOption> {
        vec![
            SelectOption::new("Red", "r", "R"),
            SelectOption::new("Blue", "b", "B"),
        ]
    }

    fn titles(options: &[&SelectOption]) -> Vec<String> {
        options.iter().map(|o| o.title.clone()).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let options = colors();
        let ranked = rank(&SubsequenceRanker, "", options.iter().collect());
        assert_eq!(titles(&ranked), vec!["Red", "Blue"]);
    }

    #[test]
    fn subsequence_drops_non_matches() {
        let options = colors();
        let ranked = rank(&SubsequenceRanker, "re", options.iter().collect());
        assert_eq!(titles(&ranked), vec!["Red"]);

        let ranked = rank(&SubsequenceRanker, "zz", options.iter().collect());
        assert!(ranked.is_empty());
    }

    #[test]
    fn subsequence_is_case_insensitive() {
        let options = colors();
        let ranked = rank(&SubsequenceRanker, "BLU", options.iter().collect());
        assert_eq!(titles(&ranked), vec!["Blue"]);
    }

    #[test]
    fn subsequence_matches_value_key() {
        let options = vec![
            SelectOption::new("Apple", "fruit-1", "A"),
            SelectOption::new("Carrot", "veg-1", "C"),
        ];
        let ranked = rank(&SubsequenceRanker, "veg", options.iter().collect());
        assert_eq!(titles(&ranked), vec!["Carrot"]);
    }

    #[test]
    fn subsequence_prefers_contiguous_match() {
        let options = vec![
            SelectOption::new("Grape Nectarine", "gn", "G"),
            SelectOption::new("Green", "green", "G"),
        ];
        let ranked = rank(&SubsequenceRanker, "green", options.iter().collect());
        assert_eq!(ranked[0].title, "Green");
    }

    #[test]
    fn similarity_threshold_filters() {
        let options = colors();
        let ranker = SimilarityRanker::default();
        let ranked = rank(&ranker, "red", options.iter().collect());
        assert_eq!(titles(&ranked), vec!["Red"]);

        let ranked = rank(&ranker, "zz", options.iter().collect());
        assert!(ranked.is_empty());
    }

    #[test]
    fn similarity_orders_best_first() {
        let options = vec![
            SelectOption::new("Bluish", "bluish", "B"),
            SelectOption::new("Blue", "blue", "B"),
        ];
        let ranked = rank(&SimilarityRanker::new(0.5), "blue", options.iter().collect());
        assert_eq!(titles(&ranked), vec!["Blue", "Bluish"]);
    }
}
