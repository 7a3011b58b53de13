//! Search strategies for cached file names.
//!
//! This module provides abstractions for matching a song query against the
//! stems of cached music and lyrics files.

use std::collections::HashSet;

use crate::constants::search::{MIN_SKIM_SCORE, WORD_MATCH_THRESHOLD};

/// A candidate name with a relevance score in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    /// The matched name.
    pub name: &'a str,
    /// Relevance, 1.0 being an exact match.
    pub score: f64,
}

/// Trait for name search strategies.
///
/// Different strategies can be combined to provide comprehensive
/// matching with fallbacks.
pub trait SearchStrategy: Send + Sync {
    /// Find matching names for a query string.
    ///
    /// # Arguments
    /// * `query` - The search query (typically a song title)
    /// * `names` - The available names to search
    /// * `limit` - Maximum number of results to return
    ///
    /// # Returns
    /// Matches sorted by descending score.
    fn find_matches<'a>(&self, query: &str, names: &'a [String], limit: usize) -> Vec<Match<'a>>;

    /// Get the name of this search strategy (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Case-insensitive title matching: exact, then substring, then shared words.
///
/// * exact → 1.0
/// * query contained in name → `len(query) / len(name)`
/// * otherwise the Jaccard index of the word sets, kept when `>= threshold`
pub struct TitleSearch {
    /// Minimum word-overlap score.
    pub threshold: f64,
}

impl Default for TitleSearch {
    fn default() -> Self {
        Self { threshold: WORD_MATCH_THRESHOLD }
    }
}

impl TitleSearch {
    /// Score one candidate, `None` when it does not qualify.
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self, query: &str, name: &str) -> Option<f64> {
        let query = query.to_lowercase();
        let name = name.to_lowercase();

        if query == name {
            return Some(1.0);
        }
        if !query.is_empty() && name.contains(&query) {
            return Some(query.chars().count() as f64 / name.chars().count() as f64);
        }

        let query_words: HashSet<&str> = query.split_whitespace().collect();
        let name_words: HashSet<&str> = name.split_whitespace().collect();
        let shared = query_words.intersection(&name_words).count();
        if shared == 0 {
            return None;
        }
        let score = shared as f64 / query_words.union(&name_words).count() as f64;
        (score >= self.threshold).then_some(score)
    }
}

impl SearchStrategy for TitleSearch {
    fn find_matches<'a>(&self, query: &str, names: &'a [String], limit: usize) -> Vec<Match<'a>> {
        let mut scored: Vec<_> = names
            .iter()
            .filter_map(|name| self.score(query, name).map(|score| Match { name, score }))
            .collect();

        // Stable: equal scores keep directory order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        scored
    }

    fn name(&self) -> &'static str {
        "TitleSearch"
    }
}

/// Fuzzy string matching search strategy.
pub struct FuzzySearch {
    /// Minimum score threshold (raw skim score).
    pub min_score: i64,
}

impl Default for FuzzySearch {
    fn default() -> Self {
        Self { min_score: MIN_SKIM_SCORE }
    }
}

impl SearchStrategy for FuzzySearch {
    #[allow(clippy::cast_precision_loss)]
    fn find_matches<'a>(&self, query: &str, names: &'a [String], limit: usize) -> Vec<Match<'a>> {
        use fuzzy_matcher::skim::SkimMatcherV2;
        use fuzzy_matcher::FuzzyMatcher;

        let matcher = SkimMatcherV2::default();
        let query_lower = query.to_lowercase();
        // A query matched against itself is the best score it can reach
        let Some(perfect) = matcher.fuzzy_match(&query_lower, &query_lower).filter(|s| *s > 0) else {
            return Vec::new();
        };

        let mut scored: Vec<_> = names
            .iter()
            .filter_map(|name| {
                let score = matcher
                    .fuzzy_match(&name.to_lowercase(), &query_lower)
                    .unwrap_or(0);
                (score >= self.min_score).then(|| Match {
                    name,
                    score: (score as f64 / perfect as f64).min(1.0),
                })
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        scored
    }

    fn name(&self) -> &'static str {
        "FuzzySearch"
    }
}

/// Composite search that tries multiple strategies.
pub struct CompositeSearch {
    strategies: Vec<Box<dyn SearchStrategy>>,
}

impl CompositeSearch {
    /// Create a new composite search with the given strategies.
    pub fn new(strategies: Vec<Box<dyn SearchStrategy>>) -> Self {
        Self { strategies }
    }

    /// Create with default strategies (title + fuzzy).
    pub fn with_defaults() -> Self {
        Self::new(vec![
            Box::new(TitleSearch::default()),
            Box::new(FuzzySearch::default()),
        ])
    }
}

impl SearchStrategy for CompositeSearch {
    fn find_matches<'a>(&self, query: &str, names: &'a [String], limit: usize) -> Vec<Match<'a>> {
        let mut results = Vec::new();
        let mut seen = HashSet::new();

        for strategy in &self.strategies {
            let found = strategy.find_matches(query, names, limit);
            tracing::debug!("{} matched {} names for {query:?}", strategy.name(), found.len());
            for m in found {
                if seen.insert(m.name) {
                    results.push(m);
                    if results.len() >= limit {
                        return results;
                    }
                }
            }
        }

        results
    }

    fn name(&self) -> &'static str {
        "CompositeSearch"
    }
}
