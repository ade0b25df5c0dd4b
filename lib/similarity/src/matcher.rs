//! Text matching strategies
//!
//! Free-text program and location names rarely equal vocabulary strings, so
//! the engine asks a [`TextMatcher`] whether a query value matches a dataset
//! value. All matchers are case-insensitive.
//!
//! The containment matchers follow plain substring semantics, so an empty (or
//! all-whitespace) query is contained in every value and matches all of them.
//! Equality, token overlap and the eligibility program matcher never match an
//! empty query.

use std::collections::HashSet;
use std::fmt::Debug;

/// Decides whether a query value matches a dataset value
pub trait TextMatcher: Debug + Send + Sync {
    fn matches(&self, query: &str, value: &str) -> bool;
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-insensitive equality
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl TextMatcher for ExactMatcher {
    fn matches(&self, query: &str, value: &str) -> bool {
        let query = normalize(query);
        !query.is_empty() && query == normalize(value)
    }
}

/// The dataset value contains the query
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainsMatcher;

impl TextMatcher for ContainsMatcher {
    fn matches(&self, query: &str, value: &str) -> bool {
        normalize(value).contains(&normalize(query))
    }
}

/// Either value contains the other, so "computer" activates
/// "Computer Engineering" and "Kathmandu Valley" activates "Kathmandu"
#[derive(Debug, Clone, Copy, Default)]
pub struct MutualContainmentMatcher;

impl TextMatcher for MutualContainmentMatcher {
    fn matches(&self, query: &str, value: &str) -> bool {
        let query = normalize(query);
        let value = normalize(value);
        value.contains(&query) || query.contains(&value)
    }
}

/// Strict program matcher used by the eligibility filter.
///
/// Matches on exact equality, on the query appearing as a whole
/// space-delimited word of the value, or on plain substring containment when
/// the query is at least `min_substring_len` characters long. Short acronyms
/// therefore cannot match inside longer ones: "BBS" does not match "MBBS".
#[derive(Debug, Clone, Copy)]
pub struct ProgramFilterMatcher {
    min_substring_len: usize,
}

impl Default for ProgramFilterMatcher {
    fn default() -> Self {
        Self { min_substring_len: 4 }
    }
}

impl ProgramFilterMatcher {
    pub fn new(min_substring_len: usize) -> Self {
        Self { min_substring_len }
    }
}

impl TextMatcher for ProgramFilterMatcher {
    fn matches(&self, query: &str, value: &str) -> bool {
        let query = normalize(query);
        if query.is_empty() {
            return false;
        }
        let value = value.to_lowercase();

        query == value
            || format!(" {} ", value).contains(&format!(" {} ", query))
            || (query.chars().count() >= self.min_substring_len && value.contains(&query))
    }
}

/// Jaccard similarity over lowercase whitespace tokens, matching at or above a threshold
#[derive(Debug, Clone, Copy)]
pub struct TokenOverlapMatcher {
    threshold: f64,
}

impl Default for TokenOverlapMatcher {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl TokenOverlapMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl TextMatcher for TokenOverlapMatcher {
    fn matches(&self, query: &str, value: &str) -> bool {
        !query.trim().is_empty() && jaccard_tokens(query, value) >= self.threshold
    }
}

/// Jaccard index of the whitespace token sets of two strings
pub fn jaccard_tokens(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();

    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    intersection as f64 / union as f64
}
