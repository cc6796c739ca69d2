// ABOUTME: Tiered ingredient-name matching strategy shared by every name-indexed backend
// ABOUTME: Plans exact, substring, and word queries and applies them to in-memory keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ingredient name matching
//!
//! A free-text name is resolved by trying three tiers in order, stopping at the
//! first tier that produces a hit:
//!
//! 1. [`MatchTier::Exact`]: case-insensitive full-string equality
//! 2. [`MatchTier::Substring`]: the whole input as a case-insensitive fragment
//! 3. [`MatchTier::Word`]: each whitespace-separated word of at least
//!    [`MIN_WORD_LEN`] characters as a fragment, in input order
//!
//! Within a tier the backend's first hit wins. [`query_plan`] produces the
//! ordered list of queries; backends only decide how a single query is
//! evaluated (in memory via [`NameQuery::matches_key`], or as SQL).

use serde::{Deserialize, Serialize};

/// Words shorter than this are ignored by the word tier
pub const MIN_WORD_LEN: usize = 3;

/// Matching tier, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    /// Full-string equality
    Exact,
    /// Whole input as a fragment
    Substring,
    /// One word of the input as a fragment
    Word,
}

/// One query of a tiered lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    /// Tier this query belongs to
    pub tier: MatchTier,
    /// Lowercased, trimmed fragment to look for
    pub fragment: String,
}

impl NameQuery {
    fn new(tier: MatchTier, fragment: impl Into<String>) -> Self {
        Self {
            tier,
            fragment: fragment.into(),
        }
    }

    /// Evaluate this query against a lowercased in-memory key
    ///
    /// The substring tier accepts containment in either direction, so both
    /// "basmati rice grains" and "ric" hit the key "rice".
    #[must_use]
    pub fn matches_key(&self, key: &str) -> bool {
        match self.tier {
            MatchTier::Exact => key == self.fragment,
            MatchTier::Substring => {
                key.contains(self.fragment.as_str()) || self.fragment.contains(key)
            }
            MatchTier::Word => key.contains(self.fragment.as_str()),
        }
    }
}

/// Lowercase and trim a name for comparison
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Build the ordered tier queries for `name`
///
/// Blank input yields an empty plan.
#[must_use]
pub fn query_plan(name: &str) -> Vec<NameQuery> {
    let normalized = normalize_name(name);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut plan = vec![
        NameQuery::new(MatchTier::Exact, normalized.clone()),
        NameQuery::new(MatchTier::Substring, normalized.clone()),
    ];

    plan.extend(
        normalized
            .split_whitespace()
            .filter(|word| word.chars().count() >= MIN_WORD_LEN)
            .map(|word| NameQuery::new(MatchTier::Word, word)),
    );

    plan
}

/// Run a tiered lookup over in-memory `(key, value)` entries
///
/// Keys must already be lowercased. Entries are scanned in iteration order for
/// every query, so declaration order decides ties.
pub fn find_in_entries<'a, V, I>(name: &str, entries: I) -> Option<(MatchTier, &'a str, &'a V)>
where
    I: IntoIterator<Item = (&'a str, &'a V)> + Clone,
    V: 'a,
{
    query_plan(name).into_iter().find_map(|query| {
        entries
            .clone()
            .into_iter()
            .find(|(key, _)| query.matches_key(key))
            .map(|(key, value)| (query.tier, key, value))
    })
}
