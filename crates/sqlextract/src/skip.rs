//! Column skipping.
//!
//! By default a column name is used as a regular expression and searched in
//! the skip tokens joined by a single space, so `column_1` is also skipped by
//! `column_10`. [`SkipMatch::Exact`] switches to plain token membership.
//!
//! Column names come from static tags, so each pattern is compiled once per
//! process and shared by every [`SkipSet`].

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Column name that is never selected.
pub const IGNORED_COLUMN: &str = "-";

/// How a column name is compared against the skip tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipMatch {
    /// Column name is a regex searched in the space-joined tokens.
    #[default]
    Pattern,
    /// Column name must equal one of the tokens.
    Exact,
}

/// Tokens naming columns to leave out of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    tokens: Vec<String>,
    joined: String,
    mode: SkipMatch,
}

impl SkipSet {
    /// Create a skip set with [`SkipMatch::Pattern`] semantics.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let joined = tokens.join(" ");
        Self {
            tokens,
            joined,
            mode: SkipMatch::Pattern,
        }
    }

    /// Create a skip set with [`SkipMatch::Exact`] semantics.
    pub fn exact<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(tokens).with_mode(SkipMatch::Exact)
    }

    pub fn with_mode(mut self, mode: SkipMatch) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> SkipMatch {
        self.mode
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether `column` must be left out of the query.
    pub fn is_skipped(&self, column: &'static str) -> bool {
        if column == IGNORED_COLUMN {
            return true;
        }

        match self.mode {
            SkipMatch::Pattern => match column_pattern(column) {
                Some(re) => re.is_match(&self.joined),
                None => self.joined.contains(column),
            },
            SkipMatch::Exact => self.tokens.iter().any(|t| t == column),
        }
    }
}

/// Compiled regex for `column`, or `None` when it is not a valid pattern.
fn column_pattern(column: &'static str) -> Option<Regex> {
    static CACHE: OnceLock<Mutex<HashMap<&'static str, Option<Regex>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(compiled) = cache.get(column) {
        return compiled.clone();
    }

    let compiled = match Regex::new(column) {
        Ok(re) => Some(re),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                column,
                error = %_err,
                "column is not a valid skip pattern; matching it literally"
            );
            None
        }
    };
    cache.insert(column, compiled.clone());
    compiled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_skips_only_ignored() {
        let skips = SkipSet::default();
        assert!(!skips.is_skipped("column_1"));
        assert!(skips.is_skipped("-"));
    }

    #[test]
    fn test_exact_token_is_skipped() {
        let skips = SkipSet::new(["column_4", "column_7"]);
        assert!(skips.is_skipped("column_4"));
        assert!(skips.is_skipped("column_7"));
        assert!(!skips.is_skipped("column_1"));
    }

    #[test]
    fn test_pattern_matches_inside_tokens() {
        // `column_1` is found inside `column_10`.
        let skips = SkipSet::new(["column_10"]);
        assert!(skips.is_skipped("column_1"));
        assert!(!skips.is_skipped("column_2"));

        // `.` matches any character.
        let skips = SkipSet::new(["aXb"]);
        assert!(skips.is_skipped("a.b"));

        // Patterns can span the joining space.
        let skips = SkipSet::new(["first", "second"]);
        assert!(skips.is_skipped("t s"));
    }

    #[test]
    fn test_empty_column_is_always_skipped_by_pattern() {
        assert!(SkipSet::default().is_skipped(""));
        assert!(!SkipSet::exact(Vec::<String>::new()).is_skipped(""));
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_literal() {
        let skips = SkipSet::new(["price(usd"]);
        assert!(skips.is_skipped("price(usd"));
        assert!(!SkipSet::new(["price"]).is_skipped("price(usd"));
    }

    #[test]
    fn test_compiled_pattern_is_reused() {
        assert!(column_pattern("reused_[0-9]+").is_some());
        assert!(column_pattern("reused_(").is_none());

        // Later sets see the cached entries with their own tokens.
        for _ in 0..3 {
            assert!(SkipSet::new(["reused_42"]).is_skipped("reused_[0-9]+"));
            assert!(!SkipSet::new(["reused_x"]).is_skipped("reused_[0-9]+"));
            assert!(SkipSet::new(["a reused_(b"]).is_skipped("reused_("));
            assert!(!SkipSet::new(["reused_"]).is_skipped("reused_("));
        }
    }

    #[test]
    fn test_exact_mode() {
        let skips = SkipSet::exact(["column_10", "aXb"]);
        assert!(!skips.is_skipped("column_1"));
        assert!(!skips.is_skipped("a.b"));
        assert!(skips.is_skipped("column_10"));
        assert!(skips.is_skipped("-"));
        assert_eq!(skips.mode(), SkipMatch::Exact);
        assert_eq!(skips.tokens(), ["column_10", "aXb"]);
    }
}
