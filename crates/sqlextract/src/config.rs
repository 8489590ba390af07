//! Reusable query configuration.
//!
//! [`QueryConfig`] holds every build input except the record itself, so one
//! value can be loaded once and shared between calls and threads.

use serde::{Deserialize, Serialize};

use crate::render::{Placeholder, QueryKind};
use crate::skip::{SkipMatch, SkipSet};

/// Everything needed to build a query from a record, apart from the record.
///
/// Reusable across calls and threads, and loadable from any serde format:
///
/// ```json
/// { "kind": "create", "placeholder": "dollar", "tag": "query", "table": "users",
///   "returning": "id", "skips": ["password"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    pub kind: QueryKind,
    #[serde(default)]
    pub placeholder: Placeholder,
    /// Tag key whose values name the columns.
    pub tag: String,
    pub table: String,
    /// Column for a `returning` clause. `None` or empty means no clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returning: Option<String>,
    /// Column tokens to leave out.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skips: Vec<String>,
    #[serde(default)]
    pub skip_match: SkipMatch,
}

impl QueryConfig {
    /// Create a configuration with `?` placeholders, no returning clause and no skips.
    pub fn new(kind: QueryKind, tag: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            kind,
            placeholder: Placeholder::default(),
            tag: tag.into(),
            table: table.into(),
            returning: None,
            skips: Vec::new(),
            skip_match: SkipMatch::default(),
        }
    }

    /// Shorthand for an INSERT configuration.
    pub fn create(tag: impl Into<String>, table: impl Into<String>) -> Self {
        Self::new(QueryKind::Create, tag, table)
    }

    /// Shorthand for an UPDATE configuration.
    pub fn update(tag: impl Into<String>, table: impl Into<String>) -> Self {
        Self::new(QueryKind::Update, tag, table)
    }

    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Add a `returning "<column>"` clause.
    pub fn with_returning(mut self, column: impl Into<String>) -> Self {
        self.returning = Some(column.into());
        self
    }

    /// Add one skip token.
    pub fn with_skip(mut self, token: impl Into<String>) -> Self {
        self.skips.push(token.into());
        self
    }

    /// Add several skip tokens.
    pub fn with_skips<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skips.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn with_skip_match(mut self, skip_match: SkipMatch) -> Self {
        self.skip_match = skip_match;
        self
    }

    /// Returning column, empty when unset.
    pub fn returning_column(&self) -> &str {
        self.returning.as_deref().unwrap_or("")
    }

    pub fn skip_set(&self) -> SkipSet {
        SkipSet::new(self.skips.iter().cloned()).with_mode(self.skip_match)
    }
}
