//! Error types for sqlextract

use thiserror::Error;

/// Result type alias for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors returned while building a query from a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The record is not a composite (struct-like) value.
    ///
    /// No query and no values are produced.
    #[error("object given is not struct: {type_name}")]
    NotStruct { type_name: &'static str },

    /// No column was selected, so the rendered query is the bare template.
    ///
    /// This is advisory: the degenerate query is carried along so callers can
    /// still inspect or use it. The values are empty by construction.
    #[error("query unchanged from base: {sql}")]
    BaseQuery { sql: String },
}

impl ExtractError {
    /// Create a not-struct error for the given type name
    pub fn not_struct(type_name: &'static str) -> Self {
        Self::NotStruct { type_name }
    }

    /// Create a base-query error carrying the rendered SQL
    pub fn base_query(sql: impl Into<String>) -> Self {
        Self::BaseQuery { sql: sql.into() }
    }

    /// Check if this is a not-struct error
    pub fn is_not_struct(&self) -> bool {
        matches!(self, Self::NotStruct { .. })
    }

    /// Check if this is a base-query error
    pub fn is_base_query(&self) -> bool {
        matches!(self, Self::BaseQuery { .. })
    }

    /// The degenerate SQL carried by [`ExtractError::BaseQuery`].
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::BaseQuery { sql } => Some(sql),
            Self::NotStruct { .. } => None,
        }
    }

    /// Consume the error, keeping the degenerate SQL if there is one.
    pub fn into_sql(self) -> Option<String> {
        match self {
            Self::BaseQuery { sql } => Some(sql),
            Self::NotStruct { .. } => None,
        }
    }
}
