//! Query extraction: field selection followed by template rendering.

use crate::config::QueryConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::record::{Record, SqlValue};
use crate::render::{Placeholder, QueryKind, render};
use crate::select::select_fields;
use crate::skip::SkipSet;

/// A rendered statement and the values bound to its placeholders.
///
/// `values()` can be passed straight to `tokio_postgres::Client::execute`.
#[derive(Debug, Clone)]
pub struct QueryValues<'a> {
    sql: String,
    columns: Vec<&'static str>,
    values: Vec<SqlValue<'a>>,
}

impl<'a> QueryValues<'a> {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Selected column names, in placeholder order.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Bind values, in placeholder order.
    pub fn values(&self) -> &[SqlValue<'a>] {
        &self.values
    }

    /// Number of bound values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<SqlValue<'a>>) {
        (self.sql, self.values)
    }
}

impl QueryConfig {
    /// Build the query for `record`.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::NotStruct`] when `record` is not composite.
    /// - [`ExtractError::BaseQuery`] when no column was selected; the
    ///   degenerate SQL is carried in the error.
    pub fn extract<'a, R: Record + ?Sized>(&self, record: &'a R) -> ExtractResult<QueryValues<'a>> {
        build(
            record,
            self.kind,
            self.placeholder,
            &self.tag,
            &self.table,
            self.returning_column(),
            &self.skip_set(),
        )
    }
}

/// Build an INSERT or UPDATE from the fields of `record` tagged under `tag_key`.
///
/// `returning` adds a `returning "<col>"` clause unless empty. `skips` are
/// matched as described on [`SkipSet`].
///
/// ```ignore
/// let qv = sqlextract::query_and_values(
///     &user,
///     QueryKind::Create,
///     Placeholder::Dollar,
///     "query",
///     "users",
///     "id",
///     &["password"],
/// )?;
/// client.query_one(qv.sql(), qv.values()).await?;
/// ```
///
/// # Errors
///
/// See [`QueryConfig::extract`].
pub fn query_and_values<'a, R: Record + ?Sized>(
    record: &'a R,
    kind: QueryKind,
    placeholder: Placeholder,
    tag_key: &str,
    table: &str,
    returning: &str,
    skips: &[&str],
) -> ExtractResult<QueryValues<'a>> {
    build(
        record,
        kind,
        placeholder,
        tag_key,
        table,
        returning,
        &SkipSet::new(skips.iter().copied()),
    )
}

fn build<'a, R: Record + ?Sized>(
    record: &'a R,
    kind: QueryKind,
    placeholder: Placeholder,
    tag_key: &str,
    table: &str,
    returning: &str,
    skips: &SkipSet,
) -> ExtractResult<QueryValues<'a>> {
    let (columns, values) = select_fields(record, tag_key, skips)?.into_parts();
    let rendered = render(kind, placeholder, table, returning, columns.as_slice());

    #[cfg(feature = "tracing")]
    tracing::debug!(
        sql = %rendered.sql,
        columns = columns.len(),
        is_base = rendered.is_base,
        "rendered query"
    );

    if rendered.is_base {
        return Err(ExtractError::base_query(rendered.sql));
    }

    Ok(QueryValues {
        sql: rendered.sql,
        columns,
        values,
    })
}
