//! INSERT / UPDATE template rendering.
//!
//! Identifiers are wrapped in double quotes verbatim (no escaping).

use std::borrow::Cow;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Statement to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// `insert into "t" (...) values (...)`
    Create,
    /// `update "t" set (...) = (...)`
    Update,
}

/// Bind parameter marker style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// `?, ?, ?`
    #[default]
    QuestionMark,
    /// `$1, $2, $3`
    Dollar,
}

impl Placeholder {
    /// Write the marker for the 1-based `position`.
    fn write_to(self, out: &mut String, position: usize) {
        match self {
            Placeholder::QuestionMark => out.push('?'),
            Placeholder::Dollar => {
                let _ = write!(out, "${position}");
            }
        }
    }
}

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub sql: String,
    /// No column was substituted: `sql` is the bare template.
    pub is_base: bool,
}

/// Statement skeleton with two empty slots (columns, placeholders).
struct Template<'a> {
    kind: QueryKind,
    table: Cow<'a, str>,
    returning: Cow<'a, str>,
    parens: bool,
}

impl<'a> Template<'a> {
    fn new(kind: QueryKind, table: &'a str, returning: &'a str, column_count: usize) -> Self {
        // A single-column (or empty) UPDATE drops every parenthesis of the
        // skeleton, names included.
        let parens = !(kind == QueryKind::Update && column_count <= 1);
        let (table, returning) = if parens {
            (Cow::Borrowed(table), Cow::Borrowed(returning))
        } else {
            (strip_parens(table), strip_parens(returning))
        };

        Self {
            kind,
            table,
            returning,
            parens,
        }
    }

    fn fill(&self, columns: &str, placeholders: &str) -> String {
        let (open, close) = if self.parens { ("(", ")") } else { ("", "") };

        let mut sql = match self.kind {
            QueryKind::Create => format!(
                "insert into \"{}\" {open}{columns}{close} values {open}{placeholders}{close}",
                self.table
            ),
            QueryKind::Update => format!(
                "update \"{}\" set {open}{columns}{close} = {open}{placeholders}{close}",
                self.table
            ),
        };

        if !self.returning.is_empty() {
            let _ = write!(sql, " returning \"{}\"", self.returning);
        }
        sql
    }

    /// The skeleton with both slots left empty.
    fn base(&self) -> String {
        self.fill("", "")
    }
}

fn strip_parens(s: &str) -> Cow<'_, str> {
    if s.contains(['(', ')']) {
        Cow::Owned(s.chars().filter(|c| !matches!(c, '(' | ')')).collect())
    } else {
        Cow::Borrowed(s)
    }
}

/// Render an INSERT or UPDATE for `columns`.
///
/// `returning` adds a `returning "<col>"` clause unless empty. Dollar
/// placeholders are numbered over `columns` only.
pub fn render<S: AsRef<str>>(
    kind: QueryKind,
    placeholder: Placeholder,
    table: &str,
    returning: &str,
    columns: &[S],
) -> Rendered {
    let template = Template::new(kind, table, returning, columns.len());

    let mut column_list = String::new();
    let mut placeholder_list = String::new();
    for (index, column) in columns.iter().enumerate() {
        if index > 0 {
            column_list.push_str(", ");
            placeholder_list.push_str(", ");
        }
        column_list.push('"');
        column_list.push_str(column.as_ref());
        column_list.push('"');
        placeholder.write_to(&mut placeholder_list, index + 1);
    }

    let sql = template.fill(&column_list, &placeholder_list);
    let is_base = columns.is_empty();
    debug_assert_eq!(is_base, sql == template.base());

    Rendered { sql, is_base }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn test_create_question_mark() {
        let r = render(
            QueryKind::Create,
            Placeholder::QuestionMark,
            "table",
            "",
            &["column_1", "column_2", "column_5"],
        );
        assert_eq!(
            r.sql,
            r#"insert into "table" ("column_1", "column_2", "column_5") values (?, ?, ?)"#
        );
        assert!(!r.is_base);
    }

    #[test]
    fn test_create_dollar() {
        let r = render(
            QueryKind::Create,
            Placeholder::Dollar,
            "table",
            "",
            &["column_1", "column_2"],
        );
        assert_eq!(
            r.sql,
            r#"insert into "table" ("column_1", "column_2") values ($1, $2)"#
        );
    }

    #[test]
    fn test_update_many_columns_keeps_parens() {
        let r = render(
            QueryKind::Update,
            Placeholder::Dollar,
            "table",
            "",
            &["a", "b", "c"],
        );
        assert_eq!(r.sql, r#"update "table" set ("a", "b", "c") = ($1, $2, $3)"#);
    }

    #[test]
    fn test_update_single_column_drops_parens() {
        let r = render(
            QueryKind::Update,
            Placeholder::QuestionMark,
            "t",
            "",
            &["c"],
        );
        assert_eq!(r.sql, r#"update "t" set "c" = ?"#);
        assert!(!r.is_base);
    }

    #[test]
    fn test_update_empty_is_degenerate() {
        let r = render(QueryKind::Update, Placeholder::QuestionMark, "t", "", NONE);
        assert_eq!(r.sql, r#"update "t" set  = "#);
        assert!(r.is_base);
    }

    #[test]
    fn test_create_empty_is_base() {
        let r = render(QueryKind::Create, Placeholder::Dollar, "t", "", NONE);
        assert_eq!(r.sql, r#"insert into "t" () values ()"#);
        assert!(r.is_base);
    }

    #[test]
    fn test_returning() {
        let r = render(
            QueryKind::Create,
            Placeholder::Dollar,
            "table",
            "column_x",
            &["column_1"],
        );
        assert_eq!(
            r.sql,
            r#"insert into "table" ("column_1") values ($1) returning "column_x""#
        );

        // The returning clause is part of the skeleton.
        let r = render(QueryKind::Create, Placeholder::Dollar, "table", "column_x", NONE);
        assert_eq!(r.sql, r#"insert into "table" () values () returning "column_x""#);
        assert!(r.is_base);
    }

    #[test]
    fn test_update_strip_reaches_names_but_not_columns() {
        let r = render(
            QueryKind::Update,
            Placeholder::QuestionMark,
            "t(1)",
            "id(x)",
            &["c(2)"],
        );
        assert_eq!(r.sql, r#"update "t1" set "c(2)" = ? returning "idx""#);

        let r = render(
            QueryKind::Update,
            Placeholder::QuestionMark,
            "t(1)",
            "",
            &["a", "b"],
        );
        assert_eq!(r.sql, r#"update "t(1)" set ("a", "b") = (?, ?)"#);
    }

    #[test]
    fn test_placeholder_count_matches_columns() {
        for n in 0..6 {
            let columns: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
            for kind in [QueryKind::Create, QueryKind::Update] {
                let q = render(kind, Placeholder::QuestionMark, "t", "", columns.as_slice());
                assert_eq!(q.sql.matches('?').count(), n);

                let d = render(kind, Placeholder::Dollar, "t", "", columns.as_slice());
                assert_eq!(d.sql.matches('$').count(), n);
                if n > 0 {
                    assert!(d.sql.contains(&format!("${n}")));
                }
            }
        }
    }
}
