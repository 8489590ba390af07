//! Field selection: which tagged fields become columns.
//!
//! A field is selected when all of these hold:
//!
//! 1. it is visible outside its defining module,
//! 2. it is an `Option<T>` field currently holding `Some` (plain fields are
//!    never bound, even when tagged),
//! 3. it carries a tag under the requested key,
//! 4. the tag's column name is not skipped (see [`SkipSet`]).

use crate::error::{ExtractError, ExtractResult};
use crate::record::{Field, Record, Shape, Slot, SqlValue};
use crate::skip::SkipSet;

/// Why a field was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exclusion {
    Private,
    Plain,
    Absent,
    Untagged,
    Skipped,
}

impl Exclusion {
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Exclusion::Private => "private",
            Exclusion::Plain => "plain",
            Exclusion::Absent => "absent",
            Exclusion::Untagged => "untagged",
            Exclusion::Skipped => "skipped",
        }
    }
}

/// Selected columns and their values, positionally aligned.
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    columns: Vec<&'static str>,
    values: Vec<SqlValue<'a>>,
}

impl<'a> Selection<'a> {
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn values(&self) -> &[SqlValue<'a>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn into_parts(self) -> (Vec<&'static str>, Vec<SqlValue<'a>>) {
        (self.columns, self.values)
    }

    fn push(&mut self, column: &'static str, value: SqlValue<'a>) {
        self.columns.push(column);
        self.values.push(value);
    }
}

pub(crate) fn classify<'a>(
    field: &Field<'a>,
    tag_key: &str,
    skips: &SkipSet,
) -> Result<(&'static str, SqlValue<'a>), Exclusion> {
    if !field.visible {
        return Err(Exclusion::Private);
    }
    let value = match field.slot {
        Slot::Present(v) => v,
        Slot::Plain => return Err(Exclusion::Plain),
        Slot::Absent => return Err(Exclusion::Absent),
    };
    let tag = field.tag(tag_key).ok_or(Exclusion::Untagged)?;
    let column = tag.column();
    if skips.is_skipped(column) {
        return Err(Exclusion::Skipped);
    }
    Ok((column, value))
}

/// Select the columns and values of `record` tagged under `tag_key`.
///
/// Fails with [`ExtractError::NotStruct`] when `record` is not composite.
pub fn select_fields<'a, R: Record + ?Sized>(
    record: &'a R,
    tag_key: &str,
    skips: &SkipSet,
) -> ExtractResult<Selection<'a>> {
    let fields = match record.shape() {
        Shape::Struct(fields) => fields,
        Shape::Scalar => return Err(ExtractError::not_struct(record.type_name())),
    };

    let mut selection = Selection::default();
    for field in &fields {
        match classify(field, tag_key, skips) {
            Ok((column, value)) => selection.push(column, value),
            Err(_reason) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    field = field.name,
                    reason = _reason.as_str(),
                    "field excluded"
                );
            }
        }
    }

    Ok(selection)
}
