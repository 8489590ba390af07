//! Record description: the field metadata a query is extracted from.
//!
//! Rust has no runtime reflection, so a type describes itself through
//! [`Record::shape`]. `#[derive(Record)]` generates this for structs with
//! named fields; scalar types answer [`Shape::Scalar`] so that handing one to
//! the builder is reported as [`crate::ExtractError::NotStruct`].

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use tokio_postgres::types::ToSql;

/// A borrowed bind value, compatible with tokio-postgres parameter slices.
pub type SqlValue<'a> = &'a (dyn ToSql + Sync);

/// One `key = "value"` annotation on a field.
///
/// The value has the form `column[,option...]`; only the part before the
/// first comma names the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub key: &'static str,
    pub value: &'static str,
}

impl Tag {
    pub const fn new(key: &'static str, value: &'static str) -> Self {
        Self { key, value }
    }

    /// Column name: the tag value up to the first comma.
    ///
    /// Options never span a line break, so in a multi-line value only a comma
    /// on the last line starts them: `"a,b\nc"` is all column name and
    /// `"a\nb,c"` names the column `"a\nb"`.
    pub fn column(&self) -> &'static str {
        self.split().0
    }

    /// Trailing options after the column name.
    pub fn options(&self) -> impl Iterator<Item = &'static str> {
        self.split().1.into_iter().flat_map(|rest| rest.split(','))
    }

    fn split(&self) -> (&'static str, Option<&'static str>) {
        let value = self.value;
        let last_line = value.rfind('\n').map_or(0, |i| i + 1);
        match value[last_line..].find(',') {
            Some(i) => (&value[..last_line + i], Some(&value[last_line + i + 1..])),
            None => (value, None),
        }
    }
}

/// Runtime state of a field's value.
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    /// A non-optional value. Never bound, even when tagged.
    Plain,
    /// An optional value that is currently `None`.
    Absent,
    /// An optional value that is currently `Some`.
    Present(SqlValue<'a>),
}

impl<'a> Slot<'a> {
    /// Slot for an `Option<T>` field.
    pub fn from_option<T: ToSql + Sync>(value: &'a Option<T>) -> Self {
        match value {
            Some(v) => Slot::Present(v),
            None => Slot::Absent,
        }
    }

    pub fn value(&self) -> Option<SqlValue<'a>> {
        match *self {
            Slot::Present(v) => Some(v),
            Slot::Plain | Slot::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Slot::Present(_))
    }
}

/// A tagged field of a record, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    /// Rust field name (without any `r#` prefix).
    pub name: &'static str,
    /// Whether the field is visible outside its defining module.
    pub visible: bool,
    pub tags: &'static [Tag],
    pub slot: Slot<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, visible: bool, tags: &'static [Tag], slot: Slot<'a>) -> Self {
        Self {
            name,
            visible,
            tags,
            slot,
        }
    }

    /// First tag declared under `key`.
    pub fn tag(&self, key: &str) -> Option<&'static Tag> {
        self.tags.iter().find(|t| t.key == key)
    }
}

/// What a record looks like to the field selector.
#[derive(Debug, Clone)]
pub enum Shape<'a> {
    /// A composite value with its tagged fields.
    Struct(Vec<Field<'a>>),
    /// A non-composite value (integer, string, ...).
    Scalar,
}

/// A value whose tagged fields can be turned into columns and bind values.
///
/// Usually derived:
///
/// ```ignore
/// use sqlextract::Record;
///
/// #[derive(Record)]
/// struct NewUser {
///     #[tag(query = "username")]
///     pub username: Option<String>,
///     #[tag(query = "email,omitempty")]
///     pub email: Option<String>,
/// }
/// ```
pub trait Record {
    fn shape(&self) -> Shape<'_>;

    /// Type name used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

macro_rules! forward_record {
    ($($ptr:ty),+ $(,)?) => {
        $(impl<R: Record + ?Sized> Record for $ptr {
            fn shape(&self) -> Shape<'_> {
                (**self).shape()
            }

            fn type_name(&self) -> &'static str {
                (**self).type_name()
            }
        })+
    };
}

forward_record!(&R, &mut R, Box<R>, Rc<R>, Arc<R>);

macro_rules! scalar_record {
    ($($t:ty),+ $(,)?) => {
        $(impl Record for $t {
            fn shape(&self) -> Shape<'_> {
                Shape::Scalar
            }
        })+
    };
}

scalar_record!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String,
);

impl Record for Cow<'_, str> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_column_and_options() {
        let tag = Tag::new("query", "column_1,param,omitempty");
        assert_eq!(tag.column(), "column_1");
        assert_eq!(tag.options().collect::<Vec<_>>(), vec!["param", "omitempty"]);

        let tag = Tag::new("query", "column_2");
        assert_eq!(tag.column(), "column_2");
        assert_eq!(tag.options().count(), 0);

        let tag = Tag::new("query", ",param");
        assert_eq!(tag.column(), "");
        assert_eq!(tag.options().collect::<Vec<_>>(), vec!["param"]);

        let tag = Tag::new("query", "column_3,");
        assert_eq!(tag.column(), "column_3");
        assert_eq!(tag.options().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_tag_column_across_lines() {
        let tag = Tag::new("query", "a,b\nc");
        assert_eq!(tag.column(), "a,b\nc");
        assert_eq!(tag.options().count(), 0);

        let tag = Tag::new("query", "a\nb,c");
        assert_eq!(tag.column(), "a\nb");
        assert_eq!(tag.options().collect::<Vec<_>>(), vec!["c"]);

        let tag = Tag::new("query", "a,b\nc,d,e");
        assert_eq!(tag.column(), "a,b\nc");
        assert_eq!(tag.options().collect::<Vec<_>>(), vec!["d", "e"]);

        let tag = Tag::new("query", "a,\n");
        assert_eq!(tag.column(), "a,\n");
    }

    #[test]
    fn test_slot_from_option() {
        let some = Some(7_i32);
        let none: Option<i32> = None;

        assert!(Slot::from_option(&some).is_present());
        assert!(Slot::from_option(&some).value().is_some());
        assert!(!Slot::from_option(&none).is_present());
        assert!(Slot::Plain.value().is_none());
    }

    #[test]
    fn test_field_tag_first_match_wins() {
        const TAGS: &[Tag] = &[
            Tag::new("db", "first"),
            Tag::new("query", "q"),
            Tag::new("db", "second"),
        ];
        let field = Field::new("f", true, TAGS, Slot::Plain);

        assert_eq!(field.tag("db").map(Tag::column), Some("first"));
        assert_eq!(field.tag("query").map(Tag::column), Some("q"));
        assert!(field.tag("json").is_none());
    }

    #[test]
    fn test_scalars_are_not_structs() {
        assert!(matches!(42_i32.shape(), Shape::Scalar));
        assert!(matches!("x".shape(), Shape::Scalar));
        assert!(matches!(String::from("x").shape(), Shape::Scalar));
        assert!(matches!((&&1.5_f64).shape(), Shape::Scalar));
        assert_eq!((&42_i32).type_name(), "i32");
    }
}
