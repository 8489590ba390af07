//! Derive macros for sqlextract
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod record;

/// Derive `Record` for a struct.
///
/// # Example
///
/// ```ignore
/// use sqlextract::Record;
///
/// #[derive(Record)]
/// struct NewUser {
///     #[tag(query = "username")]
///     pub username: Option<String>,
///     #[tag(query = "email,omitempty", json = "mail")]
///     pub email: Option<String>,
///     #[tag(query = "-")]
///     pub password: Option<String>,
///     // Plain fields are described but never bound.
///     #[tag(query = "created_at")]
///     pub created_at: String,
/// }
/// ```
///
/// # Attributes
///
/// - `#[tag(key = "column[,options]")]` - Declare the column name of a field
///   under a tag key. Any number of keys may be given, across one or more
///   `#[tag]` attributes.
///
/// Fields without `#[tag]` are not described at all. Fields typed `Option<T>`
/// require `T: ToSql + Sync`; the `Option` must be spelled out (a type alias
/// for it is treated as a plain field).
#[proc_macro_derive(Record, attributes(tag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
