//! # sqlextract
//!
//! Build `INSERT` / `UPDATE` statements and their bind values from the tagged
//! fields of a struct.
//!
//! ## Features
//!
//! - **Tag driven**: `#[tag(key = "column[,options]")]` names a field's column
//!   under any number of tag keys
//! - **Optional fields only**: only `Option<T>` fields holding `Some` are bound;
//!   plain fields are never part of a statement
//! - **Two placeholder styles**: `?` and `$1, $2, ...`
//! - **Driver friendly**: values are `&(dyn ToSql + Sync)` borrowed from the record
//!
//! ## Example
//!
//! ```ignore
//! use sqlextract::{Placeholder, QueryConfig, Record};
//!
//! #[derive(Record)]
//! struct UserPatch {
//!     #[tag(query = "username")]
//!     pub username: Option<String>,
//!     #[tag(query = "email,omitempty")]
//!     pub email: Option<String>,
//! }
//!
//! let patch = UserPatch { username: Some("alice".into()), email: None };
//! let qv = QueryConfig::update("query", "users")
//!     .with_placeholder(Placeholder::Dollar)
//!     .extract(&patch)?;
//!
//! assert_eq!(qv.sql(), r#"update "users" set "username" = $1"#);
//! client.execute(qv.sql(), qv.values()).await?;
//! ```
//!
//! Statements are only rendered here; running them is up to the caller.

pub mod config;
pub mod error;
pub mod extract;
pub mod prelude;
pub mod record;
pub mod render;
pub mod select;
pub mod skip;

pub use config::QueryConfig;
pub use error::{ExtractError, ExtractResult};
pub use extract::{QueryValues, query_and_values};
pub use record::{Field, Record, Shape, Slot, SqlValue, Tag};
pub use render::{Placeholder, QueryKind, Rendered, render};
pub use select::{Selection, select_fields};
pub use skip::{IGNORED_COLUMN, SkipMatch, SkipSet};

pub use tokio_postgres::types::ToSql;

#[cfg(feature = "derive")]
pub use sqlextract_derive::Record;
