//! Convenient imports for typical `sqlextract` usage.
//!
//! ```ignore
//! use sqlextract::prelude::*;
//! ```

pub use crate::{
    ExtractError, ExtractResult, Placeholder, QueryConfig, QueryKind, QueryValues, Record,
    SkipMatch, query_and_values,
};
