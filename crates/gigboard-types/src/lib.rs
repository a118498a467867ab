//! Gigboard Types - Row and payload definitions
//!
//! This crate contains only serde data types with no async runtime
//! dependencies. Rows serialize to a JSON object holding every column in
//! declaration order; the `New*` and `*Update` payloads are the field
//! whitelists accepted by POST and PUT.

pub mod nullable;
pub mod offer;
pub mod order;
pub mod user;

pub use offer::*;
pub use order::*;
pub use user::*;

/// Store-assigned integer primary key
pub type RowId = i64;
