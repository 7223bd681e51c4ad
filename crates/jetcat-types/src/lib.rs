//! jetcat shared types.
//!
//! This crate defines the data model shared by the SHOW parser, the query
//! executor, and callers consuming catalog rowsets.
//!
//! # Modules
//!
//! - [`value`] - Primitive values and declared column types
//! - [`kind`] - Catalog object kinds and their fixed column schemas
//! - [`row`] - Raw rows as the native driver materializes them
//! - [`result`] - Typed, ordered result rowsets

pub mod kind;
pub mod result;
pub mod row;
pub mod value;

// Re-export commonly used types at crate root
pub use kind::{ColumnDef, ObjectKind};
pub use result::{ResultRowset, Row};
pub use row::RawRow;
pub use value::{ColumnType, Value};
