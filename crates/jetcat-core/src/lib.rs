//! jetcat Core - rowset sources, pattern matching, and query execution.
//!
//! This crate turns parsed SHOW statements into result rowsets over a native
//! driver.

pub mod config;
pub mod error;
pub mod query;
pub mod snapshot;
pub mod source;

pub use config::{Collation, EngineConfig, NullOrder};
pub use error::{DriverError, Error, SnapshotError};
pub use query::{PatternMatcher, QueryExecutor};
pub use snapshot::{CatalogSnapshot, FetchLog, SnapshotDriver};
pub use source::{NativeDriver, RowsetSource};
