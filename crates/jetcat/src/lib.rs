//! jetcat - query the structural catalog of an embedded desktop database.
//!
//! Statements take the form
//! `SHOW <kind> [WHERE <column> LIKE '<pattern>' | <column> = '<value>'] [ORDER BY <column>, ...]`
//! and return a typed [`ResultRowset`] carrying the kind's fixed column schema.
//!
//! # Example
//!
//! ```rust
//! use jetcat::{CatalogEngine, CatalogSnapshot, Collation, EngineConfig, ObjectKind, RawRow};
//!
//! let snapshot = CatalogSnapshot::new().with_rows(
//!     ObjectKind::Indexes,
//!     vec![
//!         RawRow::new()
//!             .with("TableName", "Students")
//!             .with("Name", "PK_Students")
//!             .with("IsUnique", true)
//!             .with("IsPrimaryKey", true)
//!             .with("IgnoresNulls", false),
//!     ],
//! );
//!
//! let mut engine = CatalogEngine::from_snapshot(snapshot, EngineConfig::new(Collation::NoCase));
//! let result = engine.query("SHOW indexes WHERE Name LIKE 'pk*'").unwrap();
//! assert_eq!(result.row(0).unwrap().text("Name"), Some("PK_Students"));
//! ```

mod engine;
mod error;

pub use engine::CatalogEngine;
pub use error::CatalogError;

// Re-export the building blocks.
pub use jetcat_core::{
    CatalogSnapshot, Collation, DriverError, EngineConfig, FetchLog, NativeDriver, NullOrder,
    PatternMatcher, SnapshotDriver, SnapshotError,
};
pub use jetcat_core::Error as ExecutionError;
pub use jetcat_lang::{parse, ParseError, ParseErrorKind, ParsedStatement};
pub use jetcat_types::{ColumnDef, ColumnType, ObjectKind, RawRow, ResultRowset, Row, Value};
