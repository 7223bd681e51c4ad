//! jetcat SHOW dialect
//!
//! This crate parses the fixed-vocabulary catalog dialect used to read
//! structural metadata from the engine.
//!
//! # Syntax
//!
//! ```text
//! SHOW tables
//! SHOW indexes WHERE Name LIKE 'PK*'
//! SHOW tablecolumns WHERE TableName = 'Students' ORDER BY Ordinal
//! SHOW indexcolumns WHERE Index LIKE 'PK*' ORDER BY Index, Ordinal;
//! ```
//!
//! Keywords, object kinds, and column names are case-insensitive. `*` is the
//! only LIKE wildcard. ORDER BY is always ascending.
//!
//! # Usage
//!
//! ```rust
//! use jetcat_lang::{parse, Comparison};
//!
//! let stmt = parse("show indexes where Name like 'PK*'").unwrap();
//! let predicate = stmt.predicate.unwrap();
//! assert_eq!(predicate.column.name, "Name");
//! assert_eq!(predicate.comparison, Comparison::Like);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

// Re-export main types
pub use ast::{ColumnRef, Comparison, OrderSpec, ParsedStatement, Predicate};
pub use error::{ParseError, ParseErrorKind};
pub use span::{Span, Spanned};

/// Parse a SHOW statement.
///
/// # Example
///
/// ```rust
/// use jetcat_lang::parse;
/// use jetcat_types::ObjectKind;
///
/// let stmt = parse("SHOW views").unwrap();
/// assert_eq!(stmt.kind, ObjectKind::Views);
/// ```
pub fn parse(source: &str) -> Result<ParsedStatement, ParseError> {
    parser::parse(source)
}

/// Tokenize a source string (for debugging/testing).
///
/// # Example
///
/// ```rust
/// use jetcat_lang::tokenize;
///
/// let tokens = tokenize("SHOW tables");
/// assert_eq!(tokens.len(), 2);
/// ```
pub fn tokenize(source: &str) -> Vec<lexer::SpannedToken> {
    lexer::tokenize(source)
}
