//! Parsed SHOW statements.
//!
//! Column references are resolved against the object kind's schema while
//! parsing, so a `ParsedStatement` only ever names columns that exist.

use crate::span::{Span, Spanned};
use jetcat_types::{ColumnType, ObjectKind};

/// A fully parsed `SHOW <kind> [WHERE ...] [ORDER BY ...]` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStatement {
    /// The catalog object kind requested.
    pub kind: ObjectKind,
    /// Optional single-column filter.
    pub predicate: Option<Predicate>,
    /// Optional ascending ordering.
    pub order_by: Option<OrderSpec>,
    /// The full span of the statement.
    pub span: Span,
}

impl ParsedStatement {
    /// Create a bare `SHOW <kind>` statement.
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            predicate: None,
            order_by: None,
            span: Span::default(),
        }
    }
}

/// A schema column resolved from a name in the statement text.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    /// Canonical column name from the schema (not as typed).
    pub name: &'static str,
    /// Position of the column in the kind's schema.
    pub index: usize,
    /// Declared type of the column.
    pub column_type: ColumnType,
    /// Where the column was named in the source.
    pub span: Span,
}

impl ColumnRef {
    /// Resolve `name` against the schema of `kind`.
    pub fn resolve(kind: ObjectKind, name: &str, span: Span) -> Option<Self> {
        let index = kind.column_index(name)?;
        let def = &kind.columns()[index];
        Some(Self {
            name: def.name,
            index,
            column_type: def.column_type,
            span,
        })
    }
}

/// How a predicate compares a column against its literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `column = 'value'`
    Equals,
    /// `column LIKE 'pattern'`, `*` as the wildcard.
    Like,
}

/// A `WHERE <column> (LIKE | =) <literal>` filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// The filtered column.
    pub column: ColumnRef,
    /// The comparison kind.
    pub comparison: Comparison,
    /// The literal pattern or value, quotes removed, wildcards untouched.
    pub pattern: Spanned<String>,
}

/// An `ORDER BY a, b, ...` clause. Always ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpec {
    /// Sort keys, most significant first.
    pub columns: Vec<ColumnRef>,
    /// Span of the whole clause.
    pub span: Span,
}

impl OrderSpec {
    /// Canonical names of the sort columns.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }
}
