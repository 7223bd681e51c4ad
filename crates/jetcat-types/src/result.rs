//! Typed result rowsets handed back to callers.

use crate::kind::{column_position, ColumnDef, ObjectKind};
use crate::value::Value;

/// The terminal output of a SHOW statement: the kind's column schema plus
/// filtered, ordered rows.
///
/// Row values are stored in schema column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRowset {
    /// Object kind the rows describe.
    pub kind: ObjectKind,
    rows: Vec<Vec<Value>>,
}

impl ResultRowset {
    /// Create a rowset from schema-ordered rows.
    ///
    /// Rows shorter than the schema read as missing cells, never as a panic.
    pub fn new(kind: ObjectKind, rows: Vec<Vec<Value>>) -> Self {
        Self { kind, rows }
    }

    /// An empty rowset that still carries the kind's schema.
    pub fn empty(kind: ObjectKind) -> Self {
        Self::new(kind, Vec::new())
    }

    /// The column schema.
    pub fn columns(&self) -> &'static [ColumnDef] {
        self.kind.columns()
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns().iter().map(|c| c.name)
    }

    /// Position of a column (case-insensitive).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        column_position(self.columns(), name)
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the value at a row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    /// Get a row view by index.
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            columns: self.columns(),
            values,
        })
    }

    /// Iterate over rows in result order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        let columns = self.columns();
        self.rows.iter().map(move |values| Row { columns, values })
    }

    /// All values of one column, in result order.
    ///
    /// `None` if the column is unknown or any row lacks it.
    pub fn column_values(&self, column: &str) -> Option<Vec<&Value>> {
        let col = self.column_index(column)?;
        self.rows.iter().map(|r| r.get(col)).collect()
    }

    /// Take the raw schema-ordered rows.
    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }
}

/// A borrowed view of one result row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'static [ColumnDef],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    /// Get a value by column name (case-insensitive).
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.values.get(column_position(self.columns, column)?)
    }

    /// Get a value by column position.
    pub fn get_index(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index)
    }

    /// Text value of a column, if it is non-null text.
    pub fn text(&self, column: &str) -> Option<&'a str> {
        self.get(column).and_then(Value::as_str)
    }

    /// Values in schema order.
    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// (column name, value) pairs in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &'a Value)> {
        self.columns.iter().map(|c| c.name).zip(self.values.iter())
    }
}
