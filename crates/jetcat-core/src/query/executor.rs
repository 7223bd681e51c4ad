//! Query executor for parsed SHOW statements.
//!
//! Execution is a straight pipeline: fetch the native rowset, normalize every
//! row to the kind's schema, filter by the predicate, then stable-sort by the
//! ORDER BY columns. Any failure aborts the whole call; no partial rowset is
//! ever returned.

use std::cmp::Ordering;

use jetcat_lang::{ColumnRef, ParsedStatement};
use jetcat_types::{ObjectKind, RawRow, ResultRowset, Value};
use tracing::{debug, error};

use crate::config::{Collation, EngineConfig, NullOrder};
use crate::error::Error;
use crate::source::{NativeDriver, RowsetSource};

use super::matcher::PatternMatcher;

/// Runs parsed statements against a rowset source.
pub struct QueryExecutor<'a, D> {
    source: &'a mut RowsetSource<D>,
    config: &'a EngineConfig,
}

impl<'a, D: NativeDriver> QueryExecutor<'a, D> {
    /// Create an executor over a source with the given configuration.
    pub fn new(source: &'a mut RowsetSource<D>, config: &'a EngineConfig) -> Self {
        Self { source, config }
    }

    /// Execute a statement and return its filtered, ordered rows.
    pub fn execute(&mut self, statement: &ParsedStatement) -> Result<ResultRowset, Error> {
        let kind = statement.kind;
        check_statement(statement).map_err(invariant)?;

        let raw = self.source.fetch(kind)?;
        let fetched = raw.len();

        let mut rows = raw
            .into_iter()
            .map(|row| normalize_row(kind, row))
            .collect::<Result<Vec<_>, _>>()
            .map_err(invariant)?;

        if let Some(predicate) = &statement.predicate {
            let matcher = PatternMatcher::new(self.config.collation);
            let column = predicate.column.index;
            rows.retain(|row| {
                matcher.matches(&row[column], &predicate.pattern.value, predicate.comparison)
            });
        }

        if let Some(order) = &statement.order_by {
            sort_rows(&mut rows, &order.columns, self.config);
        }

        debug!(
            kind = %kind,
            fetched,
            returned = rows.len(),
            filtered = statement.predicate.is_some(),
            ordered = statement.order_by.is_some(),
            "executed statement"
        );

        Ok(ResultRowset::new(kind, rows))
    }
}

fn invariant(message: String) -> Error {
    error!(%message, "catalog invariant violated");
    Error::InvariantViolation(message)
}

/// Every column reference must point at the column it names in the
/// statement's own schema.
fn check_statement(statement: &ParsedStatement) -> Result<(), String> {
    let predicate = statement.predicate.iter().map(|p| &p.column);
    let order = statement.order_by.iter().flat_map(|o| o.columns.iter());

    for column in predicate.chain(order) {
        let def = statement.kind.columns().get(column.index);
        if def.map(|d| d.name) != Some(column.name) {
            return Err(format!(
                "column reference '{}' at position {} does not belong to {}",
                column.name, column.index, statement.kind
            ));
        }
    }
    Ok(())
}

/// Reorder a raw row into schema column order, checking presence and type.
fn normalize_row(kind: ObjectKind, mut row: RawRow) -> Result<Vec<Value>, String> {
    let mut values = Vec::with_capacity(kind.columns().len());

    for def in kind.columns() {
        let position = row
            .fields
            .iter()
            .position(|(name, _)| def.is_named(name))
            .ok_or_else(|| format!("{} row is missing column '{}'", kind, def.name))?;

        let value = std::mem::replace(&mut row.fields[position].1, Value::Null);
        if !def.column_type.accepts(&value) {
            return Err(format!(
                "{} column '{}' expects {} but the driver returned {} ({})",
                kind,
                def.name,
                def.column_type.name(),
                value.type_name(),
                value
            ));
        }
        values.push(value);
    }

    Ok(values)
}

/// Stable ascending sort on the given columns, most significant first.
fn sort_rows(rows: &mut [Vec<Value>], columns: &[ColumnRef], config: &EngineConfig) {
    if columns.is_empty() {
        return;
    }

    rows.sort_by(|a, b| {
        for column in columns {
            let cmp = compare_values(
                &a[column.index],
                &b[column.index],
                config.collation,
                config.null_order,
            );
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    });
}

/// Compare two values of the same column for sorting.
fn compare_values(a: &Value, b: &Value, collation: Collation, nulls: NullOrder) -> Ordering {
    let null_first = match nulls {
        NullOrder::First => Ordering::Less,
        NullOrder::Last => Ordering::Greater,
    };

    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => null_first,
        (_, Value::Null) => null_first.reverse(),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => collation.compare(a, b),
        // Normalization guarantees one type per column.
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{CatalogSnapshot, SnapshotDriver};
    use jetcat_lang::parse;

    fn index_column(table: &str, index: &str, column: &str, ordinal: i64) -> RawRow {
        RawRow::new()
            .with("TableName", table)
            .with("Index", index)
            .with("ColumnName", column)
            .with("Ordinal", ordinal)
            .with("IsDescending", false)
    }

    fn index(table: &str, name: &str, primary: bool) -> RawRow {
        RawRow::new()
            .with("TableName", table)
            .with("Name", name)
            .with("IsUnique", primary)
            .with("IsPrimaryKey", primary)
            .with("IgnoresNulls", false)
    }

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new()
            .with_rows(
                ObjectKind::Indexes,
                vec![
                    index("Students", "PK_Students", true),
                    index("Enrollments", "FK_Students", false),
                    index("Courses", "PK_Courses", true),
                    index("Courses", "IX_Title", false),
                ],
            )
            .with_rows(
                ObjectKind::IndexColumns,
                vec![
                    index_column("Enrollments", "PK_Enrollments", "CourseId", 3),
                    index_column("Students", "PK_Students", "Id", 1),
                    index_column("Enrollments", "PK_Enrollments", "StudentId", 1),
                    index_column("Enrollments", "PK_Enrollments", "Term", 10),
                    index_column("Enrollments", "PK_Enrollments", "Year", 2),
                    index_column("Courses", "IX_Title", "Title", 1),
                ],
            )
    }

    fn run(source: &str, collation: Collation) -> Result<ResultRowset, Error> {
        let config = EngineConfig::new(collation);
        let mut rowsets = RowsetSource::new(SnapshotDriver::new(snapshot()));
        let statement = parse(source).unwrap();
        QueryExecutor::new(&mut rowsets, &config).execute(&statement)
    }

    fn names(result: &ResultRowset, column: &str) -> Vec<String> {
        result
            .column_values(column)
            .unwrap()
            .into_iter()
            .map(|v| v.to_string())
            .collect()
    }

    #[test]
    fn test_unfiltered_returns_native_order() {
        let result = run("SHOW indexes", Collation::NoCase).unwrap();
        assert_eq!(
            names(&result, "Name"),
            vec!["PK_Students", "FK_Students", "PK_Courses", "IX_Title"]
        );
    }

    #[test]
    fn test_like_filter() {
        let result = run("show indexes where Name like 'PK*'", Collation::Binary).unwrap();
        assert_eq!(names(&result, "Name"), vec!["PK_Students", "PK_Courses"]);
    }

    #[test]
    fn test_equals_filter_on_boolean_column() {
        let result = run("SHOW indexes WHERE IsPrimaryKey = 'true'", Collation::NoCase).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_collation_controls_matching() {
        let binary = run("SHOW indexes WHERE Name LIKE 'pk*'", Collation::Binary).unwrap();
        assert!(binary.is_empty());

        let nocase = run("SHOW indexes WHERE Name LIKE 'pk*'", Collation::NoCase).unwrap();
        assert_eq!(nocase.len(), 2);
    }

    #[test]
    fn test_order_by_groups_then_numeric() {
        let result = run(
            "show indexcolumns where index like 'PK*' order by Index, Ordinal",
            Collation::Binary,
        )
        .unwrap();

        assert_eq!(
            names(&result, "Index"),
            vec!["PK_Enrollments", "PK_Enrollments", "PK_Enrollments", "PK_Enrollments", "PK_Students"]
        );
        assert_eq!(names(&result, "Ordinal"), vec!["1", "2", "3", "10", "1"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let result = run("SHOW indexcolumns ORDER BY TableName", Collation::Binary).unwrap();
        // Ties on TableName keep native order.
        assert_eq!(
            names(&result, "ColumnName"),
            vec!["Title", "CourseId", "StudentId", "Term", "Year", "Id"]
        );
    }

    #[test]
    fn test_nocase_ordering() {
        let mut snapshot = CatalogSnapshot::new();
        snapshot.insert(
            ObjectKind::Views,
            vec![
                RawRow::new().with("Name", "beta").with("Definition", Value::Null),
                RawRow::new().with("Name", "Alpha").with("Definition", Value::Null),
                RawRow::new().with("Name", "Gamma").with("Definition", Value::Null),
            ],
        );
        let statement = parse("SHOW views ORDER BY Name").unwrap();

        for (collation, expected) in [
            (Collation::Binary, vec!["Alpha", "Gamma", "beta"]),
            (Collation::NoCase, vec!["Alpha", "beta", "Gamma"]),
        ] {
            let config = EngineConfig::new(collation);
            let mut source = RowsetSource::new(SnapshotDriver::new(snapshot.clone()));
            let result = QueryExecutor::new(&mut source, &config).execute(&statement).unwrap();
            assert_eq!(names(&result, "Name"), expected);
        }
    }

    #[test]
    fn test_null_placement() {
        let rows = vec![
            RawRow::new().with("Name", "b").with("Definition", "SELECT 2"),
            RawRow::new().with("Name", "a").with("Definition", Value::Null),
            RawRow::new().with("Name", "c").with("Definition", "SELECT 1"),
        ];
        let snapshot = CatalogSnapshot::new().with_rows(ObjectKind::Views, rows);
        let statement = parse("SHOW views ORDER BY Definition").unwrap();

        for (nulls, expected) in [
            (NullOrder::First, vec!["a", "c", "b"]),
            (NullOrder::Last, vec!["c", "b", "a"]),
        ] {
            let config = EngineConfig::new(Collation::Binary).with_null_order(nulls);
            let mut source = RowsetSource::new(SnapshotDriver::new(snapshot.clone()));
            let result = QueryExecutor::new(&mut source, &config).execute(&statement).unwrap();
            assert_eq!(names(&result, "Name"), expected);
        }
    }

    #[test]
    fn test_null_never_matches_predicate() {
        let rows = vec![
            RawRow::new().with("Name", "v1").with("Definition", Value::Null),
            RawRow::new().with("Name", "v2").with("Definition", "SELECT *"),
        ];
        let snapshot = CatalogSnapshot::new().with_rows(ObjectKind::Views, rows);
        let config = EngineConfig::new(Collation::NoCase);
        let mut source = RowsetSource::new(SnapshotDriver::new(snapshot));

        let statement = parse("SHOW views WHERE Definition LIKE '*'").unwrap();
        let result = QueryExecutor::new(&mut source, &config).execute(&statement).unwrap();
        assert_eq!(names(&result, "Name"), vec!["v2"]);
    }

    #[test]
    fn test_no_match_keeps_schema() {
        let result = run("SHOW indexes WHERE Name = 'missing'", Collation::NoCase).unwrap();
        assert!(result.is_empty());
        assert_eq!(
            result.column_names().collect::<Vec<_>>(),
            vec!["TableName", "Name", "IsUnique", "IsPrimaryKey", "IgnoresNulls"]
        );
    }

    #[test]
    fn test_rows_normalized_to_schema_order() {
        let row = RawRow::new()
            .with("definition", "SELECT 1")
            .with("NAME", "v")
            .with("Extra", 42);
        let values = normalize_row(ObjectKind::Views, row).unwrap();
        assert_eq!(values, vec![Value::from("v"), Value::from("SELECT 1")]);
    }

    #[test]
    fn test_missing_column_is_invariant_violation() {
        let snapshot = CatalogSnapshot::new()
            .with_rows(ObjectKind::Views, vec![RawRow::new().with("Name", "v")]);
        let config = EngineConfig::new(Collation::NoCase);
        let mut source = RowsetSource::new(SnapshotDriver::new(snapshot));

        let err = QueryExecutor::new(&mut source, &config)
            .execute(&parse("SHOW views").unwrap())
            .unwrap_err();
        match err {
            Error::InvariantViolation(msg) => assert!(msg.contains("missing column 'Definition'")),
            other => panic!("expected InvariantViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_is_invariant_violation() {
        let mut row = index_column("T", "PK_T", "Id", 1);
        row.fields[3].1 = Value::from("one");
        let snapshot = CatalogSnapshot::new().with_rows(ObjectKind::IndexColumns, vec![row]);
        let config = EngineConfig::new(Collation::NoCase);
        let mut source = RowsetSource::new(SnapshotDriver::new(snapshot));

        let err = QueryExecutor::new(&mut source, &config)
            .execute(&parse("SHOW indexcolumns").unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(ref msg) if msg.contains("expects integer")));
    }

    #[test]
    fn test_foreign_column_reference_rejected() {
        let mut statement = parse("SHOW views ORDER BY Name").unwrap();
        statement.kind = ObjectKind::IndexColumns;

        let config = EngineConfig::new(Collation::NoCase);
        let mut source = RowsetSource::new(SnapshotDriver::new(snapshot()));
        let err = QueryExecutor::new(&mut source, &config)
            .execute(&statement)
            .unwrap_err();

        assert!(matches!(err, Error::InvariantViolation(_)));
        assert_eq!(source.fetch_count(), 0);
    }

    #[test]
    fn test_source_unavailable() {
        let config = EngineConfig::new(Collation::NoCase);
        let driver = SnapshotDriver::new(snapshot()).unavailable("database is closed");
        let mut source = RowsetSource::new(driver);

        let err = QueryExecutor::new(&mut source, &config)
            .execute(&parse("SHOW indexes").unwrap())
            .unwrap_err();
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn test_compare_values() {
        let c = Collation::Binary;
        let n = NullOrder::First;
        assert_eq!(compare_values(&Value::Int(2), &Value::Int(10), c, n), Ordering::Less);
        assert_eq!(compare_values(&Value::Bool(false), &Value::Bool(true), c, n), Ordering::Less);
        assert_eq!(compare_values(&Value::Null, &Value::Int(0), c, n), Ordering::Less);
        assert_eq!(compare_values(&Value::Null, &Value::Null, c, n), Ordering::Equal);
    }
}
