//! End-to-end tests for the catalog engine.

use std::io::Write;

use jetcat::{
    CatalogEngine, CatalogError, CatalogSnapshot, Collation, DriverError, EngineConfig,
    ExecutionError, NativeDriver, ObjectKind, ParseErrorKind, PatternMatcher, RawRow,
    SnapshotDriver, Value, parse,
};
use pretty_assertions::assert_eq;

/// A driver that builds rows on demand, standing in for a live connection.
struct SchoolDriver {
    closed: bool,
}

impl SchoolDriver {
    fn index_column(index: &str, table: &str, column: &str, ordinal: i64) -> RawRow {
        RawRow::new()
            .with("TableName", table)
            .with("Index", index)
            .with("ColumnName", column)
            .with("Ordinal", ordinal)
            .with("IsDescending", false)
    }
}

impl NativeDriver for SchoolDriver {
    fn fetch_rowset(&mut self, kind: ObjectKind) -> Result<Vec<RawRow>, DriverError> {
        if self.closed {
            return Err(DriverError::new("the database has been closed"));
        }

        let rows = match kind {
            ObjectKind::Indexes => ["PK_Students", "FK_Students", "PK_Courses", "IX_Grade"]
                .into_iter()
                .map(|name| {
                    RawRow::new()
                        .with("TableName", "Students")
                        .with("Name", name)
                        .with("IsUnique", name.starts_with("PK"))
                        .with("IsPrimaryKey", name.starts_with("PK"))
                        .with("IgnoresNulls", false)
                })
                .collect(),
            ObjectKind::IndexColumns => vec![
                Self::index_column("PK_Enrollments", "Enrollments", "Term", 3),
                Self::index_column("PK_Enrollments", "Enrollments", "StudentId", 1),
                Self::index_column("IX_Grade", "Enrollments", "Grade", 1),
                Self::index_column("PK_Enrollments", "Enrollments", "CourseId", 2),
                Self::index_column("PK_Students", "Students", "Id", 1),
                Self::index_column("PK_Wide", "Wide", "C10", 10),
                Self::index_column("PK_Wide", "Wide", "C2", 2),
            ],
            _ => Vec::new(),
        };
        Ok(rows)
    }
}

fn engine(collation: Collation) -> CatalogEngine<SchoolDriver> {
    CatalogEngine::new(SchoolDriver { closed: false }, EngineConfig::new(collation))
}

fn strings(values: Option<Vec<&Value>>) -> Vec<String> {
    values.unwrap().into_iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_bare_show_for_every_kind() {
    let mut engine = engine(Collation::NoCase);
    for kind in ObjectKind::ALL {
        let result = engine.query(&format!("SHOW {}", kind.keyword())).unwrap();
        assert_eq!(result.kind, kind);
    }
    assert_eq!(engine.fetch_count(), 14);
}

#[test]
fn test_like_prefix() {
    let mut engine = engine(Collation::Binary);
    let result = engine.query("show indexes where Name like 'PK*'").unwrap();

    assert_eq!(strings(result.column_values("Name")), vec!["PK_Students", "PK_Courses"]);
}

#[test]
fn test_group_then_numeric_ordinal() {
    let mut engine = engine(Collation::Binary);
    let result = engine
        .query("show indexcolumns where index like 'PK*' order by Index, Ordinal")
        .unwrap();

    let pairs: Vec<(String, String)> = result
        .rows()
        .map(|r| (r.get("Index").unwrap().to_string(), r.get("Ordinal").unwrap().to_string()))
        .collect();

    let expected = [
        ("PK_Enrollments", "1"),
        ("PK_Enrollments", "2"),
        ("PK_Enrollments", "3"),
        ("PK_Students", "1"),
        ("PK_Wide", "2"),
        ("PK_Wide", "10"),
    ];
    assert_eq!(
        pairs,
        expected
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_repeated_query_is_deterministic() {
    let mut engine = engine(Collation::NoCase);
    let once = engine.query("SHOW indexes WHERE Name LIKE '*Students'").unwrap();
    let twice = engine.query("SHOW indexes WHERE Name LIKE '*Students'").unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.len(), 2);
}

#[test]
fn test_filter_is_idempotent() {
    let mut engine = engine(Collation::NoCase);

    for text in [
        "SHOW indexes WHERE Name LIKE '*students'",
        "SHOW indexcolumns WHERE Ordinal = '1' ORDER BY Index",
    ] {
        let statement = parse(text).unwrap();
        let predicate = statement.predicate.clone().unwrap();
        let filtered = engine.execute(&statement).unwrap();
        assert!(!filtered.is_empty(), "{}", text);

        let matcher = PatternMatcher::new(engine.config().collation);
        let refiltered: Vec<Vec<Value>> = filtered
            .rows()
            .filter(|row| {
                let cell = row.get_index(predicate.column.index).unwrap();
                matcher.matches(cell, &predicate.pattern.value, predicate.comparison)
            })
            .map(|row| row.values().to_vec())
            .collect();

        assert_eq!(refiltered, filtered.into_rows(), "{}", text);
    }
}

#[test]
fn test_unknown_kind_never_fetches() {
    let mut engine = engine(Collation::NoCase);
    let err = engine.query("SHOW nonsense").unwrap_err();

    match &err {
        CatalogError::Parse(e) => {
            assert_eq!(e.kind, ParseErrorKind::UnknownObjectKind);
            assert!(e.message.contains("nonsense"));
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
    assert_eq!(engine.fetch_count(), 0);
}

#[test]
fn test_parse_errors_by_kind() {
    let mut engine = engine(Collation::NoCase);
    let cases = [
        ("SHOW indexes WHERE Ordinal = '1'", ParseErrorKind::UnknownColumn),
        ("SHOW indexes ORDER BY Name DESC", ParseErrorKind::MalformedStatement),
        ("SHOW indexes WHERE Name = 'a' AND TableName = 'b'", ParseErrorKind::MalformedStatement),
        ("SHOW indexes extra", ParseErrorKind::MalformedStatement),
    ];

    for (source, expected) in cases {
        match engine.query(source) {
            Err(CatalogError::Parse(e)) => assert_eq!(e.kind, expected, "{}", source),
            other => panic!("{}: expected parse error, got {:?}", source, other),
        }
    }
    assert_eq!(engine.fetch_count(), 0);
}

#[test]
fn test_ordering_is_stable() {
    let mut engine = engine(Collation::Binary);
    let result = engine.query("SHOW indexcolumns ORDER BY TableName").unwrap();

    assert_eq!(
        strings(result.column_values("ColumnName")),
        vec!["Term", "StudentId", "Grade", "CourseId", "Id", "C10", "C2"]
    );
}

#[test]
fn test_empty_result_keeps_schema() {
    let mut engine = engine(Collation::NoCase);
    let result = engine.query("SHOW indexes WHERE Name = 'nothing'").unwrap();

    assert!(result.is_empty());
    assert_eq!(result.columns(), ObjectKind::Indexes.columns());
    assert_eq!(result.column_index("isprimarykey"), Some(3));
}

#[test]
fn test_collation_is_explicit() {
    let mut binary = engine(Collation::Binary);
    assert!(binary.query("SHOW indexes WHERE Name LIKE 'pk*'").unwrap().is_empty());

    let mut nocase = engine(Collation::NoCase);
    assert_eq!(nocase.query("SHOW indexes WHERE Name LIKE 'pk*'").unwrap().len(), 2);
}

#[test]
fn test_driver_failure() {
    let mut engine = engine(Collation::NoCase);
    engine.driver_mut().closed = true;

    let err = engine.query("SHOW indexes").unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Execution(ExecutionError::SourceUnavailable { kind: ObjectKind::Indexes, .. })
    ));
    assert_eq!(engine.fetch_count(), 1);
}

#[test]
fn test_malformed_driver_row() {
    let snapshot = CatalogSnapshot::new().with_rows(
        ObjectKind::Views,
        vec![RawRow::new().with("Name", 7).with("Definition", "SELECT 1")],
    );
    let mut engine = CatalogEngine::from_snapshot(snapshot, EngineConfig::new(Collation::NoCase));

    let err = engine.query("SHOW views").unwrap_err();
    assert!(matches!(err, CatalogError::Execution(ExecutionError::InvariantViolation(_))));
}

#[test]
fn test_open_snapshot_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "checkconstraints": [
            {{ "TableName": "Courses", "Name": "CK_Credits", "CheckClause": "[Credits] > 0" }},
            {{ "TableName": "Courses", "Name": "CK_Title", "CheckClause": "Len([Title]) > 0" }}
        ] }}"#
    )
    .unwrap();

    let mut engine =
        CatalogEngine::open_snapshot(file.path(), EngineConfig::new(Collation::NoCase)).unwrap();
    let result = engine
        .query("SHOW checkconstraints WHERE CheckClause LIKE 'len(*' ORDER BY Name;")
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.row(0).unwrap().text("Name"), Some("CK_Title"));
    assert_eq!(engine.driver().fetch_log().fetched(), vec![ObjectKind::CheckConstraints]);
}

#[test]
fn test_engines_are_send() {
    fn assert_send<T: Send>() {}
    assert_send::<CatalogEngine<SnapshotDriver>>();
    assert_send::<CatalogEngine<SchoolDriver>>();

    let snapshot = CatalogSnapshot::new();
    let handle = std::thread::spawn(move || {
        let mut engine = CatalogEngine::from_snapshot(snapshot, EngineConfig::new(Collation::Binary));
        engine.query("SHOW tables").map(|r| r.len())
    });
    assert_eq!(handle.join().unwrap().unwrap(), 0);
}
