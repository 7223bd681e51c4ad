//! Catalog generation for benchmarks.
//!
//! Generated catalogs are deterministic for a given scale, and native rows are
//! shuffled so ORDER BY has real work to do.

use jetcat::{CatalogSnapshot, ObjectKind, RawRow, Value};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Scale factor for benchmark catalogs.
#[derive(Clone, Copy, Debug)]
pub enum Scale {
    /// 10 tables
    Tiny,
    /// 100 tables
    Small,
    /// 1,000 tables
    Medium,
    /// 10,000 tables
    Large,
}

impl Scale {
    /// Number of tables at this scale.
    pub fn tables(&self) -> usize {
        match self {
            Scale::Tiny => 10,
            Scale::Small => 100,
            Scale::Medium => 1_000,
            Scale::Large => 10_000,
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Small
    }
}

const SEED: u64 = 12345;

const TABLE_PREFIXES: &[&str] = &[
    "Students", "Courses", "Enrollments", "Teachers", "Rooms", "Terms", "Grades", "Fees",
];

const TYPE_NAMES: &[&str] = &["VARCHAR", "INTEGER", "BIT", "DATETIME", "CURRENCY", "LONGTEXT"];

/// Name of the i-th generated table.
pub fn table_name(i: usize) -> String {
    format!("{}_{}", TABLE_PREFIXES[i % TABLE_PREFIXES.len()], i)
}

/// Generate a catalog with tables, columns, indexes, and foreign keys.
pub fn generate_catalog(scale: Scale) -> CatalogSnapshot {
    let mut rng = StdRng::seed_from_u64(SEED);

    let mut tables = Vec::new();
    let mut columns = Vec::new();
    let mut indexes = Vec::new();
    let mut index_columns = Vec::new();
    let mut foreign_keys = Vec::new();

    for i in 0..scale.tables() {
        let table = table_name(i);
        let column_count = rng.gen_range(3..=12);

        tables.push(
            RawRow::new()
                .with("Name", table.as_str())
                .with("TableType", "TABLE")
                .with("ValidationRule", Value::Null)
                .with("ValidationText", Value::Null),
        );

        for ordinal in 1..=column_count {
            let type_name = if ordinal == 1 {
                "COUNTER"
            } else {
                TYPE_NAMES[rng.gen_range(0..TYPE_NAMES.len())]
            };
            columns.push(
                RawRow::new()
                    .with("TableName", table.as_str())
                    .with("Name", format!("Col{}", ordinal))
                    .with("Ordinal", ordinal as i64)
                    .with("TypeName", type_name)
                    .with("Length", (type_name == "VARCHAR").then_some(255i64))
                    .with("Precision", Value::Null)
                    .with("Scale", Value::Null)
                    .with("IsNullable", ordinal != 1)
                    .with("DefaultValue", Value::Null)
                    .with("IsIdentity", ordinal == 1)
                    .with("IdentitySeed", (ordinal == 1).then_some(1i64))
                    .with("IdentityIncrement", (ordinal == 1).then_some(1i64)),
            );
        }

        let pk = format!("PK_{}", table);
        indexes.push(index(&table, &pk, true));
        index_columns.push(index_column(&table, &pk, "Col1", 1));

        let ix = format!("IX_{}", table);
        indexes.push(index(&table, &ix, false));
        for ordinal in 1..=rng.gen_range(1..=4i64) {
            index_columns.push(index_column(&table, &ix, &format!("Col{}", ordinal + 1), ordinal));
        }

        if i > 0 {
            let referenced = table_name(rng.gen_range(0..i));
            foreign_keys.push(
                RawRow::new()
                    .with("TableName", table.as_str())
                    .with("Constraint", format!("FK_{}_{}", table, referenced))
                    .with("ColumnName", "Col2")
                    .with("Ordinal", 1i64)
                    .with("ReferencedTableName", referenced)
                    .with("ReferencedColumnName", "Col1"),
            );
        }
    }

    for rows in [&mut tables, &mut columns, &mut indexes, &mut index_columns, &mut foreign_keys] {
        rows.shuffle(&mut rng);
    }

    CatalogSnapshot::new()
        .with_rows(ObjectKind::Tables, tables)
        .with_rows(ObjectKind::TableColumns, columns)
        .with_rows(ObjectKind::Indexes, indexes)
        .with_rows(ObjectKind::IndexColumns, index_columns)
        .with_rows(ObjectKind::ForeignKeys, foreign_keys)
}

fn index(table: &str, name: &str, primary: bool) -> RawRow {
    RawRow::new()
        .with("TableName", table)
        .with("Name", name)
        .with("IsUnique", primary)
        .with("IsPrimaryKey", primary)
        .with("IgnoresNulls", false)
}

fn index_column(table: &str, index: &str, column: &str, ordinal: i64) -> RawRow {
    RawRow::new()
        .with("TableName", table)
        .with("Index", index)
        .with("ColumnName", column)
        .with("Ordinal", ordinal)
        .with("IsDescending", false)
}

/// Render a snapshot as JSON in the on-disk snapshot format.
pub fn catalog_to_json(snapshot: &CatalogSnapshot) -> Result<String, serde_json::Error> {
    let mut document = serde_json::Map::new();
    for kind in snapshot.kinds() {
        let rows = snapshot
            .rows(kind)
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        document.insert(kind.keyword().to_string(), serde_json::Value::Array(rows));
    }

    serde_json::to_string(&document)
}
