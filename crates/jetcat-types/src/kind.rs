//! Catalog object kinds and their fixed column schemas.

use std::fmt;

use serde::Serialize;

use crate::value::ColumnType;

/// A column in a catalog rowset schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnDef {
    /// Column name as the engine reports it.
    pub name: &'static str,
    /// Declared type of the column.
    pub column_type: ColumnType,
}

impl ColumnDef {
    /// A text column.
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Text,
        }
    }

    /// An integer column.
    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Integer,
        }
    }

    /// A boolean column.
    pub const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Boolean,
        }
    }

    /// Whether `name` refers to this column. Column names are
    /// case-insensitive, as in the engine itself.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Find a column by name in a schema, case-insensitively.
pub fn column_position(columns: &[ColumnDef], name: &str) -> Option<usize> {
    columns.iter().position(|c| c.is_named(name))
}

/// The catalog object kinds a SHOW statement can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ObjectKind {
    Tables,
    TableColumns,
    Indexes,
    IndexColumns,
    Views,
    ViewColumns,
    Constraints,
    CheckConstraints,
    ConstraintColumns,
    ForeignKeyConstraints,
    ForeignKeys,
    ViewConstraints,
    ViewConstraintColumns,
    ViewForeignKeys,
}

impl ObjectKind {
    /// Every supported kind, in keyword declaration order.
    pub const ALL: [ObjectKind; 14] = [
        ObjectKind::Tables,
        ObjectKind::TableColumns,
        ObjectKind::Indexes,
        ObjectKind::IndexColumns,
        ObjectKind::Views,
        ObjectKind::ViewColumns,
        ObjectKind::Constraints,
        ObjectKind::CheckConstraints,
        ObjectKind::ConstraintColumns,
        ObjectKind::ForeignKeyConstraints,
        ObjectKind::ForeignKeys,
        ObjectKind::ViewConstraints,
        ObjectKind::ViewConstraintColumns,
        ObjectKind::ViewForeignKeys,
    ];

    /// The SHOW keyword for this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            ObjectKind::Tables => "tables",
            ObjectKind::TableColumns => "tablecolumns",
            ObjectKind::Indexes => "indexes",
            ObjectKind::IndexColumns => "indexcolumns",
            ObjectKind::Views => "views",
            ObjectKind::ViewColumns => "viewcolumns",
            ObjectKind::Constraints => "constraints",
            ObjectKind::CheckConstraints => "checkconstraints",
            ObjectKind::ConstraintColumns => "constraintcolumns",
            ObjectKind::ForeignKeyConstraints => "foreignkeyconstraints",
            ObjectKind::ForeignKeys => "foreignkeys",
            ObjectKind::ViewConstraints => "viewconstraints",
            ObjectKind::ViewConstraintColumns => "viewconstraintcolumns",
            ObjectKind::ViewForeignKeys => "viewforeignkeys",
        }
    }

    /// Resolve a SHOW keyword (case-insensitive, exact otherwise).
    pub fn from_keyword(keyword: &str) -> Option<ObjectKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(keyword))
    }

    /// Identifier of the native schema rowset backing this kind.
    pub fn native_rowset(&self) -> &'static str {
        match self {
            ObjectKind::Tables => "TABLES",
            ObjectKind::TableColumns => "COLUMNS",
            ObjectKind::Indexes => "INDEXES",
            ObjectKind::IndexColumns => "INDEX_COLUMNS",
            ObjectKind::Views => "VIEWS",
            ObjectKind::ViewColumns => "VIEW_COLUMNS",
            ObjectKind::Constraints => "TABLE_CONSTRAINTS",
            ObjectKind::CheckConstraints => "CHECK_CONSTRAINTS",
            ObjectKind::ConstraintColumns => "CONSTRAINT_COLUMN_USAGE",
            ObjectKind::ForeignKeyConstraints => "REFERENTIAL_CONSTRAINTS",
            ObjectKind::ForeignKeys => "FOREIGN_KEYS",
            ObjectKind::ViewConstraints => "VIEW_CONSTRAINTS",
            ObjectKind::ViewConstraintColumns => "VIEW_CONSTRAINT_COLUMN_USAGE",
            ObjectKind::ViewForeignKeys => "VIEW_FOREIGN_KEYS",
        }
    }

    /// The fixed column schema of rows of this kind.
    pub fn columns(&self) -> &'static [ColumnDef] {
        match self {
            ObjectKind::Tables => TABLES,
            ObjectKind::TableColumns => TABLE_COLUMNS,
            ObjectKind::Indexes => INDEXES,
            ObjectKind::IndexColumns => INDEX_COLUMNS,
            ObjectKind::Views => VIEWS,
            ObjectKind::ViewColumns => VIEW_COLUMNS,
            ObjectKind::Constraints => CONSTRAINTS,
            ObjectKind::CheckConstraints => CHECK_CONSTRAINTS,
            ObjectKind::ConstraintColumns => CONSTRAINT_COLUMNS,
            ObjectKind::ForeignKeyConstraints => FOREIGN_KEY_CONSTRAINTS,
            ObjectKind::ForeignKeys => FOREIGN_KEYS,
            ObjectKind::ViewConstraints => VIEW_CONSTRAINTS,
            ObjectKind::ViewConstraintColumns => VIEW_CONSTRAINT_COLUMNS,
            ObjectKind::ViewForeignKeys => VIEW_FOREIGN_KEYS,
        }
    }

    /// Position of a column in this kind's schema.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        column_position(self.columns(), name)
    }

    /// Look up a column in this kind's schema.
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.column_index(name).map(|i| &self.columns()[i])
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

const TABLES: &[ColumnDef] = &[
    ColumnDef::text("Name"),
    ColumnDef::text("TableType"),
    ColumnDef::text("ValidationRule"),
    ColumnDef::text("ValidationText"),
];

const TABLE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("TableName"),
    ColumnDef::text("Name"),
    ColumnDef::integer("Ordinal"),
    ColumnDef::text("TypeName"),
    ColumnDef::integer("Length"),
    ColumnDef::integer("Precision"),
    ColumnDef::integer("Scale"),
    ColumnDef::boolean("IsNullable"),
    ColumnDef::text("DefaultValue"),
    ColumnDef::boolean("IsIdentity"),
    ColumnDef::integer("IdentitySeed"),
    ColumnDef::integer("IdentityIncrement"),
];

const INDEXES: &[ColumnDef] = &[
    ColumnDef::text("TableName"),
    ColumnDef::text("Name"),
    ColumnDef::boolean("IsUnique"),
    ColumnDef::boolean("IsPrimaryKey"),
    ColumnDef::boolean("IgnoresNulls"),
];

const INDEX_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("TableName"),
    ColumnDef::text("Index"),
    ColumnDef::text("ColumnName"),
    ColumnDef::integer("Ordinal"),
    ColumnDef::boolean("IsDescending"),
];

const VIEWS: &[ColumnDef] = &[ColumnDef::text("Name"), ColumnDef::text("Definition")];

const VIEW_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("ViewName"),
    ColumnDef::text("Name"),
    ColumnDef::integer("Ordinal"),
    ColumnDef::text("TypeName"),
    ColumnDef::integer("Length"),
    ColumnDef::integer("Precision"),
    ColumnDef::integer("Scale"),
    ColumnDef::boolean("IsNullable"),
];

const CONSTRAINTS: &[ColumnDef] = &[
    ColumnDef::text("TableName"),
    ColumnDef::text("Name"),
    ColumnDef::text("ConstraintType"),
    ColumnDef::boolean("IsDeferrable"),
    ColumnDef::boolean("InitiallyDeferred"),
];

const CHECK_CONSTRAINTS: &[ColumnDef] = &[
    ColumnDef::text("TableName"),
    ColumnDef::text("Name"),
    ColumnDef::text("CheckClause"),
];

const CONSTRAINT_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("TableName"),
    ColumnDef::text("Constraint"),
    ColumnDef::text("ColumnName"),
    ColumnDef::integer("Ordinal"),
];

const FOREIGN_KEY_CONSTRAINTS: &[ColumnDef] = &[
    ColumnDef::text("TableName"),
    ColumnDef::text("Name"),
    ColumnDef::text("ReferencedTableName"),
    ColumnDef::text("ReferencedConstraint"),
    ColumnDef::text("UpdateRule"),
    ColumnDef::text("DeleteRule"),
];

const FOREIGN_KEYS: &[ColumnDef] = &[
    ColumnDef::text("TableName"),
    ColumnDef::text("Constraint"),
    ColumnDef::text("ColumnName"),
    ColumnDef::integer("Ordinal"),
    ColumnDef::text("ReferencedTableName"),
    ColumnDef::text("ReferencedColumnName"),
];

const VIEW_CONSTRAINTS: &[ColumnDef] = &[
    ColumnDef::text("ViewName"),
    ColumnDef::text("Name"),
    ColumnDef::text("ConstraintType"),
];

const VIEW_CONSTRAINT_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("ViewName"),
    ColumnDef::text("Constraint"),
    ColumnDef::text("ColumnName"),
    ColumnDef::integer("Ordinal"),
];

const VIEW_FOREIGN_KEYS: &[ColumnDef] = &[
    ColumnDef::text("ViewName"),
    ColumnDef::text("Constraint"),
    ColumnDef::text("ColumnName"),
    ColumnDef::integer("Ordinal"),
    ColumnDef::text("ReferencedTableName"),
    ColumnDef::text("ReferencedColumnName"),
];
