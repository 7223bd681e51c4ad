//! Output formatters for result rowsets.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use jetcat::{ObjectKind, ResultRowset, Value};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter: Send + Sync {
    /// Format a result rowset.
    fn format_rowset(&self, result: &ResultRowset) -> String;

    /// Format the column schema of a kind.
    fn format_schema(&self, kind: ObjectKind) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_rowset(&self, result: &ResultRowset) -> String {
        let mut table = Table::new();
        table.set_header(result.column_names().map(Cell::new).collect::<Vec<_>>());

        for row in result.rows() {
            table.add_row(row.values().iter().map(|v| Cell::new(v.to_string())).collect::<Vec<_>>());
        }

        format!("{}\n{} row(s)", table, result.len())
    }

    fn format_schema(&self, kind: ObjectKind) -> String {
        let mut table = Table::new();
        table.set_header(vec!["Column", "Type"]);

        for column in kind.columns() {
            table.add_row(vec![column.name, column.column_type.name()]);
        }

        table.to_string()
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_rowset(&self, result: &ResultRowset) -> String {
        let rows: Vec<serde_json::Value> = result
            .rows()
            .map(|row| {
                let obj: serde_json::Map<String, serde_json::Value> = row
                    .fields()
                    .map(|(name, value)| (name.to_string(), value_to_json(value)))
                    .collect();
                serde_json::Value::Object(obj)
            })
            .collect();

        serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_schema(&self, kind: ObjectKind) -> String {
        let columns: Vec<serde_json::Value> = kind
            .columns()
            .iter()
            .map(|c| serde_json::json!({ "name": c.name, "type": c.column_type.name() }))
            .collect();

        serde_json::json!({ "kind": kind.keyword(), "columns": columns }).to_string()
    }
}

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_rowset(&self, result: &ResultRowset) -> String {
        let mut output = result.column_names().collect::<Vec<_>>().join(",");
        output.push('\n');

        for row in result.rows() {
            let cells: Vec<String> = row.values().iter().map(format_value_csv).collect();
            output.push_str(&cells.join(","));
            output.push('\n');
        }

        output
    }

    fn format_schema(&self, kind: ObjectKind) -> String {
        let mut output = String::from("column,type\n");
        for column in kind.columns() {
            output.push_str(&format!("{},{}\n", column.name, column.column_type.name()));
        }
        output
    }
}

/// Format a Value for CSV output.
fn format_value_csv(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Text(s) => format!("\"{}\"", escape_csv(s)),
        _ => value.to_string(),
    }
}

/// Convert a Value to JSON.
fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Text(s) => serde_json::Value::String(s.clone()),
    }
}

/// Escape a string for CSV.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rowset() -> ResultRowset {
        ResultRowset::new(
            ObjectKind::CheckConstraints,
            vec![
                vec![
                    Value::from("Courses"),
                    Value::from("CK_Title"),
                    Value::from("[Title] <> \"\""),
                ],
                vec![Value::from("Courses"), Value::from("CK_Open"), Value::Null],
            ],
        )
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("hello"), "hello");
        assert_eq!(escape_csv("hello, world"), "hello, world");
        assert_eq!(escape_csv("say \"hi\""), "say \"\"hi\"\"");
    }

    #[test]
    fn test_csv_output() {
        let output = CsvFormatter.format_rowset(&rowset());
        assert_eq!(
            output,
            "TableName,Name,CheckClause\n\
             \"Courses\",\"CK_Title\",\"[Title] <> \"\"\"\"\"\n\
             \"Courses\",\"CK_Open\",\n"
        );
    }

    #[test]
    fn test_json_output() {
        let output = JsonFormatter.format_rowset(&rowset());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["Name"], "CK_Title");
        assert!(parsed[1]["CheckClause"].is_null());
    }

    #[test]
    fn test_json_typed_values() {
        let result = ResultRowset::new(
            ObjectKind::IndexColumns,
            vec![vec![
                Value::from("Students"),
                Value::from("PK_Students"),
                Value::from("Id"),
                Value::Int(1),
                Value::Bool(false),
            ]],
        );
        let parsed: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_rowset(&result)).unwrap();
        assert_eq!(parsed[0]["Ordinal"], 1);
        assert_eq!(parsed[0]["IsDescending"], false);
    }

    #[test]
    fn test_table_output() {
        let output = TableFormatter.format_rowset(&rowset());
        assert!(output.contains("CheckClause"));
        assert!(output.contains("NULL"));
        assert!(output.ends_with("2 row(s)"));

        let empty = TableFormatter.format_rowset(&ResultRowset::empty(ObjectKind::Views));
        assert!(empty.contains("Definition"));
        assert!(empty.ends_with("0 row(s)"));
    }

    #[test]
    fn test_schema_output() {
        let csv = CsvFormatter.format_schema(ObjectKind::Views);
        assert_eq!(csv, "column,type\nName,text\nDefinition,text\n");

        let json: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_schema(ObjectKind::IndexColumns)).unwrap();
        assert_eq!(json["kind"], "indexcolumns");
        assert_eq!(json["columns"][3]["type"], "integer");
    }
}
