//! Statement execution.

use crate::formatter::Formatter;
use jetcat::{CatalogEngine, NativeDriver};
use thiserror::Error;

/// Execution errors.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The statement was rejected or failed; rendered with source context.
    #[error("{0}")]
    Catalog(String),
}

/// Execute a statement and return formatted output.
pub fn execute<D: NativeDriver>(
    engine: &mut CatalogEngine<D>,
    input: &str,
    formatter: &dyn Formatter,
) -> Result<String, ExecuteError> {
    let result = engine
        .query(input)
        .map_err(|e| ExecuteError::Catalog(e.format_with_source(input)))?;
    Ok(formatter.format_rowset(&result))
}

/// Split a script into statements.
///
/// Statements end at `;` or at the end of the script. Semicolons inside quoted
/// literals do not split. Lines starting with `--` or `#` are comments.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for line in script.lines() {
        let trimmed = line.trim_start();
        if quote.is_none() && (trimmed.starts_with("--") || trimmed.starts_with('#')) {
            continue;
        }

        for c in line.chars() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None if c == '\'' || c == '"' => quote = Some(c),
                None if c == ';' => {
                    push_statement(&mut statements, &mut current);
                    continue;
                }
                None => {}
            }
            current.push(c);
        }
        current.push('\n');
    }
    push_statement(&mut statements, &mut current);

    statements
}

fn push_statement(statements: &mut Vec<String>, current: &mut String) {
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    current.clear();
}

/// Get help text for the SHOW dialect.
pub fn get_help_text() -> String {
    r#"jetcat SHOW Dialect
===================

STATEMENTS
----------
SHOW <kind>                                 All rows of a catalog kind
SHOW <kind> WHERE col LIKE 'pattern'        Filter with * wildcards
SHOW <kind> WHERE col = 'value'             Filter by exact value
SHOW <kind> ORDER BY col1, col2             Sort ascending, stable

PATTERNS
--------
*                       Zero or more characters
[*]                     A literal asterisk
anything else           Matches itself (% and _ are not wildcards)

NOTES
-----
Keywords, kinds, and column names are case-insensitive.
String comparisons follow the --collation setting.
Nulls never match a filter and sort first unless --nulls-last.
Use .kinds to list kinds and .columns <kind> to see a schema.
"#
    .to_string()
}
