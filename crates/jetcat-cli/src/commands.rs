//! REPL dot-command handling.

use crate::formatter::{self, OutputFormat};
use jetcat::{Collation, ObjectKind};

/// Result of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Exit the REPL.
    Exit,
    /// Output to display.
    Output(String),
    /// Change the output format.
    SetFormat(OutputFormat),
    /// Change the collation for subsequent statements.
    SetCollation(Collation),
    /// Show engine statistics.
    ShowStats,
    /// Show history.
    ShowHistory,
    /// Clear screen.
    Clear,
}

/// Parse and execute a dot-command.
pub fn handle_command(line: &str, format: OutputFormat, collation: Collation) -> CommandResult {
    let line = line.trim();
    let parts: Vec<&str> = line.splitn(2, ' ').collect();
    let command = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim()).filter(|s| !s.is_empty());

    match command.as_str() {
        ".exit" | ".quit" | ".q" => CommandResult::Exit,

        ".help" | ".h" | ".?" => match arg {
            Some("language") | Some("show") => {
                CommandResult::Output(crate::executor::get_help_text())
            }
            _ => CommandResult::Output(get_help()),
        },

        ".clear" | ".cls" => CommandResult::Clear,

        ".kinds" => CommandResult::Output(
            ObjectKind::ALL
                .iter()
                .map(|k| k.keyword())
                .collect::<Vec<_>>()
                .join("\n"),
        ),

        ".columns" | ".schema" => match arg {
            Some(name) => match ObjectKind::from_keyword(name) {
                Some(kind) => {
                    CommandResult::Output(formatter::create_formatter(format).format_schema(kind))
                }
                None => CommandResult::Output(format!(
                    "Unknown object kind '{}'. Use .kinds to list them.",
                    name
                )),
            },
            None => CommandResult::Output("Usage: .columns <kind>".to_string()),
        },

        ".format" => {
            if let Some(fmt) = arg {
                match fmt.to_lowercase().as_str() {
                    "table" => CommandResult::SetFormat(OutputFormat::Table),
                    "json" => CommandResult::SetFormat(OutputFormat::Json),
                    "csv" => CommandResult::SetFormat(OutputFormat::Csv),
                    _ => CommandResult::Output(format!(
                        "Unknown format '{}'. Use: table, json, csv",
                        fmt
                    )),
                }
            } else {
                CommandResult::Output(format!("Current format: {}", format))
            }
        }

        ".collation" => match arg.map(str::to_lowercase).as_deref() {
            Some("binary") => CommandResult::SetCollation(Collation::Binary),
            Some("nocase") => CommandResult::SetCollation(Collation::NoCase),
            Some(other) => CommandResult::Output(format!(
                "Unknown collation '{}'. Use: binary, nocase",
                other
            )),
            None => CommandResult::Output(format!("Current collation: {}", collation_name(collation))),
        },

        ".stats" => CommandResult::ShowStats,

        ".history" => CommandResult::ShowHistory,

        _ => CommandResult::Output(format!("Unknown command: {}", command)),
    }
}

/// Check if a line is a dot-command.
pub fn is_command(line: &str) -> bool {
    line.trim().starts_with('.')
}

/// Name of a collation as typed on the command line.
pub fn collation_name(collation: Collation) -> &'static str {
    match collation {
        Collation::Binary => "binary",
        Collation::NoCase => "nocase",
    }
}

/// Get help text for REPL commands.
fn get_help() -> String {
    r#"REPL Commands
=============

.kinds                List the catalog object kinds
.columns <kind>       Show the column schema of a kind
.format [type]        Get or set output format (table, json, csv)
.collation [name]     Get or set string comparison (binary, nocase)
.stats                Show snapshot size and fetch count
.history              Show statement history
.clear                Clear the screen
.help                 Show this help message
.help language        Show SHOW statement syntax
.exit / .quit         Exit the REPL

Examples:
  SHOW tables
  SHOW indexes WHERE Name LIKE 'PK*'
  SHOW indexcolumns WHERE Index LIKE 'PK*' ORDER BY Index, Ordinal
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str) -> CommandResult {
        handle_command(line, OutputFormat::Csv, Collation::NoCase)
    }

    #[test]
    fn test_is_command() {
        assert!(is_command(".exit"));
        assert!(is_command(".help"));
        assert!(is_command("  .kinds"));
        assert!(!is_command("SHOW tables"));
        assert!(!is_command("hello"));
    }

    #[test]
    fn test_exit_and_clear() {
        assert_eq!(run(".quit"), CommandResult::Exit);
        assert_eq!(run(".EXIT"), CommandResult::Exit);
        assert_eq!(run(".cls"), CommandResult::Clear);
    }

    #[test]
    fn test_kinds_lists_every_keyword() {
        match run(".kinds") {
            CommandResult::Output(text) => {
                assert_eq!(text.lines().count(), ObjectKind::ALL.len());
                assert!(text.lines().any(|l| l == "viewforeignkeys"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_columns() {
        assert_eq!(
            run(".columns views"),
            CommandResult::Output("column,type\nName,text\nDefinition,text\n".to_string())
        );
        match run(".columns view") {
            CommandResult::Output(text) => assert!(text.starts_with("Unknown object kind 'view'")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            run(".columns"),
            CommandResult::Output("Usage: .columns <kind>".to_string())
        );
    }

    #[test]
    fn test_format_and_collation() {
        assert_eq!(run(".format json"), CommandResult::SetFormat(OutputFormat::Json));
        assert_eq!(
            run(".format"),
            CommandResult::Output("Current format: csv".to_string())
        );
        assert_eq!(run(".collation BINARY"), CommandResult::SetCollation(Collation::Binary));
        assert_eq!(
            run(".collation"),
            CommandResult::Output("Current collation: nocase".to_string())
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            run(".connect"),
            CommandResult::Output("Unknown command: .connect".to_string())
        );
    }
}
