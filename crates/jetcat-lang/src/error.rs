//! Parse error types.

use crate::span::{offset_to_line_col, Span};
use jetcat_types::ObjectKind;
use thiserror::Error;

/// Kinds of parse errors for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The token after SHOW is not a catalog object kind.
    UnknownObjectKind,
    /// A WHERE or ORDER BY column is not in the kind's schema.
    UnknownColumn,
    /// The statement does not follow the SHOW grammar.
    MalformedStatement,
}

/// Error produced while lexing or parsing a SHOW statement.
///
/// Statements that fail to parse never reach the rowset source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// Source span where the error occurred.
    pub span: Span,
    /// Error kind for programmatic handling.
    pub kind: ParseErrorKind,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(message: impl Into<String>, span: Span, kind: ParseErrorKind) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            hint: None,
        }
    }

    /// Create a malformed statement error.
    pub fn malformed(message: impl Into<String>, span: Span) -> Self {
        Self::new(message, span, ParseErrorKind::MalformedStatement)
    }

    /// Create an unknown object kind error naming the offending token.
    pub fn unknown_object_kind(token: &str, span: Span) -> Self {
        Self::new(
            format!("unknown object kind '{}'", token),
            span,
            ParseErrorKind::UnknownObjectKind,
        )
        .with_hint(format!(
            "expected one of: {}",
            ObjectKind::ALL
                .iter()
                .map(|k| k.keyword())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }

    /// Create an unknown column error.
    pub fn unknown_column(kind: ObjectKind, column: &str, span: Span) -> Self {
        Self::new(
            format!("unknown column '{}' for {}", column, kind),
            span,
            ParseErrorKind::UnknownColumn,
        )
        .with_hint(format!(
            "{} has columns: {}",
            kind,
            kind.columns()
                .iter()
                .map(|c| c.name)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }

    /// Add a hint to the error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Format the error with source context.
    pub fn format_with_source(&self, source: &str) -> String {
        let (line, col) = offset_to_line_col(source, self.span.start);
        let mut result = format!("error[{:?}]: {}\n", self.kind, self.message);
        result.push_str(&format!("  --> line {}:{}\n", line, col));

        // Show the source line
        if let Some(source_line) = source.lines().nth(line - 1) {
            result.push_str(&format!("   |\n{:3}| {}\n   |", line, source_line));

            // Caret under the error position
            for _ in 0..col {
                result.push(' ');
            }
            result.push('^');

            // Underline the rest of the span on this line
            let available = (source_line.len() + 1).saturating_sub(col);
            for _ in 1..self.span.len().min(available) {
                result.push('~');
            }
            result.push('\n');
        }

        if let Some(hint) = &self.hint {
            result.push_str(&format!("   = hint: {}\n", hint));
        }

        result
    }
}
