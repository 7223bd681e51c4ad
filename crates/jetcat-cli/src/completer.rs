//! Tab completion for the REPL.

use jetcat::ObjectKind;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

/// jetcat REPL helper with completion support.
#[derive(Default)]
pub struct JetcatHelper;

impl JetcatHelper {
    /// Create a new helper.
    pub fn new() -> Self {
        Self
    }
}

/// Dot-commands for completion.
const DOT_COMMANDS: &[&str] = &[
    ".kinds",
    ".columns",
    ".format",
    ".collation",
    ".stats",
    ".history",
    ".clear",
    ".help",
    ".exit",
    ".quit",
];

/// Completions for the word being typed, given the text before it.
fn candidates(before: &str) -> Vec<String> {
    let tokens: Vec<&str> = before
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    let after_comma = before.trim_end().ends_with(',');

    let kind = match tokens.as_slice() {
        [show, kind, ..] if show.eq_ignore_ascii_case("show") => ObjectKind::from_keyword(kind),
        _ => None,
    };
    let columns = || -> Vec<String> {
        kind.map(|k| k.columns().iter().map(|c| c.name.to_string()).collect())
            .unwrap_or_default()
    };
    let keywords = |words: &[&str]| -> Vec<String> { words.iter().map(|w| w.to_string()).collect() };

    let last = tokens.last().map(|t| t.to_ascii_uppercase());
    let prev = tokens
        .len()
        .checked_sub(2)
        .map(|i| tokens[i].to_ascii_uppercase());

    match last.as_deref() {
        None => keywords(&["SHOW"]),
        Some("SHOW") => ObjectKind::ALL.iter().map(|k| k.keyword().to_string()).collect(),
        Some("WHERE") | Some("BY") => columns(),
        Some("ORDER") => keywords(&["BY"]),
        _ if after_comma => columns(),
        _ if tokens.len() == 2 => keywords(&["WHERE", "ORDER BY"]),
        _ if prev.as_deref() == Some("WHERE") => keywords(&["LIKE", "="]),
        Some(literal) if literal.ends_with('\'') || literal.ends_with('"') => {
            keywords(&["ORDER BY"])
        }
        _ => Vec::new(),
    }
}

impl Completer for JetcatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];

        // Dot commands at start of line
        if line_to_cursor.trim().starts_with('.') && !line_to_cursor.contains(' ') {
            let completions = DOT_COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(line_to_cursor.trim()))
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();
            return Ok((0, completions));
        }

        // Find the start of the current word
        let word_start = line_to_cursor
            .rfind(|c: char| c.is_whitespace() || c == ',')
            .map(|i| i + 1)
            .unwrap_or(0);
        let word = line_to_cursor[word_start..].to_lowercase();

        let completions = candidates(&line_to_cursor[..word_start])
            .into_iter()
            .filter(|c| c.to_lowercase().starts_with(&word))
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();

        Ok((word_start, completions))
    }
}

impl Hinter for JetcatHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for JetcatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: rustyline::highlight::CmdKind) -> bool {
        false
    }
}

impl Validator for JetcatHelper {}

impl Helper for JetcatHelper {}
