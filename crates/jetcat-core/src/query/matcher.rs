//! Predicate evaluation for SHOW filters.
//!
//! LIKE patterns use the engine's narrow wildcard dialect: `*` matches zero or
//! more characters and `[*]` matches a literal asterisk. Every other
//! character, including `%`, `_`, `?` and a lone `[`, matches itself.

use jetcat_lang::Comparison;
use jetcat_types::Value;

use crate::config::Collation;

/// Evaluates WHERE predicates under a fixed collation.
#[derive(Debug, Clone, Copy)]
pub struct PatternMatcher {
    collation: Collation,
}

/// One element of a compiled LIKE pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PatternItem {
    /// `*`
    Any,
    Char(char),
}

impl PatternMatcher {
    /// Create a matcher using the given collation.
    pub fn new(collation: Collation) -> Self {
        Self { collation }
    }

    /// The collation strings are compared under.
    pub fn collation(&self) -> Collation {
        self.collation
    }

    /// Evaluate a predicate against a row value.
    ///
    /// Null never matches. Integers and booleans are compared through their
    /// canonical text (`12`, `True`).
    pub fn matches(&self, value: &Value, pattern: &str, comparison: Comparison) -> bool {
        match value.to_text() {
            Some(text) => self.matches_str(&text, pattern, comparison),
            None => false,
        }
    }

    /// Evaluate a predicate against a string.
    pub fn matches_str(&self, value: &str, pattern: &str, comparison: Comparison) -> bool {
        match comparison {
            Comparison::Equals => self.collation.equals(value, pattern),
            Comparison::Like => self.like(value, pattern),
        }
    }

    /// Match a string against a `*` wildcard pattern.
    ///
    /// The value and the pattern literals are folded under the collation
    /// before matching, so a pattern without wildcards agrees with `=`.
    pub fn like(&self, value: &str, pattern: &str) -> bool {
        let pattern = self.compile(pattern);
        let chars = self.collation.fold(value);

        let mut vi = 0;
        let mut pi = 0;
        // Position of the last `*` seen and the value index it currently absorbs up to.
        let mut backtrack: Option<(usize, usize)> = None;

        while vi < chars.len() {
            match pattern.get(pi) {
                Some(PatternItem::Any) => {
                    backtrack = Some((pi, vi));
                    pi += 1;
                }
                Some(PatternItem::Char(c)) if *c == chars[vi] => {
                    pi += 1;
                    vi += 1;
                }
                _ => match backtrack {
                    Some((star, absorbed)) => {
                        pi = star + 1;
                        vi = absorbed + 1;
                        backtrack = Some((star, absorbed + 1));
                    }
                    None => return false,
                },
            }
        }

        pattern[pi..].iter().all(|item| *item == PatternItem::Any)
    }

    /// Split a pattern into wildcard and folded literal items.
    fn compile(&self, pattern: &str) -> Vec<PatternItem> {
        let mut items = Vec::with_capacity(pattern.len());
        let mut literal = String::new();
        let mut rest = pattern;

        while let Some(c) = rest.chars().next() {
            if let Some(after) = rest.strip_prefix("[*]") {
                literal.push('*');
                rest = after;
                continue;
            }
            if c == '*' {
                self.push_literal(&mut items, &mut literal);
                items.push(PatternItem::Any);
            } else {
                literal.push(c);
            }
            rest = &rest[c.len_utf8()..];
        }
        self.push_literal(&mut items, &mut literal);

        items
    }

    fn push_literal(&self, items: &mut Vec<PatternItem>, literal: &mut String) {
        items.extend(self.collation.fold(literal).into_iter().map(PatternItem::Char));
        literal.clear();
    }
}
