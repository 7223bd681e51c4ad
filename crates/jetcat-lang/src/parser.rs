//! Recursive descent parser for the SHOW dialect.
//!
//! ```text
//! SHOW <kind> [WHERE <column> (LIKE | =) <quoted>] [ORDER BY <column> (, <column>)*] [;]
//! ```

use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::{Lexer, SpannedToken, Token};
use crate::span::{Span, Spanned};
use jetcat_types::ObjectKind;

/// Parser for SHOW statements.
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    source: &'source str,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            lexer: Lexer::new(source),
            source,
        }
    }

    /// Parse a complete statement.
    pub fn parse_statement(&mut self) -> Result<ParsedStatement, ParseError> {
        let show = self.next_token("'SHOW'")?;
        if show.token != Token::Show {
            return Err(ParseError::malformed(
                format!("expected 'SHOW', found {}", show.token),
                show.span,
            )
            .with_hint("catalog statements have the form SHOW <object kind>"));
        }

        let kind_tok = self.next_token("object kind")?;
        let kind = self.resolve_kind(&kind_tok)?;
        let mut end_span = kind_tok.span;

        let predicate = match self.eat(&Token::Where)? {
            Some(where_tok) => {
                let predicate = self.parse_predicate(kind, where_tok.span)?;
                end_span = predicate.pattern.span;
                Some(predicate)
            }
            None => None,
        };

        let order_by = match self.eat(&Token::Order)? {
            Some(order_tok) => {
                let order_by = self.parse_order_by(kind, order_tok.span)?;
                end_span = order_by.span;
                Some(order_by)
            }
            None => None,
        };

        if let Some(semi) = self.eat(&Token::Semicolon)? {
            end_span = semi.span;
        }

        self.expect_end(order_by.is_some())?;

        Ok(ParsedStatement {
            kind,
            predicate,
            order_by,
            span: show.span.merge(end_span),
        })
    }

    /// Map the token after SHOW to an object kind.
    fn resolve_kind(&mut self, tok: &SpannedToken) -> Result<ObjectKind, ParseError> {
        if let Some(span) = self.word_with_invalid_tail(tok) {
            let word = self.slice(span);
            return Err(ParseError::unknown_object_kind(word, span));
        }

        let keyword = match &tok.token {
            Token::Ident(name) | Token::QuotedIdent(name) => name.as_str(),
            _ => self.slice(tok.span),
        };
        ObjectKind::from_keyword(keyword)
            .ok_or_else(|| ParseError::unknown_object_kind(keyword, tok.span))
    }

    /// The whole typed word when untokenizable input directly follows an
    /// identifier (`tablés` stops lexing at `é`).
    fn word_with_invalid_tail(&mut self, tok: &SpannedToken) -> Option<Span> {
        if !matches!(tok.token, Token::Ident(_)) {
            return None;
        }
        self.lexer.peek();
        let invalid = self.lexer.invalid()?;
        if invalid.start != tok.span.end {
            return None;
        }
        let rest = self.source.get(tok.span.start..)?;
        let len = rest
            .find(|c: char| c.is_whitespace() || c == ';' || c == ',')
            .unwrap_or(rest.len());
        Some(Span::new(tok.span.start, tok.span.start + len))
    }

    /// Parse `<column> (LIKE | =) <quoted>` after WHERE.
    fn parse_predicate(
        &mut self,
        kind: ObjectKind,
        where_span: Span,
    ) -> Result<Predicate, ParseError> {
        let column_tok = self.next_token("column name after WHERE")?;
        let column = self.resolve_column(kind, &column_tok)?;

        let op = self.next_token("LIKE or '='")?;
        let comparison = match op.token {
            Token::Like => Comparison::Like,
            Token::Eq => Comparison::Equals,
            other => {
                return Err(ParseError::malformed(
                    format!("expected LIKE or '=' after {}, found {}", column.name, other),
                    op.span,
                )
                .with_hint("only LIKE and = comparisons are supported"))
            }
        };

        let pattern = self.parse_quoted_literal(comparison)?;

        if let Some(tok) = self.peek_token()? {
            if matches!(tok.token, Token::And | Token::Or) {
                return Err(ParseError::malformed(
                    "only a single WHERE predicate is supported",
                    where_span.merge(tok.span),
                )
                .with_hint("drop the AND/OR condition and filter the returned rows instead"));
            }
        }

        Ok(Predicate {
            column,
            comparison,
            pattern,
        })
    }

    /// Parse the quoted pattern or value of a predicate.
    fn parse_quoted_literal(
        &mut self,
        comparison: Comparison,
    ) -> Result<Spanned<String>, ParseError> {
        let what = match comparison {
            Comparison::Like => "quoted pattern after LIKE",
            Comparison::Equals => "quoted value after '='",
        };
        let tok = self.next_token(what)?;
        match tok.token {
            Token::StringSingle(s) | Token::String(s) => Ok(Spanned::new(s, tok.span)),
            Token::Int(i) => Err(ParseError::malformed(
                format!("expected {}, found number {}", what, i),
                tok.span,
            )
            .with_hint(format!("quote the value: '{}'", i))),
            other => {
                let err =
                    ParseError::malformed(format!("expected {}, found {}", what, other), tok.span);
                Err(match comparison {
                    Comparison::Like => err.with_hint("quote the pattern, e.g. 'PK*'"),
                    Comparison::Equals => err,
                })
            }
        }
    }

    /// Parse `BY <column> (, <column>)*` after ORDER.
    fn parse_order_by(
        &mut self,
        kind: ObjectKind,
        order_span: Span,
    ) -> Result<OrderSpec, ParseError> {
        let by = self.next_token("'BY' after ORDER")?;
        if by.token != Token::By {
            return Err(ParseError::malformed(
                format!("expected 'BY' after ORDER, found {}", by.token),
                by.span,
            ));
        }

        let mut columns = Vec::new();
        let mut end_span = by.span;

        loop {
            let tok = self.next_token("column name in ORDER BY")?;
            let column = self.resolve_column(kind, &tok)?;
            end_span = column.span;
            columns.push(column);

            match self.peek_token()? {
                Some(SpannedToken {
                    token: Token::Asc | Token::Desc,
                    span,
                }) => {
                    return Err(ParseError::malformed(
                        "sort direction is not supported in ORDER BY",
                        span,
                    )
                    .with_hint("remove ASC/DESC; rows are always sorted ascending"));
                }
                Some(SpannedToken {
                    token: Token::Comma,
                    ..
                }) => {
                    self.next_token("','")?;
                }
                _ => break,
            }
        }

        Ok(OrderSpec {
            columns,
            span: order_span.merge(end_span),
        })
    }

    /// Resolve an identifier token against the schema of `kind`.
    fn resolve_column(&self, kind: ObjectKind, tok: &SpannedToken) -> Result<ColumnRef, ParseError> {
        match &tok.token {
            Token::Ident(name) | Token::QuotedIdent(name) => {
                ColumnRef::resolve(kind, name, tok.span)
                    .ok_or_else(|| ParseError::unknown_column(kind, name, tok.span))
            }
            other => Err(ParseError::malformed(
                format!("expected column name, found {}", other),
                tok.span,
            )),
        }
    }

    /// Fail if anything follows the statement.
    fn expect_end(&mut self, has_order_by: bool) -> Result<(), ParseError> {
        match self.peek_token()? {
            None => Ok(()),
            Some(tok) => {
                let err = ParseError::malformed(
                    format!("unexpected {} after end of statement", tok.token),
                    tok.span,
                );
                Err(match tok.token {
                    Token::Where if has_order_by => err.with_hint("WHERE must come before ORDER BY"),
                    Token::Show => err.with_hint("only one statement is allowed per call"),
                    _ => err,
                })
            }
        }
    }

    /// Consume the next token if it equals `expected`.
    fn eat(&mut self, expected: &Token) -> Result<Option<SpannedToken>, ParseError> {
        match self.peek_token()? {
            Some(tok) if &tok.token == expected => Ok(self.lexer.next_token()),
            _ => Ok(None),
        }
    }

    /// Peek at the next token, surfacing untokenizable input as an error.
    fn peek_token(&mut self) -> Result<Option<SpannedToken>, ParseError> {
        let tok = self.lexer.peek().cloned();
        if tok.is_none() {
            self.check_invalid()?;
        }
        Ok(tok)
    }

    /// Get the next token or error at end of input.
    fn next_token(&mut self, expected: &str) -> Result<SpannedToken, ParseError> {
        match self.lexer.next_token() {
            Some(tok) => Ok(tok),
            None => {
                self.check_invalid()?;
                Err(ParseError::malformed(
                    format!("unexpected end of input, expected {}", expected),
                    Span::end_of(self.source),
                ))
            }
        }
    }

    fn check_invalid(&self) -> Result<(), ParseError> {
        match self.lexer.invalid() {
            Some(span) => Err(ParseError::malformed(
                format!("unexpected input '{}'", self.slice(span)),
                span,
            )),
            None => Ok(()),
        }
    }

    fn slice(&self, span: Span) -> &'source str {
        self.source.get(span.start..span.end).unwrap_or_default()
    }
}

/// Parse a source string into a statement.
pub fn parse(source: &str) -> Result<ParsedStatement, ParseError> {
    let mut parser = Parser::new(source);
    parser.parse_statement()
}
