//! Lexer for the SHOW dialect using logos.

use std::fmt;

use crate::span::Span;
use logos::Logos;

/// Token types for the SHOW dialect.
///
/// Keywords are case-insensitive, as in the engine's native dialect.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // Statement keywords
    #[token("show", ignore(ascii_case))]
    Show,
    #[token("where", ignore(ascii_case))]
    Where,
    #[token("like", ignore(ascii_case))]
    Like,
    #[token("order", ignore(ascii_case))]
    Order,
    #[token("by", ignore(ascii_case))]
    By,

    // Recognized only to reject them with a useful message
    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("asc", ignore(ascii_case))]
    Asc,
    #[token("desc", ignore(ascii_case))]
    Desc,

    // Operators and punctuation
    #[token("=")]
    Eq,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // Identifier
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Bracket-quoted identifier: [Index]
    #[regex(r"\[[^\]\r\n]+\]", |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    QuotedIdent(String),

    // String literal (single-quoted, '' escapes a quote)
    #[regex(r"'([^']|'')*'", |lex| unquote(lex.slice(), '\''))]
    StringSingle(String),

    // String literal (double-quoted, "" escapes a quote)
    #[regex(r#""([^"]|"")*""#, |lex| unquote(lex.slice(), '"'))]
    String(String),

    // Integer literal
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Show => write!(f, "'SHOW'"),
            Token::Where => write!(f, "'WHERE'"),
            Token::Like => write!(f, "'LIKE'"),
            Token::Order => write!(f, "'ORDER'"),
            Token::By => write!(f, "'BY'"),
            Token::And => write!(f, "'AND'"),
            Token::Or => write!(f, "'OR'"),
            Token::Asc => write!(f, "'ASC'"),
            Token::Desc => write!(f, "'DESC'"),
            Token::Eq => write!(f, "'='"),
            Token::Comma => write!(f, "','"),
            Token::Semicolon => write!(f, "';'"),
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::QuotedIdent(name) => write!(f, "identifier '[{}]'", name),
            Token::StringSingle(s) | Token::String(s) => write!(f, "string '{}'", s),
            Token::Int(i) => write!(f, "number {}", i),
        }
    }
}

/// Strip the surrounding quotes and collapse doubled quotes.
fn unquote(s: &str, quote: char) -> String {
    let inner = &s[1..s.len() - 1];
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        result.push(c);
        if c == quote && chars.peek() == Some(&quote) {
            chars.next();
        }
    }

    result
}

/// A token with its span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Lexer that produces spanned tokens.
///
/// Lexing stops at the first input the dialect cannot tokenize; the offending
/// span is then available from [`Lexer::invalid`].
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, Token>,
    peeked: Option<Option<SpannedToken>>,
    invalid: Option<Span>,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: Token::lexer(source),
            peeked: None,
            invalid: None,
        }
    }

    /// Peek at the next token without consuming it.
    pub fn peek(&mut self) -> Option<&SpannedToken> {
        if self.peeked.is_none() {
            self.peeked = Some(self.next_inner());
        }
        self.peeked.as_ref().and_then(|o| o.as_ref())
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Option<SpannedToken> {
        if let Some(peeked) = self.peeked.take() {
            peeked
        } else {
            self.next_inner()
        }
    }

    fn next_inner(&mut self) -> Option<SpannedToken> {
        if self.invalid.is_some() {
            return None;
        }
        match self.inner.next() {
            Some(Ok(token)) => Some(SpannedToken {
                token,
                span: self.inner.span().into(),
            }),
            Some(Err(())) => {
                self.invalid = Some(self.inner.span().into());
                None
            }
            None => None,
        }
    }

    /// Span of the first untokenizable input, if any was hit.
    pub fn invalid(&self) -> Option<Span> {
        self.invalid
    }

    /// Get the source string.
    pub fn source(&self) -> &'source str {
        self.inner.source()
    }
}

impl Iterator for Lexer<'_> {
    type Item = SpannedToken;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize a source string into a vector of spanned tokens.
///
/// Stops silently at the first invalid input.
pub fn tokenize(source: &str) -> Vec<SpannedToken> {
    Lexer::new(source).collect()
}
