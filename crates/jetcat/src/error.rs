//! Error type for the public API.

use jetcat_lang::{ParseError, Span};
use thiserror::Error;

/// Any failure of [`CatalogEngine::query`](crate::CatalogEngine::query).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The statement was rejected before anything was fetched.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    /// The statement parsed but could not be executed.
    #[error("execution error: {0}")]
    Execution(#[from] jetcat_core::Error),
}

impl CatalogError {
    /// Format the error with source context.
    ///
    /// Parse errors point at the offending text; execution errors have no
    /// position and render as a single line.
    pub fn format_with_source(&self, source: &str) -> String {
        match self {
            CatalogError::Parse(e) => e.format_with_source(source),
            CatalogError::Execution(e) => format!("error: {}", e),
        }
    }

    /// Get the span of the error, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            CatalogError::Parse(e) => Some(e.span),
            CatalogError::Execution(_) => None,
        }
    }

    /// Whether the caller's statement was at fault.
    pub fn is_parse(&self) -> bool {
        matches!(self, CatalogError::Parse(_))
    }
}
