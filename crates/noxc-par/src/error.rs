//! Parse errors.

use noxc_util::{Diagnostic, Span};
use thiserror::Error;

/// A syntax error. Parsing stops at the first one.
///
/// The message states what was expected ("Expected ';' after
/// expression"); the span points at the offending token.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Converts into the common diagnostic form for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.message.clone(), self.span)
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
