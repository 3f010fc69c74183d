//! Lexical errors.

use noxc_util::{Diagnostic, Span};
use thiserror::Error;

/// An error produced by the lexer. Lexing stops at the first one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LexError {
    /// A `"` was opened but the input ended before the closing quote.
    #[error("Unterminated string literal")]
    UnterminatedString { span: Span },

    /// A character that starts no token.
    #[error("Unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char, span: Span },
}

impl LexError {
    /// The location of the offending lexeme.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span } => *span,
            LexError::UnexpectedCharacter { span, .. } => *span,
        }
    }

    /// Converts into the common diagnostic form for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string(), self.span())
    }
}

pub type Result<T> = std::result::Result<T, LexError>;
