//! noxc-lex - Lexical analysis for the Nox language.
//!
//! The lexer transforms source text into a stream of [`Token`]s. It is a
//! direct-coded scanner: an explicit [`Cursor`](cursor::Cursor) walks the
//! characters left to right and each token class has its own small lexing
//! routine, dispatched on the first character.
//!
//! Whitespace and `// …` line comments are consumed between tokens and
//! never appear in the output. Every emitted token carries a
//! [`Span`](noxc_util::Span) whose line/column point at the token's first
//! character.
//!
//! Recognition is longest-match with single-character fallback: `**`
//! beats `*`, `==` beats `=`, `->` beats `-`, `...` is the only token
//! starting with `.`. Identifiers are checked against the keyword table
//! after scanning.
//!
//! The lexer fails on the first error ([`LexError`]): an unterminated
//! string literal or a character that starts no token. For every input it
//! either produces a finite token list terminated by
//! [`TokenKind::Eof`] or reports such an error; it never loops.
//!
//! # Example
//!
//! ```
//! use noxc_lex::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("let x = 42;").tokenize().unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
//! assert!(matches!(kinds[0], TokenKind::Let));
//! assert!(matches!(kinds.last(), Some(TokenKind::Eof)));
//! ```

pub mod cursor;
mod error;
mod lexer;
mod token;

pub use error::{LexError, Result};
pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token, TokenKind};
