//! noxc-par - Syntactic analysis for the Nox language.
//!
//! A recursive-descent parser over the token stream of `noxc-lex`,
//! producing a forest of [`ast::Decl`] roots. Statements and declarations
//! are parsed by one grammar rule per method; expressions use precedence
//! climbing against a single operator table (see [`expr`]'s table):
//!
//! ```text
//! tier 14   **                      right-assoc
//! tier 12   *  /  %
//! tier 11   +  -
//! tier  9   &
//! tier  8   ^
//! tier  7   |
//! tier  6   >  >=  <  <=  ==  !=
//! tier  4   and
//! tier  3   or
//! ```
//!
//! The only lookahead beyond the current token is a single peek at the
//! following token, used twice: an identifier followed by `(` starts a
//! call rather than a variable reference, and an identifier followed by
//! `=` in statement position starts an assignment rather than an
//! expression statement.
//!
//! The parser fails on the first violation with a [`ParseError`] carrying
//! the offending token's position. There is no recovery.
//!
//! # Example
//!
//! ```
//! use noxc_lex::Lexer;
//! use noxc_par::{ast, Parser};
//!
//! let tokens = Lexer::new("fn main() -> int { return 0; }").tokenize().unwrap();
//! let program = Parser::new(tokens).parse().unwrap();
//! assert!(matches!(program[0], ast::Decl::Definition(_)));
//! ```

pub mod ast;
mod error;
mod expr;
mod items;
mod stmt;

pub use error::{ParseError, Result};

use noxc_lex::{Token, TokenKind};
use noxc_util::{Span, Symbol};

use ast::Program;

/// The Nox parser.
///
/// Consumes a token stream (as produced by [`noxc_lex::Lexer::tokenize`],
/// terminated by an `Eof` token) and builds the AST.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.is_empty() {
            tokens.push(Token::new(TokenKind::Eof, Span::DUMMY));
        }
        Self { tokens, pos: 0 }
    }

    /// Parses a complete program: declarations until end of input.
    pub fn parse(mut self) -> Result<Program> {
        let mut decls = Vec::new();
        while !self.at_eof() {
            decls.push(self.parse_declaration()?);
        }
        Ok(decls)
    }

    // ------------------------------------------------------------------
    // Token-stream helpers
    // ------------------------------------------------------------------

    /// The current token. The stream always ends in `Eof`, so reads past
    /// the end saturate on the final token.
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// The token after the current one; the one-token lookahead.
    pub(crate) fn next_kind(&self) -> &TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    pub(crate) fn at_eof(&self) -> bool {
        *self.peek_kind() == TokenKind::Eof
    }

    /// Consumes and returns the current token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.at_eof() {
            self.pos += 1;
        }
        token
    }

    /// True if the current token has exactly this kind.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consumes the current token if it has exactly this kind.
    pub(crate) fn matches(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of the given kind or fails with `message`.
    pub(crate) fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }

    /// True if the current token is an identifier.
    pub(crate) fn check_ident(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Ident(_))
    }

    /// Consumes an identifier, returning its symbol and span.
    pub(crate) fn expect_ident(&mut self, message: &str) -> Result<(Symbol, Span)> {
        if let TokenKind::Ident(name) = *self.peek_kind() {
            let token = self.advance();
            Ok((name, token.span))
        } else {
            Err(self.error(message))
        }
    }

    /// A parse error at the current token.
    pub(crate) fn error(&self, message: &str) -> ParseError {
        ParseError::new(message, self.peek().span)
    }
}

/// Lexes and parses a source buffer in one step.
///
/// Convenience for callers that do not need to observe the token stream;
/// lexical errors surface as a [`ParseError`] carrying the same position
/// and message.
pub fn parse_source(source: &str) -> Result<Program> {
    let tokens = noxc_lex::Lexer::new(source)
        .tokenize()
        .map_err(|e| ParseError::new(e.to_string(), e.span()))?;
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::*;

    #[test]
    fn test_parse_empty_program() {
        let program = parse_source("").unwrap();
        assert!(program.is_empty());
    }

    #[test]
    fn test_declarations_in_source_order() {
        let program = parse_source(
            "extern fn puts(s: str) -> int;\n\
             fn helper() { }\n\
             fn main() -> int { return 0; }\n",
        )
        .unwrap();
        let names: Vec<&str> = program
            .iter()
            .map(|d| d.prototype().name.as_str())
            .collect();
        assert_eq!(names, ["puts", "helper", "main"]);
    }

    #[test]
    fn test_garbage_at_top_level() {
        let err = parse_source("return 1;").unwrap_err();
        assert_eq!(err.message, "Expected declaration (e.g. 'fn')");
        assert_eq!((err.span.line, err.span.column), (1, 1));
    }

    #[test]
    fn test_error_position_points_at_offending_token() {
        let err = parse_source("fn main() { let = 3; }").unwrap_err();
        assert_eq!(err.message, "Expected identifier");
        assert_eq!((err.span.line, err.span.column), (1, 17));
    }

    #[test]
    fn test_missing_semicolon_after_prototype() {
        let err = parse_source("fn f() -> int fn g() { }").unwrap_err();
        assert_eq!(err.message, "Expected ';' after function prototype");
    }

    #[test]
    fn test_parsed_expressions_are_untyped() {
        let program = parse_source("fn main() -> int { return 1 + 2; }").unwrap();
        let Decl::Definition(def) = &program[0] else {
            panic!("expected definition");
        };
        let Stmt::Return(ret) = &def.body.stmts[0] else {
            panic!("expected return");
        };
        let value = ret.value.as_ref().unwrap();
        assert_eq!(value.ty, noxc_util::Ty::Unknown);
    }
}
