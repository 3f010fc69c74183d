//! The scanner.

use noxc_util::{Span, Symbol};

use crate::cursor::Cursor;
use crate::error::{LexError, Result};
use crate::token::{keyword_from_ident, Token, TokenKind};

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// The Nox lexer.
///
/// Create one per source buffer and call [`Lexer::tokenize`] to consume
/// it. The returned stream is terminated by a [`TokenKind::Eof`] token.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    /// Byte offset where the current token started.
    token_start: usize,
    /// Line of the current token's first character.
    token_line: u32,
    /// Column of the current token's first character.
    token_column: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
            token_line: 1,
            token_column: 1,
        }
    }

    /// Scans the whole input.
    ///
    /// Returns all tokens including the trailing `Eof`, or the first
    /// lexical error.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Scans a single token.
    fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia();

        self.token_start = self.cursor.position();
        self.token_line = self.cursor.line();
        self.token_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Ok(self.token(TokenKind::Eof));
        }

        let c = self.cursor.bump();
        let kind = match c {
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '+' => TokenKind::Plus,
            '-' => {
                if self.cursor.eat('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.cursor.eat('*') {
                    TokenKind::StarStar
                } else {
                    TokenKind::Star
                }
            }
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '~' => TokenKind::Tilde,
            '^' => TokenKind::Caret,
            '&' => TokenKind::Amp,
            '|' => TokenKind::Pipe,
            '=' => {
                if self.cursor.eat('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.cursor.eat('=') {
                    TokenKind::Ne
                } else {
                    TokenKind::Not
                }
            }
            '<' => {
                if self.cursor.eat('=') {
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.cursor.eat('=') {
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            ':' => TokenKind::Colon,
            '.' => {
                if self.cursor.eat('.') && self.cursor.eat('.') {
                    TokenKind::Ellipsis
                } else {
                    return Err(LexError::UnexpectedCharacter {
                        ch: '.',
                        span: self.span(),
                    });
                }
            }
            '"' => self.lex_string()?,
            c if c.is_ascii_digit() => self.lex_number(),
            c if is_ident_start(c) => self.lex_identifier(),
            c => {
                return Err(LexError::UnexpectedCharacter {
                    ch: c,
                    span: self.span(),
                })
            }
        };

        Ok(self.token(kind))
    }

    /// Skips whitespace and `// …` line comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.cursor.bump();
                }
                '/' if self.cursor.peek(1) == '/' => {
                    while !self.cursor.is_at_end() && self.cursor.current() != '\n' {
                        self.cursor.bump();
                    }
                }
                _ => return,
            }
        }
    }

    /// Scans the rest of an identifier, then consults the keyword table.
    fn lex_identifier(&mut self) -> TokenKind {
        while is_ident_continue(self.cursor.current()) {
            self.cursor.bump();
        }
        let text = self.cursor.slice_from(self.token_start);
        keyword_from_ident(text).unwrap_or_else(|| TokenKind::Ident(Symbol::intern(text)))
    }

    /// Scans the rest of a number: `[0-9]+(\.[0-9]+)?`.
    ///
    /// The lexeme is kept verbatim; Nox numbers are integers and the
    /// parser produces the value.
    fn lex_number(&mut self) -> TokenKind {
        while self.cursor.current().is_ascii_digit() {
            self.cursor.bump();
        }
        if self.cursor.current() == '.' && self.cursor.peek(1).is_ascii_digit() {
            self.cursor.bump();
            while self.cursor.current().is_ascii_digit() {
                self.cursor.bump();
            }
        }
        TokenKind::Number(Symbol::intern(self.cursor.slice_from(self.token_start)))
    }

    /// Scans a string literal. The opening quote is already consumed; the
    /// stored value excludes both quotes. Strings may span lines.
    fn lex_string(&mut self) -> Result<TokenKind> {
        let content_start = self.cursor.position();

        while !self.cursor.is_at_end() && self.cursor.current() != '"' {
            self.cursor.bump();
        }

        if self.cursor.is_at_end() {
            return Err(LexError::UnterminatedString { span: self.span() });
        }

        let value = self.cursor.slice_from(content_start);
        self.cursor.bump();

        Ok(TokenKind::Str(Symbol::intern(value)))
    }

    /// The span of the token being scanned, up to the cursor.
    fn span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_line,
            self.token_column,
        )
    }

    fn token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   \t\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_function_header() {
        assert_eq!(
            kinds("fn add(a: int, b: int) -> int"),
            vec![
                TokenKind::Fn,
                TokenKind::Ident(Symbol::intern("add")),
                TokenKind::LParen,
                TokenKind::Ident(Symbol::intern("a")),
                TokenKind::Colon,
                TokenKind::KwInt,
                TokenKind::Comma,
                TokenKind::Ident(Symbol::intern("b")),
                TokenKind::Colon,
                TokenKind::KwInt,
                TokenKind::RParen,
                TokenKind::Arrow,
                TokenKind::KwInt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_longest_match_operators() {
        assert_eq!(
            kinds("* ** = == ! != < <= > >= - ->"),
            vec![
                TokenKind::Star,
                TokenKind::StarStar,
                TokenKind::Assign,
                TokenKind::EqEq,
                TokenKind::Not,
                TokenKind::Ne,
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Ge,
                TokenKind::Minus,
                TokenKind::Arrow,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_adjacent_stars_prefer_exponentiation() {
        // "***" is "**" then "*" under longest match.
        assert_eq!(
            kinds("a *** b"),
            vec![
                TokenKind::Ident(Symbol::intern("a")),
                TokenKind::StarStar,
                TokenKind::Star,
                TokenKind::Ident(Symbol::intern("b")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bitwise_and_varargs() {
        assert_eq!(
            kinds("& | ^ ~ % ..."),
            vec![
                TokenKind::Amp,
                TokenKind::Pipe,
                TokenKind::Caret,
                TokenKind::Tilde,
                TokenKind::Percent,
                TokenKind::Ellipsis,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_and_literals() {
        assert_eq!(
            kinds("let ok = true and not false;"),
            vec![
                TokenKind::Let,
                TokenKind::Ident(Symbol::intern("ok")),
                TokenKind::Assign,
                TokenKind::True,
                TokenKind::And,
                TokenKind::Not,
                TokenKind::False,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_lexemes() {
        assert_eq!(
            kinds("0 42 3.14"),
            vec![
                TokenKind::Number(Symbol::intern("0")),
                TokenKind::Number(Symbol::intern("42")),
                TokenKind::Number(Symbol::intern("3.14")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_trailing_dot_is_not_part_of_number() {
        // "7." is the number 7 followed by a stray dot.
        let err = Lexer::new("7.").tokenize().unwrap_err();
        assert!(matches!(
            err,
            LexError::UnexpectedCharacter { ch: '.', .. }
        ));
    }

    #[test]
    fn test_string_value_excludes_quotes() {
        let tokens = Lexer::new("\"hello world\"").tokenize().unwrap();
        assert_eq!(
            tokens[0].kind,
            TokenKind::Str(Symbol::intern("hello world"))
        );
        assert_eq!(tokens[0].span.start, 0);
        assert_eq!(tokens[0].span.end, 13);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("fn main() { \"oops }").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
        assert_eq!(err.span().column, 13);
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("let @ = 1;").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnexpectedCharacter { ch: '@', .. }));
        assert_eq!(err.span().line, 1);
        assert_eq!(err.span().column, 5);
    }

    #[test]
    fn test_lone_dot_is_an_error() {
        let err = Lexer::new("a . b").tokenize().unwrap_err();
        assert!(matches!(
            err,
            LexError::UnexpectedCharacter { ch: '.', .. }
        ));
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("// leading comment\nlet x = 1; // trailing\n// only\n"),
            vec![
                TokenKind::Let,
                TokenKind::Ident(Symbol::intern("x")),
                TokenKind::Assign,
                TokenKind::Number(Symbol::intern("1")),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_token_positions_point_at_first_character() {
        let tokens = Lexer::new("fn main()\n  { }").tokenize().unwrap();
        let positions: Vec<(u32, u32)> =
            tokens.iter().map(|t| (t.span.line, t.span.column)).collect();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 4), (1, 8), (1, 9), (2, 3), (2, 5), (2, 6)]
        );
    }

    #[test]
    fn test_division_is_not_a_comment() {
        assert_eq!(
            kinds("a / b"),
            vec![
                TokenKind::Ident(Symbol::intern("a")),
                TokenKind::Slash,
                TokenKind::Ident(Symbol::intern("b")),
                TokenKind::Eof,
            ]
        );
    }
}
