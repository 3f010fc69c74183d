//! Top-level declarations: `extern` prototypes and function definitions.

use noxc_lex::TokenKind;
use noxc_util::Ty;

use crate::ast::{Decl, Definition, Param, Prototype};
use crate::{Parser, Result};

impl Parser {
    /// `declaration := "extern" "fn" prototype ";"`
    /// `            |  "fn" (prototype ";" | prototype block)`
    pub(crate) fn parse_declaration(&mut self) -> Result<Decl> {
        if self.matches(&TokenKind::Extern) {
            self.consume(TokenKind::Fn, "Expected 'fn' after 'extern'")?;
            let mut proto = self.parse_prototype()?;
            self.consume(TokenKind::Semicolon, "Expected ';' after extern declaration")?;
            proto.is_extern = true;
            return Ok(Decl::Prototype(proto));
        }

        if self.matches(&TokenKind::Fn) {
            return self.parse_function();
        }

        Err(self.error("Expected declaration (e.g. 'fn')"))
    }

    /// The part after `fn`: a definition when a `{` follows the
    /// signature, otherwise a forward prototype terminated by `;`.
    fn parse_function(&mut self) -> Result<Decl> {
        let proto = self.parse_prototype()?;

        if self.check(&TokenKind::LBrace) {
            let body = self.parse_block()?;
            let span = proto.span.to(body.span);
            return Ok(Decl::Definition(Definition { proto, body, span }));
        }

        self.consume(TokenKind::Semicolon, "Expected ';' after function prototype")?;
        Ok(Decl::Prototype(proto))
    }

    /// `prototype := IDENT "(" paramList? ")" ("->" type)?`
    ///
    /// The `...` marker may only close the parameter list; anything
    /// between it and `)` fails on the `)` consume below. A missing
    /// `-> T` clause means the function returns `Void`.
    fn parse_prototype(&mut self) -> Result<Prototype> {
        let (name, name_span) = self.expect_ident("Expected function name")?;
        self.consume(TokenKind::LParen, "Expected '(' after function name")?;

        let mut params = Vec::new();
        let mut is_vararg = false;

        if !self.check(&TokenKind::RParen) {
            loop {
                if self.matches(&TokenKind::Ellipsis) {
                    is_vararg = true;
                    break;
                }

                params.push(self.parse_parameter()?);

                if !self.matches(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RParen, "Expected ')' after parameters")?;

        let mut ret_ty = Ty::Void;
        if self.matches(&TokenKind::Arrow) {
            ret_ty = self.parse_type("Expected a type after '->' in function prototype")?;
        }

        Ok(Prototype {
            name,
            params,
            ret_ty,
            is_extern: false,
            is_vararg,
            span: name_span,
        })
    }

    /// `param := IDENT (":" type)? ("=" expression)?`
    ///
    /// Any mix of defaulted and non-defaulted parameters parses; the
    /// defaults-are-a-suffix rule is enforced by the analyzer.
    fn parse_parameter(&mut self) -> Result<Param> {
        let (name, span) = self.expect_ident("Expected identifier")?;

        let mut ty = Ty::Unknown;
        if self.matches(&TokenKind::Colon) {
            ty = self.parse_type("Expected a type after ':' in parameter")?;
        }

        let mut init = None;
        if self.matches(&TokenKind::Assign) {
            init = Some(self.parse_expression()?);
        }

        Ok(Param {
            name,
            ty,
            init,
            span,
        })
    }

    /// `type := "int" | "bool" | "str"`
    pub(crate) fn parse_type(&mut self, message: &str) -> Result<Ty> {
        let ty = match self.peek_kind() {
            TokenKind::KwInt => Ty::Int,
            TokenKind::KwBool => Ty::Bool,
            TokenKind::KwStr => Ty::Str,
            _ => return Err(self.error(message)),
        };
        self.advance();
        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_source;
    use noxc_util::Symbol;

    fn prototype_of(source: &str) -> Prototype {
        let program = parse_source(source).unwrap();
        program[0].prototype().clone()
    }

    #[test]
    fn test_extern_prototype() {
        let proto = prototype_of("extern fn printf(fmt: str, ...) -> int;");
        assert_eq!(proto.name, Symbol::intern("printf"));
        assert!(proto.is_extern);
        assert!(proto.is_vararg);
        assert_eq!(proto.ret_ty, Ty::Int);
        assert_eq!(proto.params.len(), 1);
        assert_eq!(proto.params[0].ty, Ty::Str);
    }

    #[test]
    fn test_forward_prototype_is_not_extern() {
        let proto = prototype_of("fn later(x: int) -> int;");
        assert!(!proto.is_extern);
        assert!(!proto.is_vararg);
    }

    #[test]
    fn test_return_type_defaults_to_void() {
        let proto = prototype_of("fn log_line(msg: str) { }");
        assert_eq!(proto.ret_ty, Ty::Void);
    }

    #[test]
    fn test_parameter_forms() {
        let proto = prototype_of("fn f(a, b: int, c = 3, d: bool = true) { }");
        assert_eq!(proto.params.len(), 4);
        assert_eq!(proto.params[0].ty, Ty::Unknown);
        assert!(proto.params[0].init.is_none());
        assert_eq!(proto.params[1].ty, Ty::Int);
        assert!(proto.params[2].init.is_some());
        assert_eq!(proto.params[2].ty, Ty::Unknown);
        assert_eq!(proto.params[3].ty, Ty::Bool);
        assert!(proto.params[3].init.is_some());
    }

    #[test]
    fn test_varargs_only_parameter_list() {
        let proto = prototype_of("extern fn trace(...);");
        assert!(proto.is_vararg);
        assert!(proto.params.is_empty());
        assert_eq!(proto.ret_ty, Ty::Void);
    }

    #[test]
    fn test_varargs_must_be_last() {
        let err = parse_source("extern fn bad(..., x: int);").unwrap_err();
        assert_eq!(err.message, "Expected ')' after parameters");
    }

    #[test]
    fn test_bad_return_type() {
        let err = parse_source("fn f() -> banana { }").unwrap_err();
        assert_eq!(
            err.message,
            "Expected a type after '->' in function prototype"
        );
    }

    #[test]
    fn test_bad_parameter_type() {
        let err = parse_source("fn f(x: void) { }").unwrap_err();
        assert_eq!(err.message, "Expected a type after ':' in parameter");
    }

    #[test]
    fn test_prototype_span_points_at_name() {
        let proto = prototype_of("fn locate() { }");
        assert_eq!((proto.span.line, proto.span.column), (1, 4));
    }
}
