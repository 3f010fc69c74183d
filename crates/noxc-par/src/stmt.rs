//! Statement parsing.

use noxc_lex::TokenKind;
use noxc_util::Ty;

use crate::ast::{Assign, Block, Expr, ExprKind, If, Return, Stmt, VarDecl, While};
use crate::{Parser, Result};

impl Parser {
    /// `block := "{" statement* "}"`
    ///
    /// Stray `;` tokens between statements are skipped without producing
    /// a node.
    pub(crate) fn parse_block(&mut self) -> Result<Block> {
        let open = self.consume(TokenKind::LBrace, "Expected '{' before block")?;

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_eof() {
            if self.matches(&TokenKind::Semicolon) {
                continue;
            }
            stmts.push(self.parse_statement()?);
        }

        let close = self.consume(TokenKind::RBrace, "Expected '}' after block")?;

        Ok(Block {
            stmts,
            span: open.span.to(close.span),
        })
    }

    /// Dispatches on the current token; an identifier followed by `=` is
    /// the assignment lookahead.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt> {
        if self.check(&TokenKind::Let) {
            return self.parse_var_decl();
        }

        if self.check_ident() && *self.next_kind() == TokenKind::Assign {
            return self.parse_assignment();
        }

        if self.matches(&TokenKind::Return) {
            return self.parse_return();
        }

        if self.matches(&TokenKind::If) {
            return self.parse_if();
        }

        if self.matches(&TokenKind::While) {
            return self.parse_while();
        }

        if self.check(&TokenKind::LBrace) {
            return Ok(Stmt::Block(self.parse_block()?));
        }

        let expr = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "Expected ';' after expression")?;
        Ok(Stmt::Expr(expr))
    }

    /// `"let" IDENT (":" type)? ("=" expression)? ";"`
    ///
    /// Both the annotation and the initializer parse as optional; a
    /// declaration with neither is rejected by the analyzer, not here.
    fn parse_var_decl(&mut self) -> Result<Stmt> {
        let let_token = self.consume(TokenKind::Let, "Expected 'let' before variable declaration")?;
        let (name, _) = self.expect_ident("Expected identifier")?;

        let mut ty = Ty::Unknown;
        if self.matches(&TokenKind::Colon) {
            ty = self.parse_type("Expected a type after ':' in variable declaration")?;
        }

        let mut init = None;
        if self.matches(&TokenKind::Assign) {
            init = Some(self.parse_expression()?);
        }

        let semi = self.consume(TokenKind::Semicolon, "Expected ';' after variable declaration")?;

        Ok(Stmt::VarDecl(VarDecl {
            name,
            ty,
            init,
            span: let_token.span.to(semi.span),
        }))
    }

    /// `IDENT "=" expression ";"` - the target is kept as a `Variable`
    /// expression so the analyzer resolves and types it like any other
    /// reference.
    fn parse_assignment(&mut self) -> Result<Stmt> {
        let (name, name_span) = self.expect_ident("Expected identifier")?;
        self.consume(TokenKind::Assign, "Expected '=' after assignment identifier")?;
        let value = self.parse_expression()?;
        let semi = self.consume(TokenKind::Semicolon, "Expected ';' after assignment")?;

        Ok(Stmt::Assign(Assign {
            target: Expr::new(ExprKind::Variable(name), name_span),
            value,
            span: name_span.to(semi.span),
        }))
    }

    /// `"return" expression? ";"` - the expression is optional; whether
    /// its absence is legal depends on the enclosing function's return
    /// type and is checked by the analyzer.
    fn parse_return(&mut self) -> Result<Stmt> {
        let keyword_span = self.prev_span();

        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let semi = self.consume(TokenKind::Semicolon, "Expected ';' after return")?;

        Ok(Stmt::Return(Return {
            value,
            span: keyword_span.to(semi.span),
        }))
    }

    /// `"if" "(" expression ")" block ("else" block)?`
    fn parse_if(&mut self) -> Result<Stmt> {
        let keyword_span = self.prev_span();

        self.consume(TokenKind::LParen, "Expected '(' before 'if' condition")?;
        let cond = self.parse_expression()?;
        self.consume(TokenKind::RParen, "Expected ')' after 'if' condition")?;

        if !self.check(&TokenKind::LBrace) {
            return Err(self.error("Expected '{' before 'if' body"));
        }
        let then_branch = self.parse_block()?;

        let mut else_branch = None;
        if self.matches(&TokenKind::Else) {
            if !self.check(&TokenKind::LBrace) {
                return Err(self.error("Expected '{' before 'else' body"));
            }
            else_branch = Some(self.parse_block()?);
        }

        let end = else_branch
            .as_ref()
            .map(|b| b.span)
            .unwrap_or(then_branch.span);

        Ok(Stmt::If(If {
            cond,
            then_branch,
            else_branch,
            span: keyword_span.to(end),
        }))
    }

    /// `"while" "(" expression ")" block`
    fn parse_while(&mut self) -> Result<Stmt> {
        let keyword_span = self.prev_span();

        self.consume(TokenKind::LParen, "Expected '(' before 'while' condition")?;
        let cond = self.parse_expression()?;
        self.consume(TokenKind::RParen, "Expected ')' after 'while' condition")?;

        if !self.check(&TokenKind::LBrace) {
            return Err(self.error("Expected '{' before 'while' body"));
        }
        let body = self.parse_block()?;

        Ok(Stmt::While(While {
            cond,
            span: keyword_span.to(body.span),
            body,
        }))
    }

    /// Span of the most recently consumed token (the statement keyword).
    fn prev_span(&self) -> noxc_util::Span {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map(|t| t.span)
            .unwrap_or(noxc_util::Span::DUMMY)
    }
}
