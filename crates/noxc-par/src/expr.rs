//! Expression parsing by precedence climbing.
//!
//! A single table maps each binary-operator token to its operator and
//! precedence tier. The climb loop consumes operators while their tier is
//! at least the caller's threshold; left-associative operators recurse at
//! `tier + 1`, and `**` alone recurses at its own tier, which yields
//! right associativity.
//!
//! Unary operators are parsed before the climb starts. Their operand is
//! parsed at the `**` tier, so exponentiation binds tighter than a unary
//! operator (`-a ** b` is `-(a ** b)`) while every lower tier does not
//! (`-a * b` is `(-a) * b`).

use noxc_lex::TokenKind;

use crate::ast::{BinOp, Expr, ExprKind, UnOp};
use crate::{Parser, Result};

/// Precedence tier of `**`, the highest binary tier.
const PREC_EXP: u8 = 14;

/// The operator table: binary operator and precedence tier for a token,
/// or `None` for tokens that are not binary operators.
fn binary_op(kind: &TokenKind) -> Option<(BinOp, u8)> {
    let entry = match kind {
        TokenKind::StarStar => (BinOp::Exp, PREC_EXP),
        TokenKind::Star => (BinOp::Mul, 12),
        TokenKind::Slash => (BinOp::Div, 12),
        TokenKind::Percent => (BinOp::Rem, 12),
        TokenKind::Plus => (BinOp::Add, 11),
        TokenKind::Minus => (BinOp::Sub, 11),
        TokenKind::Amp => (BinOp::BitAnd, 9),
        TokenKind::Caret => (BinOp::BitXor, 8),
        TokenKind::Pipe => (BinOp::BitOr, 7),
        TokenKind::Gt => (BinOp::Gt, 6),
        TokenKind::Ge => (BinOp::Ge, 6),
        TokenKind::Lt => (BinOp::Lt, 6),
        TokenKind::Le => (BinOp::Le, 6),
        TokenKind::EqEq => (BinOp::Eq, 6),
        TokenKind::Ne => (BinOp::Ne, 6),
        TokenKind::And => (BinOp::And, 4),
        TokenKind::Or => (BinOp::Or, 3),
        _ => return None,
    };
    Some(entry)
}

impl Parser {
    /// `expression := unary (binop precedence-climb)*`
    pub(crate) fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_expression_prec(0)
    }

    /// The climb loop: consumes operators of tier >= `min_prec`.
    fn parse_expression_prec(&mut self, min_prec: u8) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;

        while let Some((op, prec)) = binary_op(self.peek_kind()) {
            if prec < min_prec {
                break;
            }
            self.advance();

            // `**` recurses at its own tier for right associativity.
            let next_min = if op == BinOp::Exp { prec } else { prec + 1 };
            let rhs = self.parse_expression_prec(next_min)?;

            let span = lhs.span.to(rhs.span);
            lhs = Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }

        Ok(lhs)
    }

    /// `unary := ("+"|"-"|"not"|"~") unary-operand | primary`
    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Plus => UnOp::Pos,
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Not => UnOp::Not,
            TokenKind::Tilde => UnOp::BitNot,
            _ => return self.parse_primary(),
        };
        let op_token = self.advance();

        let operand = self.parse_expression_prec(PREC_EXP)?;
        let span = op_token.span.to(operand.span);

        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// `primary := NUMBER | STRING | "true" | "false" | IDENT
    ///           | IDENT "(" argList? ")" | "(" expression ")"`
    ///
    /// An identifier followed by `(` is a call; this is the one-token
    /// lookahead of the grammar.
    fn parse_primary(&mut self) -> Result<Expr> {
        match *self.peek_kind() {
            TokenKind::Number(lexeme) => {
                let token = self.advance();
                // The lexeme is [0-9]+(\.[0-9]+)?; Nox numbers are
                // integers, so the fractional part truncates.
                let value = lexeme
                    .as_str()
                    .parse::<f64>()
                    .map_err(|_| self.error("Invalid number literal"))?
                    as i64;
                Ok(Expr::new(ExprKind::Number(value), token.span))
            }
            TokenKind::Str(value) => {
                let token = self.advance();
                Ok(Expr::new(ExprKind::Str(value), token.span))
            }
            TokenKind::True => {
                let token = self.advance();
                Ok(Expr::new(ExprKind::Bool(true), token.span))
            }
            TokenKind::False => {
                let token = self.advance();
                Ok(Expr::new(ExprKind::Bool(false), token.span))
            }
            TokenKind::Ident(_) => {
                if *self.next_kind() == TokenKind::LParen {
                    return self.parse_call();
                }
                let (name, span) = self.expect_ident("Expected identifier")?;
                Ok(Expr::new(ExprKind::Variable(name), span))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(TokenKind::RParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            _ => Err(self.error("Expected expression")),
        }
    }

    /// `IDENT "(" argList? ")"` with `argList := expression ("," expression)*`
    fn parse_call(&mut self) -> Result<Expr> {
        let (callee, callee_span) = self.expect_ident("Expected identifier")?;
        self.consume(TokenKind::LParen, "Expected '(' before function call args")?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.matches(&TokenKind::Comma) {
                    break;
                }
            }
        }

        let close = self.consume(TokenKind::RParen, "Expected ')' after function call args")?;

        Ok(Expr::new(
            ExprKind::Call { callee, args },
            callee_span.to(close.span),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noxc_util::Symbol;

    /// Parses a single expression by wrapping it in a function body.
    fn expr_of(source: &str) -> Expr {
        let program =
            crate::parse_source(&format!("fn main() {{ probe({}); }}", source)).unwrap();
        let crate::ast::Decl::Definition(def) = program.into_iter().next().unwrap() else {
            panic!("expected definition");
        };
        let crate::ast::Stmt::Expr(expr) = def.body.stmts.into_iter().next().unwrap() else {
            panic!("expected expression statement");
        };
        let ExprKind::Call { mut args, .. } = expr.kind else {
            panic!("expected probe call");
        };
        args.remove(0)
    }

    /// Renders the expression tree with full parenthesization.
    fn shape(expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Number(n) => n.to_string(),
            ExprKind::Bool(b) => b.to_string(),
            ExprKind::Str(s) => format!("{:?}", s.as_str()),
            ExprKind::Variable(name) => name.to_string(),
            ExprKind::Call { callee, args } => {
                let args: Vec<String> = args.iter().map(shape).collect();
                format!("{}({})", callee, args.join(", "))
            }
            ExprKind::Binary { op, lhs, rhs } => {
                format!("({} {:?} {})", shape(lhs), op, shape(rhs))
            }
            ExprKind::Unary { op, operand } => format!("({:?} {})", op, shape(operand)),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        assert_eq!(shape(&expr_of("a + b * c")), "(a Add (b Mul c))");
        assert_eq!(shape(&expr_of("a * b + c")), "((a Mul b) Add c)");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(shape(&expr_of("a - b - c")), "((a Sub b) Sub c)");
        assert_eq!(shape(&expr_of("a / b / c")), "((a Div b) Div c)");
    }

    #[test]
    fn test_exponentiation_is_right_associative() {
        assert_eq!(shape(&expr_of("a ** b ** c")), "(a Exp (b Exp c))");
    }

    #[test]
    fn test_exponentiation_beats_multiplication() {
        assert_eq!(shape(&expr_of("a * b ** c")), "(a Mul (b Exp c))");
    }

    #[test]
    fn test_unary_binds_tighter_than_multiplication() {
        assert_eq!(shape(&expr_of("-a * b")), "((Neg a) Mul b)");
    }

    #[test]
    fn test_exponentiation_binds_tighter_than_unary() {
        assert_eq!(shape(&expr_of("-a ** b")), "(Neg (a Exp b))");
    }

    #[test]
    fn test_nested_unary() {
        assert_eq!(shape(&expr_of("- -a")), "(Neg (Neg a))");
        assert_eq!(shape(&expr_of("not not ok")), "(Not (Not ok))");
        assert_eq!(shape(&expr_of("~+x")), "(BitNot (Pos x))");
    }

    #[test]
    fn test_comparison_and_logical_tiers() {
        assert_eq!(
            shape(&expr_of("a < b and b < c or d")),
            "(((a Lt b) And (b Lt c)) Or d)"
        );
    }

    #[test]
    fn test_bitwise_tiers_between_arithmetic_and_comparison() {
        assert_eq!(
            shape(&expr_of("a & b ^ c | d")),
            "(((a BitAnd b) BitXor c) BitOr d)"
        );
        assert_eq!(shape(&expr_of("a + b & c")), "((a Add b) BitAnd c)");
        // All bitwise tiers sit above the comparisons.
        assert_eq!(shape(&expr_of("a | b == c")), "((a BitOr b) Eq c)");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(shape(&expr_of("(a + b) * c")), "((a Add b) Mul c)");
    }

    #[test]
    fn test_remainder_shares_the_multiplicative_tier() {
        assert_eq!(shape(&expr_of("a % b * c")), "((a Rem b) Mul c)");
    }

    #[test]
    fn test_call_vs_variable_lookahead() {
        assert_eq!(shape(&expr_of("f(x) + f")), "(f(x) Add f)");
    }

    #[test]
    fn test_call_arguments() {
        assert_eq!(
            shape(&expr_of("max(a + 1, g(), 3)")),
            "max((a Add 1), g(), 3)"
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(shape(&expr_of("42")), "42");
        assert_eq!(shape(&expr_of("3.75")), "3"); // numbers are integers
        assert_eq!(shape(&expr_of("true")), "true");
        assert_eq!(shape(&expr_of("\"hi\"")), "\"hi\"");
        let expr = expr_of("\"quoted text\"");
        assert_eq!(expr.kind, ExprKind::Str(Symbol::intern("quoted text")));
    }

    #[test]
    fn test_missing_operand() {
        let err = crate::parse_source("fn main() { x = 1 + ; }").unwrap_err();
        assert_eq!(err.message, "Expected expression");
    }

    #[test]
    fn test_unclosed_call() {
        let err = crate::parse_source("fn main() { f(1, 2; }").unwrap_err();
        assert_eq!(err.message, "Expected ')' after function call args");
    }

    #[test]
    fn test_unclosed_paren() {
        let err = crate::parse_source("fn main() { (1 + 2; }").unwrap_err();
        assert_eq!(err.message, "Expected ')' after expression");
    }
}
