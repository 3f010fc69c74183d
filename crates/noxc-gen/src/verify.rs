//! Mechanical verification of the handoff invariants.

use noxc_par::ast::{Decl, Expr, Stmt};
use noxc_util::Span;

use crate::error::ContractError;
use crate::visit::{walk_expr, Visit};

/// Checks that a declaration forest is in the post-analysis shape the
/// back end relies on: every function body ends in a `return`, and every
/// reachable expression carries a resolved type.
///
/// A tree straight out of the parser fails both checks; a tree from a
/// successful `noxc_sem::analyze` run always passes.
pub fn verify_decls(decls: &[Decl]) -> Result<(), ContractError> {
    for decl in decls {
        if let Decl::Definition(def) = decl {
            if !matches!(def.body.stmts.last(), Some(Stmt::Return(_))) {
                return Err(ContractError::MissingReturn {
                    function: def.proto.name,
                });
            }
        }
    }

    let mut resolver = ResolvedTypes { violation: None };
    for decl in decls {
        resolver.visit_decl(decl);
    }

    match resolver.violation {
        Some(span) => Err(ContractError::UnresolvedType { span }),
        None => Ok(()),
    }
}

/// Walks all expressions looking for the `Unknown` sentinel. Stops at
/// the first violation.
struct ResolvedTypes {
    violation: Option<Span>,
}

impl Visit for ResolvedTypes {
    fn visit_expr(&mut self, expr: &Expr) {
        if self.violation.is_some() {
            return;
        }
        if !expr.ty.is_known() {
            self.violation = Some(expr.span);
            return;
        }
        walk_expr(self, expr);
    }
}
