//! A read-only walker over the analyzed AST.
//!
//! Back ends implement [`Visit`] and override the node hooks they care
//! about; every hook defaults to the matching `walk_*` function, which
//! recurses into the node's children in evaluation order. Overriding a
//! hook without calling its walker prunes the subtree.

use noxc_par::ast::{Block, Decl, Definition, Expr, ExprKind, Param, Prototype, Stmt};

/// Visitor over the analyzed AST.
pub trait Visit {
    fn visit_decl(&mut self, decl: &Decl) {
        walk_decl(self, decl);
    }

    fn visit_prototype(&mut self, proto: &Prototype) {
        walk_prototype(self, proto);
    }

    fn visit_definition(&mut self, def: &Definition) {
        walk_definition(self, def);
    }

    fn visit_param(&mut self, param: &Param) {
        walk_param(self, param);
    }

    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_decl<V: Visit + ?Sized>(visitor: &mut V, decl: &Decl) {
    match decl {
        Decl::Prototype(proto) => visitor.visit_prototype(proto),
        Decl::Definition(def) => visitor.visit_definition(def),
    }
}

pub fn walk_prototype<V: Visit + ?Sized>(visitor: &mut V, proto: &Prototype) {
    for param in &proto.params {
        visitor.visit_param(param);
    }
}

pub fn walk_definition<V: Visit + ?Sized>(visitor: &mut V, def: &Definition) {
    visitor.visit_prototype(&def.proto);
    visitor.visit_block(&def.body);
}

pub fn walk_param<V: Visit + ?Sized>(visitor: &mut V, param: &Param) {
    if let Some(init) = &param.init {
        visitor.visit_expr(init);
    }
}

pub fn walk_block<V: Visit + ?Sized>(visitor: &mut V, block: &Block) {
    for stmt in &block.stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visit + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::VarDecl(decl) => {
            if let Some(init) = &decl.init {
                visitor.visit_expr(init);
            }
        }
        Stmt::Assign(assign) => {
            visitor.visit_expr(&assign.target);
            visitor.visit_expr(&assign.value);
        }
        Stmt::Block(block) => visitor.visit_block(block),
        Stmt::If(if_stmt) => {
            visitor.visit_expr(&if_stmt.cond);
            visitor.visit_block(&if_stmt.then_branch);
            if let Some(else_branch) = &if_stmt.else_branch {
                visitor.visit_block(else_branch);
            }
        }
        Stmt::While(while_stmt) => {
            visitor.visit_expr(&while_stmt.cond);
            visitor.visit_block(&while_stmt.body);
        }
        Stmt::Return(ret) => {
            if let Some(value) = &ret.value {
                visitor.visit_expr(value);
            }
        }
        Stmt::Expr(expr) => visitor.visit_expr(expr),
    }
}

pub fn walk_expr<V: Visit + ?Sized>(visitor: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Number(_)
        | ExprKind::Bool(_)
        | ExprKind::Str(_)
        | ExprKind::Variable(_) => {}
        ExprKind::Call { args, .. } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noxc_par::parse_source;
    use noxc_sem::analyze;

    /// A toy back end that tallies the nodes it is handed.
    #[derive(Default)]
    struct NodeCounter {
        definitions: usize,
        statements: usize,
        expressions: usize,
        calls: usize,
    }

    impl Visit for NodeCounter {
        fn visit_definition(&mut self, def: &Definition) {
            self.definitions += 1;
            walk_definition(self, def);
        }

        fn visit_stmt(&mut self, stmt: &Stmt) {
            self.statements += 1;
            walk_stmt(self, stmt);
        }

        fn visit_expr(&mut self, expr: &Expr) {
            self.expressions += 1;
            if matches!(expr.kind, ExprKind::Call { .. }) {
                self.calls += 1;
            }
            walk_expr(self, expr);
        }
    }

    #[test]
    fn test_walker_reaches_every_node() {
        let mut program = parse_source(
            "fn inc(x: int) -> int { return x + 1; }\n\
             fn main() -> int { return inc(inc(40)); }\n",
        )
        .unwrap();
        analyze(&mut program).unwrap();

        let mut counter = NodeCounter::default();
        for decl in &program {
            counter.visit_decl(decl);
        }

        assert_eq!(counter.definitions, 2);
        // inc: return; main: return.
        assert_eq!(counter.statements, 2);
        // x + 1 (3 nodes), inc(inc(40)) (3 nodes).
        assert_eq!(counter.expressions, 6);
        assert_eq!(counter.calls, 2);
    }

    #[test]
    fn test_overriding_a_hook_prunes_the_subtree() {
        struct SkipBodies {
            expressions: usize,
        }

        impl Visit for SkipBodies {
            fn visit_definition(&mut self, def: &Definition) {
                // Only the signature; the body is not walked.
                self.visit_prototype(&def.proto);
            }

            fn visit_expr(&mut self, expr: &Expr) {
                self.expressions += 1;
                walk_expr(self, expr);
            }
        }

        let mut program =
            parse_source("fn f(d: int = 1 + 2) -> int { return d * d; }").unwrap();
        analyze(&mut program).unwrap();

        let mut skipper = SkipBodies { expressions: 0 };
        for decl in &program {
            skipper.visit_decl(decl);
        }
        // Only the default value's three nodes, none from the body.
        assert_eq!(skipper.expressions, 3);
    }
}
