//! The semantic analyzer.
//!
//! A single pass over the declaration forest in source order. For each
//! node the analyzer resolves names against the symbol table, computes
//! and writes the expression's type, and enforces the structural rules
//! of the language. It rewrites the tree in exactly one place: the
//! implicit `return` inserted at the end of a function body (see
//! [`Analyzer::insert_implicit_return`]).
//!
//! Resolution is single-pass, so a call only sees functions declared
//! earlier in the file; forward prototypes (`fn f(…) -> T;`) are the
//! language's mechanism for calling ahead of a definition.

use noxc_par::ast::{
    Assign, BinOp, Block, Decl, Definition, Expr, ExprKind, If, Param, Prototype, Return, Stmt,
    UnOp, VarDecl, While,
};
use noxc_util::{Span, Symbol, Ty};

use crate::error::{Result, SemanticError};
use crate::symbols::{FuncSymbol, ParamSymbol, SymbolTable, VarSymbol};

/// The analyzer's per-run state: the symbol table and the return type of
/// the function whose body is currently being analyzed.
pub struct Analyzer {
    symbols: SymbolTable,
    current_ret_ty: Ty,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            current_ret_ty: Ty::Void,
        }
    }

    /// Analyzes a program in place, annotating every expression with its
    /// type, and returns the populated symbol table.
    ///
    /// Fails on the first rule violation; the program may then be left
    /// partially annotated and should be discarded.
    pub fn run(mut self, program: &mut [Decl]) -> Result<SymbolTable> {
        for decl in program.iter_mut() {
            self.visit_decl(decl)?;
        }
        Ok(self.symbols)
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn visit_decl(&mut self, decl: &mut Decl) -> Result<()> {
        match decl {
            Decl::Prototype(proto) => self.visit_prototype(proto, false),
            Decl::Definition(def) => self.visit_definition(def),
        }
    }

    /// Checks the parameter list and registers the function.
    ///
    /// Once a parameter has a default value, every later parameter must
    /// have one too, so calls can always fill the tail positionally.
    fn visit_prototype(&mut self, proto: &mut Prototype, defining: bool) -> Result<()> {
        let mut params = Vec::with_capacity(proto.params.len());
        let mut seen_default = false;

        for param in &mut proto.params {
            self.visit_param(param)?;

            if param.init.is_some() {
                seen_default = true;
            } else if seen_default {
                return Err(SemanticError::NonDefaultAfterDefault {
                    name: param.name,
                    span: param.span,
                });
            }

            params.push(ParamSymbol {
                name: param.name,
                ty: param.ty,
                has_default: param.init.is_some(),
            });
        }

        let func = FuncSymbol {
            name: proto.name,
            ret_ty: proto.ret_ty,
            params,
            is_extern: proto.is_extern,
            is_vararg: proto.is_vararg,
            is_defined: false,
        };

        self.symbols.declare_function(func, defining, proto.span)
    }

    /// Type-checks or infers a parameter against its default value.
    fn visit_param(&mut self, param: &mut Param) -> Result<()> {
        if let Some(init) = &mut param.init {
            self.visit_expr(init)?;

            if param.ty.is_known() {
                if param.ty != init.ty {
                    return Err(SemanticError::ParamInitTypeMismatch { span: init.span });
                }
            } else {
                param.ty = init.ty;
            }
        }
        Ok(())
    }

    fn visit_definition(&mut self, def: &mut Definition) -> Result<()> {
        self.visit_prototype(&mut def.proto, true)?;
        self.current_ret_ty = def.proto.ret_ty;

        self.insert_implicit_return(def)?;

        // Exactly one frame brackets the body; it holds the parameters.
        self.symbols.enter_scope();
        for param in &def.proto.params {
            self.symbols.declare_variable(VarSymbol {
                name: param.name,
                ty: param.ty,
                is_mutable: true,
            });
        }

        let result = def
            .body
            .stmts
            .iter_mut()
            .try_for_each(|stmt| self.visit_stmt(stmt));
        self.symbols.exit_scope();
        result?;

        if let Some(func) = self.symbols.function_mut(def.proto.name) {
            func.is_defined = true;
        }
        Ok(())
    }

    /// The analyzer's only tree rewrite, applied before the body is
    /// analyzed. A body whose last statement is not a `return` (an empty
    /// body included) gets one appended when that is well-defined:
    /// `return;` for void functions, `return 0;` when the function is
    /// named `main`. Anything else is missing a return statement.
    fn insert_implicit_return(&mut self, def: &mut Definition) -> Result<()> {
        if matches!(def.body.stmts.last(), Some(Stmt::Return(_))) {
            return Ok(());
        }

        if self.current_ret_ty == Ty::Void {
            def.body.stmts.push(Stmt::Return(Return {
                value: None,
                span: Span::DUMMY,
            }));
        } else if def.proto.name.as_str() == "main" {
            def.body.stmts.push(Stmt::Return(Return {
                value: Some(Expr::new(ExprKind::Number(0), Span::DUMMY)),
                span: Span::DUMMY,
            }));
        } else {
            return Err(SemanticError::MissingReturn {
                span: def.proto.span,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn visit_stmt(&mut self, stmt: &mut Stmt) -> Result<()> {
        match stmt {
            Stmt::VarDecl(decl) => self.visit_var_decl(decl),
            Stmt::Assign(assign) => self.visit_assign(assign),
            Stmt::Block(block) => self.visit_block(block),
            Stmt::If(if_stmt) => self.visit_if(if_stmt),
            Stmt::While(while_stmt) => self.visit_while(while_stmt),
            Stmt::Return(ret) => self.visit_return(ret),
            Stmt::Expr(expr) => self.visit_expr(expr),
        }
    }

    /// A declaration needs a type from somewhere: an annotation, an
    /// initializer, or both in agreement.
    fn visit_var_decl(&mut self, decl: &mut VarDecl) -> Result<()> {
        if decl.init.is_none() && !decl.ty.is_known() {
            return Err(SemanticError::MissingTypeAnnotation { span: decl.span });
        }

        if let Some(init) = &mut decl.init {
            self.visit_expr(init)?;

            if !decl.ty.is_known() {
                decl.ty = init.ty;
            }
            if decl.ty != init.ty {
                return Err(SemanticError::VarDeclTypeMismatch { span: decl.span });
            }
        }

        self.symbols.declare_variable(VarSymbol {
            name: decl.name,
            ty: decl.ty,
            is_mutable: true,
        });
        Ok(())
    }

    fn visit_assign(&mut self, assign: &mut Assign) -> Result<()> {
        self.visit_expr(&mut assign.target)?;
        self.visit_expr(&mut assign.value)?;

        if assign.target.ty != assign.value.ty {
            return Err(SemanticError::AssignTypeMismatch { span: assign.span });
        }
        Ok(())
    }

    /// A statement block opens its own scope frame.
    fn visit_block(&mut self, block: &mut Block) -> Result<()> {
        self.symbols.enter_scope();
        let result = block
            .stmts
            .iter_mut()
            .try_for_each(|stmt| self.visit_stmt(stmt));
        self.symbols.exit_scope();
        result
    }

    fn visit_if(&mut self, if_stmt: &mut If) -> Result<()> {
        self.visit_expr(&mut if_stmt.cond)?;
        if !matches!(if_stmt.cond.ty, Ty::Int | Ty::Bool) {
            return Err(SemanticError::IfConditionType {
                span: if_stmt.cond.span,
            });
        }

        self.visit_block(&mut if_stmt.then_branch)?;
        if let Some(else_branch) = &mut if_stmt.else_branch {
            self.visit_block(else_branch)?;
        }
        Ok(())
    }

    fn visit_while(&mut self, while_stmt: &mut While) -> Result<()> {
        self.visit_expr(&mut while_stmt.cond)?;
        if !matches!(while_stmt.cond.ty, Ty::Int | Ty::Bool) {
            return Err(SemanticError::WhileConditionType {
                span: while_stmt.cond.span,
            });
        }

        self.visit_block(&mut while_stmt.body)
    }

    /// Four cases by (current function is void, value is present).
    fn visit_return(&mut self, ret: &mut Return) -> Result<()> {
        let in_void_fn = self.current_ret_ty == Ty::Void;

        match (in_void_fn, &mut ret.value) {
            (true, None) => Ok(()),
            (true, Some(_)) => Err(SemanticError::ReturnValueFromVoid { span: ret.span }),
            (false, None) => Err(SemanticError::MissingReturnValue { span: ret.span }),
            (false, Some(value)) => {
                self.visit_expr(value)?;
                if value.ty != self.current_ret_ty {
                    return Err(SemanticError::ReturnTypeMismatch { span: value.span });
                }
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Resolves and types an expression. Every path through this method
    /// writes `expr.ty` exactly once.
    fn visit_expr(&mut self, expr: &mut Expr) -> Result<()> {
        let span = expr.span;

        expr.ty = match &mut expr.kind {
            ExprKind::Number(_) => Ty::Int,
            ExprKind::Bool(_) => Ty::Bool,
            ExprKind::Str(_) => Ty::Str,
            ExprKind::Variable(name) => {
                let Some(var) = self.symbols.lookup_variable(*name) else {
                    return Err(SemanticError::UndeclaredVariable { name: *name, span });
                };
                var.ty
            }
            ExprKind::Call { callee, args } => self.visit_call(*callee, args, span)?,
            ExprKind::Binary { op, lhs, rhs } => self.visit_binary(*op, lhs, rhs, span)?,
            ExprKind::Unary { op, operand } => self.visit_unary(*op, operand)?,
        };

        Ok(())
    }

    /// Arity and positional type checking against the callee's
    /// signature. With `k` required parameters and `n` declared, a call
    /// with `a` arguments needs `k <= a`, and `a <= n` unless the
    /// function is variadic; the first `min(a, n)` arguments are checked
    /// positionally and any variadic tail goes unchecked.
    fn visit_call(&mut self, callee: Symbol, args: &mut [Expr], span: Span) -> Result<Ty> {
        let Some(func) = self.symbols.lookup_function(callee) else {
            return Err(SemanticError::UndefinedFunction { name: callee, span });
        };

        // Small copies release the table borrow before arguments are
        // visited (argument expressions may themselves contain calls).
        let params = func.params.clone();
        let is_vararg = func.is_vararg;
        let ret_ty = func.ret_ty;
        let required = func.required_param_count();

        if args.len() < required {
            return Err(SemanticError::TooFewArguments { callee, span });
        }
        if !is_vararg && args.len() > params.len() {
            return Err(SemanticError::TooManyArguments { callee, span });
        }

        for arg in args.iter_mut() {
            self.visit_expr(arg)?;
        }

        for (arg, param) in args.iter().zip(&params) {
            if param.ty != arg.ty {
                return Err(SemanticError::ArgumentTypeMismatch {
                    param: param.name,
                    callee,
                    span: arg.span,
                });
            }
        }

        Ok(ret_ty)
    }

    /// Operands must have identical types; the operator's class then
    /// constrains that type and fixes the result type.
    fn visit_binary(
        &mut self,
        op: BinOp,
        lhs: &mut Expr,
        rhs: &mut Expr,
        span: Span,
    ) -> Result<Ty> {
        self.visit_expr(lhs)?;
        self.visit_expr(rhs)?;

        let ty = lhs.ty;
        if ty != rhs.ty {
            return Err(SemanticError::BinaryOperandMismatch {
                lhs: ty,
                rhs: rhs.ty,
                span,
            });
        }

        if op.is_arithmetic() {
            if ty == Ty::Str {
                return Err(SemanticError::ArithmeticOperandType { span });
            }
            Ok(ty)
        } else if op.is_logical() {
            if ty != Ty::Bool {
                return Err(SemanticError::LogicalOperandType { span });
            }
            Ok(Ty::Bool)
        } else if op.is_bitwise() {
            if ty == Ty::Str {
                return Err(SemanticError::BitwiseOperandType { span });
            }
            Ok(Ty::Int)
        } else {
            if !matches!(ty, Ty::Int | Ty::Bool) {
                return Err(SemanticError::ComparisonOperandType { span });
            }
            Ok(Ty::Bool)
        }
    }

    fn visit_unary(&mut self, op: UnOp, operand: &mut Expr) -> Result<Ty> {
        self.visit_expr(operand)?;
        let ty = operand.ty;
        let span = operand.span;

        match op {
            UnOp::Pos => Ok(ty),
            UnOp::Neg => {
                if ty == Ty::Str {
                    return Err(SemanticError::NegationOperandType { span });
                }
                Ok(Ty::Int)
            }
            UnOp::Not => {
                if ty == Ty::Str {
                    return Err(SemanticError::NotOperandType { span });
                }
                Ok(Ty::Bool)
            }
            UnOp::BitNot => {
                if ty == Ty::Str {
                    return Err(SemanticError::BitNotOperandType { span });
                }
                Ok(Ty::Int)
            }
        }
    }
}
