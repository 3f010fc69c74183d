//! Symbol tables.
//!
//! Two disjoint tables back name resolution:
//!
//! - **Functions** live in a single flat, declaration-ordered map;
//!   function lookup is independent of the scope stack.
//! - **Variables** live in a stack of scope frames. Lookup walks the
//!   frames innermost-first, so an inner binding shadows an outer one,
//!   and popping a frame drops every binding it holds.
//!
//! The analyzer brackets each function body with exactly one frame
//! holding the parameters, so variable lookups can never cross a
//! function boundary.

use noxc_util::{FxHashMap, IndexMap, Span, Symbol, Ty};

use crate::error::{Result, SemanticError};

/// One parameter of a registered function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamSymbol {
    pub name: Symbol,
    pub ty: Ty,
    pub has_default: bool,
}

/// A registered function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncSymbol {
    pub name: Symbol,
    pub ret_ty: Ty,
    pub params: Vec<ParamSymbol>,
    pub is_extern: bool,
    pub is_vararg: bool,
    /// Set once the function's body has been analyzed.
    pub is_defined: bool,
}

impl FuncSymbol {
    /// Number of parameters a call must always supply.
    pub fn required_param_count(&self) -> usize {
        self.params.iter().filter(|p| !p.has_default).count()
    }

    /// True if `other` declares the same signature: return type,
    /// parameter types in order, and variadic flag. Parameter names and
    /// defaults may differ.
    pub fn signature_matches(&self, other: &FuncSymbol) -> bool {
        self.ret_ty == other.ret_ty
            && self.is_vararg == other.is_vararg
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.ty == b.ty)
    }
}

/// A variable binding in some scope frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarSymbol {
    pub name: Symbol,
    pub ty: Ty,
    pub is_mutable: bool,
}

/// The two-level symbol table: global functions plus stacked variable
/// scopes.
#[derive(Debug, Default)]
pub struct SymbolTable {
    functions: IndexMap<Symbol, FuncSymbol>,
    scopes: Vec<FxHashMap<Symbol, VarSymbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function.
    ///
    /// A name may be declared once. The single exception is completing a
    /// not-yet-defined prototype (`extern fn f(…);` or `fn f(…);`) with
    /// a definition whose signature matches exactly; the entry is then
    /// replaced by the defining occurrence. `defining` marks that the
    /// registration comes from a `Definition`.
    pub fn declare_function(
        &mut self,
        func: FuncSymbol,
        defining: bool,
        span: Span,
    ) -> Result<()> {
        match self.functions.get(&func.name) {
            None => {
                self.functions.insert(func.name, func);
                Ok(())
            }
            Some(existing) if defining && !existing.is_defined => {
                if existing.signature_matches(&func) {
                    self.functions.insert(func.name, func);
                    Ok(())
                } else {
                    Err(SemanticError::PrototypeMismatch {
                        name: func.name,
                        span,
                    })
                }
            }
            Some(_) => Err(SemanticError::FunctionRedeclaration {
                name: func.name,
                span,
            }),
        }
    }

    pub fn lookup_function(&self, name: Symbol) -> Option<&FuncSymbol> {
        self.functions.get(&name)
    }

    pub fn function_mut(&mut self, name: Symbol) -> Option<&mut FuncSymbol> {
        self.functions.get_mut(&name)
    }

    /// All registered functions, in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &FuncSymbol> {
        self.functions.values()
    }

    /// Pushes an empty scope frame.
    pub fn enter_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pops the innermost frame, dropping its bindings.
    pub fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    /// Current nesting depth.
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Adds a binding to the innermost frame. Re-binding a name in the
    /// same frame replaces it.
    pub fn declare_variable(&mut self, var: VarSymbol) {
        debug_assert!(!self.scopes.is_empty(), "no open scope frame");
        if let Some(frame) = self.scopes.last_mut() {
            frame.insert(var.name, var);
        }
    }

    /// Resolves a variable, innermost frame first.
    pub fn lookup_variable(&self, name: Symbol) -> Option<&VarSymbol> {
        self.scopes
            .iter()
            .rev()
            .find_map(|frame| frame.get(&name))
    }
}
