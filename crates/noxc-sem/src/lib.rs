//! noxc-sem - Semantic analysis for the Nox language.
//!
//! The third compiler pass: a walk over the parsed declaration forest
//! that resolves names, infers and checks types, enforces the language's
//! structural rules, and performs the one tree rewrite the language
//! specifies (implicit `return` insertion at the end of function
//! bodies).
//!
//! Name resolution uses two disjoint tables ([`SymbolTable`]): a flat,
//! declaration-ordered function table, and a stack of variable scope
//! frames pushed around each function body, `if`/`else` branch, `while`
//! body and nested block. Function resolution is single-pass: a call
//! site only sees functions declared earlier in the file, and forward
//! prototypes exist for mutual recursion.
//!
//! On success every reachable expression carries a resolved
//! [`Ty`](noxc_util::Ty) (never `Unknown`) and every function body ends
//! in a `return` statement. These are the invariants the code generator
//! consumes; `noxc-gen` states and verifies them.
//!
//! # Example
//!
//! ```
//! use noxc_par::parse_source;
//! use noxc_sem::analyze;
//!
//! let mut program = parse_source("fn main() -> int { return 40 + 2; }").unwrap();
//! let symbols = analyze(&mut program).unwrap();
//! assert!(symbols.functions().any(|f| f.name.as_str() == "main"));
//! ```

mod analysis;
mod error;
mod symbols;

pub use analysis::Analyzer;
pub use error::{Result, SemanticError};
pub use symbols::{FuncSymbol, ParamSymbol, SymbolTable, VarSymbol};

use noxc_par::ast::Decl;

/// Analyzes a program in place and returns the populated symbol table.
///
/// Equivalent to `Analyzer::new().run(program)`.
pub fn analyze(program: &mut [Decl]) -> Result<SymbolTable> {
    Analyzer::new().run(program)
}
