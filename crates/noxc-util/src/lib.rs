//! noxc-util - Foundation types for the Nox compiler.
//!
//! This crate holds the small value types every phase of the compiler
//! depends on, so that the phase crates only depend "downward":
//!
//! - [`Span`] - byte range plus line/column of a piece of source text
//! - [`Symbol`] - an interned string handle (4 bytes, `Copy`, O(1) equality)
//! - [`Ty`] - the closed type enumeration of the Nox surface language
//! - [`Diagnostic`] - the rendered form of a compile error
//!
//! None of these types own references into the AST or the token stream;
//! the symbol interner stores its own copies of the strings it hands out.

mod diagnostic;
mod span;
mod symbol;
mod ty;

pub use diagnostic::{Diagnostic, Level};
pub use span::Span;
pub use symbol::Symbol;
pub use ty::Ty;

// Re-export the map types the phase crates share so that callers agree on
// hashers without naming the underlying crates everywhere.
pub use indexmap::IndexMap;
pub use rustc_hash::{FxHashMap, FxHashSet};
