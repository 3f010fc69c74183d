//! noxc-gen - The code-generation contract.
//!
//! The emission back end (object-file writing, target configuration,
//! linking) is a separate component; this crate pins down the interface
//! it consumes: an analyzed AST walked through the [`Visit`] trait,
//! under the invariants established by `noxc-sem`:
//!
//! - every reachable expression carries a resolved type, never
//!   `Ty::Unknown`;
//! - every function definition's body is non-empty and ends in a
//!   `return` statement;
//! - every `if` has a populated then-branch (guaranteed by the AST
//!   shape; the else-branch may be absent);
//! - `Variable` and `Call` nodes only name symbols the analyzer
//!   resolved.
//!
//! [`verify::verify_decls`] checks the first two mechanically, so a back
//! end can lower without re-checking; the others hold by construction of
//! the analyzed tree.

mod error;
pub mod verify;
pub mod visit;

pub use error::ContractError;
pub use verify::verify_decls;
pub use visit::Visit;
