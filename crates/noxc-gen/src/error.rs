//! Contract violations.

use noxc_util::{Span, Symbol};
use thiserror::Error;

/// A handoff invariant that does not hold on the given tree.
///
/// Seeing one of these means the tree was not produced by a successful
/// `noxc-sem` run; the back end must not lower it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ContractError {
    /// An expression still carries the pre-analysis type sentinel.
    #[error("expression has unresolved type")]
    UnresolvedType { span: Span },

    /// A function body that does not end in a `return` statement.
    #[error("function '{function}' does not end in a return statement")]
    MissingReturn { function: Symbol },
}
