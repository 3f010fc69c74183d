//! The Nox surface type system.

use std::fmt;

/// A type in the Nox language.
///
/// The surface language has exactly three value types plus `Void` for
/// functions that return nothing. `Unknown` is the pre-analysis sentinel:
/// the parser leaves unannotated parameters, unannotated `let` bindings
/// and every expression at `Unknown`, and the semantic analyzer replaces
/// it exactly once. After analysis no reachable expression carries
/// `Unknown`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ty {
    /// Not yet resolved.
    #[default]
    Unknown,
    /// 64-bit signed integer. Number literals are always `Int`.
    Int,
    /// Boolean.
    Bool,
    /// Immutable string.
    Str,
    /// Absence of a value; only valid as a function return type.
    Void,
}

impl Ty {
    /// True once the analyzer has assigned a real type.
    #[inline]
    pub fn is_known(self) -> bool {
        self != Ty::Unknown
    }

    /// The keyword that names this type in source, where one exists.
    ///
    /// `Void` has no surface spelling (it is the absence of `-> T`), and
    /// `Unknown` renders as a placeholder.
    pub fn name(self) -> &'static str {
        match self {
            Ty::Unknown => "???",
            Ty::Int => "int",
            Ty::Bool => "bool",
            Ty::Str => "str",
            Ty::Void => "",
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(Ty::default(), Ty::Unknown);
        assert!(!Ty::default().is_known());
    }

    #[test]
    fn test_known_types() {
        for ty in [Ty::Int, Ty::Bool, Ty::Str, Ty::Void] {
            assert!(ty.is_known());
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Ty::Int.to_string(), "int");
        assert_eq!(Ty::Bool.to_string(), "bool");
        assert_eq!(Ty::Str.to_string(), "str");
        assert_eq!(Ty::Void.to_string(), "");
        assert_eq!(Ty::Unknown.to_string(), "???");
    }
}
