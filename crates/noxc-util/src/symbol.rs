//! String interning.
//!
//! Identifiers, keywords and string literals appear many times in a
//! program; interning stores one copy of each distinct string and hands
//! out a compact [`Symbol`] handle. Symbol comparison is then an integer
//! comparison, and symbols can be freely copied through tokens, AST nodes
//! and symbol tables without lifetime bookkeeping.
//!
//! The table is global and append-only: interned strings are leaked to
//! obtain the `'static` lifetime and are never removed. The set of unique
//! strings in a compilation is small and bounded, so this is the usual
//! trade for compilers.

use std::fmt;
use std::sync::{OnceLock, RwLock};

use ahash::RandomState;
use dashmap::DashMap;

/// An interned string.
///
/// Two symbols are equal if and only if the strings they were interned
/// from are equal.
///
/// # Example
///
/// ```
/// use noxc_util::Symbol;
///
/// let a = Symbol::intern("main");
/// let b = Symbol::intern("main");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "main");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Interns `string`, returning its handle.
    ///
    /// Interning the same string twice returns the same symbol. Safe to
    /// call from multiple threads.
    pub fn intern(string: &str) -> Self {
        Interner::global().intern(string)
    }

    /// Returns the string this symbol was interned from.
    pub fn as_str(self) -> &'static str {
        Interner::global().resolve(self)
    }

    /// Raw table index, for debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The global string table.
///
/// Lookups go through a lock-free map keyed by string contents; the
/// reverse direction (index to string) is a plain vector guarded by a
/// lock that is only contended when new strings are added.
struct Interner {
    map: DashMap<&'static str, u32, RandomState>,
    strings: RwLock<Vec<&'static str>>,
}

static INTERNER: OnceLock<Interner> = OnceLock::new();

impl Interner {
    fn global() -> &'static Interner {
        INTERNER.get_or_init(|| Interner {
            map: DashMap::with_hasher(RandomState::new()),
            strings: RwLock::new(Vec::new()),
        })
    }

    fn intern(&self, string: &str) -> Symbol {
        if let Some(index) = self.map.get(string) {
            return Symbol(*index);
        }

        let mut strings = self.strings.write().unwrap();
        // Re-check under the write lock so a racing intern of the same
        // string cannot allocate two indices.
        if let Some(index) = self.map.get(string) {
            return Symbol(*index);
        }

        let owned: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let index = strings.len() as u32;
        strings.push(owned);
        self.map.insert(owned, index);
        Symbol(index)
    }

    fn resolve(&self, symbol: Symbol) -> &'static str {
        let strings = self.strings.read().unwrap();
        strings[symbol.0 as usize]
    }
}
