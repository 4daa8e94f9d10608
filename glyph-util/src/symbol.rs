//! String interning.
//!
//! Identifiers, string-literal operator forms (`and`, `or`, `xor`, `new`,
//! `instanceof`, ...) and hashmap string keys are compared constantly
//! during lexing, parsing and hashmap lookups. Interning turns those
//! comparisons into `u32` equality instead of byte-wise comparison.
//!
//! The table is process-wide and never shrinks: the total number of
//! distinct identifiers in a script is bounded and small enough that
//! reclaiming them is not worth the bookkeeping.

use dashmap::DashMap;
use std::fmt;
use std::sync::{OnceLock, RwLock};

struct Interner {
    by_str: DashMap<&'static str, u32>,
    by_id: RwLock<Vec<&'static str>>,
}

impl Interner {
    fn new() -> Self {
        Self { by_str: DashMap::new(), by_id: RwLock::new(Vec::new()) }
    }

    fn global() -> &'static Interner {
        static TABLE: OnceLock<Interner> = OnceLock::new();
        TABLE.get_or_init(Interner::new)
    }

    fn intern(&self, s: &str) -> u32 {
        if let Some(existing) = self.by_str.get(s) {
            return *existing;
        }
        // Two threads can race past the `get` above; the second insert
        // into `by_str` just overwrites with an equal value, and both
        // leaked strings sit harmlessly in `by_id` since this table never
        // frees entries anyway.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let id = {
            let mut guard = self.by_id.write().unwrap();
            let id = guard.len() as u32;
            guard.push(leaked);
            id
        };
        self.by_str.insert(leaked, id);
        id
    }

    fn resolve(&self, id: u32) -> &'static str {
        self.by_id.read().unwrap()[id as usize]
    }
}

/// A compact, `Copy` handle to an interned string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Interns `s`, returning the symbol for it (existing or new).
    pub fn intern(s: &str) -> Self {
        Symbol(Interner::global().intern(s))
    }

    /// Looks up the original string. `'static` because interned strings
    /// are never freed for the lifetime of the process.
    pub fn as_str(self) -> &'static str {
        Interner::global().resolve(self.0)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Case-insensitive equality against a byte string, used by the
    /// alphabetic-operator matcher (`and`, `or`, `xor`, `eq`, `ne`, `new`,
    /// `clone`, `instanceof`), since PHP-style grammars treat these as
    /// case-insensitive keywords.
    pub fn eq_ignore_ascii_case(self, other: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(other)
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
