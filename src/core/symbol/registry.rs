//! Global symbol registry management.
//!
//! Symbols are interned by `(name, assumptions)`, so `symb("R")` and
//! `symb_positive("R")` are two distinct symbols that print the same way.
//! This mirrors how a positivity assumption is part of a symbol's identity
//! in the derivation scripts.

use std::sync::{Arc, LazyLock, Mutex, RwLock};

use rustc_hash::FxHashMap;
use slotmap::{DefaultKey, SlotMap};

use super::{Assumptions, Symbol};

/// Data stored once per interned symbol
#[derive(Debug, Clone)]
pub(crate) struct SymbolData {
    pub(crate) name: Arc<str>,
    pub(crate) assumptions: Assumptions,
}

struct SymbolRegistry {
    // Use FxHashMap for faster lookups with short symbol names
    by_name: Mutex<FxHashMap<(String, Assumptions), DefaultKey>>,
    // Key -> data mapping using SlotMap for memory efficiency and safe key generation
    data: RwLock<SlotMap<DefaultKey, SymbolData>>,
}

impl SymbolRegistry {
    fn new() -> Self {
        Self {
            by_name: Mutex::new(FxHashMap::default()),
            data: RwLock::new(SlotMap::with_key()),
        }
    }

    /// # Panics
    ///
    /// Panics if any registry lock is poisoned.
    fn intern(&self, name: &str, assumptions: Assumptions) -> Symbol {
        let mut by_name = self
            .by_name
            .lock()
            .expect("Global symbol registry poisoned");

        if let Some(&key) = by_name.get(&(name.to_owned(), assumptions)) {
            return Symbol(key);
        }

        let key = self
            .data
            .write()
            .expect("Global ID registry poisoned")
            .insert(SymbolData {
                name: Arc::from(name),
                assumptions,
            });
        by_name.insert((name.to_owned(), assumptions), key);
        Symbol(key)
    }
}

/// Global registry for symbols
static REGISTRY: LazyLock<SymbolRegistry> = LazyLock::new(SymbolRegistry::new);

/// The circle constant, registered once as a positive constant
static PI: LazyLock<Symbol> = LazyLock::new(|| {
    REGISTRY.intern(
        "pi",
        Assumptions {
            positive: true,
            constant: true,
        },
    )
});

/// Look up the data behind a symbol key.
///
/// # Panics
///
/// Panics if the global ID registry lock is poisoned.
pub(crate) fn lookup(key: DefaultKey) -> Option<SymbolData> {
    REGISTRY
        .data
        .read()
        .expect("Global ID registry poisoned")
        .get(key)
        .cloned()
}

/// Create or get a symbol without assumptions.
///
/// The name `pi` always resolves to the circle constant.
#[must_use]
pub fn symb(name: &str) -> Symbol {
    if name == "pi" {
        return pi();
    }
    REGISTRY.intern(name, Assumptions::default())
}

/// Create or get a symbol assumed to be strictly positive.
#[must_use]
pub fn symb_positive(name: &str) -> Symbol {
    if name == "pi" {
        return pi();
    }
    REGISTRY.intern(
        name,
        Assumptions {
            positive: true,
            constant: false,
        },
    )
}

/// The constant π
#[must_use]
pub fn pi() -> Symbol {
    *PI
}

/// Get the number of registered symbols
///
/// # Panics
///
/// Panics if the global ID registry lock is poisoned.
pub fn symbol_count() -> usize {
    REGISTRY
        .data
        .read()
        .expect("Global ID registry poisoned")
        .len()
}
