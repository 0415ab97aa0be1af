//! Interned symbols and operator overloading for ergonomic expression building
//!
//! # Symbol Interning
//!
//! Symbols are interned globally. Each `(name, assumptions)` pair exists exactly
//! once, and all handles to it share the same key, so equality is a key compare.
//!
//! # Example
//! ```
//! use simplicity_calc::{symb, symb_positive};
//!
//! let x = symb("doc_example_x");
//! let x2 = symb("doc_example_x");
//! assert_eq!(x, x2);
//!
//! let r = symb_positive("doc_example_x");
//! assert_ne!(x, r); // positivity is part of the identity
//! assert_eq!(r.name().as_ref(), "doc_example_x");
//! ```

mod operators;
pub mod registry;

pub use registry::{pi, symb, symb_positive, symbol_count};

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use slotmap::{DefaultKey, Key};

use crate::Expr;

/// Assumptions attached to a symbol at declaration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Assumptions {
    /// The symbol only takes strictly positive real values
    pub positive: bool,
    /// The symbol is a mathematical constant with a known value (π)
    pub constant: bool,
}

/// Type-safe symbol for building expressions ergonomically
///
/// **This type is `Copy`** - you can use it in expressions without `.clone()`:
/// ```
/// use simplicity_calc::symb;
/// let a = symb("symbol_doc_a");
/// let expr = a + a;
/// assert_eq!(expr.simplified().to_string(), "2*symbol_doc_a");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(pub(crate) DefaultKey);

impl Symbol {
    /// Get the symbol's unique ID as a u64 for display or hashing.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.0.data().as_ffi()
    }

    /// Get the name of the symbol
    #[must_use]
    pub fn name(&self) -> Arc<str> {
        registry::lookup(self.0).map_or_else(|| Arc::from("?"), |d| d.name)
    }

    /// Get the assumptions declared for this symbol
    #[must_use]
    pub fn assumptions(&self) -> Assumptions {
        registry::lookup(self.0).map_or_else(Assumptions::default, |d| d.assumptions)
    }

    /// Whether the symbol was declared strictly positive
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.assumptions().positive
    }

    /// Whether the symbol is a built-in constant such as π
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.assumptions().constant
    }

    /// Convert to an Expr
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        Expr::from_symbol(*self)
    }

    /// Raise to a power
    #[must_use]
    pub fn pow(self, exp: impl Into<Expr>) -> Expr {
        Expr::pow(self.to_expr(), exp.into())
    }

    /// Square root
    #[must_use]
    pub fn sqrt(self) -> Expr {
        Expr::sqrt(self.to_expr())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Constants sort before variables, variables alphabetically; the key breaks
// ties between same-named symbols with different assumptions.
impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        other
            .is_constant()
            .cmp(&self.is_constant())
            .then_with(|| self.name().cmp(&other.name()))
            .then_with(|| self.id().cmp(&other.id()))
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
