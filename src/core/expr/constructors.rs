//! Expression constructors.
//!
//! Sum and product constructors keep three invariants: children are flat,
//! numbers are folded into one constant, and children are canonically sorted.
//! `pow` is structural only; numeric powers are evaluated by the simplifier.

use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::{Expr, ExprKind, compute_expr_hash, factor_cmp, next_id, sum_term_cmp};
use crate::core::symbol::{Symbol, pi, symb};

/// Take an expression out of an `Arc`, cloning only when shared
pub(crate) fn unwrap_arc(arc: Arc<Expr>) -> Expr {
    Arc::try_unwrap(arc).unwrap_or_else(|shared| (*shared).clone())
}

impl Expr {
    /// Create a new expression with fresh ID
    #[must_use]
    pub fn new(kind: ExprKind) -> Self {
        let hash = compute_expr_hash(&kind);
        Self {
            id: next_id(),
            hash,
            kind,
        }
    }

    /// Placeholder used while tearing down trees; skips hashing and ID allocation
    pub(super) fn leaf_zero() -> Self {
        Self {
            id: 0,
            hash: 0,
            kind: ExprKind::Number(BigRational::zero()),
        }
    }

    /// Get the unique ID of the expression
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Get the structural hash of the expression
    #[inline]
    #[must_use]
    pub const fn structural_hash(&self) -> u64 {
        self.hash
    }

    // -------------------------------------------------------------------------
    // Accessor methods
    // -------------------------------------------------------------------------

    /// Check if expression is a constant number and return its value
    #[inline]
    #[must_use]
    pub const fn as_number(&self) -> Option<&BigRational> {
        match &self.kind {
            ExprKind::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Check if expression is a symbol and return it
    #[inline]
    #[must_use]
    pub const fn as_symbol(&self) -> Option<Symbol> {
        match &self.kind {
            ExprKind::Symbol(s) => Some(*s),
            _ => None,
        }
    }

    /// Check if this expression is the number zero
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(Zero::is_zero)
    }

    /// Check if this expression is the number one
    #[inline]
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(One::is_one)
    }

    /// Check if this expression is a numeric literal
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self.kind, ExprKind::Number(_))
    }

    // -------------------------------------------------------------------------
    // Basic constructors
    // -------------------------------------------------------------------------

    /// Create a number expression
    #[must_use]
    pub fn number(n: BigRational) -> Self {
        Self::new(ExprKind::Number(n))
    }

    /// Create an integer expression
    #[must_use]
    pub fn integer(n: i64) -> Self {
        Self::number(BigRational::from_integer(BigInt::from(n)))
    }

    /// Create the exact fraction `numer/denom`
    ///
    /// # Panics
    /// Panics if `denom` is zero.
    #[must_use]
    pub fn rational(numer: i64, denom: i64) -> Self {
        Self::number(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// Create a symbol expression (auto-interned, no assumptions)
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Self::from_symbol(symb(name.as_ref()))
    }

    /// Create from an already-interned symbol
    #[must_use]
    pub fn from_symbol(symbol: Symbol) -> Self {
        Self::new(ExprKind::Symbol(symbol))
    }

    /// The constant π
    #[must_use]
    pub fn pi() -> Self {
        Self::from_symbol(pi())
    }

    // -------------------------------------------------------------------------
    // N-ary constructors
    // -------------------------------------------------------------------------

    /// Create a sum expression from terms.
    /// Flattens nested sums, folds numbers and sorts terms.
    #[must_use]
    pub fn sum(terms: Vec<Self>) -> Self {
        Self::sum_from_arcs(terms.into_iter().map(Arc::new).collect())
    }

    /// Create a sum from already-shared terms
    #[must_use]
    pub fn sum_from_arcs(terms: Vec<Arc<Self>>) -> Self {
        let mut flat: Vec<Arc<Self>> = Vec::with_capacity(terms.len());
        let mut constant = BigRational::zero();

        for term in terms {
            if let ExprKind::Sum(inner) = &term.kind {
                for t in inner {
                    if let ExprKind::Number(n) = &t.kind {
                        constant += n;
                    } else {
                        flat.push(Arc::clone(t));
                    }
                }
                continue;
            }
            if let ExprKind::Number(n) = &term.kind {
                constant += n;
                continue;
            }
            flat.push(term);
        }

        if !constant.is_zero() {
            flat.push(Arc::new(Self::number(constant)));
        }

        match flat.len() {
            0 => Self::integer(0),
            1 => flat.pop().map_or_else(|| Self::integer(0), unwrap_arc),
            _ => {
                flat.sort_by(|a, b| sum_term_cmp(a, b));
                Self::new(ExprKind::Sum(flat))
            }
        }
    }

    /// Create a product expression from factors.
    /// Flattens nested products, folds numbers into one leading coefficient,
    /// drops unit factors and sorts. A zero factor makes the whole product zero.
    #[must_use]
    pub fn product(factors: Vec<Self>) -> Self {
        Self::product_from_arcs(factors.into_iter().map(Arc::new).collect())
    }

    /// Create a product from already-shared factors
    #[must_use]
    pub fn product_from_arcs(factors: Vec<Arc<Self>>) -> Self {
        let mut flat: Vec<Arc<Self>> = Vec::with_capacity(factors.len());
        let mut coeff = BigRational::one();

        for factor in factors {
            if let ExprKind::Product(inner) = &factor.kind {
                for f in inner {
                    if let ExprKind::Number(n) = &f.kind {
                        coeff *= n;
                    } else {
                        flat.push(Arc::clone(f));
                    }
                }
                continue;
            }
            if let ExprKind::Number(n) = &factor.kind {
                coeff *= n;
                continue;
            }
            flat.push(factor);
        }

        if coeff.is_zero() {
            return Self::integer(0);
        }
        if !coeff.is_one() {
            flat.push(Arc::new(Self::number(coeff)));
        }

        match flat.len() {
            0 => Self::integer(1),
            1 => flat.pop().map_or_else(|| Self::integer(1), unwrap_arc),
            _ => {
                flat.sort_by(|a, b| factor_cmp(a, b));
                Self::new(ExprKind::Product(flat))
            }
        }
    }

    /// Create a power expression `base^exp` (structural, not evaluated)
    #[must_use]
    pub fn pow(base: Self, exp: Self) -> Self {
        Self::pow_from_arcs(Arc::new(base), Arc::new(exp))
    }

    /// Create a power from already-shared operands
    #[must_use]
    pub fn pow_from_arcs(base: Arc<Self>, exp: Arc<Self>) -> Self {
        Self::new(ExprKind::Pow(base, exp))
    }

    /// Square root, stored as `x^(1/2)`
    #[must_use]
    pub fn sqrt(x: Self) -> Self {
        Self::pow(x, Self::rational(1, 2))
    }

    // -------------------------------------------------------------------------
    // Binary helpers used by operator overloading
    // -------------------------------------------------------------------------

    /// `a + b`
    #[must_use]
    pub fn add_expr(a: Self, b: Self) -> Self {
        Self::sum(vec![a, b])
    }

    /// `a - b`, stored as `a + (-1)*b`
    #[must_use]
    pub fn sub_expr(a: Self, b: Self) -> Self {
        Self::sum(vec![a, Self::neg_expr(b)])
    }

    /// `a * b`
    #[must_use]
    pub fn mul_expr(a: Self, b: Self) -> Self {
        Self::product(vec![a, b])
    }

    /// `a / b`, stored as `a * b^(-1)`.
    /// Division by a nonzero number folds directly into the coefficient.
    #[must_use]
    pub fn div_expr(a: Self, b: Self) -> Self {
        if let Some(n) = b.as_number()
            && !n.is_zero()
        {
            return Self::product(vec![a, Self::number(n.recip())]);
        }
        Self::product(vec![a, Self::pow(b, Self::integer(-1))])
    }

    /// `-a`, stored as `(-1)*a`
    #[must_use]
    pub fn neg_expr(a: Self) -> Self {
        Self::product(vec![Self::integer(-1), a])
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Self::integer(i64::from(n))
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Self::integer(n)
    }
}

impl From<BigRational> for Expr {
    fn from(n: BigRational) -> Self {
        Self::number(n)
    }
}

impl From<Symbol> for Expr {
    fn from(s: Symbol) -> Self {
        Self::from_symbol(s)
    }
}

impl From<&Symbol> for Expr {
    fn from(s: &Symbol) -> Self {
        Self::from_symbol(*s)
    }
}
