//! Abstract Syntax Tree for exact symbolic expressions.
//!
//! This module defines:
//! - `Expr` - The central AST node type
//! - `ExprKind` - The variants of expression nodes (Number, Symbol, Sum, Product, Pow)
//!
//! # Architecture
//!
//! ## N-ary Sum/Product
//! `a + b + c` is `Sum([a, b, c])`, never nested binary additions.
//! Constructors flatten nested sums/products, fold numeric terms and sort
//! children into canonical order, so two equal expressions built in different
//! orders compare equal structurally.
//!
//! ## Exact numbers
//! Every numeric leaf is a [`BigRational`]. There is no floating point in the
//! symbolic path; `f64` only appears in [`Expr::evaluate`].
//!
//! ## Derived operations
//! - subtraction: `a - b = Sum([a, Product([-1, b])])`
//! - division: `a / b = Product([a, Pow(b, -1)])`
//! - square root: `sqrt(x) = Pow(x, 1/2)`
//!
//! ## Structural Hashing
//! Each `Expr` has a pre-computed `hash` field for O(1) equality rejection.
//!
//! # Usage
//!
//! ```
//! use simplicity_calc::{symb_positive, Expr};
//!
//! let r = symb_positive("expr_doc_r");
//! let v_full = Expr::rational(4, 3) * Expr::pi() * r.pow(3);
//! assert_eq!(v_full.to_string(), "4*pi*expr_doc_r^3/3");
//! ```

mod analysis;
mod constructors;
mod evaluate;
mod hash;
mod ordering;

use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use num_rational::BigRational;

use crate::core::symbol::Symbol;

pub use hash::compute_expr_hash;
pub use ordering::{factor_cmp, sum_term_cmp};

static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A symbolic mathematical expression with exact rational coefficients.
#[derive(Debug, Clone)]
pub struct Expr {
    /// Unique ID for debugging (not used in equality comparisons)
    pub(crate) id: u64,
    /// Structural hash for O(1) equality rejection
    pub(crate) hash: u64,
    /// The kind of expression (structure)
    pub(crate) kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;
    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

// Structural equality based on KIND only (with hash fast-reject)
impl PartialEq for Expr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.hash != other.hash {
            return false;
        }
        self.kind == other.kind
    }
}

impl Eq for Expr {}

impl std::hash::Hash for Expr {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

/// The kind (structure) of an expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Exact rational constant
    Number(BigRational),

    /// Interned symbol (including the constant π)
    Symbol(Symbol),

    /// N-ary sum: a + b + c + ...
    /// Stored flat, numbers folded into a single trailing term, canonically sorted.
    Sum(Vec<Arc<Expr>>),

    /// N-ary product: a * b * c * ...
    /// Stored flat, numbers folded into a single leading coefficient, canonically sorted.
    Product(Vec<Arc<Expr>>),

    /// Exponentiation (binary - not associative)
    Pow(Arc<Expr>, Arc<Expr>),
}

// Iterative drop so that very deep trees cannot overflow the stack
impl Drop for Expr {
    fn drop(&mut self) {
        fn drain_children(kind: &mut ExprKind, queue: &mut Vec<Arc<Expr>>) {
            match kind {
                ExprKind::Sum(terms) | ExprKind::Product(terms) => {
                    queue.extend(std::mem::take(terms));
                }
                ExprKind::Pow(base, exp) => {
                    let placeholder = Arc::new(Expr::leaf_zero());
                    queue.push(std::mem::replace(base, Arc::clone(&placeholder)));
                    queue.push(std::mem::replace(exp, placeholder));
                }
                ExprKind::Number(_) | ExprKind::Symbol(_) => {}
            }
        }

        if matches!(self.kind, ExprKind::Number(_) | ExprKind::Symbol(_)) {
            return;
        }

        let mut work_queue = Vec::new();
        drain_children(&mut self.kind, &mut work_queue);

        while let Some(child_arc) = work_queue.pop() {
            if let Ok(mut child_expr) = Arc::try_unwrap(child_arc) {
                drain_children(&mut child_expr.kind, &mut work_queue);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symb;

    #[test]
    fn test_sum_flattening() {
        let x = Expr::symbol("expr_flat_x");
        let y = Expr::symbol("expr_flat_y");
        let z = Expr::symbol("expr_flat_z");

        let inner = Expr::sum(vec![x, y]);
        let outer = Expr::sum(vec![inner, z]);

        match &outer.kind {
            ExprKind::Sum(terms) => assert_eq!(terms.len(), 3),
            _ => panic!("Expected Sum"),
        }
    }

    #[test]
    fn test_product_flattening_and_folding() {
        let a = Expr::symbol("expr_prod_a");
        let b = Expr::symbol("expr_prod_b");

        let inner = Expr::product(vec![Expr::integer(2), a]);
        let outer = Expr::product(vec![inner, Expr::integer(3), b]);

        match &outer.kind {
            ExprKind::Product(factors) => {
                assert_eq!(factors.len(), 3);
                assert_eq!(factors[0].as_number(), Some(&BigRational::from_integer(6.into())));
            }
            _ => panic!("Expected Product"),
        }
    }

    #[test]
    fn test_subtraction_as_sum() {
        let x = Expr::symbol("expr_sub_x");
        let y = Expr::symbol("expr_sub_y");

        match &Expr::sub_expr(x, y).kind {
            ExprKind::Sum(terms) => assert_eq!(terms.len(), 2),
            _ => panic!("Expected Sum from subtraction"),
        }
    }

    #[test]
    fn test_equality_ignores_construction_order() {
        let a = symb("expr_eq_a");
        let b = symb("expr_eq_b");
        assert_eq!(a + b, b + a);
        assert_eq!(a * b, b * a);
        assert_ne!(a + b, a * b);
    }

    #[test]
    fn test_zero_factor_annihilates() {
        let x = Expr::symbol("expr_zero_x");
        assert!(Expr::product(vec![Expr::integer(0), x]).is_zero());
    }
}
