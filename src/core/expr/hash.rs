//! Structural hashing for expressions.
//!
//! Sums and products hash their children commutatively, so the hash does not
//! depend on child order.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use super::ExprKind;

/// Compute the structural hash of an expression kind.
pub fn compute_expr_hash(kind: &ExprKind) -> u64 {
    let mut hasher = FxHasher::default();
    std::mem::discriminant(kind).hash(&mut hasher);
    match kind {
        ExprKind::Number(n) => n.hash(&mut hasher),
        ExprKind::Symbol(s) => s.hash(&mut hasher),
        ExprKind::Sum(children) | ExprKind::Product(children) => {
            let mut combined: u64 = 0;
            for child in children {
                combined = combined.wrapping_add(child.hash);
            }
            combined.hash(&mut hasher);
        }
        ExprKind::Pow(base, exp) => {
            base.hash.hash(&mut hasher);
            // Rotate so that a^b and b^a hash differently
            exp.hash.rotate_left(17).hash(&mut hasher);
        }
    }
    hasher.finish()
}
