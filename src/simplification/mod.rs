//! Simplification framework - reduces expressions to canonical form
pub(crate) mod engine;
mod expand;
mod rules;

pub use expand::expand;

use crate::Expr;

/// Simplify an expression with the default limits
#[must_use]
pub fn simplify(expr: &Expr) -> Expr {
    engine::Simplifier::new().simplify(expr)
}

impl Expr {
    /// Simplified copy of this expression, see [`simplify`]
    #[must_use]
    pub fn simplified(&self) -> Self {
        simplify(self)
    }

    /// Expanded copy of this expression, see [`expand`]
    #[must_use]
    pub fn expanded(&self) -> Self {
        expand(self)
    }
}
