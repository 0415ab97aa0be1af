//! Equations `lhs = rhs`.

use std::fmt;

use crate::Expr;

/// Two expressions asserted equal
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub lhs: Expr,
    pub rhs: Expr,
}

impl Equation {
    /// Create `lhs = rhs`
    pub fn new(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// The expression `lhs - rhs`, whose zeros are the solutions
    #[must_use]
    pub fn residual(&self) -> Expr {
        Expr::sub_expr(self.lhs.clone(), self.rhs.clone())
    }

    /// Substitute into both sides
    #[must_use]
    pub fn substitute(&self, symbol: crate::Symbol, replacement: &Expr) -> Self {
        Self {
            lhs: self.lhs.substitute(symbol, replacement),
            rhs: self.rhs.substitute(symbol, replacement),
        }
    }

    /// Unicode rendering of both sides
    #[must_use]
    pub fn to_unicode(&self) -> String {
        format!("{} = {}", self.lhs.to_unicode(), self.rhs.to_unicode())
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}
