//! Structural queries and rewrites: substitution, free symbols, positivity.

use std::collections::BTreeSet;
use std::sync::Arc;

use num_rational::BigRational;
use num_traits::{One, Signed};

use super::{Expr, ExprKind};
use crate::core::symbol::Symbol;

impl Expr {
    /// Rebuild this node with `f` applied to every direct child.
    /// Returns a clone when no child changed.
    #[must_use]
    pub fn map_children<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Self) -> Self,
    {
        match &self.kind {
            ExprKind::Number(_) | ExprKind::Symbol(_) => self.clone(),
            ExprKind::Sum(terms) => Self::sum(terms.iter().map(|t| f(t)).collect()),
            ExprKind::Product(factors) => Self::product(factors.iter().map(|t| f(t)).collect()),
            ExprKind::Pow(base, exp) => Self::pow(f(base), f(exp)),
        }
    }

    /// Replace every occurrence of `symbol` with `replacement`.
    ///
    /// The result is rebuilt through the canonical constructors but not
    /// simplified; call [`Expr::simplified`] afterwards.
    #[must_use]
    pub fn substitute(&self, symbol: Symbol, replacement: &Self) -> Self {
        match &self.kind {
            ExprKind::Symbol(s) if *s == symbol => replacement.clone(),
            ExprKind::Number(_) | ExprKind::Symbol(_) => self.clone(),
            _ if !self.contains_symbol(symbol) => self.clone(),
            _ => self.map_children(|child| child.substitute(symbol, replacement)),
        }
    }

    /// Check whether `symbol` occurs anywhere in the expression
    #[must_use]
    pub fn contains_symbol(&self, symbol: Symbol) -> bool {
        match &self.kind {
            ExprKind::Number(_) => false,
            ExprKind::Symbol(s) => *s == symbol,
            ExprKind::Sum(children) | ExprKind::Product(children) => {
                children.iter().any(|c| c.contains_symbol(symbol))
            }
            ExprKind::Pow(base, exp) => base.contains_symbol(symbol) || exp.contains_symbol(symbol),
        }
    }

    /// All symbols occurring in the expression (π included), in canonical order
    #[must_use]
    pub fn free_symbols(&self) -> BTreeSet<Symbol> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<Symbol>) {
        match &self.kind {
            ExprKind::Number(_) => {}
            ExprKind::Symbol(s) => {
                out.insert(*s);
            }
            ExprKind::Sum(children) | ExprKind::Product(children) => {
                for c in children {
                    c.collect_symbols(out);
                }
            }
            ExprKind::Pow(base, exp) => {
                base.collect_symbols(out);
                exp.collect_symbols(out);
            }
        }
    }

    /// Count the total number of nodes in the expression tree
    #[must_use]
    pub fn node_count(&self) -> usize {
        match &self.kind {
            ExprKind::Number(_) | ExprKind::Symbol(_) => 1,
            ExprKind::Sum(children) | ExprKind::Product(children) => {
                1 + children.iter().map(|c| c.node_count()).sum::<usize>()
            }
            ExprKind::Pow(base, exp) => 1 + base.node_count() + exp.node_count(),
        }
    }

    /// Get the maximum nesting depth of the expression tree
    #[must_use]
    pub fn max_depth(&self) -> usize {
        match &self.kind {
            ExprKind::Number(_) | ExprKind::Symbol(_) => 1,
            ExprKind::Sum(children) | ExprKind::Product(children) => {
                1 + children.iter().map(|c| c.max_depth()).max().unwrap_or(0)
            }
            ExprKind::Pow(base, exp) => 1 + base.max_depth().max(exp.max_depth()),
        }
    }

    /// Conservative positivity check.
    ///
    /// `true` means the expression is provably strictly positive for every
    /// admissible value of its symbols; `false` means "unknown".
    #[must_use]
    pub fn is_known_positive(&self) -> bool {
        match &self.kind {
            ExprKind::Number(n) => n.is_positive(),
            ExprKind::Symbol(s) => s.is_positive(),
            ExprKind::Sum(children) | ExprKind::Product(children) => {
                children.iter().all(|c| c.is_known_positive())
            }
            ExprKind::Pow(base, _) => base.is_known_positive(),
        }
    }

    /// Conservative negativity check (`true` only when provable)
    #[must_use]
    pub fn is_known_negative(&self) -> bool {
        match &self.kind {
            ExprKind::Number(n) => n.is_negative(),
            ExprKind::Product(factors) => {
                let negatives = factors.iter().filter(|f| f.is_known_negative()).count();
                let positives = factors.iter().filter(|f| f.is_known_positive()).count();
                negatives + positives == factors.len() && negatives % 2 == 1
            }
            ExprKind::Sum(terms) => terms.iter().all(|t| t.is_known_negative()),
            ExprKind::Symbol(_) | ExprKind::Pow(_, _) => false,
        }
    }

    /// Numeric coefficient of a term: the leading number of a product,
    /// the value of a number, or 1.
    #[must_use]
    pub fn coefficient(&self) -> BigRational {
        match &self.kind {
            ExprKind::Number(n) => n.clone(),
            ExprKind::Product(factors) => factors
                .first()
                .and_then(|f| f.as_number().cloned())
                .unwrap_or_else(BigRational::one),
            _ => BigRational::one(),
        }
    }

    /// Split a term into `(coefficient, rest)` so that `term = coefficient * rest`.
    #[must_use]
    pub fn split_coefficient(&self) -> (BigRational, Self) {
        match &self.kind {
            ExprKind::Number(n) => (n.clone(), Self::integer(1)),
            ExprKind::Product(factors) => {
                if let Some(first) = factors.first()
                    && let Some(c) = first.as_number()
                {
                    let rest: Vec<Arc<Self>> = factors[1..].to_vec();
                    (c.clone(), Self::product_from_arcs(rest))
                } else {
                    (BigRational::one(), self.clone())
                }
            }
            _ => (BigRational::one(), self.clone()),
        }
    }

    /// Split into `(base, exponent)`; non-powers have exponent 1
    #[must_use]
    pub fn as_base_exp(&self) -> (Self, Self) {
        match &self.kind {
            ExprKind::Pow(b, e) => ((**b).clone(), (**e).clone()),
            _ => (self.clone(), Self::integer(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{symb, symb_positive};

    #[test]
    fn test_substitute_rebuilds_canonically() {
        let x = symb("ana_x");
        let y = symb("ana_y");
        let e = x + Expr::integer(1);
        let replaced = e.substitute(x, &Expr::integer(2));
        assert_eq!(replaced, Expr::integer(3));

        let e2 = x * y;
        assert!(!e2.substitute(y, &x.to_expr()).contains_symbol(y));
    }

    #[test]
    fn test_free_symbols_and_contains() {
        let a = symb("ana_a");
        let b = symb("ana_b");
        let e = a.pow(2) + b * Expr::pi();
        let syms = e.free_symbols();
        assert!(syms.contains(&a));
        assert!(syms.contains(&b));
        assert!(syms.contains(&crate::pi()));
        assert_eq!(syms.len(), 3);
    }

    #[test]
    fn test_positivity() {
        let r = symb_positive("ana_pos_r");
        let x = symb("ana_plain_x");
        assert!((Expr::rational(4, 3) * Expr::pi() * r.pow(3)).is_known_positive());
        assert!(!(x * r).is_known_positive());
        assert!(Expr::integer(-2).is_known_negative());
        assert!((Expr::integer(-2) * r).is_known_negative());
    }

    #[test]
    fn test_split_coefficient() {
        let x = symb("ana_split_x");
        let (c, rest) = (Expr::integer(6) * x).split_coefficient();
        assert_eq!(c, BigRational::from_integer(6.into()));
        assert_eq!(rest, x.to_expr());
    }
}
