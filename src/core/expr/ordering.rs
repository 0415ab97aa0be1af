//! Canonical ordering for expressions.
//!
//! Three comparisons are provided:
//! - [`expr_cmp`]: a total structural order used as the tie-breaker everywhere
//! - [`factor_cmp`]: order of factors inside a product (coefficient first,
//!   then numeric radicals, then π, then symbols alphabetically)
//! - [`sum_term_cmp`]: order of terms inside a sum (higher powers first,
//!   numeric constant last), which gives the familiar `8*xi^3 - 12*xi^2 + 6*xi - 1`

use std::cmp::Ordering as CmpOrdering;

use num_traits::One;

use super::{Expr, ExprKind};

fn kind_rank(e: &Expr) -> u8 {
    match &e.kind {
        ExprKind::Number(_) => 0,
        ExprKind::Symbol(_) => 1,
        ExprKind::Pow(_, _) => 2,
        ExprKind::Product(_) => 3,
        ExprKind::Sum(_) => 4,
    }
}

fn children_cmp(a: &[std::sync::Arc<Expr>], b: &[std::sync::Arc<Expr>]) -> CmpOrdering {
    for (x, y) in a.iter().zip(b.iter()) {
        match expr_cmp(x, y) {
            CmpOrdering::Equal => {}
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Total structural order.
/// Order: Number < Symbol < Pow < Product < Sum
pub fn expr_cmp(a: &Expr, b: &Expr) -> CmpOrdering {
    use ExprKind::{Number, Pow, Product, Sum, Symbol};
    match (&a.kind, &b.kind) {
        (Number(x), Number(y)) => x.cmp(y),
        (Symbol(x), Symbol(y)) => x.cmp(y),
        (Pow(b1, e1), Pow(b2, e2)) => expr_cmp(b1, b2).then_with(|| expr_cmp(e1, e2)),
        (Product(f1), Product(f2)) | (Sum(f1), Sum(f2)) => children_cmp(f1, f2),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Split a factor into (base, exponent); `None` stands for the exponent 1.
fn base_and_exp(e: &Expr) -> (&Expr, Option<&Expr>) {
    match &e.kind {
        ExprKind::Pow(b, exp) => (b.as_ref(), Some(exp.as_ref())),
        _ => (e, None),
    }
}

/// Compare two exponents where `None` means 1
fn exp_cmp(a: Option<&Expr>, b: Option<&Expr>) -> CmpOrdering {
    match (a, b) {
        (None, None) => CmpOrdering::Equal,
        (Some(x), Some(y)) => expr_cmp(x, y),
        (Some(x), None) => match &x.kind {
            ExprKind::Number(n) => n.cmp(&num_rational::BigRational::one()),
            _ => CmpOrdering::Greater,
        },
        (None, Some(y)) => exp_cmp(Some(y), None).reverse(),
    }
}

/// Order of factors inside a product.
pub fn factor_cmp(a: &Expr, b: &Expr) -> CmpOrdering {
    match (&a.kind, &b.kind) {
        (ExprKind::Number(x), ExprKind::Number(y)) => return x.cmp(y),
        (ExprKind::Number(_), _) => return CmpOrdering::Less,
        (_, ExprKind::Number(_)) => return CmpOrdering::Greater,
        _ => {}
    }
    let (base_a, exp_a) = base_and_exp(a);
    let (base_b, exp_b) = base_and_exp(b);
    expr_cmp(base_a, base_b).then_with(|| exp_cmp(exp_a, exp_b))
}

/// Non-numeric factors of a term, in product order
fn monomial_factors(e: &Expr) -> Vec<&Expr> {
    match &e.kind {
        ExprKind::Product(factors) => factors
            .iter()
            .filter(|f| !matches!(f.kind, ExprKind::Number(_)))
            .map(AsRef::as_ref)
            .collect(),
        _ => vec![e],
    }
}

/// Order of terms inside a sum.
pub fn sum_term_cmp(a: &Expr, b: &Expr) -> CmpOrdering {
    match (&a.kind, &b.kind) {
        (ExprKind::Number(x), ExprKind::Number(y)) => return x.cmp(y),
        (ExprKind::Number(_), _) => return CmpOrdering::Greater,
        (_, ExprKind::Number(_)) => return CmpOrdering::Less,
        _ => {}
    }

    let fa = monomial_factors(a);
    let fb = monomial_factors(b);
    for (x, y) in fa.iter().zip(fb.iter()) {
        let (base_x, exp_x) = base_and_exp(x);
        let (base_y, exp_y) = base_and_exp(y);
        match expr_cmp(base_x, base_y) {
            CmpOrdering::Equal => {}
            other => return other,
        }
        // Higher powers first
        match exp_cmp(exp_x, exp_y) {
            CmpOrdering::Equal => {}
            other => return other.reverse(),
        }
    }
    fa.len()
        .cmp(&fb.len())
        .then_with(|| a.coefficient().cmp(&b.coefficient()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pi, symb};

    #[test]
    fn test_factor_order_puts_coefficient_and_pi_first() {
        let r = symb("ord_r");
        let coeff = Expr::integer(4);
        let p = Expr::from_symbol(pi());
        let cube = r.pow(3);
        assert_eq!(factor_cmp(&coeff, &p), CmpOrdering::Less);
        assert_eq!(factor_cmp(&p, &cube), CmpOrdering::Less);
        assert_eq!(factor_cmp(&Expr::sqrt(Expr::integer(2)), &p), CmpOrdering::Less);
    }

    #[test]
    fn test_sum_order_descending_degree_numbers_last() {
        let xi = symb("ord_xi");
        let cubic = xi.pow(3);
        let square = xi.pow(2);
        let linear = xi.to_expr();
        let constant = Expr::integer(-1);
        assert_eq!(sum_term_cmp(&cubic, &square), CmpOrdering::Less);
        assert_eq!(sum_term_cmp(&square, &linear), CmpOrdering::Less);
        assert_eq!(sum_term_cmp(&linear, &constant), CmpOrdering::Less);
    }
}
