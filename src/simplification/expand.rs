//! Polynomial expansion: distribute products over sums and multiply out
//! positive integer powers of sums.

use num_traits::ToPrimitive;
use tracing::warn;

use super::simplify;
use crate::{Expr, ExprKind};

/// Products expanding into more terms than this are left factored
const MAX_EXPANDED_TERMS: usize = 4096;

/// Powers of sums above this exponent are left unexpanded
const MAX_EXPANDED_POWER: i64 = 64;

/// Expand and simplify.
///
/// ```
/// use simplicity_calc::{expand, symb};
///
/// let xi = symb("expand_doc_xi");
/// let cube = simplicity_calc::Expr::pow(2 * xi - 1, 3.into());
/// assert_eq!(
///     expand(&cube).to_string(),
///     "8*expand_doc_xi^3 - 12*expand_doc_xi^2 + 6*expand_doc_xi - 1"
/// );
/// ```
#[must_use]
pub fn expand(expr: &Expr) -> Expr {
    let mut current = simplify(expr);
    // Simplification can expose new sums (e.g. a substituted power), so repeat
    for _ in 0..8 {
        let next = simplify(&distribute(&current));
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn terms_of(expr: &Expr) -> Vec<Expr> {
    match &expr.kind {
        ExprKind::Sum(terms) => terms.iter().map(|t| (**t).clone()).collect(),
        _ => vec![expr.clone()],
    }
}

/// Multiply two lists of summands term by term
fn multiply_out(lhs: &[Expr], rhs: &[Expr]) -> Option<Vec<Expr>> {
    if lhs.len() * rhs.len() > MAX_EXPANDED_TERMS {
        warn!(
            terms = lhs.len() * rhs.len(),
            "Expansion too large, leaving product factored"
        );
        return None;
    }
    Some(
        lhs.iter()
            .flat_map(|a| rhs.iter().map(move |b| Expr::mul_expr(a.clone(), b.clone())))
            .collect(),
    )
}

fn distribute(expr: &Expr) -> Expr {
    match &expr.kind {
        ExprKind::Number(_) | ExprKind::Symbol(_) => expr.clone(),
        ExprKind::Sum(terms) => Expr::sum(terms.iter().map(|t| distribute(t)).collect()),
        ExprKind::Product(factors) => {
            let mut acc = vec![Expr::integer(1)];
            for factor in factors {
                let expanded = distribute(factor);
                match multiply_out(&acc, &terms_of(&expanded)) {
                    Some(next) => acc = next,
                    None => return expr.clone(),
                }
            }
            Expr::sum(acc)
        }
        ExprKind::Pow(base, exp) => {
            let base = distribute(base);
            let power = exp
                .as_number()
                .filter(|n| n.is_integer())
                .and_then(|n| n.to_integer().to_i64())
                .filter(|n| (2..=MAX_EXPANDED_POWER).contains(n));

            match (power, &base.kind) {
                (Some(n), ExprKind::Sum(_)) => {
                    let summands = terms_of(&base);
                    let mut acc = summands.clone();
                    for _ in 1..n {
                        match multiply_out(&acc, &summands) {
                            // Collect as we go to keep the intermediate small
                            Some(next) => acc = terms_of(&simplify(&Expr::sum(next))),
                            None => return Expr::pow(base, (**exp).clone()),
                        }
                    }
                    Expr::sum(acc)
                }
                _ => Expr::pow(base, distribute(exp)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symb;

    #[test]
    fn test_distribute_product_over_sum() {
        let x = symb("expand_x");
        let y = symb("expand_y");
        let e = Expr::rational(2, 3) * (x + y);
        assert_eq!(expand(&e).to_string(), "2*expand_x/3 + 2*expand_y/3");
    }

    #[test]
    fn test_expand_square_collects_terms() {
        let x = symb("expand_sq_x");
        let e = Expr::pow(x + 1, Expr::integer(2));
        assert_eq!(expand(&e).to_string(), "expand_sq_x^2 + 2*expand_sq_x + 1");
    }

    #[test]
    fn test_difference_of_squares_cancels() {
        let x = symb("expand_dos_x");
        let e = (x + 1) * (x - 1);
        assert_eq!(expand(&e).to_string(), "expand_dos_x^2 - 1");
    }

    #[test]
    fn test_fractional_power_of_sum_untouched() {
        let x = symb("expand_frac_x");
        let e = Expr::sqrt(x + 1);
        assert_eq!(expand(&e), e);
    }
}
