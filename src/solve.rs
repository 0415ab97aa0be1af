//! Equation solving over the exact expression engine
//!
//! The residual `lhs - rhs` is expanded and read as a polynomial in the
//! unknown whose coefficients may themselves be symbolic. Numeric
//! polynomials of any degree go through [`Polynomial::roots`]; symbolic
//! coefficients are handled up to degree 2.

use std::collections::{BTreeMap, HashMap};

use num_traits::Signed;
use tracing::debug;

use crate::{CasError, Equation, Expr, ExprKind, Polynomial, Symbol, expand};

/// Solve `equation` for `var`, returning every distinct real solution.
///
/// Solutions for a symbol declared positive that are provably non-positive
/// are discarded.
///
/// # Errors
/// - [`CasError::NotPolynomial`] if `var` occurs other than as a
///   non-negative integer power.
/// - [`CasError::Unsolvable`] if the equation holds identically or the
///   degree is beyond what can be solved by radicals here.
///
/// # Example
/// ```
/// use simplicity_calc::{solve, symb, Equation};
///
/// let x = symb("solve_doc_x");
/// let eq = Equation::new(2 * x + 1, 7);
/// let roots = solve(&eq, x).unwrap();
/// assert_eq!(roots.len(), 1);
/// assert_eq!(roots[0].to_string(), "3");
/// ```
pub fn solve(equation: &Equation, var: Symbol) -> Result<Vec<Expr>, CasError> {
    let residual = expand(&equation.residual());
    debug!(%var, %residual, "solving");

    let coeffs = coefficients_by_degree(&residual, var)?;
    let degree = coeffs.len().saturating_sub(1);

    let candidates = if coeffs.iter().all(Expr::is_number) {
        let numeric = coeffs
            .iter()
            .filter_map(|c| c.as_number().cloned())
            .collect();
        Polynomial::new(var, numeric).roots()?
    } else {
        match degree {
            0 => Vec::new(),
            1 => vec![expand(&Expr::div_expr(
                Expr::neg_expr(coeffs[0].clone()),
                coeffs[1].clone(),
            ))],
            2 => quadratic(&coeffs[0], &coeffs[1], &coeffs[2]),
            d => {
                return Err(CasError::unsolvable(
                    var.name().as_ref(),
                    format!("symbolic polynomial of degree {d}"),
                ));
            }
        }
    };

    let mut solutions: Vec<Expr> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if var.is_positive() && is_non_positive(&candidate) {
            debug!(%var, solution = %candidate, "discarding non-positive solution");
            continue;
        }
        if !solutions.contains(&candidate) {
            solutions.push(candidate);
        }
    }
    debug!(%var, count = solutions.len(), "solved");
    Ok(solutions)
}

/// Solve for `var` and require exactly one solution.
///
/// # Errors
/// [`CasError::SolutionCount`] when zero or several solutions remain, plus
/// the errors of [`solve`].
pub fn solve_unique(equation: &Equation, var: Symbol) -> Result<Expr, CasError> {
    let mut solutions = solve(equation, var)?;
    if solutions.len() != 1 {
        return Err(CasError::SolutionCount {
            var: var.name().to_string(),
            count: solutions.len(),
        });
    }
    Ok(solutions.remove(0))
}

/// Solve a system by sequential elimination.
///
/// Unknowns are eliminated in the given order: each is solved uniquely from
/// the first unused equation that contains it, and its solution is
/// substituted into the remaining equations. Earlier solutions are then
/// back-substituted so that every result is free of the other unknowns.
///
/// # Errors
/// [`CasError::Unsolvable`] if no remaining equation mentions an unknown,
/// plus the errors of [`solve_unique`].
pub fn solve_system(
    equations: &[Equation],
    unknowns: &[Symbol],
) -> Result<Vec<(Symbol, Expr)>, CasError> {
    let mut pending: Vec<Equation> = equations.to_vec();
    let mut solved: Vec<(Symbol, Expr)> = Vec::with_capacity(unknowns.len());

    for &unknown in unknowns {
        let position = pending
            .iter()
            .position(|eq| eq.residual().contains_symbol(unknown))
            .ok_or_else(|| {
                CasError::unsolvable(unknown.name().as_ref(), "no remaining equation contains it")
            })?;
        let equation = pending.remove(position);
        let value = solve_unique(&equation, unknown)?;
        debug!(%unknown, %value, "eliminated");

        pending = pending
            .iter()
            .map(|eq| eq.substitute(unknown, &value))
            .collect();
        solved.push((unknown, value));
    }

    // Back-substitution, latest first
    for i in (0..solved.len()).rev() {
        let (symbol, value) = solved[i].clone();
        for (_, earlier) in solved.iter_mut().take(i) {
            if earlier.contains_symbol(symbol) {
                *earlier = expand(&earlier.substitute(symbol, &value));
            }
        }
    }
    Ok(solved)
}

/// Coefficients of `var^0, var^1, ...` in an expanded expression, with
/// trailing zeros removed
fn coefficients_by_degree(expr: &Expr, var: Symbol) -> Result<Vec<Expr>, CasError> {
    let terms: Vec<&Expr> = match &expr.kind {
        ExprKind::Sum(terms) => terms.iter().map(AsRef::as_ref).collect(),
        _ => vec![expr],
    };

    let mut by_degree: BTreeMap<usize, Vec<Expr>> = BTreeMap::new();
    for term in terms {
        let (degree, coefficient) = split_monomial(term, var)?;
        by_degree.entry(degree).or_default().push(coefficient);
    }

    let max_degree = by_degree.keys().next_back().copied().unwrap_or(0);
    let mut coeffs: Vec<Expr> = (0..=max_degree)
        .map(|d| {
            by_degree
                .remove(&d)
                .map_or_else(|| Expr::integer(0), |parts| expand(&Expr::sum(parts)))
        })
        .collect();
    while coeffs.len() > 1 && coeffs.last().is_some_and(Expr::is_zero) {
        coeffs.pop();
    }
    Ok(coeffs)
}

/// Split a term into `(degree in var, coefficient)`
fn split_monomial(term: &Expr, var: Symbol) -> Result<(usize, Expr), CasError> {
    if !term.contains_symbol(var) {
        return Ok((0, term.clone()));
    }
    let not_polynomial = || CasError::NotPolynomial {
        var: var.name().to_string(),
        expr: term.to_string(),
    };

    let factors: Vec<&Expr> = match &term.kind {
        ExprKind::Product(factors) => factors.iter().map(AsRef::as_ref).collect(),
        _ => vec![term],
    };

    let mut degree = 0usize;
    let mut rest = Vec::with_capacity(factors.len());
    for factor in factors {
        match &factor.kind {
            ExprKind::Symbol(s) if *s == var => degree += 1,
            ExprKind::Pow(base, exp) if base.as_symbol() == Some(var) => {
                let n = exp
                    .as_number()
                    .filter(|n| n.is_integer() && !n.is_negative())
                    .and_then(|n| usize::try_from(n.to_integer()).ok())
                    .ok_or_else(not_polynomial)?;
                degree += n;
            }
            _ if factor.contains_symbol(var) => return Err(not_polynomial()),
            _ => rest.push(factor.clone()),
        }
    }
    Ok((degree, Expr::product(rest)))
}

/// Both roots of `a*x^2 + b*x + c` with symbolic coefficients
fn quadratic(c: &Expr, b: &Expr, a: &Expr) -> Vec<Expr> {
    let discriminant = expand(&Expr::sub_expr(
        Expr::mul_expr(b.clone(), b.clone()),
        Expr::product(vec![Expr::integer(4), a.clone(), c.clone()]),
    ));
    if discriminant.is_known_negative() {
        return Vec::new();
    }
    let two_a = Expr::mul_expr(Expr::integer(2), a.clone());
    let root = Expr::sqrt(discriminant.clone());

    let mut roots = vec![expand(&Expr::div_expr(
        Expr::sub_expr(Expr::neg_expr(b.clone()), root.clone()),
        two_a.clone(),
    ))];
    if !discriminant.is_zero() {
        roots.push(expand(&Expr::div_expr(
            Expr::add_expr(Expr::neg_expr(b.clone()), root),
            two_a,
        )));
    }
    roots
}

fn is_non_positive(expr: &Expr) -> bool {
    if expr.is_zero() || expr.is_known_negative() {
        return true;
    }
    // Closed numeric forms like 1 - sqrt(2) are decided by value
    expr.free_symbols().iter().all(|s| s.is_constant())
        && expr
            .evaluate(&HashMap::new())
            .is_ok_and(|value| value <= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{symb, symb_positive};
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_numeric() {
        let x = symb("solve_lin_x");
        let roots = solve(&Equation::new(3 * x - 2, 0), x).unwrap();
        assert_eq!(roots, vec![Expr::rational(2, 3)]);
    }

    #[test]
    fn test_quadratic_numeric_has_two_radical_roots() {
        let x = symb("solve_quad_x");
        let roots = solve(&Equation::new(x * x, 2), x).unwrap();
        assert_eq!(roots.len(), 2);
        let values: Vec<f64> = roots
            .iter()
            .map(|r| r.evaluate(&HashMap::new()).unwrap())
            .collect();
        assert_relative_eq!(values[0], -std::f64::consts::SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(values[1], std::f64::consts::SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn test_positive_symbol_discards_negative_root() {
        let x = symb_positive("solve_pos_x");
        let roots = solve(&Equation::new(x * x, 4), x).unwrap();
        assert_eq!(roots, vec![Expr::integer(2)]);
    }

    #[test]
    fn test_repeated_root_reported_once() {
        let x = symb("solve_rep_x");
        let cube = Expr::pow(2 * x - 1, Expr::integer(3));
        let roots = solve(&Equation::new(cube, 0), x).unwrap();
        assert_eq!(roots, vec![Expr::rational(1, 2)]);
    }

    #[test]
    fn test_symbolic_linear() {
        let k = symb_positive("solve_sym_k");
        let m = symb_positive("solve_sym_m");
        let y = symb_positive("solve_sym_y");
        let value = solve_unique(&Equation::new(k * y, m), y).unwrap();
        assert_eq!(value.to_string(), "solve_sym_m/solve_sym_k");
    }

    #[test]
    fn test_identity_is_unsolvable() {
        let x = symb("solve_id_x");
        let err = solve(&Equation::new(x + 1, 1 + x), x).unwrap_err();
        assert!(matches!(err, CasError::Unsolvable { .. }));
    }

    #[test]
    fn test_contradiction_has_no_solution() {
        let x = symb("solve_none_x");
        let y = symb("solve_none_y");
        assert!(solve(&Equation::new(y, 1), x).unwrap().is_empty());
        let err = solve_unique(&Equation::new(y, 1), x).unwrap_err();
        assert_eq!(
            err,
            CasError::SolutionCount {
                var: "solve_none_x".to_string(),
                count: 0
            }
        );
    }

    #[test]
    fn test_radical_in_unknown_is_not_polynomial() {
        let x = symb("solve_np_x");
        let err = solve(&Equation::new(Expr::sqrt(x.to_expr()), 3), x).unwrap_err();
        assert!(matches!(err, CasError::NotPolynomial { .. }));
    }

    #[test]
    fn test_system_back_substitutes() {
        let p = symb_positive("solve_sys_p");
        let q = symb_positive("solve_sys_q");
        let q0 = symb_positive("solve_sys_q0");
        let equations = [Equation::new(p * q, 6), Equation::new(q, q0)];
        let solved = solve_system(&equations, &[p, q]).unwrap();
        assert_eq!(solved[0].0, p);
        assert_eq!(solved[0].1.to_string(), "6/solve_sys_q0");
        assert_eq!(solved[1].1, q0.to_expr());
    }

    #[test]
    fn test_system_missing_equation() {
        let p = symb("solve_miss_p");
        let q = symb("solve_miss_q");
        let err = solve_system(&[Equation::new(p, 1)], &[p, q]).unwrap_err();
        assert!(matches!(err, CasError::Unsolvable { .. }));
    }
}
