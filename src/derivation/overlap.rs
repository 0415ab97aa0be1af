//! The overlap condition and its cubic
//!
//! Requiring the eigen-volume to be one third of the full sphere means
//! `V_loss(ξ) = 2/3·V_full`. Cancelling `V_full` leaves the cubic
//! `8ξ³ - 12ξ² + 6ξ - 1 = (2ξ - 1)³`, whose only real root is ξ = 1/2.

use std::collections::HashMap;
use std::fmt;

use num_rational::BigRational;
use tracing::debug;

use super::SphereGeometry;
use crate::{CasError, Equation, Expr, Factorization, Polynomial, Symbol, expand, symb};

/// Outcome of the root self-check
#[derive(Debug, Clone, PartialEq)]
pub enum OverlapVerdict {
    /// Exactly one real root, and it is 1/2
    UniqueHalf,
    /// Anything else; the derivation does not hold
    Unexpected { reason: String },
}

impl fmt::Display for OverlapVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UniqueHalf => write!(f, "unique real root xi = 1/2"),
            Self::Unexpected { reason } => write!(f, "unexpected result: {reason}"),
        }
    }
}

/// Everything the overlap solver computes
#[derive(Debug, Clone)]
pub struct OverlapSolution {
    pub geometry: SphereGeometry,
    pub xi: Symbol,
    /// `V_loss(ξ) = 2/3·V_full`
    pub condition: Equation,
    /// Cubic obtained from the condition
    pub derived: Polynomial,
    /// `8ξ³ - 12ξ² + 6ξ - 1`
    pub cubic: Polynomial,
    pub factored: Factorization,
    /// All distinct real roots, ascending
    pub roots: Vec<Expr>,
    pub verdict: OverlapVerdict,
}

/// `8ξ³ - 12ξ² + 6ξ - 1`
pub fn target_cubic(xi: Symbol) -> Polynomial {
    Polynomial::from_integers(xi, &[-1, 6, -12, 8])
}

/// Reduce `V_loss(ξ) = 2/3·V_full` to a primitive integer polynomial in ξ.
///
/// # Errors
/// [`CasError::NotPolynomial`] if the condition does not reduce to a
/// polynomial with numeric coefficients.
pub fn derive_cubic(condition: &Equation, geometry: &SphereGeometry, xi: Symbol) -> Result<Polynomial, CasError> {
    let normalized = expand(&Expr::div_expr(condition.residual(), geometry.v_full.clone()));
    debug!(%normalized, "condition divided by V_full");

    let poly = Polynomial::try_from_expr(&normalized, xi).ok_or_else(|| CasError::NotPolynomial {
        var: xi.name().to_string(),
        expr: normalized.to_string(),
    })?;
    let (_, primitive) = poly.primitive();
    Ok(primitive)
}

/// Derive, factor and solve the overlap cubic.
///
/// # Errors
/// Propagates engine errors; an unexpected root set is reported through
/// [`OverlapVerdict::Unexpected`] rather than as an error.
pub fn solve_overlap() -> Result<OverlapSolution, CasError> {
    let geometry = SphereGeometry::default();
    let xi = symb("xi");
    let xi_expr = xi.to_expr();

    let condition = Equation::new(
        geometry.volume_loss(&xi_expr),
        Expr::mul_expr(Expr::rational(2, 3), geometry.v_full.clone()),
    );
    let derived = derive_cubic(&condition, &geometry, xi)?;
    let cubic = target_cubic(xi);
    let factored = cubic.factor();
    let roots = cubic.roots()?;

    let verdict = judge(&derived, &cubic, &roots);
    debug!(%verdict, "overlap self-check");

    Ok(OverlapSolution {
        geometry,
        xi,
        condition,
        derived,
        cubic,
        factored,
        roots,
        verdict,
    })
}

fn judge(derived: &Polynomial, cubic: &Polynomial, roots: &[Expr]) -> OverlapVerdict {
    if derived != cubic {
        return OverlapVerdict::Unexpected {
            reason: format!("condition reduces to {derived}, not {cubic}"),
        };
    }

    let in_domain: Vec<&Expr> = roots
        .iter()
        .filter(|r| {
            r.evaluate(&HashMap::new())
                .is_ok_and(|v| v > 0.0 && v < 1.0)
        })
        .collect();

    let half = Expr::number(BigRational::new(1.into(), 2.into()));
    match in_domain.as_slice() {
        [root] if **root == half && roots.len() == 1 => OverlapVerdict::UniqueHalf,
        [root] => OverlapVerdict::Unexpected {
            reason: format!("the solution is {root}, not 1/2"),
        },
        other => OverlapVerdict::Unexpected {
            reason: format!("expected exactly one root in (0, 1), found {}", other.len()),
        },
    }
}
