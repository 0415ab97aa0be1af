//! Univariate polynomials with exact rational coefficients.
//!
//! Used by the solver whenever an equation is polynomial in the unknown with
//! purely numeric coefficients, and by the overlap derivation to factor the
//! cubic. Coefficients are stored densely, lowest degree first, with no
//! trailing zeros.

use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use tracing::debug;

use crate::core::error::CasError;
use crate::core::symbol::Symbol;
use crate::{Expr, ExprKind};

/// Rational-root candidates are only enumerated for coefficients up to this size
const DIVISOR_SEARCH_LIMIT: u64 = 1_000_000_000_000;

/// Dense univariate polynomial `c0 + c1*x + c2*x^2 + ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    var: Symbol,
    coeffs: Vec<BigRational>,
}

/// Factorization `content * Π factor^multiplicity`
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization {
    pub content: BigRational,
    /// Primitive integer factors with positive leading coefficient
    pub factors: Vec<(Polynomial, u32)>,
}

impl Factorization {
    /// Build the factored expression, e.g. `(2*xi - 1)^3`
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        let mut parts = vec![Expr::number(self.content.clone())];
        for (factor, multiplicity) in &self.factors {
            let base = factor.to_expr();
            if *multiplicity == 1 {
                parts.push(base);
            } else {
                parts.push(Expr::pow(base, Expr::integer(i64::from(*multiplicity))));
            }
        }
        Expr::product(parts)
    }
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expr())
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expr())
    }
}

fn integer(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

impl Polynomial {
    /// Create from coefficients, lowest degree first
    #[must_use]
    pub fn new(var: Symbol, coeffs: Vec<BigRational>) -> Self {
        let mut p = Self { var, coeffs };
        p.trim();
        p
    }

    /// Create from integer coefficients, lowest degree first
    #[must_use]
    pub fn from_integers(var: Symbol, coeffs: &[i64]) -> Self {
        Self::new(var, coeffs.iter().map(|&c| integer(c)).collect())
    }

    fn trim(&mut self) {
        while self.coeffs.last().is_some_and(Zero::is_zero) {
            self.coeffs.pop();
        }
    }

    /// Check if this is the zero polynomial
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree (the zero polynomial reports 0)
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Leading coefficient (0 for the zero polynomial)
    #[must_use]
    pub fn leading_coeff(&self) -> BigRational {
        self.coeffs.last().cloned().unwrap_or_else(BigRational::zero)
    }

    /// Read an expanded expression as a polynomial in `var`.
    ///
    /// The expression must already be expanded (a sum of monomials) and every
    /// coefficient must be a plain number. Returns `None` otherwise.
    #[must_use]
    pub fn try_from_expr(expr: &Expr, var: Symbol) -> Option<Self> {
        let terms: Vec<&Expr> = match &expr.kind {
            ExprKind::Sum(terms) => terms.iter().map(AsRef::as_ref).collect(),
            _ => vec![expr],
        };

        let mut coeffs: Vec<BigRational> = Vec::new();
        for term in terms {
            let (coeff, rest) = term.split_coefficient();
            let degree = monomial_degree(&rest, var)?;
            if coeffs.len() <= degree {
                coeffs.resize(degree + 1, BigRational::zero());
            }
            coeffs[degree] += coeff;
        }
        Some(Self::new(var, coeffs))
    }

    /// Convert back to a canonical expression
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        let x = Expr::from_symbol(self.var);
        let terms = self
            .coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, c)| {
                let monomial = match i {
                    0 => Expr::integer(1),
                    1 => x.clone(),
                    _ => Expr::pow(x.clone(), Expr::integer(i as i64)),
                };
                Expr::product(vec![Expr::number(c.clone()), monomial])
            })
            .collect();
        Expr::sum(terms)
    }

    /// Evaluate exactly at `x` (Horner's scheme)
    #[must_use]
    pub fn evaluate(&self, x: &BigRational) -> BigRational {
        self.coeffs
            .iter()
            .rev()
            .fold(BigRational::zero(), |acc, c| acc * x + c)
    }

    /// Polynomial addition
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| {
                let a = self.coeffs.get(i).cloned().unwrap_or_else(BigRational::zero);
                let b = other.coeffs.get(i).cloned().unwrap_or_else(BigRational::zero);
                a + b
            })
            .collect();
        Self::new(self.var, coeffs)
    }

    /// Negate all coefficients
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::new(self.var, self.coeffs.iter().map(|c| -c).collect())
    }

    /// Polynomial subtraction
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    /// Multiply every coefficient by `k`
    #[must_use]
    pub fn scale(&self, k: &BigRational) -> Self {
        Self::new(self.var, self.coeffs.iter().map(|c| c * k).collect())
    }

    /// Polynomial multiplication
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::new(self.var, Vec::new());
        }
        let mut coeffs = vec![BigRational::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Self::new(self.var, coeffs)
    }

    /// Formal derivative
    #[must_use]
    pub fn derivative(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * integer(i as i64))
            .collect();
        Self::new(self.var, coeffs)
    }

    /// Polynomial division: self = quotient * other + remainder
    /// Returns None if `other` is zero
    #[must_use]
    pub fn div_rem(&self, other: &Self) -> Option<(Self, Self)> {
        if other.is_zero() {
            return None;
        }
        let div_lc = other.leading_coeff();
        let div_deg = other.degree();

        let mut quotient = vec![BigRational::zero(); self.coeffs.len().max(1)];
        let mut remainder = self.clone();

        while !remainder.is_zero() && remainder.degree() >= div_deg {
            let shift = remainder.degree() - div_deg;
            let q = remainder.leading_coeff() / &div_lc;
            quotient[shift] += &q;

            let mut term = vec![BigRational::zero(); shift];
            term.push(q);
            remainder = remainder.sub(&Self::new(self.var, term).mul(other));
        }

        Some((Self::new(self.var, quotient), remainder))
    }

    /// Make polynomial monic (leading coefficient = 1)
    fn make_monic(&mut self) {
        let lc = self.leading_coeff();
        if !lc.is_zero() && !lc.is_one() {
            for c in &mut self.coeffs {
                *c /= &lc;
            }
        }
    }

    /// Monic greatest common divisor (Euclidean algorithm)
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        let mut r0 = self.clone();
        let mut r1 = other.clone();
        while !r1.is_zero() {
            let rem = r0.div_rem(&r1).map_or_else(|| Self::new(self.var, Vec::new()), |(_, r)| r);
            r0 = r1;
            r1 = rem;
        }
        r0.make_monic();
        r0
    }

    /// Split into `(content, primitive)` with `self = content * primitive`,
    /// where `primitive` has coprime integer coefficients and a positive
    /// leading coefficient.
    #[must_use]
    pub fn primitive(&self) -> (BigRational, Self) {
        if self.is_zero() {
            return (BigRational::zero(), self.clone());
        }
        let denom_lcm = self
            .coeffs
            .iter()
            .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
        let numer_gcd = self
            .coeffs
            .iter()
            .filter(|c| !c.is_zero())
            .fold(BigInt::zero(), |acc, c| {
                acc.gcd(&(c.numer() * (&denom_lcm / c.denom())))
            });

        let mut content = BigRational::new(numer_gcd, denom_lcm);
        if self.leading_coeff().is_negative() {
            content = -content;
        }
        let primitive = self.scale(&content.recip());
        (content, primitive)
    }

    /// Square-free part `p / gcd(p, p')`, made primitive
    #[must_use]
    pub fn square_free(&self) -> Self {
        if self.degree() < 2 {
            return self.primitive().1;
        }
        let g = self.gcd(&self.derivative());
        let reduced = self.div_rem(&g).map_or_else(|| self.clone(), |(q, _)| q);
        reduced.primitive().1
    }

    /// All distinct rational roots, ascending.
    ///
    /// Candidates `±p/q` come from the rational root theorem; coefficient
    /// magnitudes above an internal search limit skip the enumeration.
    #[must_use]
    pub fn rational_roots(&self) -> Vec<BigRational> {
        if self.is_zero() {
            return Vec::new();
        }
        let (_, mut prim) = self.primitive();
        let mut roots = Vec::new();

        if prim.coeffs.first().is_some_and(Zero::is_zero) {
            roots.push(BigRational::zero());
            while prim.coeffs.first().is_some_and(Zero::is_zero) {
                prim.coeffs.remove(0);
            }
        }
        if prim.degree() == 0 {
            return roots;
        }

        let a0 = prim.coeffs[0].numer().abs();
        let an = prim.leading_coeff().numer().abs();
        let (Some(p_divs), Some(q_divs)) = (divisors(&a0), divisors(&an)) else {
            debug!(
                "Coefficients of {} too large for rational root search",
                self
            );
            return roots;
        };

        for p in &p_divs {
            for q in &q_divs {
                let candidate = BigRational::new(p.clone(), q.clone());
                for r in [candidate.clone(), -candidate] {
                    if !roots.contains(&r) && prim.evaluate(&r).is_zero() {
                        roots.push(r);
                    }
                }
            }
        }
        roots.sort();
        roots
    }

    /// Factor over the rationals into linear factors and one residual factor.
    #[must_use]
    pub fn factor(&self) -> Factorization {
        if self.is_zero() {
            return Factorization {
                content: BigRational::zero(),
                factors: Vec::new(),
            };
        }

        let (mut content, mut rest) = self.primitive();
        let mut factors = Vec::new();

        for r in self.rational_roots() {
            // (q*x - p) for r = p/q
            let linear = Self::new(
                self.var,
                vec![
                    BigRational::from_integer(-r.numer().clone()),
                    BigRational::from_integer(r.denom().clone()),
                ],
            );
            let mut multiplicity = 0u32;
            while let Some((quotient, remainder)) = rest.div_rem(&linear)
                && remainder.is_zero()
            {
                rest = quotient;
                multiplicity += 1;
            }
            if multiplicity > 0 {
                factors.push((linear, multiplicity));
            }
        }

        let (residual_content, residual) = rest.primitive();
        content *= residual_content;
        if residual.degree() > 0 {
            factors.push((residual, 1));
        }

        Factorization { content, factors }
    }

    /// All distinct real roots as exact expressions, ascending.
    ///
    /// Rational roots are found exactly; a remaining square-free factor of
    /// degree 2 is solved by radicals.
    ///
    /// # Errors
    /// [`CasError::Unsolvable`] for the zero polynomial or when an
    /// irreducible factor of degree 3 or more remains.
    pub fn roots(&self) -> Result<Vec<Expr>, CasError> {
        let name = self.var.name();
        if self.is_zero() {
            return Err(CasError::unsolvable(
                name.as_ref(),
                "equation holds identically",
            ));
        }

        let factorization = self.factor();
        let mut roots: Vec<(f64, Expr)> = Vec::new();

        for (factor, _) in &factorization.factors {
            match factor.degree() {
                1 => {
                    let r = -&factor.coeffs[0] / &factor.coeffs[1];
                    roots.push((r.to_f64().unwrap_or(f64::NAN), Expr::number(r)));
                }
                2 => roots.extend(factor.quadratic_roots()),
                d => {
                    let sqf = factor.square_free();
                    if sqf.degree() == 2 {
                        roots.extend(sqf.quadratic_roots());
                    } else {
                        return Err(CasError::unsolvable(
                            name.as_ref(),
                            format!("irreducible factor of degree {d}: {factor}"),
                        ));
                    }
                }
            }
        }

        roots.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(roots.into_iter().map(|(_, e)| e).collect())
    }

    /// Real roots of a quadratic by the quadratic formula, paired with their
    /// approximate value for sorting
    fn quadratic_roots(&self) -> Vec<(f64, Expr)> {
        let c = &self.coeffs[0];
        let b = &self.coeffs[1];
        let a = &self.coeffs[2];
        let disc = b * b - integer(4) * a * c;
        if disc.is_negative() {
            return Vec::new();
        }
        let two_a = integer(2) * a;
        let vertex = -b / &two_a;
        if disc.is_zero() {
            return vec![(vertex.to_f64().unwrap_or(f64::NAN), Expr::number(vertex))];
        }

        let disc_f = disc.to_f64().unwrap_or(f64::NAN);
        let two_a_f = two_a.to_f64().unwrap_or(f64::NAN);
        let vertex_f = vertex.to_f64().unwrap_or(f64::NAN);
        let offset = Expr::product(vec![Expr::number(two_a.recip()), Expr::sqrt(Expr::number(disc))]);

        [-1i32, 1]
            .into_iter()
            .map(|sign| {
                let root = Expr::sum(vec![
                    Expr::number(vertex.clone()),
                    Expr::product(vec![Expr::integer(i64::from(sign)), offset.clone()]),
                ]);
                let approx = vertex_f + f64::from(sign) * disc_f.sqrt() / two_a_f;
                (approx, crate::simplification::expand(&root))
            })
            .collect()
    }
}

/// Degree of `var` in a coefficient-free monomial, or `None` if the monomial
/// contains anything other than a non-negative integer power of `var`.
fn monomial_degree(monomial: &Expr, var: Symbol) -> Option<usize> {
    match &monomial.kind {
        ExprKind::Number(n) if n.is_one() => Some(0),
        ExprKind::Symbol(s) if *s == var => Some(1),
        ExprKind::Pow(base, exp) if base.as_symbol() == Some(var) => {
            let e = exp.as_number()?;
            if e.is_integer() && !e.is_negative() {
                e.to_integer().to_usize()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Positive divisors of `n`, or `None` when `n` exceeds the search limit
fn divisors(n: &BigInt) -> Option<Vec<BigInt>> {
    let n = n.to_u64().filter(|&v| v <= DIVISOR_SEARCH_LIMIT)?;
    if n == 0 {
        return Some(vec![BigInt::one()]);
    }
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1u64;
    while d * d <= n {
        if n % d == 0 {
            small.push(BigInt::from(d));
            if d * d != n {
                large.push(BigInt::from(n / d));
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    Some(small)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symb;

    fn xi() -> Symbol {
        symb("poly_xi")
    }

    #[test]
    fn test_primitive_normalization() {
        // 16/3 x^3 - 8 x^2 + 4 x - 2/3 = (2/3)(8x^3 - 12x^2 + 6x - 1)
        let p = Polynomial::new(
            xi(),
            vec![
                BigRational::new((-2).into(), 3.into()),
                integer(4),
                integer(-8),
                BigRational::new(16.into(), 3.into()),
            ],
        );
        let (content, prim) = p.primitive();
        assert_eq!(content, BigRational::new(2.into(), 3.into()));
        assert_eq!(prim, Polynomial::from_integers(xi(), &[-1, 6, -12, 8]));
    }

    #[test]
    fn test_div_rem_exact() {
        let p = Polynomial::from_integers(xi(), &[-1, 0, 1]); // x^2 - 1
        let d = Polynomial::from_integers(xi(), &[-1, 1]); // x - 1
        let (q, r) = p.div_rem(&d).unwrap();
        assert_eq!(q, Polynomial::from_integers(xi(), &[1, 1]));
        assert!(r.is_zero());
    }

    #[test]
    fn test_gcd_is_monic() {
        let a = Polynomial::from_integers(xi(), &[-2, 0, 2]); // 2(x-1)(x+1)
        let b = Polynomial::from_integers(xi(), &[-3, 3]); // 3(x-1)
        assert_eq!(a.gcd(&b), Polynomial::from_integers(xi(), &[-1, 1]));
    }

    #[test]
    fn test_cubic_factors_as_perfect_cube() {
        let cubic = Polynomial::from_integers(xi(), &[-1, 6, -12, 8]);
        assert_eq!(cubic.rational_roots(), vec![BigRational::new(1.into(), 2.into())]);

        let f = cubic.factor();
        assert_eq!(f.content, BigRational::one());
        assert_eq!(f.factors.len(), 1);
        assert_eq!(f.factors[0].1, 3);
        assert_eq!(f.to_expr().to_string(), "(2*poly_xi - 1)^3");
    }

    #[test]
    fn test_square_free() {
        let cubic = Polynomial::from_integers(xi(), &[-1, 6, -12, 8]);
        assert_eq!(cubic.square_free(), Polynomial::from_integers(xi(), &[-1, 2]));
    }

    #[test]
    fn test_roots_with_radicals() {
        // x^2 - 2
        let p = Polynomial::from_integers(xi(), &[-2, 0, 1]);
        let roots = p.roots().unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].to_string(), "-sqrt(2)");
        assert_eq!(roots[1].to_string(), "sqrt(2)");
    }

    #[test]
    fn test_roots_none_for_negative_discriminant() {
        let p = Polynomial::from_integers(xi(), &[1, 0, 1]);
        assert!(p.roots().unwrap().is_empty());
    }

    #[test]
    fn test_irreducible_cubic_is_unsolvable() {
        let p = Polynomial::from_integers(xi(), &[-2, 0, 0, 1]); // x^3 - 2
        assert!(matches!(p.roots(), Err(CasError::Unsolvable { .. })));
    }

    #[test]
    fn test_zero_root_is_found() {
        let p = Polynomial::from_integers(xi(), &[0, -1, 1]); // x^2 - x
        assert_eq!(p.rational_roots(), vec![BigRational::zero(), BigRational::one()]);
    }
}
