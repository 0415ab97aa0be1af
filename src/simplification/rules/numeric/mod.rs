//! Numeric simplification rules: power identities and exact rational powers.

use std::sync::Arc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::simplification::rules::{ExprKind, Rule, RuleContext};
use crate::{Expr, ExprKind as AstKind};

/// Integer exponents beyond this magnitude are left unevaluated
const MAX_EXACT_EXPONENT: i64 = 4096;

/// Trial division bound when splitting radicands into prime powers
const TRIAL_DIVISION_LIMIT: u64 = 1_000_000;

rule!(
    PowIdentityRule,
    "pow_identity",
    100,
    Numeric,
    &[ExprKind::Pow],
    |expr: &Expr, _context: &RuleContext| {
        if let AstKind::Pow(base, exp) = &expr.kind {
            if exp.is_zero() || base.is_one() {
                return Some(Expr::integer(1));
            }
            if exp.is_one() {
                return Some((**base).clone());
            }
            if base.is_zero() && exp.as_number().is_some_and(Signed::is_positive) {
                return Some(Expr::integer(0));
            }
        }
        None
    }
);

rule!(
    RationalPowerRule,
    "rational_power",
    90,
    Numeric,
    &[ExprKind::Pow],
    |expr: &Expr, _context: &RuleContext| {
        if let AstKind::Pow(base, exp) = &expr.kind
            && let (Some(b), Some(e)) = (base.as_number(), exp.as_number())
        {
            let result = rational_power(b, e)?;
            if result != *expr {
                return Some(result);
            }
        }
        None
    }
);

/// Exact value of `base^exp` for rational operands.
///
/// Integer exponents are evaluated directly. For a positive base and a
/// fractional exponent the radicand is split into prime powers: integer parts
/// of the resulting exponents move into a rational coefficient, primes sharing
/// the same fractional exponent are grouped under one radical. The result is a
/// canonical `c * N1^f1 * N2^f2 ...` with integer `Ni > 1` and `fi` in (0, 1),
/// e.g. `64^(1/2) = 8`, `12^(1/2) = 2*3^(1/2)`, `5^(-1/2) = 5^(1/2)/5`.
///
/// Returns `None` when the value cannot be written exactly this way (negative
/// base with fractional exponent, division by zero, huge exponent).
pub(crate) fn rational_power(base: &BigRational, exp: &BigRational) -> Option<Expr> {
    if exp.is_integer() {
        let k = exp.to_integer().to_i64()?;
        if k.abs() > MAX_EXACT_EXPONENT || (base.is_zero() && k < 0) {
            return None;
        }
        return Some(Expr::number(base.pow(i32::try_from(k).ok()?)));
    }

    if base.is_negative() {
        return None;
    }
    if base.is_zero() {
        return exp.is_positive().then(|| Expr::integer(0));
    }
    if exp.abs() > BigRational::from_integer(BigInt::from(MAX_EXACT_EXPONENT)) {
        return None;
    }

    let mut coeff = BigRational::one();
    let mut radicals: Vec<(BigRational, BigInt)> = Vec::new();

    let mut absorb = |prime: BigInt, e: BigRational| -> Option<()> {
        let whole = e.floor();
        let frac = &e - &whole;
        let whole = whole.to_integer().to_i32()?;
        let p = BigRational::from_integer(prime.clone());
        coeff *= p.pow(whole);
        if !frac.is_zero() {
            if let Some((_, radicand)) = radicals.iter_mut().find(|(f, _)| *f == frac) {
                *radicand *= &prime;
            } else {
                radicals.push((frac, prime));
            }
        }
        Some(())
    };

    for (prime, multiplicity) in prime_powers(base.numer()) {
        absorb(prime, exp * BigRational::from_integer(BigInt::from(multiplicity)))?;
    }
    for (prime, multiplicity) in prime_powers(base.denom()) {
        absorb(prime, -exp * BigRational::from_integer(BigInt::from(multiplicity)))?;
    }

    radicals.sort_by(|a, b| a.1.cmp(&b.1));
    let mut factors: Vec<Arc<Expr>> = vec![Arc::new(Expr::number(coeff))];
    factors.extend(radicals.into_iter().map(|(frac, radicand)| {
        Arc::new(Expr::pow(
            Expr::number(BigRational::from_integer(radicand)),
            Expr::number(frac),
        ))
    }));
    Some(Expr::product_from_arcs(factors))
}

/// Split a positive integer into `(prime, multiplicity)` pairs by trial
/// division. A cofactor left over after the trial bound is kept as one entry.
fn prime_powers(n: &BigInt) -> Vec<(BigInt, u32)> {
    let mut rest = n.abs();
    let mut out = Vec::new();
    if rest <= BigInt::one() {
        return out;
    }

    let mut d: u64 = 2;
    while d <= TRIAL_DIVISION_LIMIT {
        let divisor = BigInt::from(d);
        if &divisor * &divisor > rest {
            break;
        }
        let mut count = 0u32;
        loop {
            let (q, r) = rest.div_rem(&divisor);
            if !r.is_zero() {
                break;
            }
            rest = q;
            count += 1;
        }
        if count > 0 {
            out.push((divisor, count));
        }
        d += if d == 2 { 1 } else { 2 };
    }
    if rest > BigInt::one() {
        out.push((rest, 1));
    }
    out
}

/// Get all numeric rules in priority order
pub(crate) fn get_numeric_rules() -> Vec<Arc<dyn Rule>> {
    vec![Arc::new(PowIdentityRule), Arc::new(RationalPowerRule)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(n.into(), d.into())
    }

    #[test]
    fn test_integer_powers_are_exact() {
        assert_eq!(rational_power(&q(1, 2), &q(3, 1)), Some(Expr::rational(1, 8)));
        assert_eq!(rational_power(&q(-2, 1), &q(-2, 1)), Some(Expr::rational(1, 4)));
        assert_eq!(rational_power(&q(0, 1), &q(-1, 1)), None);
    }

    #[test]
    fn test_perfect_powers_are_extracted() {
        assert_eq!(rational_power(&q(64, 1), &q(1, 2)), Some(Expr::integer(8)));
        assert_eq!(
            rational_power(&q(64, 5), &q(1, 2)).map(|e| e.to_string()),
            Some("8*sqrt(5)/5".to_string())
        );
        assert_eq!(
            rational_power(&q(12, 1), &q(1, 2)).map(|e| e.to_string()),
            Some("2*sqrt(3)".to_string())
        );
        assert_eq!(
            rational_power(&q(8, 1), &q(1, 4)).map(|e| e.to_string()),
            Some("2^(3/4)".to_string())
        );
    }

    #[test]
    fn test_canonical_radical_is_fixed_point() {
        let radical = Expr::sqrt(Expr::integer(10));
        assert_eq!(RationalPowerRule.apply(&radical, &RuleContext::default()), None);
    }

    #[test]
    fn test_negative_base_with_fraction_left_alone() {
        assert_eq!(rational_power(&q(-4, 1), &q(1, 2)), None);
    }

    #[test]
    fn test_prime_powers() {
        assert_eq!(
            prime_powers(&BigInt::from(360)),
            vec![
                (BigInt::from(2), 3),
                (BigInt::from(3), 2),
                (BigInt::from(5), 1)
            ]
        );
    }
}
