//! Property-Based and Fuzz Testing
//!
//! Uses quickcheck for property-based testing of:
//! - Parser robustness (fuzz testing)
//! - Value preservation under simplification
//! - Polynomial factoring and root recovery

use std::collections::HashMap;

use num_rational::BigRational;
use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

use crate::{Polynomial, parse, simplify, symb};

// ============================================================
// PART 1: EXPRESSION GENERATORS FOR PROPERTY TESTS
// ============================================================

/// Generate random valid expression strings over `prop_x` and `prop_y`
fn random_expr_string(g: &mut Gen) -> String {
    let depth = g.size().min(3);
    gen_expr_string_recursive(g, depth)
}

fn gen_expr_string_recursive(g: &mut Gen, depth: usize) -> String {
    if depth == 0 {
        return match u8::arbitrary(g) % 3 {
            0 => (u8::arbitrary(g) % 9 + 1).to_string(),
            1 => "prop_x".to_string(),
            _ => "prop_y".to_string(),
        };
    }
    match u8::arbitrary(g) % 8 {
        0..=3 => {
            let ops = ["+", "-", "*"];
            let op = ops[usize::arbitrary(g) % ops.len()];
            let left = gen_expr_string_recursive(g, depth - 1);
            let right = gen_expr_string_recursive(g, depth - 1);
            format!("({left} {op} {right})")
        }
        4 => {
            let exp = u8::arbitrary(g) % 3 + 1;
            format!("({})^{exp}", gen_expr_string_recursive(g, depth - 1))
        }
        5 => format!("-({})", gen_expr_string_recursive(g, depth - 1)),
        6 => format!("({})/prop_y", gen_expr_string_recursive(g, depth - 1)),
        _ => gen_expr_string_recursive(g, depth - 1),
    }
}

/// Small nonzero integer coefficients, lowest degree first
#[derive(Debug, Clone)]
struct SmallPoly(Vec<i64>);

impl Arbitrary for SmallPoly {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 5 + 1;
        let coeffs = (0..len).map(|_| i64::from(i8::arbitrary(g) % 10)).collect();
        Self(coeffs)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

// ============================================================
// PART 2: PARSER FUZZ TESTS
// ============================================================

#[cfg(test)]
mod parser_fuzz_tests {
    use super::*;

    /// Property: Parser should never panic on arbitrary input
    #[test]
    fn test_parser_never_panics_on_random_input() {
        fn prop_parser_no_panic(input: String) -> TestResult {
            let _ = parse(&input, &[]);
            TestResult::passed()
        }
        QuickCheck::new()
            .tests(1000)
            .max_tests(2000)
            .quickcheck(prop_parser_no_panic as fn(String) -> TestResult);
    }

    /// Generated expressions are well formed and must parse
    #[test]
    fn test_parser_accepts_generated_expressions() {
        let mut g = Gen::new(6);
        for _ in 0..200 {
            let input = random_expr_string(&mut g);
            assert!(parse(&input, &[]).is_ok(), "failed to parse {input}");
        }
    }

    #[test]
    fn test_parser_edge_cases() {
        let edge_cases = [
            "", "   ", "()", "((()))", "+++", "---x", "1+", "+1", "sqrt()", "sqrt(x,y)",
            "1..2", "1e999999", "1e-999999", "x^y^z", "((((x))))", "1/0", "0/0", "(-0)",
            "π", "ξ³", "2e", "x**", "**x",
        ];
        for case in &edge_cases {
            let _ = parse(case, &[]);
        }
    }

    #[test]
    fn test_parser_deep_nesting() {
        let mut expr = "prop_deep".to_string();
        for _ in 0..50 {
            expr = format!("({expr}+1)");
        }
        let result = parse(&expr, &[]);
        assert!(result.is_ok(), "Deep nesting should parse: {}", result.unwrap_err());
    }
}

// ============================================================
// PART 3: ALGEBRAIC PROPERTIES
// ============================================================

#[cfg(test)]
mod algebraic_property_tests {
    use super::*;

    /// Simplification preserves the numeric value of an expression
    #[test]
    fn test_simplify_preserves_value() {
        let values = HashMap::from([(symb("prop_x"), 1.5), (symb("prop_y"), 2.25)]);
        let mut g = Gen::new(6);
        for _ in 0..200 {
            let input = random_expr_string(&mut g);
            let Ok(expr) = parse(&input, &[]) else {
                continue;
            };
            let before = expr.evaluate(&values).unwrap();
            let after = simplify(&expr).evaluate(&values).unwrap();
            let tolerance = 1e-9 * before.abs().max(1.0);
            assert!(
                (before - after).abs() <= tolerance,
                "{input}: {before} != {after}"
            );
        }
    }

    /// Expanding a factorization gives the polynomial back
    #[test]
    fn test_factor_expand_round_trip() {
        fn prop_round_trip(p: SmallPoly) -> TestResult {
            let x = symb("prop_factor_x");
            let poly = Polynomial::from_integers(x, &p.0);
            if poly.is_zero() {
                return TestResult::discard();
            }
            let expanded = poly.factor().to_expr().expanded();
            match Polynomial::try_from_expr(&expanded, x) {
                Some(back) => TestResult::from_bool(back == poly),
                None => TestResult::failed(),
            }
        }
        QuickCheck::new()
            .tests(300)
            .quickcheck(prop_round_trip as fn(SmallPoly) -> TestResult);
    }

    /// Every planted rational root is found
    #[test]
    fn test_rational_roots_are_recovered() {
        fn prop_roots(numers: Vec<i8>, denom: u8) -> TestResult {
            if numers.is_empty() || numers.len() > 4 {
                return TestResult::discard();
            }
            let d = i64::from(denom % 4 + 1);
            let x = symb("prop_root_x");
            let poly = numers.iter().fold(Polynomial::from_integers(x, &[1]), |acc, &n| {
                // d*x - n
                acc.mul(&Polynomial::from_integers(x, &[-i64::from(n), d]))
            });
            let roots = poly.rational_roots();
            let all_found = numers.iter().all(|&n| {
                roots.contains(&BigRational::new(i64::from(n).into(), d.into()))
            });
            TestResult::from_bool(all_found)
        }
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop_roots as fn(Vec<i8>, u8) -> TestResult);
    }
}
