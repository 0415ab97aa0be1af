//! Display implementations for expressions.
//!
//! Two output formats are provided:
//!
//! ## Standard Display (`to_string()` / `{}`)
//! Plain ASCII close to what a CAS prints:
//! - `8*xi^3 - 12*xi^2 + 6*xi - 1`
//! - `4*pi*R^3/3`
//! - `8*2^(1/4)*sqrt(5)/(5*sqrt(pi))`
//!
//! ## Unicode Format (`to_unicode()`)
//! Superscripts, `·`, `√`, π and Greek names:
//! - `8·ξ³ - 12·ξ² + 6·ξ - 1`
//! - `4·π·R³/3`
//!
//! # Display Behavior Notes for N-ary AST
//! - Sum displays terms with +/- signs based on leading coefficients
//! - Factors with negative numeric exponents move into a denominator
//! - `x^(1/2)` is displayed as a square root

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed};

use crate::{Expr, ExprKind};

#[derive(Clone, Copy, PartialEq, Eq)]
enum FormatMode {
    Standard,
    Unicode,
}

impl FormatMode {
    const fn mul_sep(self) -> &'static str {
        match self {
            Self::Standard => "*",
            Self::Unicode => "\u{b7}",
        }
    }
}

/// Greek letter mappings: (name, unicode)
static GREEK_LETTERS: &[(&str, &str)] = &[
    ("pi", "\u{3c0}"),
    ("alpha", "\u{3b1}"),
    ("beta", "\u{3b2}"),
    ("gamma", "\u{3b3}"),
    ("delta", "\u{3b4}"),
    ("epsilon", "\u{3b5}"),
    ("zeta", "\u{3b6}"),
    ("eta", "\u{3b7}"),
    ("theta", "\u{3b8}"),
    ("kappa", "\u{3ba}"),
    ("lambda", "\u{3bb}"),
    ("mu", "\u{3bc}"),
    ("nu", "\u{3bd}"),
    ("xi", "\u{3be}"),
    ("rho", "\u{3c1}"),
    ("sigma", "\u{3c3}"),
    ("Sigma", "\u{3a3}"),
    ("tau", "\u{3c4}"),
    ("phi", "\u{3c6}"),
    ("chi", "\u{3c7}"),
    ("psi", "\u{3c8}"),
    ("omega", "\u{3c9}"),
];

/// Map symbol name to Unicode Greek letter
fn greek_to_unicode(name: &str) -> Option<&'static str> {
    GREEK_LETTERS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, unicode)| *unicode)
}

fn unicode_symbol_name(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("_star") {
        return format!("{}*", unicode_symbol_name(stem));
    }
    greek_to_unicode(name).map_or_else(|| name.to_string(), str::to_string)
}

#[inline]
const fn to_superscript(c: char) -> char {
    match c {
        '0' => '\u{2070}',
        '1' => '\u{b9}',
        '2' => '\u{b2}',
        '3' => '\u{b3}',
        '4' => '\u{2074}',
        '5' => '\u{2075}',
        '6' => '\u{2076}',
        '7' => '\u{2077}',
        '8' => '\u{2078}',
        '9' => '\u{2079}',
        '-' => '\u{207b}',
        _ => c,
    }
}

fn format_number(n: &BigRational) -> String {
    if n.is_integer() {
        n.numer().to_string()
    } else {
        format!("{}/{}", n.numer(), n.denom())
    }
}

fn is_half(n: &BigRational) -> bool {
    *n.numer() == BigInt::one() && *n.denom() == BigInt::from(2)
}

fn format_expr(expr: &Expr, mode: FormatMode) -> String {
    match &expr.kind {
        ExprKind::Number(n) => format_number(n),
        ExprKind::Symbol(s) => {
            let name = s.name();
            match mode {
                FormatMode::Standard => name.to_string(),
                FormatMode::Unicode => unicode_symbol_name(&name),
            }
        }
        ExprKind::Sum(terms) => format_sum(terms, mode),
        ExprKind::Product(factors) => format_product(factors.iter().map(AsRef::as_ref), mode),
        ExprKind::Pow(_, exp) if exp.as_number().is_some_and(Signed::is_negative) => {
            format_product(std::iter::once(expr), mode)
        }
        ExprKind::Pow(base, exp) => format_pow(base, exp, mode),
    }
}

fn format_sum(terms: &[std::sync::Arc<Expr>], mode: FormatMode) -> String {
    let mut out = String::new();
    for (i, term) in terms.iter().enumerate() {
        let negative = term.coefficient().is_negative();
        let shown = if negative {
            format_expr(&Expr::neg_expr((**term).clone()), mode)
        } else {
            format_expr(term, mode)
        };
        match (i, negative) {
            (0, true) => {
                out.push('-');
                out.push_str(&shown);
            }
            (0, false) => out.push_str(&shown),
            (_, true) => {
                out.push_str(" - ");
                out.push_str(&shown);
            }
            (_, false) => {
                out.push_str(" + ");
                out.push_str(&shown);
            }
        }
    }
    out
}

/// Format a factor that stands next to `*` or `/`
fn format_factor(expr: &Expr, mode: FormatMode) -> String {
    match &expr.kind {
        ExprKind::Sum(_) => format!("({})", format_expr(expr, mode)),
        ExprKind::Number(n) if n.is_negative() || !n.is_integer() => {
            format!("({})", format_number(n))
        }
        _ => format_expr(expr, mode),
    }
}

fn format_product<'a>(factors: impl Iterator<Item = &'a Expr>, mode: FormatMode) -> String {
    let mut numerator: Vec<String> = Vec::new();
    let mut denominator: Vec<String> = Vec::new();
    let mut sign = "";

    for factor in factors {
        match &factor.kind {
            ExprKind::Number(c) => {
                if c.is_negative() {
                    sign = "-";
                }
                let c = c.abs();
                if !c.numer().is_one() {
                    numerator.push(c.numer().to_string());
                }
                if !c.denom().is_one() {
                    denominator.push(c.denom().to_string());
                }
            }
            ExprKind::Pow(base, exp) if exp.as_number().is_some_and(Signed::is_negative) => {
                let flipped = exp.as_number().map(|e| -e).unwrap_or_else(BigRational::one);
                if flipped.is_one() {
                    denominator.push(format_factor(base, mode));
                } else {
                    denominator.push(format_pow(base, &Expr::number(flipped), mode));
                }
            }
            _ => numerator.push(format_factor(factor, mode)),
        }
    }

    let sep = mode.mul_sep();
    let num = if numerator.is_empty() {
        "1".to_string()
    } else {
        numerator.join(sep)
    };
    match denominator.len() {
        0 => format!("{sign}{num}"),
        1 => format!("{sign}{num}/{}", denominator[0]),
        _ => format!("{sign}{num}/({})", denominator.join(sep)),
    }
}

fn format_pow(base: &Expr, exp: &Expr, mode: FormatMode) -> String {
    let atomic_base = match &base.kind {
        ExprKind::Symbol(_) => true,
        ExprKind::Number(n) => n.is_integer() && !n.is_negative(),
        _ => false,
    };
    let base_str = if atomic_base {
        format_expr(base, mode)
    } else {
        format!("({})", format_expr(base, mode))
    };

    if let Some(e) = exp.as_number()
        && is_half(e)
    {
        return match mode {
            FormatMode::Standard => format!("sqrt({})", format_expr(base, mode)),
            FormatMode::Unicode => format!("\u{221a}{base_str}"),
        };
    }

    match (mode, &exp.kind) {
        (FormatMode::Unicode, ExprKind::Number(e)) if e.is_integer() => {
            let sup: String = e.numer().to_string().chars().map(to_superscript).collect();
            format!("{base_str}{sup}")
        }
        (_, ExprKind::Number(e)) if e.is_integer() && !e.is_negative() => {
            format!("{base_str}^{}", format_number(e))
        }
        (_, ExprKind::Symbol(_)) => format!("{base_str}^{}", format_expr(exp, mode)),
        _ => format!("{base_str}^({})", format_expr(exp, mode)),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_expr(self, FormatMode::Standard))
    }
}

impl Expr {
    /// Convert the expression to Unicode string format.
    /// Returns a string with Unicode superscripts and Greek letters for display.
    #[must_use]
    pub fn to_unicode(&self) -> String {
        format_expr(self, FormatMode::Unicode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{symb, symb_positive};

    #[test]
    fn test_display_number() {
        assert_eq!(Expr::integer(3).to_string(), "3");
        assert_eq!(Expr::rational(-2, 3).to_string(), "-2/3");
    }

    #[test]
    fn test_display_polynomial() {
        let xi = symb("xi");
        let p = 8 * xi.pow(3) - 12 * xi.pow(2) + 6 * xi - 1;
        assert_eq!(p.to_string(), "8*xi^3 - 12*xi^2 + 6*xi - 1");
        assert_eq!(p.to_unicode(), "8·ξ³ - 12·ξ² + 6·ξ - 1");
    }

    #[test]
    fn test_display_fraction_and_pi() {
        let r = symb_positive("R");
        let v = Expr::rational(4, 3) * Expr::pi() * r.pow(3);
        assert_eq!(v.to_string(), "4*pi*R^3/3");
        assert_eq!(v.to_unicode(), "4·π·R³/3");
    }

    #[test]
    fn test_display_radicals_in_denominator() {
        let c0 = Expr::product(vec![
            Expr::rational(8, 5),
            Expr::pow(Expr::integer(2), Expr::rational(1, 4)),
            Expr::sqrt(Expr::integer(5)),
            Expr::pow(Expr::pi(), Expr::rational(-1, 2)),
        ]);
        assert_eq!(c0.to_string(), "8*2^(1/4)*sqrt(5)/(5*sqrt(pi))");
        assert_eq!(c0.to_unicode(), "8·2^(1/4)·√5/(5·√π)");
    }

    #[test]
    fn test_display_power_of_sum() {
        let xi = symb("xi");
        let factored = Expr::pow(2 * xi - 1, Expr::integer(3));
        assert_eq!(factored.to_string(), "(2*xi - 1)^3");
    }

    #[test]
    fn test_display_reciprocal_and_star_suffix() {
        let rho = symb_positive("rho_star");
        let a = symb_positive("a");
        assert_eq!((rho / a).to_string(), "rho_star/a");
        assert_eq!(rho.to_expr().to_unicode(), "ρ*");
        assert_eq!(Expr::pow(a.to_expr(), Expr::integer(-2)).to_string(), "1/a^2");
    }
}
