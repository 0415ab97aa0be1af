//! Exact Symbolic Derivations for the Simplicity Theory
//!
//! A small exact-arithmetic computer algebra core and the derivations and
//! data utilities built on it.
//!
//! # Features
//! - Interned symbols with positivity assumptions, `π` as a constant
//! - Canonical n-ary expressions over `BigRational` with operator overloading
//! - Rule-based simplification, expansion and exact radicals
//! - Polynomial factoring, rational roots and equation solving
//! - Sphere-overlap, eigen-volume and lattice-dynamics derivations
//! - Critical surface density, dark-hole radii and the RAR threshold plot
//!
//! # Usage Examples
//!
//! ## String-based API
//! ```
//! use simplicity_calc::simplify_str;
//! let result = simplify_str("lib_x*lib_x + lib_x^2", &[]).unwrap();
//! assert_eq!(result, "2*lib_x^2");
//! ```
//!
//! ## Type-safe API
//! ```
//! use simplicity_calc::{solve, symb, Equation, Polynomial};
//! let xi = symb("lib_xi");
//! let cubic = Polynomial::from_integers(xi, &[-1, 6, -12, 8]);
//! assert_eq!(cubic.factor().to_string(), "(2*lib_xi - 1)^3");
//!
//! let roots = solve(&Equation::new(cubic.to_expr(), 0), xi).unwrap();
//! assert_eq!(roots.len(), 1);
//! assert_eq!(roots[0].to_string(), "1/2");
//! ```

pub mod astro;
mod builder;
mod core;
pub mod derivation;
pub mod galaxy;
mod parser;
mod simplification;
mod solve;
pub mod telemetry;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use builder::Simplify;
pub use crate::core::{
    Assumptions, CasError, Equation, Expr, ExprKind, Factorization, Polynomial, Span, Symbol, pi,
    symb, symb_positive, symbol_count,
};
pub use parser::parse;
pub use simplification::{expand, simplify};
pub use solve::{solve, solve_system, solve_unique};

/// Parse and simplify a formula
///
/// # Arguments
/// * `formula` - Expression to simplify (e.g., "x^2 + 2*x^2")
/// * `known_symbols` - Symbols whose assumptions apply to matching names
///
/// # Returns
/// The simplified expression as a string
///
/// # Errors
/// Parse errors from [`parse`].
pub fn simplify_str(formula: &str, known_symbols: &[Symbol]) -> Result<String, CasError> {
    let mut builder = Simplify::new();
    for symbol in known_symbols {
        builder = builder.symbol(*symbol);
    }
    builder.simplify_str(formula)
}
