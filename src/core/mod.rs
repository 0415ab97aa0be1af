//! Core types for exact symbolic mathematics
//!
//! This module contains the fundamental types:
//! - `Expr` / `ExprKind` - Expression AST
//! - `Symbol` - Interned symbols with assumptions
//! - `Equation` - `lhs = rhs`
//! - `Polynomial` - Univariate polynomials over the rationals
//! - `CasError` - Error types
//! - Display formatting (to_string, to_unicode)

mod display; // Display implementations for Expr
pub(crate) mod equation;
pub(crate) mod error;
pub(crate) mod expr;
pub(crate) mod poly;
pub(crate) mod symbol;

// Public re-exports (for external API)
pub use equation::Equation;
pub use error::{CasError, Span};
pub use expr::{Expr, ExprKind};
pub use poly::{Factorization, Polynomial};
pub use symbol::{Assumptions, Symbol, pi, symb, symb_positive, symbol_count};
