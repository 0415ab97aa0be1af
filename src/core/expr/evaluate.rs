//! Numeric evaluation of exact expressions.

use std::collections::HashMap;

use num_traits::ToPrimitive;

use super::{Expr, ExprKind};
use crate::core::error::CasError;
use crate::core::symbol::Symbol;

impl Expr {
    /// Evaluate to `f64` with the given symbol values.
    ///
    /// π needs no binding. Any other unbound symbol is an error, as is a
    /// result that is not a finite real number.
    ///
    /// # Errors
    /// [`CasError::UnboundSymbol`], [`CasError::DivisionByZero`] or
    /// [`CasError::NonReal`].
    pub fn evaluate(&self, values: &HashMap<Symbol, f64>) -> Result<f64, CasError> {
        let value = self.evaluate_inner(values)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CasError::NonReal(format!("{self} evaluates to {value}")))
        }
    }

    fn evaluate_inner(&self, values: &HashMap<Symbol, f64>) -> Result<f64, CasError> {
        match &self.kind {
            ExprKind::Number(n) => n
                .to_f64()
                .ok_or_else(|| CasError::NonReal(format!("{n} is out of f64 range"))),
            ExprKind::Symbol(s) => {
                if let Some(v) = values.get(s) {
                    Ok(*v)
                } else if s.is_constant() {
                    Ok(std::f64::consts::PI)
                } else {
                    Err(CasError::UnboundSymbol(s.name().to_string()))
                }
            }
            ExprKind::Sum(terms) => terms.iter().map(|t| t.evaluate_inner(values)).sum(),
            ExprKind::Product(factors) => factors.iter().map(|f| f.evaluate_inner(values)).product(),
            ExprKind::Pow(base, exp) => {
                let b = base.evaluate_inner(values)?;
                let e = exp.evaluate_inner(values)?;
                if b == 0.0 && e < 0.0 {
                    return Err(CasError::DivisionByZero);
                }
                let v = b.powf(e);
                if v.is_nan() {
                    return Err(CasError::NonReal(format!("{b}^{e} is not real")));
                }
                Ok(v)
            }
        }
    }
}
