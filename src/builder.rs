//! Builder pattern API for simplification and solving
//!
//! Provides a fluent interface for configuring and executing simplification.
//!
//! # Example
//! ```
//! use simplicity_calc::{symb, Simplify};
//!
//! let x = symb("builder_doc_x");
//! let expr = x * x + 2 * x * x;
//!
//! let simplified = Simplify::new().max_depth(32).simplify(&expr).unwrap();
//! assert_eq!(simplified.to_string(), "3*builder_doc_x^2");
//! ```

use crate::simplification::engine::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_ITERATIONS, Simplifier};
use crate::{CasError, Expr, Symbol, expand, parser};

/// Builder for simplification operations
#[derive(Clone, Debug)]
pub struct Simplify {
    max_depth: usize,
    max_iterations: usize,
    max_nodes: Option<usize>,
    expand: bool,
    known_symbols: Vec<Symbol>,
}

impl Default for Simplify {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_nodes: None,
            expand: false,
            known_symbols: Vec::new(),
        }
    }
}

impl Simplify {
    /// Create a new simplification builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum AST depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set maximum number of full simplification passes
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set maximum AST node count
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Distribute products over sums before simplifying
    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Declare a symbol (with its assumptions) for string input
    ///
    /// # Example
    /// ```
    /// use simplicity_calc::{symb_positive, Simplify};
    ///
    /// let r = symb_positive("builder_doc_r");
    /// let out = Simplify::new().symbol(r).simplify_str("sqrt(builder_doc_r^2)").unwrap();
    /// assert_eq!(out, "builder_doc_r");
    /// ```
    pub fn symbol(mut self, symbol: Symbol) -> Self {
        self.known_symbols.push(symbol);
        self
    }

    /// Simplify an expression
    ///
    /// # Errors
    /// [`CasError::MaxDepthExceeded`] if the input is nested deeper than the
    /// configured limit or has more nodes than allowed.
    pub fn simplify(&self, expr: &Expr) -> Result<Expr, CasError> {
        if expr.max_depth() > self.max_depth {
            return Err(CasError::MaxDepthExceeded);
        }
        if let Some(max_n) = self.max_nodes
            && expr.node_count() > max_n
        {
            return Err(CasError::MaxDepthExceeded);
        }

        if self.expand {
            return Ok(expand(expr));
        }
        let simplifier = Simplifier::new()
            .with_max_depth(self.max_depth)
            .with_max_iterations(self.max_iterations);
        Ok(simplifier.simplify(expr))
    }

    /// Parse and simplify a string formula
    ///
    /// # Errors
    /// Parse errors, or the limit errors of [`Simplify::simplify`].
    pub fn simplify_str(&self, formula: &str) -> Result<String, CasError> {
        let ast = parser::parse(formula, &self.known_symbols)?;
        let result = self.simplify(&ast)?;
        Ok(result.to_string())
    }
}
