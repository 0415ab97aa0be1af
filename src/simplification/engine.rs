//! Core simplification engine with rule-based architecture
//!
//! Implements bottom-up tree traversal, repeated rule application at each
//! node, cycle detection by structural hash, and configurable limits
//! (iterations, depth).

use std::collections::HashSet;
use std::sync::OnceLock;

use tracing::{trace, warn};

use super::rules::{ExprKind, RuleContext, RuleRegistry};
use crate::Expr;

/// Global rule registry singleton - built once, reused across all simplifications
fn global_registry() -> &'static RuleRegistry {
    static REGISTRY: OnceLock<RuleRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = RuleRegistry::new();
        registry.load_all_rules();
        registry
    })
}

pub(crate) const DEFAULT_MAX_ITERATIONS: usize = 1000;
pub(crate) const DEFAULT_MAX_DEPTH: usize = 64;

/// Main simplification engine with rule-based architecture
pub(crate) struct Simplifier {
    max_iterations: usize,
    max_depth: usize,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Simplifier {
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Main simplification entry point
    pub fn simplify(&self, expr: &Expr) -> Expr {
        let mut current = expr.clone();
        let mut seen_hashes: HashSet<u64> = HashSet::new();

        for iteration in 0..self.max_iterations {
            let next = self.apply_rules_bottom_up(&current, 0);
            if next == current {
                return next;
            }

            trace!(iteration, from = %current, to = %next, "simplification pass");

            // A repeated structure means two rule groups undo each other
            if !seen_hashes.insert(next.structural_hash()) {
                warn!(expr = %next, "Simplification cycle detected, stopping");
                return next;
            }
            current = next;
        }

        warn!(
            max_iterations = self.max_iterations,
            "Simplification exceeded maximum iterations"
        );
        current
    }

    /// Apply rules bottom-up through the expression tree
    fn apply_rules_bottom_up(&self, expr: &Expr, depth: usize) -> Expr {
        if depth > self.max_depth {
            warn!(max_depth = self.max_depth, "Simplification depth limit reached");
            return expr.clone();
        }
        let rebuilt = if expr.is_number() || expr.as_symbol().is_some() {
            expr.clone()
        } else {
            expr.map_children(|child| self.apply_rules_bottom_up(child, depth + 1))
        };
        self.apply_rules_to_node(rebuilt, depth)
    }

    /// Rewrite a single node until no rule applies to it
    fn apply_rules_to_node(&self, mut current: Expr, depth: usize) -> Expr {
        let context = RuleContext::default().with_depth(depth);

        for _ in 0..self.max_iterations {
            let kind = ExprKind::of(&current);
            let rewrite = global_registry()
                .get_rules_for_kind(kind)
                .iter()
                .find_map(|rule| rule.apply(&current, &context).map(|e| (rule.name(), e)));

            let Some((rule_name, new_expr)) = rewrite else {
                return current;
            };
            trace!(rule = rule_name, from = %current, to = %new_expr, "rule applied");

            // Rewritten children are not simplified yet
            current = if new_expr.is_number() || new_expr.as_symbol().is_some() {
                new_expr
            } else {
                new_expr.map_children(|child| self.apply_rules_bottom_up(child, depth + 1))
            };
        }
        current
    }
}
