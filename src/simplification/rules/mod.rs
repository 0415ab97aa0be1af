use std::collections::HashMap;
use std::sync::Arc;

use crate::{Expr, ExprKind as AstKind};

/// Expression kind for fast rule filtering
/// Rules declare which expression kinds they can apply to
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ExprKind {
    Number,
    Symbol,
    Sum,
    Product,
    Pow,
}

impl ExprKind {
    /// Get the kind of an expression (cheap O(1) operation)
    #[inline]
    pub fn of(expr: &Expr) -> Self {
        match &expr.kind {
            AstKind::Number(_) => ExprKind::Number,
            AstKind::Symbol(_) => ExprKind::Symbol,
            AstKind::Sum(_) => ExprKind::Sum,
            AstKind::Product(_) => ExprKind::Product,
            AstKind::Pow(_, _) => ExprKind::Pow,
        }
    }
}

/// Core trait for all simplification rules
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;
    fn priority(&self) -> i32;
    fn category(&self) -> RuleCategory;

    /// Which expression kinds this rule can apply to.
    /// Rules will ONLY be checked against expressions matching these kinds.
    fn applies_to(&self) -> &'static [ExprKind];

    fn apply(&self, expr: &Expr, context: &RuleContext) -> Option<Expr>;
}

/// Categories of simplification rules
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RuleCategory {
    Numeric,   // Constant folding, identities, exact powers
    Algebraic, // Power laws, term collection
}

/// Context passed to rules during application
#[derive(Clone, Debug, Default)]
pub struct RuleContext {
    pub depth: usize,
}

impl RuleContext {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

/// Declare a unit-struct rule from a name, priority, category, kind filter
/// and an `apply` closure.
macro_rules! rule {
    ($ty:ident, $name:expr, $priority:expr, $category:ident, $kinds:expr, $apply:expr) => {
        pub(crate) struct $ty;

        impl $crate::simplification::rules::Rule for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn priority(&self) -> i32 {
                $priority
            }

            fn category(&self) -> $crate::simplification::rules::RuleCategory {
                $crate::simplification::rules::RuleCategory::$category
            }

            fn applies_to(&self) -> &'static [$crate::simplification::rules::ExprKind] {
                $kinds
            }

            fn apply(
                &self,
                expr: &$crate::Expr,
                context: &$crate::simplification::rules::RuleContext,
            ) -> Option<$crate::Expr> {
                ($apply)(expr, context)
            }
        }
    };
}

/// Numeric simplification rules
pub(crate) mod numeric;

/// Algebraic simplification rules
pub(crate) mod algebraic;

/// Rule Registry for dynamic loading and dependency management
pub struct RuleRegistry {
    pub(crate) rules: Vec<Arc<dyn Rule>>,
    /// Rules indexed by expression kind for fast lookup
    rules_by_kind: HashMap<ExprKind, Vec<Arc<dyn Rule>>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            rules_by_kind: HashMap::new(),
        }
    }

    pub fn load_all_rules(&mut self) {
        self.rules.extend(numeric::get_numeric_rules());
        self.rules.extend(algebraic::get_algebraic_rules());

        // Sort by category, then by priority (higher first)
        self.rules.sort_by_key(|r| {
            (
                match r.category() {
                    RuleCategory::Numeric => 0,
                    RuleCategory::Algebraic => 1,
                },
                -r.priority(),
            )
        });
        self.build_kind_index();
    }

    /// Build the index of rules by expression kind
    fn build_kind_index(&mut self) {
        self.rules_by_kind.clear();
        for rule in &self.rules {
            for &kind in rule.applies_to() {
                self.rules_by_kind
                    .entry(kind)
                    .or_default()
                    .push(Arc::clone(rule));
            }
        }
    }

    /// Get only rules that apply to a specific expression kind
    #[inline]
    pub fn get_rules_for_kind(&self, kind: ExprKind) -> &[Arc<dyn Rule>] {
        self.rules_by_kind
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_indexes_by_kind() {
        let mut registry = RuleRegistry::new();
        registry.load_all_rules();

        let pow_rules: Vec<&str> = registry
            .get_rules_for_kind(ExprKind::Pow)
            .iter()
            .map(|r| r.name())
            .collect();
        assert!(pow_rules.contains(&"pow_identity"));
        assert!(pow_rules.contains(&"rational_power"));
        assert!(registry.get_rules_for_kind(ExprKind::Symbol).is_empty());

        // Numeric rules run before algebraic ones
        assert_eq!(pow_rules[0], "pow_identity");
    }
}
