use std::sync::Arc;

use crate::simplification::rules::{ExprKind, RuleContext};
use crate::{Expr, ExprKind as AstKind};

/// An exponent that is an integer literal
fn is_integer_exponent(exp: &Expr) -> bool {
    exp.as_number().is_some_and(|n| n.is_integer())
}

rule!(
    PowerOfPowerRule,
    "power_of_power",
    80,
    Algebraic,
    &[ExprKind::Pow],
    |expr: &Expr, _context: &RuleContext| {
        // (b^e1)^e2 = b^(e1*e2) holds for integer e2, or for any e2 when b > 0
        if let AstKind::Pow(inner, outer_exp) = &expr.kind
            && let AstKind::Pow(base, inner_exp) = &inner.kind
            && (is_integer_exponent(outer_exp) || base.is_known_positive())
        {
            let new_exp = Expr::product(vec![(**inner_exp).clone(), (**outer_exp).clone()]);
            return Some(Expr::pow_from_arcs(Arc::clone(base), Arc::new(new_exp)));
        }
        None
    }
);

rule!(
    PowerOfProductRule,
    "power_of_product",
    75,
    Algebraic,
    &[ExprKind::Pow],
    |expr: &Expr, _context: &RuleContext| {
        let AstKind::Pow(base, exp) = &expr.kind else {
            return None;
        };
        let AstKind::Product(factors) = &base.kind else {
            return None;
        };

        // (a*b)^n = a^n * b^n for integer n
        if is_integer_exponent(exp) {
            let distributed = factors
                .iter()
                .map(|f| Arc::new(Expr::pow_from_arcs(Arc::clone(f), Arc::clone(exp))))
                .collect();
            return Some(Expr::product_from_arcs(distributed));
        }

        // Otherwise only positive factors may be split out
        let (positive, rest): (Vec<&Arc<Expr>>, Vec<&Arc<Expr>>) =
            factors.iter().partition(|f| f.is_known_positive());
        if positive.is_empty() {
            return None;
        }

        let mut out: Vec<Arc<Expr>> = positive
            .into_iter()
            .map(|f| Arc::new(Expr::pow_from_arcs(Arc::clone(f), Arc::clone(exp))))
            .collect();
        if !rest.is_empty() {
            let remaining = Expr::product_from_arcs(rest.into_iter().cloned().collect());
            out.push(Arc::new(Expr::pow_from_arcs(Arc::new(remaining), Arc::clone(exp))));
        }
        Some(Expr::product_from_arcs(out))
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplification::rules::Rule;
    use crate::{symb, symb_positive};

    #[test]
    fn test_power_of_power_needs_integer_or_positive_base() {
        let x = symb("pow_rule_x");
        let r = symb_positive("pow_rule_r");
        let ctx = RuleContext::default();

        let half_of_square = Expr::pow(x.pow(2), Expr::rational(1, 2));
        assert!(PowerOfPowerRule.apply(&half_of_square, &ctx).is_none());

        let positive = Expr::pow(r.pow(2), Expr::rational(1, 2));
        assert_eq!(
            PowerOfPowerRule.apply(&positive, &ctx).map(|e| e.simplified()),
            Some(r.to_expr())
        );

        let cubed = Expr::pow(x.pow(2), Expr::integer(3));
        assert!(PowerOfPowerRule.apply(&cubed, &ctx).is_some());
    }

    #[test]
    fn test_power_of_product_splits_positive_factors_only() {
        let x = symb("pow_prod_x");
        let r = symb_positive("pow_prod_r");
        let ctx = RuleContext::default();

        let e = Expr::sqrt(x * r);
        let rewritten = PowerOfProductRule.apply(&e, &ctx).unwrap();
        assert_eq!(rewritten.to_string(), "sqrt(pow_prod_r)*sqrt(pow_prod_x)");

        let only_unknown = Expr::sqrt(x * symb("pow_prod_y"));
        assert!(PowerOfProductRule.apply(&only_unknown, &ctx).is_none());
    }
}
