use std::sync::Arc;

use num_rational::BigRational;
use num_traits::Zero;

use crate::simplification::rules::{ExprKind, RuleContext};
use crate::{Expr, ExprKind as AstKind};

rule!(
    CombinePowersRule,
    "combine_powers",
    70,
    Algebraic,
    &[ExprKind::Product],
    |expr: &Expr, _context: &RuleContext| {
        let AstKind::Product(factors) = &expr.kind else {
            return None;
        };

        // x^a * x^b = x^(a+b). The bare numeric coefficient never joins a
        // numeric radical, otherwise 2*2^(1/2) and 2^(3/2) would rewrite into
        // each other forever.
        let mut coefficient: Option<Arc<Expr>> = None;
        let mut groups: Vec<(Expr, Vec<Expr>, Arc<Expr>)> = Vec::new();
        let mut merged = false;

        for factor in factors {
            if factor.is_number() {
                coefficient = Some(Arc::clone(factor));
                continue;
            }
            let (base, exp) = factor.as_base_exp();
            if let Some((_, exps, _)) = groups.iter_mut().find(|(b, _, _)| *b == base) {
                exps.push(exp);
                merged = true;
            } else {
                groups.push((base, vec![exp], Arc::clone(factor)));
            }
        }

        if !merged {
            return None;
        }

        let mut out: Vec<Arc<Expr>> = coefficient.into_iter().collect();
        for (base, exps, original) in groups {
            if exps.len() == 1 {
                out.push(original);
                continue;
            }
            let total = Expr::sum(exps);
            if total.is_zero() {
                continue;
            }
            out.push(Arc::new(Expr::pow(base, total)));
        }
        Some(Expr::product_from_arcs(out))
    }
);

rule!(
    CollectLikeTermsRule,
    "collect_like_terms",
    70,
    Algebraic,
    &[ExprKind::Sum],
    |expr: &Expr, _context: &RuleContext| {
        let AstKind::Sum(terms) = &expr.kind else {
            return None;
        };

        // 2*x + 3*x = 5*x, keyed by the coefficient-free part of each term
        let mut groups: Vec<(Expr, BigRational)> = Vec::with_capacity(terms.len());
        for term in terms {
            let (coeff, rest) = term.split_coefficient();
            if let Some((_, total)) = groups.iter_mut().find(|(r, _)| *r == rest) {
                *total += coeff;
            } else {
                groups.push((rest, coeff));
            }
        }

        if groups.len() == terms.len() {
            return None;
        }

        let collected = groups
            .into_iter()
            .filter(|(_, c)| !c.is_zero())
            .map(|(rest, c)| Expr::product(vec![Expr::number(c), rest]))
            .collect();
        Some(Expr::sum(collected))
    }
);
