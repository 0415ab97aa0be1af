use std::sync::Arc;

use crate::simplification::rules::Rule;

/// Term collection and power merging
pub(crate) mod combination;
/// Power laws
pub(crate) mod powers;

/// Get all algebraic rules in priority order
pub(crate) fn get_algebraic_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        // Power rules
        Arc::new(powers::PowerOfPowerRule),
        Arc::new(powers::PowerOfProductRule),
        // Combination rules
        Arc::new(combination::CombinePowersRule),
        Arc::new(combination::CollectLikeTermsRule),
    ]
}
