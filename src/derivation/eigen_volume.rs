//! Eigen-volume at the solved overlap and the π lock-in check

use std::fmt;

use tracing::debug;

use super::SphereGeometry;
use crate::{Expr, expand, pi};

/// Whether π survives in the simplified eigen-volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiVerdict {
    PiLockedIn,
    /// π cancelled out, which contradicts the geometry
    PiCancelled,
}

impl fmt::Display for PiVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PiLockedIn => write!(f, "pi is present in the eigen-volume"),
            Self::PiCancelled => write!(f, "pi has cancelled out"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EigenVolumeCheck {
    pub v_full: Expr,
    /// `V_loss` at the given overlap, simplified
    pub v_loss: Expr,
    /// `V_full - V_loss`, simplified
    pub v_eig: Expr,
    /// `V_loss == 2/3·V_full` exactly
    pub loss_is_two_thirds: bool,
    pub verdict: PiVerdict,
}

/// Substitute the overlap `xi` into the volume loss and inspect the result
pub fn check_eigen_volume(geometry: &SphereGeometry, xi: &Expr) -> EigenVolumeCheck {
    let v_loss = expand(&geometry.volume_loss(xi));
    let two_thirds = expand(&Expr::mul_expr(Expr::rational(2, 3), geometry.v_full.clone()));
    let v_eig = expand(&geometry.eigen_volume(&v_loss));

    let verdict = if v_eig.contains_symbol(pi()) {
        PiVerdict::PiLockedIn
    } else {
        PiVerdict::PiCancelled
    };
    debug!(%v_loss, %v_eig, %verdict, "eigen-volume check");

    EigenVolumeCheck {
        v_full: geometry.v_full.clone(),
        loss_is_two_thirds: v_loss == two_thirds,
        v_loss,
        v_eig,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symb_positive;

    #[test]
    fn test_half_overlap_locks_in_pi() {
        let geometry = SphereGeometry::new(symb_positive("eig_R"));
        let check = check_eigen_volume(&geometry, &Expr::rational(1, 2));
        assert!(check.loss_is_two_thirds);
        assert_eq!(check.v_loss.to_string(), "8*pi*eig_R^3/9");
        assert_eq!(check.v_eig.to_string(), "4*pi*eig_R^3/9");
        assert_eq!(check.verdict, PiVerdict::PiLockedIn);
    }

    #[test]
    fn test_full_overlap_overshoots() {
        // At ξ = 1 the loss is 4/3·V_full and V_eig is negative
        let geometry = SphereGeometry::new(symb_positive("eig_full_R"));
        let check = check_eigen_volume(&geometry, &Expr::integer(1));
        assert!(!check.loss_is_two_thirds);
        assert_eq!(check.v_eig.to_string(), "-4*pi*eig_full_R^3/9");
        assert_eq!(check.verdict, PiVerdict::PiLockedIn);
    }

    #[test]
    fn test_total_loss_leaves_no_pi() {
        let geometry = SphereGeometry::new(symb_positive("eig_zero_R"));
        let v_eig = expand(&geometry.eigen_volume(&geometry.v_full));
        assert!(v_eig.is_zero());
        assert!(!v_eig.contains_symbol(pi()));
    }
}
