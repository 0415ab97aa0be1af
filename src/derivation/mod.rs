//! Exact derivations for the sphere-packing argument
//!
//! - [`overlap`]: the overlap cubic and its unique root ξ = 1/2
//! - [`eigen_volume`]: the residual volume at that overlap and the π check
//! - [`lattice`]: density, stiffness, wave speed, Lamé coefficients and
//!   the two calibration equations

pub mod eigen_volume;
pub mod lattice;
pub mod overlap;

pub use eigen_volume::{EigenVolumeCheck, PiVerdict, check_eigen_volume};
pub use lattice::{LatticeDerivation, LatticeSymbols, rho_star_numeric};
pub use overlap::{OverlapSolution, OverlapVerdict, derive_cubic, solve_overlap, target_cubic};

use crate::{Expr, Symbol, symb_positive};

/// A sphere of radius `R` in the close-packed lattice
#[derive(Debug, Clone)]
pub struct SphereGeometry {
    /// Radius symbol (positive)
    pub radius: Symbol,
    /// `4/3·π·R³`
    pub v_full: Expr,
}

impl Default for SphereGeometry {
    fn default() -> Self {
        Self::new(symb_positive("R"))
    }
}

impl SphereGeometry {
    pub fn new(radius: Symbol) -> Self {
        let v_full = Expr::product(vec![
            Expr::rational(4, 3),
            Expr::pi(),
            radius.pow(3),
        ]);
        Self { radius, v_full }
    }

    /// Overlap loss polynomial `8ξ³ - 12ξ² + 6ξ` (without the constant term)
    pub fn loss_polynomial(xi: &Expr) -> Expr {
        Expr::sum(vec![
            Expr::mul_expr(Expr::integer(8), Expr::pow(xi.clone(), Expr::integer(3))),
            Expr::mul_expr(Expr::integer(-12), Expr::pow(xi.clone(), Expr::integer(2))),
            Expr::mul_expr(Expr::integer(6), xi.clone()),
        ])
    }

    /// Volume lost to the twelve neighbours at overlap `xi`:
    /// `V_loss(ξ) = 2/3·V_full·(8ξ³ - 12ξ² + 6ξ)`
    pub fn volume_loss(&self, xi: &Expr) -> Expr {
        Expr::product(vec![
            Expr::rational(2, 3),
            self.v_full.clone(),
            Self::loss_polynomial(xi),
        ])
    }

    /// `V_full - V_loss`
    pub fn eigen_volume(&self, volume_loss: &Expr) -> Expr {
        Expr::sub_expr(self.v_full.clone(), volume_loss.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_volume_display() {
        let geometry = SphereGeometry::new(symb_positive("geom_R"));
        assert_eq!(geometry.v_full.to_string(), "4*pi*geom_R^3/3");
    }

    #[test]
    fn test_no_overlap_loses_nothing() {
        let geometry = SphereGeometry::default();
        let loss = geometry.volume_loss(&Expr::integer(0)).simplified();
        assert!(loss.is_zero());
    }
}
