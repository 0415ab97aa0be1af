//! Continuum dynamics of the close-packed medium
//!
//! Everything is expressed through the sphere radius `R`, the lattice
//! constant `a` and the fundamental density scale `ρ*`. The stable geometry
//! fixes `R = a/√2`, after which density, stiffness, wave speed and the
//! Lamé coefficients follow with `ρ*` as the only scale. Two calibration
//! equations then fix `ρ*` and `a`.

use std::collections::HashMap;

use tracing::debug;

use crate::astro::constants::{C, M_E};
use crate::{CasError, Equation, Expr, Symbol, expand, solve_system, solve_unique, symb_positive};

use super::SphereGeometry;

/// Neck stiffness prefactor from integrating the strain over one neck
const NECK_PREFACTOR: (i64, i64) = (16, 15);

/// Nearest neighbours in the FCC lattice
const COORDINATION: i64 = 12;

/// All symbols of the derivation (each declared positive)
#[derive(Debug, Clone, Copy)]
pub struct LatticeSymbols {
    pub radius: Symbol,
    pub lattice_constant: Symbol,
    pub rho_star: Symbol,
    pub electron_mass: Symbol,
    pub light_speed: Symbol,
    /// Lattice constant fixed by a second, independent measurement
    pub calibrated_lattice_constant: Symbol,
}

impl Default for LatticeSymbols {
    fn default() -> Self {
        Self {
            radius: symb_positive("R"),
            lattice_constant: symb_positive("a"),
            rho_star: symb_positive("rho_star"),
            electron_mass: symb_positive("m_e"),
            light_speed: symb_positive("c"),
            calibrated_lattice_constant: symb_positive("a_cal"),
        }
    }
}

/// Results of the derivation chain, each simplified
#[derive(Debug, Clone)]
pub struct LatticeDerivation {
    pub symbols: LatticeSymbols,
    /// `R = a/√2`
    pub geometry_relation: Equation,
    /// `m_eff = 1/3·ρ*·V_full`
    pub effective_mass: Expr,
    /// `ρ = m_eff/a³` in terms of `ρ*`
    pub density: Expr,
    /// `E0 = ρ*·V_eig`
    pub zero_point_energy: Expr,
    /// Single neck spring constant `K0`
    pub neck_stiffness: Expr,
    /// `k_total = 12·K0`
    pub total_stiffness: Expr,
    /// `E = k_total/a²` in terms of `ρ*`
    pub modulus: Expr,
    /// `c0 = √(E/ρ)`, independent of `a`
    pub wave_speed: Expr,
    /// `λ = μ = E/3`
    pub lame: Expr,
    /// `E0 = m_e·c²`
    pub rest_energy_calibration: Equation,
    /// `ρ*` from the rest-energy calibration, in terms of `a`
    pub rho_star_in_a: Expr,
    /// `a = a_cal`
    pub lattice_calibration: Equation,
    /// Solution of both calibrations: `ρ*` and `a` in terms of `a_cal`
    pub calibrated: Vec<(Symbol, Expr)>,
}

impl LatticeDerivation {
    /// Run the derivation with the default symbols
    ///
    /// # Errors
    /// [`CasError::SolutionCount`] if a calibration does not have exactly one
    /// solution, or any other solver error.
    pub fn derive() -> Result<Self, CasError> {
        Self::derive_with(LatticeSymbols::default())
    }

    /// Run the derivation with custom symbols
    ///
    /// # Errors
    /// See [`LatticeDerivation::derive`].
    pub fn derive_with(symbols: LatticeSymbols) -> Result<Self, CasError> {
        let r = symbols.radius;
        let a = symbols.lattice_constant;
        let rho_star = symbols.rho_star.to_expr();

        let radius_in_a = expand(&Expr::div_expr(a.to_expr(), Expr::sqrt(Expr::integer(2))));
        let geometry_relation = Equation::new(r, radius_in_a.clone());
        let in_a = |e: &Expr| expand(&e.substitute(r, &radius_in_a));

        let geometry = SphereGeometry::new(r);
        let effective_mass = expand(&Expr::product(vec![
            Expr::rational(1, 3),
            rho_star.clone(),
            geometry.v_full.clone(),
        ]));
        let density = in_a(&Expr::div_expr(effective_mass.clone(), a.pow(3)));

        let eigen_volume = Expr::mul_expr(Expr::rational(1, 3), geometry.v_full.clone());
        let zero_point_energy = expand(&Expr::mul_expr(rho_star.clone(), eigen_volume));

        let (num, den) = NECK_PREFACTOR;
        let neck_stiffness = expand(&Expr::product(vec![
            Expr::div_expr(Expr::rational(num, den), Expr::pi()),
            zero_point_energy.clone(),
            Expr::pow(r.to_expr(), Expr::integer(-1)),
        ]));
        let total_stiffness = expand(&Expr::mul_expr(
            Expr::integer(COORDINATION),
            neck_stiffness.clone(),
        ));

        let modulus = in_a(&Expr::div_expr(total_stiffness.clone(), a.pow(2)));
        let wave_speed = expand(&Expr::sqrt(expand(&Expr::div_expr(
            modulus.clone(),
            density.clone(),
        ))));
        let lame = expand(&Expr::div_expr(modulus.clone(), Expr::integer(3)));
        debug!(%density, %modulus, %wave_speed, %lame, "continuum coefficients");

        let rest_energy = Expr::mul_expr(
            symbols.electron_mass.to_expr(),
            symbols.light_speed.pow(2),
        );
        let rest_energy_calibration = Equation::new(in_a(&zero_point_energy), rest_energy);
        let rho_star_in_a = solve_unique(&rest_energy_calibration, symbols.rho_star)?;

        let lattice_calibration = Equation::new(a, symbols.calibrated_lattice_constant);
        let calibrated = solve_system(
            &[rest_energy_calibration.clone(), lattice_calibration.clone()],
            &[symbols.rho_star, a],
        )?;

        Ok(Self {
            symbols,
            geometry_relation,
            effective_mass,
            density,
            zero_point_energy,
            neck_stiffness,
            total_stiffness,
            modulus,
            wave_speed,
            lame,
            rest_energy_calibration,
            rho_star_in_a,
            lattice_calibration,
            calibrated,
        })
    }

    /// `ρ*` after both calibrations, in terms of `a_cal`
    pub fn calibrated_rho_star(&self) -> Option<&Expr> {
        self.calibrated
            .iter()
            .find(|(s, _)| *s == self.symbols.rho_star)
            .map(|(_, e)| e)
    }
}

/// Numeric `ρ*` in J/m³ for a lattice constant in metres, using CODATA
/// values for the electron mass and the speed of light.
///
/// # Errors
/// [`CasError::NonReal`] for a non-positive lattice constant, or an
/// evaluation error from the expression.
pub fn rho_star_numeric(derivation: &LatticeDerivation, lattice_constant_m: f64) -> Result<f64, CasError> {
    if !(lattice_constant_m.is_finite() && lattice_constant_m > 0.0) {
        return Err(CasError::NonReal(format!(
            "lattice constant must be positive, got {lattice_constant_m}"
        )));
    }
    let symbols = &derivation.symbols;
    let values = HashMap::from([
        (symbols.lattice_constant, lattice_constant_m),
        (symbols.electron_mass, M_E),
        (symbols.light_speed, C),
    ]);
    derivation.rho_star_in_a.evaluate(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_density_and_moduli() {
        let d = LatticeDerivation::derive().unwrap();
        assert_eq!(d.effective_mass.to_string(), "4*pi*R^3*rho_star/9");
        assert_eq!(d.density.to_string(), "sqrt(2)*pi*rho_star/9");
        assert_eq!(d.neck_stiffness.to_string(), "64*R^2*rho_star/135");
        assert_eq!(d.total_stiffness.to_string(), "256*R^2*rho_star/45");
        assert_eq!(d.modulus.to_string(), "128*rho_star/45");
        assert_eq!(d.lame.to_string(), "128*rho_star/135");
    }

    #[test]
    fn test_wave_speed_is_scale_free() {
        let d = LatticeDerivation::derive().unwrap();
        assert_eq!(d.wave_speed.to_string(), "8*2^(1/4)*sqrt(5)/(5*sqrt(pi))");
        assert!(!d.wave_speed.contains_symbol(d.symbols.lattice_constant));
        let value = d.wave_speed.evaluate(&HashMap::new()).unwrap();
        assert_relative_eq!(value, 2.4004, epsilon = 1e-3);
    }

    #[test]
    fn test_rest_energy_calibration() {
        let d = LatticeDerivation::derive().unwrap();
        assert_eq!(d.rho_star_in_a.to_string(), "9*sqrt(2)*c^2*m_e/(2*pi*a^3)");
        assert_eq!(
            d.calibrated_rho_star().map(ToString::to_string).as_deref(),
            Some("9*sqrt(2)*c^2*m_e/(2*pi*a_cal^3)")
        );
    }

    #[test]
    fn test_rho_star_numeric() {
        let d = LatticeDerivation::derive().unwrap();
        let a = 1.0e-15;
        let expected = 9.0 * std::f64::consts::SQRT_2 * C * C * M_E / (2.0 * std::f64::consts::PI * a * a * a);
        assert_relative_eq!(rho_star_numeric(&d, a).unwrap(), expected, max_relative = 1e-12);
        assert!(rho_star_numeric(&d, -1.0).is_err());
    }
}
