//! Critical surface density Σ*_crit from the Hubble constant
//!
//! `a0 = c·H0/(2π)` and `Σ* = a0/(2πG)`.

use std::f64::consts::PI;
use std::fmt;

use super::constants::{C, G, M_SOL, PC};

/// Default Hubble constant, km/s/Mpc
pub const DEFAULT_H0: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaCrit {
    /// Hubble constant, km/s/Mpc
    pub h0_km_s_mpc: f64,
    /// Hubble constant, 1/s
    pub h0_per_s: f64,
    /// Acceleration scale, m/s²
    pub a0: f64,
    /// Σ*, kg/m²
    pub sigma_kg_m2: f64,
    /// Σ*, M_sol/pc²
    pub sigma_msol_pc2: f64,
}

impl SigmaCrit {
    pub fn from_h0(h0_km_s_mpc: f64) -> Self {
        let h0_per_s = h0_km_s_mpc * 1e3 / (1e6 * PC);
        let a0 = C * h0_per_s / (2.0 * PI);
        let sigma_kg_m2 = a0 / (2.0 * PI * G);
        let sigma_msol_pc2 = sigma_kg_m2 * PC * PC / M_SOL;
        Self {
            h0_km_s_mpc,
            h0_per_s,
            a0,
            sigma_kg_m2,
            sigma_msol_pc2,
        }
    }
}

impl Default for SigmaCrit {
    fn default() -> Self {
        Self::from_h0(DEFAULT_H0)
    }
}

impl fmt::Display for SigmaCrit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "H0        = {:.2}  km/s/Mpc", self.h0_km_s_mpc)?;
        writeln!(f, "a0        = {}  m/s\u{b2}", format_sci(self.a0, 3))?;
        writeln!(f, "Sigma*    = {:.3}  kg/m\u{b2}", self.sigma_kg_m2)?;
        write!(f, "Sigma*    = {:.1}  Msol/pc\u{b2}", self.sigma_msol_pc2)
    }
}

/// Scientific notation with a signed two-digit exponent (`1.080e-10`)
pub(crate) fn format_sci(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = exp.strip_prefix('-').map_or(("+", exp), |d| ("-", d));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_h0() {
        let s = SigmaCrit::default();
        assert_relative_eq!(s.a0, 1.08e-10, max_relative = 5e-3);
        assert!(s.sigma_msol_pc2 > 123.0 && s.sigma_msol_pc2 < 124.5);
    }

    #[test]
    fn test_scales_linearly_with_h0() {
        let base = SigmaCrit::from_h0(70.0);
        let other = SigmaCrit::from_h0(73.0);
        assert_relative_eq!(other.a0 / base.a0, 73.0 / 70.0, max_relative = 1e-12);
        assert_relative_eq!(
            other.sigma_msol_pc2 / base.sigma_msol_pc2,
            73.0 / 70.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_report_lines() {
        let report = SigmaCrit::default().to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "H0        = 70.00  km/s/Mpc");
        assert!(lines[1].starts_with("a0        = 1.08"));
        assert!(lines[1].contains("e-10"));
        assert!(lines[3].ends_with("Msol/pc\u{b2}"));
    }

    #[test]
    fn test_format_sci() {
        assert_eq!(format_sci(1.0824e-10, 3), "1.082e-10");
        assert_eq!(format_sci(2.5e3, 2), "2.50e+03");
    }
}
