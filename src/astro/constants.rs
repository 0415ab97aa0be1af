//! Physical constants (CODATA 2022, IAU nominal values)

/// Speed of light in vacuum, m/s
pub const C: f64 = 2.997_924_58e8;

/// Newtonian constant of gravitation, m³ kg⁻¹ s⁻²
pub const G: f64 = 6.674_30e-11;

/// Solar mass, kg
pub const M_SOL: f64 = 1.988_47e30;

/// Parsec, m
pub const PC: f64 = 3.085_677_581e16;

/// Electron mass, kg
pub const M_E: f64 = 9.109_383_713_9e-31;

/// Critical baryonic surface density Σ*_crit, M_sol/pc²
pub const SIGMA_STAR: f64 = 124.0;
