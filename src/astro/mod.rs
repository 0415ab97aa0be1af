//! Closed-form astrophysical utilities

pub mod constants;
pub mod dark_hole;
pub mod sigma_crit;

pub use dark_hole::{BH_CATALOG, BlackHole, DarkHoleRow, DarkHoleTable, r_dh};
pub use sigma_crit::{DEFAULT_H0, SigmaCrit};
