//! Dark-hole radii for a catalog of known black holes

use simplicity_calc::astro::{DarkHoleTable, constants::SIGMA_STAR};
use simplicity_calc::telemetry;

fn main() {
    telemetry::init_tracing();
    println!("Dark-hole radius r_DH = sqrt(M / (4*pi*Sigma*)), Sigma* = {SIGMA_STAR} Msol/pc^2\n");
    println!("{}", DarkHoleTable::default());
}
