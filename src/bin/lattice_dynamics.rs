//! Continuum dynamics of the close-packed medium with ρ* as the only scale

use anyhow::{Context, Result};
use clap::Parser;
use simplicity_calc::derivation::{LatticeDerivation, rho_star_numeric};
use simplicity_calc::telemetry;

#[derive(Parser)]
#[command(name = "lattice_dynamics")]
#[command(about = "Derive density, stiffness, wave speed and Lamé coefficients of the FCC medium")]
struct Args {
    /// Lattice constant in metres; prints a numeric ρ* when given
    #[arg(short, long)]
    lattice_constant: Option<f64>,
}

fn main() -> Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let d = LatticeDerivation::derive().context("running the lattice derivation")?;
    let s = &d.symbols;

    println!("=== S3-0: Geometry ===");
    println!("Stable FCC packing at 50% overlap: {}", d.geometry_relation);
    println!("Fundamental scale: {} (energy density)\n", s.rho_star);

    println!("=== S3-1: Mass density ===");
    println!("m_eff = {}", d.effective_mass);
    println!("rho   = m_eff/{}^3 = {}\n", s.lattice_constant, d.density);

    println!("=== S3-2: Stiffness ===");
    println!("E0      = rho_star*V_eig = {}", d.zero_point_energy);
    println!("K0      = {}", d.neck_stiffness);
    println!("k_total = 12*K0 = {}", d.total_stiffness);
    println!("E       = k_total/{}^2 = {}\n", s.lattice_constant, d.modulus);

    println!("=== S3-3: Wave speed ===");
    println!("c0 = sqrt(E/rho) = {}", d.wave_speed);
    if d.wave_speed.contains_symbol(s.lattice_constant) {
        println!("The lattice constant does NOT cancel; check the derivation.\n");
    } else {
        println!("The lattice constant cancels: c0 is a pure number times the unit speed.\n");
    }

    println!("=== S3-4: Lamé coefficients ===");
    println!("lambda = mu = E/3 = {}\n", d.lame);

    println!("=== S3-5: Calibration ===");
    println!("(1) rest energy:   {}", d.rest_energy_calibration);
    println!("    => {} = {}", s.rho_star, d.rho_star_in_a);
    println!("(2) lattice scale: {}", d.lattice_calibration);
    for (symbol, value) in &d.calibrated {
        println!("    => {symbol} = {value}");
    }
    if let Some(rho) = d.calibrated_rho_star() {
        println!("rho_star depends only on the measured constant: {rho}");
    }

    if let Some(a) = args.lattice_constant {
        let value = rho_star_numeric(&d, a)
            .with_context(|| format!("evaluating rho_star at a = {a} m"))?;
        println!("\nWith a = {a:e} m: rho_star = {value:.6e} J/m^3");
    }
    Ok(())
}
