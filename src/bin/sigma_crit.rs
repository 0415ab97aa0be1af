//! Critical surface density Σ* from the Hubble constant

use clap::Parser;
use simplicity_calc::astro::{DEFAULT_H0, SigmaCrit};
use simplicity_calc::telemetry;

#[derive(Parser)]
#[command(name = "sigma_crit")]
#[command(about = "Compute a0 = c*H0/(2π) and Σ* = a0/(2πG)")]
struct Args {
    /// Hubble constant in km/s/Mpc
    #[arg(default_value_t = DEFAULT_H0)]
    h0: f64,
}

fn main() {
    telemetry::init_tracing();
    let args = Args::parse();
    println!("{}", SigmaCrit::from_h0(args.h0));
}
