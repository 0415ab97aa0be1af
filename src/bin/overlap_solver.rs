//! Solves the sphere-overlap cubic and checks that ξ = 1/2 is its only root

use anyhow::{Context, Result};
use clap::Parser;
use simplicity_calc::derivation::{OverlapVerdict, solve_overlap};
use simplicity_calc::telemetry;

#[derive(Parser)]
#[command(name = "overlap_solver")]
#[command(about = "Derive and solve the FCC overlap cubic 8ξ³ - 12ξ² + 6ξ - 1 = 0")]
struct Args {
    /// Print with Unicode symbols (ξ, π, superscripts)
    #[arg(long)]
    unicode: bool,
}

fn main() -> Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();
    let show = |e: &simplicity_calc::Expr| {
        if args.unicode {
            e.to_unicode()
        } else {
            e.to_string()
        }
    };

    let solution = solve_overlap().context("solving the overlap cubic")?;
    let geometry = &solution.geometry;

    println!("=== Definitions ===");
    println!("Sphere radius R, overlap parameter xi = H/R");
    println!("Total volume of one sphere: V_full = {}\n", show(&geometry.v_full));

    println!("=== Volume loss ===");
    println!("The inclusion-exclusion sum over the 12 neighbours reduces to a");
    println!("polynomial in the normalized overlap xi:");
    println!("V_loss = {}\n", show(&solution.condition.lhs));

    println!("=== Condition V_eig = V_full/3 ===");
    println!("V_full - V_loss = V_full/3  <=>  V_loss = {}", show(&solution.condition.rhs));
    println!("Dividing by V_full and clearing denominators:");
    println!("{} = 0", show(&solution.derived.to_expr()));
    println!("Factored form:");
    println!("{} = 0\n", show(&solution.factored.to_expr()));

    let roots: Vec<String> = solution.roots.iter().map(|r| show(r)).collect();
    println!("Solutions for xi: [{}]\n", roots.join(", "));

    println!("=== Interpretation ===");
    match &solution.verdict {
        OverlapVerdict::UniqueHalf => {
            println!("The cubic has a single real root: xi = 1/2.");
            println!("The one-third eigen-volume is reached only at exactly 50% overlap,");
            println!("so the overlap follows from the geometry rather than being assumed.");
        }
        OverlapVerdict::Unexpected { reason } => {
            println!("An error has occurred; the solution is not 1/2 ({reason}).");
        }
    }
    Ok(())
}
