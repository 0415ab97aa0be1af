//! Substitutes the solved overlap into the volume loss and checks that π
//! survives in the eigen-volume

use anyhow::{Context, Result};
use simplicity_calc::derivation::{OverlapVerdict, PiVerdict, check_eigen_volume, solve_overlap};
use simplicity_calc::telemetry;

fn main() -> Result<()> {
    telemetry::init_tracing();

    let overlap = solve_overlap().context("solving the overlap cubic")?;
    let xi = match (&overlap.verdict, overlap.roots.as_slice()) {
        (OverlapVerdict::UniqueHalf, [root]) => root.clone(),
        (verdict, _) => {
            println!("An error occurred: no unique overlap to substitute ({verdict}).");
            return Ok(());
        }
    };

    let check = check_eigen_volume(&overlap.geometry, &xi);

    println!("=== Inclusion-exclusion sum ===");
    println!("Every term of V_loss = 12*V_cap - (triple) + (quadruple) contains pi.");
    println!("At xi = {xi} the total loss is");
    println!("V_loss = {}", check.v_loss);
    if check.loss_is_two_thirds {
        println!("which is exactly 2/3 * V_full.\n");
    } else {
        println!("which is NOT 2/3 * V_full.\n");
    }

    println!("=== Eigen-volume and pi lock-in ===");
    println!("V_eig = V_full - V_loss = {} - {}", check.v_full, check.v_loss);
    println!("Simplified: V_eig = {}\n", check.v_eig);

    match check.verdict {
        PiVerdict::PiLockedIn => {
            println!("Conclusion: pi is present in the eigen-volume.");
            println!("It is not an external parameter but a consequence of the spherical");
            println!("geometry, tying the inertia of the medium (V_eig) to circles and spheres.");
        }
        PiVerdict::PiCancelled => {
            println!("An error occurred: pi has cancelled out, which contradicts the geometry.");
        }
    }
    Ok(())
}
