//! Scatter plot of baryonic surface density vs. dark-matter fraction with the
//! Σ*_crit threshold

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use simplicity_calc::galaxy::{LoadError, PlotConfig, PlotError, plot_sparc};
use simplicity_calc::telemetry;

#[derive(Parser)]
#[command(name = "rar_threshold")]
#[command(about = "Plot SPARC galaxies against the critical surface density")]
struct Args {
    /// SPARC summary CSV
    #[arg(short, long, default_value = "SPARC_summary.csv")]
    input: PathBuf,

    /// Output figure; PDF unless the extension is .svg
    #[arg(short, long, default_value = "RAR_threshold.pdf")]
    output: PathBuf,
}

fn main() -> Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();
    let config = PlotConfig {
        input: args.input,
        output: args.output,
        ..PlotConfig::default()
    };

    match plot_sparc(&config) {
        Ok(count) => {
            println!("Loaded {count} SPARC galaxies");
            println!("Plot '{}' saved successfully.", config.output.display());
            Ok(())
        }
        Err(PlotError::Load(err @ (LoadError::MissingFile(_) | LoadError::MissingColumns { .. }))) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
        Err(err) => Err(err).with_context(|| format!("plotting {}", config.input.display())),
    }
}
