//! Galaxy surface density vs. dark-matter fraction data
//!
//! SPARC rows come from a CSV file ([`loader`]); a curated table of special
//! galaxies is merged in and both are drawn by [`plot`].

pub mod loader;
pub mod plot;

pub use loader::{DM_ALIASES, LoadError, SIGMA_ALIASES, load_sparc, load_sparc_from_reader};
pub use plot::{
    MIN_SIZE, PlotConfig, PlotError, dedup_legend, plot_sparc, render_rar_plot, render_rar_svg,
    svg_to_pdf,
};

/// One galaxy: baryonic surface density μ0 (M_sol/pc²) and dark-matter
/// fraction f_DM
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyRecord {
    pub sigma_b: f64,
    pub f_dm: f64,
    pub name: Option<String>,
}

impl GalaxyRecord {
    pub fn new(sigma_b: f64, f_dm: f64, name: Option<String>) -> Self {
        Self { sigma_b, f_dm, name }
    }
}

/// Curated reference galaxies: (μ0 [M_sol/pc²], f_DM, name).
///
/// Values are taken from the literature and kept literal; μ0 for ultra-diffuse
/// galaxies is interpretation-dependent.
pub const SPECIAL_GALAXIES: [(f64, f64, &str); 23] = [
    (150.0, 0.05, "NGC 1052-DF2"), // ultra-diffuse, almost no dark matter, well above Σ_crit [16]
    (120.0, 0.10, "NGC 1052-DF4"), // another DM-deficient UDG, supports DF2 [17]
    (2.3, 0.99, "Dragonfly 44"),   // extreme DM dominance, very low baryonic density [4]
    (60.0, 0.55, "NGC 2403"),      // spiral in the transition region
    (80.0, 0.45, "UGC 4325"),      // mid-range disk, moderate DM fraction
    (200.0, 0.15, "NGC 2841"),     // massive spiral, little central DM
    (100.0, 0.38, "NGC 6503"),     // isolated spiral, intermediate ratio
    (160.0, 0.18, "NGC 6946"),     // "Fireworks Galaxy", baryon dominated
    (130.0, 0.22, "NGC 2976"),     // below-average DM fraction
    (10.0, 0.93, "IC 2574"),       // dwarf, strongly DM dominated
    (6.0, 0.97, "UGC 128"),        // giant LSB galaxy
    (110.0, 0.40, "NGC 3198"),     // textbook flat rotation curve
    (170.0, 0.19, "NGC 7331"),     // "Milky Way twin"
    (180.0, 0.16, "NGC 5055"),     // large spiral, baryon dominated inside
    (120.0, 0.35, "NGC 7793"),     // intermediate DM/baryon balance
    (70.0, 0.57, "NGC 925"),       // transition regime
    (150.0, 0.20, "NGC 2903"),     // massive spiral, low inner DM
    (4.0, 0.99, "DDO 154"),        // gas-rich dwarf, essentially all DM
    (8.0, 0.95, "F568-1"),         // LSB, nearly pure DM
    (9.0, 0.96, "UGC 5750"),       // LSB, very high DM dominance
    (30.0, 0.72, "NGC 1003"),      // intermediate mix
    (20.0, 0.80, "UGC 1281"),      // dwarf, clear DM domination
    (140.0, 0.24, "NGC 3992"),     // massive spiral above Σ_crit
];

/// The special galaxies as records
pub fn special_galaxies() -> Vec<GalaxyRecord> {
    SPECIAL_GALAXIES
        .iter()
        .map(|&(sigma_b, f_dm, name)| GalaxyRecord::new(sigma_b, f_dm, Some(name.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_table() {
        let records = special_galaxies();
        assert_eq!(records.len(), 23);
        assert_eq!(records[0].name.as_deref(), Some("NGC 1052-DF2"));
        assert!(records.iter().all(|r| r.sigma_b > 0.0 && (0.0..=1.0).contains(&r.f_dm)));
    }
}
