//! Dark-hole radius `r_DH = sqrt(M / (4π·Σ*))` for known black holes

use std::f64::consts::PI;
use std::fmt;

use super::constants::SIGMA_STAR;
use super::sigma_crit::format_sci;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackHole {
    pub name: &'static str,
    /// Mass in solar masses
    pub mass_msun: f64,
}

/// Catalog of well-known black holes
pub const BH_CATALOG: [BlackHole; 4] = [
    BlackHole {
        name: "Sgr A*",
        mass_msun: 4.3e6,
    },
    BlackHole {
        name: "M87*",
        mass_msun: 6.5e9,
    },
    BlackHole {
        name: "NGC 1277",
        mass_msun: 1.7e10,
    },
    BlackHole {
        name: "Cygnus X-1",
        mass_msun: 14.8,
    },
];

/// Dark-hole radius in parsec for a mass in solar masses
pub fn r_dh(mass_msun: f64) -> f64 {
    (mass_msun / (4.0 * PI * SIGMA_STAR)).sqrt()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DarkHoleRow {
    pub name: String,
    pub mass_msun: f64,
    pub r_dh_pc: f64,
}

/// `r_DH` for each catalog entry, printed rounded to 3 decimals
#[derive(Debug, Clone, PartialEq)]
pub struct DarkHoleTable {
    pub rows: Vec<DarkHoleRow>,
}

impl DarkHoleTable {
    pub fn from_catalog(catalog: &[BlackHole]) -> Self {
        let rows = catalog
            .iter()
            .map(|bh| DarkHoleRow {
                name: bh.name.to_string(),
                mass_msun: bh.mass_msun,
                r_dh_pc: r_dh(bh.mass_msun),
            })
            .collect();
        Self { rows }
    }
}

impl Default for DarkHoleTable {
    fn default() -> Self {
        Self::from_catalog(&BH_CATALOG)
    }
}

impl fmt::Display for DarkHoleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .rows
            .iter()
            .map(|r| r.name.len())
            .chain(std::iter::once("Name".len()))
            .max()
            .unwrap_or(4);

        write!(f, "{:>3}  {:>name_width$}  {:>12}  {:>10}", "", "Name", "M_Msun", "r_DH_pc")?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(
                f,
                "\n{i:>3}  {:>name_width$}  {:>12}  {:>10.3}",
                row.name,
                format_sci(row.mass_msun, 3),
                row.r_dh_pc
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sgr_a_star() {
        let expected = (4.3e6_f64 / (4.0 * PI * 124.0)).sqrt();
        assert_relative_eq!(r_dh(4.3e6), expected, max_relative = 1e-12);
        assert_relative_eq!(r_dh(4.3e6), 52.53, max_relative = 1e-3);
    }

    #[test]
    fn test_table_rows_follow_catalog() {
        let table = DarkHoleTable::default();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[1].name, "M87*");
        assert!(table.rows[3].r_dh_pc < 0.1);
    }

    #[test]
    fn test_table_rounds_to_three_decimals() {
        let text = DarkHoleTable::default().to_string();
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains(&format!("{:.3}", r_dh(4.3e6))));
        assert!(text.contains("0.097"));
    }

    #[test]
    fn test_masses_use_short_scientific_notation() {
        let text = DarkHoleTable::default().to_string();
        let sgr = text.lines().nth(1).unwrap();
        assert!(sgr.contains("4.300e+06"), "{sgr}");
        assert!(text.contains("6.500e+09"));
        assert!(text.contains("1.480e+01"));
        assert!(!text.contains("4.300000e6"));
    }
}
