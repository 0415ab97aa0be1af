//! SPARC summary CSV loader
//!
//! Column names are trimmed and lower-cased, then matched against alias
//! lists. Rows are kept only if μ0 is finite and strictly positive and f_DM
//! is finite; unparseable cells count as non-finite.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use super::GalaxyRecord;

/// Accepted names for the surface density column
pub const SIGMA_ALIASES: [&str; 4] = ["mu0", "sigma_b", "sigma_baryon", "surfacedensity"];

/// Accepted names for the dark-matter fraction column
pub const DM_ALIASES: [&str; 4] = ["f_dm", "dm_fraction", "dark_matter_frac", "dmfrac"];

/// Optional galaxy name column
const NAME_ALIASES: [&str; 2] = ["galaxy", "name"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("'{}' not found", .0.display())]
    MissingFile(PathBuf),

    #[error(
        "Required column names for surface density or dark matter fraction were not found.\n\
         Expected Sigma columns: {expected_sigma:?}\n\
         Expected DM columns: {expected_dm:?}\n\
         Available columns in the file: {available:?}"
    )]
    MissingColumns {
        expected_sigma: Vec<String>,
        expected_dm: Vec<String>,
        available: Vec<String>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load and filter the SPARC summary file
///
/// # Errors
/// [`LoadError::MissingFile`] if `path` does not exist,
/// [`LoadError::MissingColumns`] if no alias matches for either column.
pub fn load_sparc(path: &Path) -> Result<Vec<GalaxyRecord>, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }
    debug!(path = %path.display(), "loading SPARC summary");
    load_sparc_from_reader(File::open(path)?)
}

/// Load and filter SPARC rows from any reader
///
/// # Errors
/// See [`load_sparc`].
pub fn load_sparc_from_reader<R: Read>(reader: R) -> Result<Vec<GalaxyRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let find = |aliases: &[&str]| columns.iter().position(|c| aliases.contains(&c.as_str()));
    let (Some(sigma_idx), Some(dm_idx)) = (find(&SIGMA_ALIASES), find(&DM_ALIASES)) else {
        return Err(LoadError::MissingColumns {
            expected_sigma: SIGMA_ALIASES.iter().map(ToString::to_string).collect(),
            expected_dm: DM_ALIASES.iter().map(ToString::to_string).collect(),
            available: columns,
        });
    };
    let name_idx = find(&NAME_ALIASES);
    debug!(
        sigma = %columns[sigma_idx],
        dm = %columns[dm_idx],
        "resolved columns"
    );

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rdr.records() {
        let row = row?;
        let sigma_b = parse_cell(row.get(sigma_idx));
        let f_dm = parse_cell(row.get(dm_idx));

        if sigma_b.is_finite() && sigma_b > 0.0 && f_dm.is_finite() {
            let name = name_idx
                .and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string);
            records.push(GalaxyRecord::new(sigma_b, f_dm, name));
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        warn!(dropped, kept = records.len(), "dropped rows with invalid values");
    }
    Ok(records)
}

/// Cell as `f64`, NaN when missing or unparseable
fn parse_cell(cell: Option<&str>) -> f64 {
    cell.and_then(|c| c.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalized_aliases() {
        let data = " Galaxy , MU0 ,DMFrac\nNGC 1,100.0,0.3\nNGC 2,50,0.6\n";
        let records = load_sparc_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sigma_b, 100.0);
        assert_eq!(records[1].f_dm, 0.6);
        assert_eq!(records[0].name.as_deref(), Some("NGC 1"));
    }

    #[test]
    fn test_rows_filtered() {
        let data = "sigma_b,f_dm\n0,0.5\n-3,0.5\nabc,0.5\n10,nan\n10,\n12,inf\n20,0.4\n";
        let records = load_sparc_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records, vec![GalaxyRecord::new(20.0, 0.4, None)]);
    }

    #[test]
    fn test_missing_columns_lists_aliases() {
        let data = "name,f_dm,radius\nA,0.5,3\n";
        let err = load_sparc_from_reader(data.as_bytes()).unwrap_err();
        match &err {
            LoadError::MissingColumns { available, .. } => {
                assert_eq!(available, &["name", "f_dm", "radius"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("\"mu0\""));
        assert!(message.contains("\"dmfrac\""));
        assert!(message.contains("\"radius\""));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SPARC_summary.csv");
        let err = load_sparc(&path).unwrap_err();
        assert!(matches!(err, LoadError::MissingFile(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "surfacedensity,dark_matter_frac").unwrap();
        writeln!(file, "124,0.2").unwrap();
        let records = load_sparc(file.path()).unwrap();
        assert_eq!(records.len(), 1);
    }
}
