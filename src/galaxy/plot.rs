//! RAR threshold scatter plot: surface density vs. dark-matter fraction
//!
//! The figure is drawn with the plotters SVG backend into memory and then
//! written either as SVG (`.svg` output path) or converted to PDF.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use svg2pdf::usvg;
use thiserror::Error;
use tracing::debug;

use super::loader::{LoadError, load_sparc};
use super::{GalaxyRecord, special_galaxies};
use crate::astro::constants::SIGMA_STAR;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Plot drawing failed: {0}")]
    Drawing(String),

    #[error("Figure size {width}x{height} is too small (minimum 300x200)")]
    InvalidSize { width: u32, height: u32 },

    #[error("PDF conversion failed: {0}")]
    Pdf(String),

    #[error("Failed to write figure: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),
}

fn drawing_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Drawing(e.to_string())
}

/// Smallest figure that leaves room for title, plot and footer
pub const MIN_SIZE: (u32, u32) = (300, 200);

const TITLE_HEIGHT: u32 = 60;
const FOOTER_HEIGHT: u32 = 20;

/// Paths and figure settings for the RAR threshold plot
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub input: PathBuf,
    /// `.svg` keeps the SVG, anything else is written as PDF
    pub output: PathBuf,
    /// Σ*_crit marker position, M_sol/pc²
    pub threshold: f64,
    pub size: (u32, u32),
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("SPARC_summary.csv"),
            output: PathBuf::from("RAR_threshold.pdf"),
            threshold: SIGMA_STAR,
            size: (900, 600),
        }
    }
}

const TITLE: [&str; 2] = [
    "RAR Threshold: Baryonic Surface Density vs. Dark Matter Fraction",
    "(Based on SPARC Data and Additional Curated Data)",
];
const FOOTER: &str = "Code for data verification available on GitHub.";

const SPARC_LABEL: &str = "SPARC Galaxies";
const SPECIAL_LABEL: &str = "Special Galaxies";

/// Legend marker kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMarker {
    SparcPoint,
    SpecialPoint,
    DashedLine,
}

/// Drop repeated labels, keeping the first position and the last marker
pub fn dedup_legend(entries: Vec<(String, LegendMarker)>) -> Vec<(String, LegendMarker)> {
    let mut unique: Vec<(String, LegendMarker)> = Vec::with_capacity(entries.len());
    for (label, marker) in entries {
        match unique.iter_mut().find(|(l, _)| *l == label) {
            Some(existing) => existing.1 = marker,
            None => unique.push((label, marker)),
        }
    }
    unique
}

/// Log-scale x range covering every point and the threshold
fn x_range(points: &[&GalaxyRecord], threshold: f64) -> (f64, f64) {
    let (lo, hi) = points
        .iter()
        .map(|r| r.sigma_b)
        .chain(std::iter::once(threshold))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    (lo / 1.5, hi * 1.5)
}

fn y_range(points: &[&GalaxyRecord]) -> (f64, f64) {
    points
        .iter()
        .map(|r| r.f_dm)
        .fold((0.0_f64, 1.05_f64), |(lo, hi), y| (lo.min(y), hi.max(y + 0.05)))
}

/// Load the SPARC file, merge the special galaxies and write the figure.
///
/// Returns the number of SPARC rows plotted. Nothing is written when loading
/// fails.
///
/// # Errors
/// [`PlotError::Load`] for loader failures, otherwise see [`render_rar_plot`].
pub fn plot_sparc(config: &PlotConfig) -> Result<usize, PlotError> {
    let sparc = load_sparc(&config.input)?;
    render_rar_plot(&sparc, &special_galaxies(), config)?;
    Ok(sparc.len())
}

/// Render the figure and write it to `config.output`.
///
/// # Errors
/// [`PlotError::InvalidSize`], drawing and PDF conversion failures, or
/// [`PlotError::Io`] if the file cannot be written.
pub fn render_rar_plot(
    sparc: &[GalaxyRecord],
    special: &[GalaxyRecord],
    config: &PlotConfig,
) -> Result<(), PlotError> {
    let svg = render_rar_svg(sparc, special, config)?;
    let bytes = if is_svg_path(&config.output) {
        svg.into_bytes()
    } else {
        svg_to_pdf(&svg)?
    };
    std::fs::write(&config.output, bytes)?;
    debug!(output = %config.output.display(), "figure written");
    Ok(())
}

fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Convert an SVG document to a single-page PDF
///
/// # Errors
/// [`PlotError::Pdf`] if the SVG cannot be parsed or converted.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, PlotError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| PlotError::Pdf(e.to_string()))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| PlotError::Pdf(e.to_string()))
}

/// Render SPARC and special galaxies as an SVG document.
///
/// # Errors
/// [`PlotError::InvalidSize`] below [`MIN_SIZE`], [`PlotError::Drawing`] if
/// the backend fails (for example without a usable font).
pub fn render_rar_svg(
    sparc: &[GalaxyRecord],
    special: &[GalaxyRecord],
    config: &PlotConfig,
) -> Result<String, PlotError> {
    let (width, height) = config.size;
    if width < MIN_SIZE.0 || height < MIN_SIZE.1 {
        return Err(PlotError::InvalidSize { width, height });
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, config.size).into_drawing_area();
        draw_rar(&root, sparc, special, config)?;
        root.present().map_err(drawing_err)?;
    }
    Ok(svg)
}

fn draw_rar(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    sparc: &[GalaxyRecord],
    special: &[GalaxyRecord],
    config: &PlotConfig,
) -> Result<(), PlotError> {
    let all: Vec<&GalaxyRecord> = sparc.iter().chain(special).collect();
    let (x_min, x_max) = x_range(&all, config.threshold);
    let (y_min, y_max) = y_range(&all);
    debug!(points = all.len(), x_min, x_max, "rendering RAR plot");

    root.fill(&WHITE).map_err(drawing_err)?;
    let (title_area, body) = root.split_vertically(TITLE_HEIGHT);
    let plot_height = config
        .size
        .1
        .saturating_sub(TITLE_HEIGHT)
        .saturating_sub(FOOTER_HEIGHT);
    let (plot_area, footer_area) = body.split_vertically(plot_height);

    let (w, _) = title_area.dim_in_pixel();
    let centered = Pos::new(HPos::Center, VPos::Center);
    for (i, line) in TITLE.iter().enumerate() {
        let y = 18 + 22 * i32::try_from(i).unwrap_or(0);
        title_area
            .draw(&Text::new(
                *line,
                (i32::try_from(w / 2).unwrap_or(0), y),
                TextStyle::from(("sans-serif", 18).into_font()).pos(centered),
            ))
            .map_err(drawing_err)?;
    }

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((x_min..x_max).log_scale(), y_min..y_max)
        .map_err(drawing_err)?;

    chart
        .configure_mesh()
        .x_desc("Baryonic Surface Density \u{3bc}0 [M\u{2609} pc\u{207b}\u{b2}]")
        .y_desc("Dark Matter Fraction f_DM")
        .light_line_style(BLACK.mix(0.08))
        .bold_line_style(BLACK.mix(0.2))
        .draw()
        .map_err(drawing_err)?;

    chart
        .draw_series(
            sparc
                .iter()
                .map(|r| Circle::new((r.sigma_b, r.f_dm), 3, BLUE.mix(0.7).filled())),
        )
        .map_err(drawing_err)?;

    let label_style =
        TextStyle::from(("sans-serif", 11).into_font()).pos(Pos::new(HPos::Left, VPos::Center));
    for record in special {
        chart
            .draw_series(std::iter::once(Circle::new(
                (record.sigma_b, record.f_dm),
                4,
                RED.filled(),
            )))
            .map_err(drawing_err)?;
        if let Some(name) = &record.name {
            chart
                .draw_series(std::iter::once(Text::new(
                    name.clone(),
                    (record.sigma_b * 1.05, record.f_dm),
                    label_style.clone(),
                )))
                .map_err(drawing_err)?;
        }
    }

    // Dashed threshold line, one segment per dash
    let dash = (y_max - y_min) / 40.0;
    let threshold = config.threshold;
    chart
        .draw_series((0..40).step_by(2).map(|i| {
            let y0 = y_min + dash * f64::from(i);
            PathElement::new(
                vec![(threshold, y0), (threshold, y0 + dash)],
                RGBColor(30, 144, 255).stroke_width(2),
            )
        }))
        .map_err(drawing_err)?;

    let threshold_label = format!("\u{3a3}*crit = {threshold:.0} M\u{2609} pc\u{207b}\u{b2}");
    let legend = dedup_legend(vec![
        (SPARC_LABEL.to_string(), LegendMarker::SparcPoint),
        (SPECIAL_LABEL.to_string(), LegendMarker::SpecialPoint),
        (threshold_label, LegendMarker::DashedLine),
    ]);
    for (label, marker) in legend {
        // Empty series carry the legend entries
        let entry = chart
            .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())
            .map_err(drawing_err)?
            .label(label);
        match marker {
            LegendMarker::SparcPoint => {
                entry.legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.mix(0.7).filled()));
            }
            LegendMarker::SpecialPoint => {
                entry.legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));
            }
            LegendMarker::DashedLine => {
                entry.legend(|(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + 20, y)],
                        RGBColor(30, 144, 255).stroke_width(2),
                    )
                });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(drawing_err)?;

    let (fw, fh) = footer_area.dim_in_pixel();
    footer_area
        .draw(&Text::new(
            FOOTER,
            (
                i32::try_from(fw / 2).unwrap_or(0),
                i32::try_from(fh / 2).unwrap_or(0),
            ),
            ("sans-serif", 11)
                .into_font()
                .color(&RGBColor(128, 128, 128))
                .pos(centered),
        ))
        .map_err(drawing_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_legend_last_marker_wins() {
        let entries = vec![
            ("a".to_string(), LegendMarker::SparcPoint),
            ("b".to_string(), LegendMarker::DashedLine),
            ("a".to_string(), LegendMarker::SpecialPoint),
        ];
        let unique = dedup_legend(entries);
        assert_eq!(
            unique,
            vec![
                ("a".to_string(), LegendMarker::SpecialPoint),
                ("b".to_string(), LegendMarker::DashedLine),
            ]
        );
    }

    #[test]
    fn test_x_range_includes_threshold() {
        let r = GalaxyRecord::new(10.0, 0.5, None);
        let (lo, hi) = x_range(&[&r], 124.0);
        assert!(lo < 10.0 && hi > 124.0);
    }

    /// plotters measures text through system fonts; without one there is
    /// nothing to lay out
    fn font_available() -> bool {
        ("sans-serif", 12).into_font().box_size("RAR").is_ok()
    }

    fn sample_sparc() -> Vec<GalaxyRecord> {
        vec![
            GalaxyRecord::new(50.0, 0.6, None),
            GalaxyRecord::new(300.0, 0.1, Some("NGC 0001".to_string())),
            GalaxyRecord::new(3.0, 0.95, None),
        ]
    }

    #[test]
    fn test_small_figure_is_rejected() {
        let config = PlotConfig {
            size: (900, 60),
            ..PlotConfig::default()
        };
        let err = render_rar_svg(&sample_sparc(), &[], &config).unwrap_err();
        assert!(matches!(err, PlotError::InvalidSize { width: 900, height: 60 }));
    }

    #[test]
    fn test_default_output_is_pdf() {
        let config = PlotConfig::default();
        assert_eq!(config.output, PathBuf::from("RAR_threshold.pdf"));
        assert!(!is_svg_path(&config.output));
        assert!(is_svg_path(Path::new("figure.SVG")));
    }

    #[test]
    fn test_missing_columns_write_no_figure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("SPARC_summary.csv");
        std::fs::write(&input, "galaxy,radius,f_dm\nNGC 1,3.0,0.5\n").unwrap();
        let config = PlotConfig {
            input,
            output: dir.path().join("RAR_threshold.pdf"),
            ..PlotConfig::default()
        };

        let err = plot_sparc(&config).unwrap_err();
        assert!(matches!(err, PlotError::Load(LoadError::MissingColumns { .. })));
        assert!(!config.output.exists());
    }

    #[test]
    fn test_missing_file_writes_no_figure() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotConfig {
            input: dir.path().join("SPARC_summary.csv"),
            output: dir.path().join("RAR_threshold.pdf"),
            ..PlotConfig::default()
        };

        let err = plot_sparc(&config).unwrap_err();
        assert!(matches!(err, PlotError::Load(LoadError::MissingFile(_))));
        assert!(!config.output.exists());
    }

    #[test]
    fn test_render_svg_contents() {
        if !font_available() {
            eprintln!("skipping: no sans-serif font for text layout");
            return;
        }
        let sparc = sample_sparc();
        let special = special_galaxies();
        let svg = render_rar_svg(&sparc, &special, &PlotConfig::default()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains(TITLE[0]));
        assert!(svg.contains(FOOTER));
        assert!(svg.contains("NGC 1052-DF2"));
        assert!(svg.contains("Dragonfly 44"));
        assert!(svg.contains("crit = 124"));
        assert!(svg.to_uppercase().contains("#1E90FF"));
        assert!(svg.matches("<circle").count() >= sparc.len() + special.len());
    }

    #[test]
    fn test_render_writes_pdf_and_svg() {
        if !font_available() {
            eprintln!("skipping: no sans-serif font for text layout");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let sparc = sample_sparc();
        let special = special_galaxies();

        let pdf = PlotConfig {
            output: dir.path().join("RAR_threshold.pdf"),
            ..PlotConfig::default()
        };
        render_rar_plot(&sparc, &special, &pdf).unwrap();
        let bytes = std::fs::read(&pdf.output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let svg = PlotConfig {
            output: dir.path().join("RAR_threshold.svg"),
            ..PlotConfig::default()
        };
        render_rar_plot(&sparc, &special, &svg).unwrap();
        let text = std::fs::read_to_string(&svg.output).unwrap();
        assert!(text.contains("<svg"));
    }
}
