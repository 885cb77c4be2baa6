//! Temperature profile plotting
//!
//! Line plots of one row of the plate, `T(j·dy)` for a fixed row `i`. The
//! reference analysis looks at row 130, which crosses the weld centre.
//!
//! # Usage
//!
//! ```rust,no_run
//! use therm_rs::output::visualization::plot_profile;
//!
//! let row: Vec<f64> = (0..305).map(|j| (-((j as f64 - 130.0) / 20.0).powi(2)).exp()).collect();
//! plot_profile(&row, 1.0, "row130.png", None)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::config::{PlotConfig, NO_TITLE};
use crate::solver::FieldSnapshot;

// =================================================================================================
// Core Plotting Functions
// =================================================================================================

/// Plot one temperature profile.
///
/// # Arguments
///
/// * `values` - Temperatures along the row
/// * `spacing` - Cell spacing along the row \[mm\]
/// * `output_path` - Path to save the plot (PNG or SVG)
/// * `config` - Optional plot configuration
pub fn plot_profile<P: AsRef<Path>>(
    values: &[f64],
    spacing: f64,
    output_path: P,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    plot_profile_comparison(vec![("Temperature", values)], spacing, output_path, Some(config))
}

/// Plot several profiles on the same axes.
///
/// # Arguments
///
/// * `profiles` - `(label, temperatures)` pairs, all on the same spacing
/// * `spacing` - Cell spacing along the rows \[mm\]
/// * `output_path` - Path to save the plot
/// * `config` - Optional plot configuration
///
/// # Example
///
/// ```rust,ignore
/// let profiles = vec![("1205", &row_a[..]), ("3100", &row_b[..])];
/// plot_profile_comparison(profiles, 1.0, "rows.png", None)?;
/// ```
pub fn plot_profile_comparison<P: AsRef<Path>>(
    profiles: Vec<(&str, &[f64])>,
    spacing: f64,
    output_path: P,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if profiles.is_empty() {
        return Err("No profiles provided".into());
    }
    if profiles.iter().any(|(_, values)| values.is_empty()) {
        return Err("Empty profile".into());
    }
    if profiles.iter().flat_map(|(_, v)| v.iter()).any(|t| !t.is_finite()) {
        return Err("Invalid data: NaN or Inf detected in profile".into());
    }

    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let max_x = profiles
        .iter()
        .map(|(_, v)| (v.len().saturating_sub(1)) as f64 * spacing)
        .fold(0.0, f64::max)
        .max(spacing);

    let (min_t, max_t) = profiles
        .iter()
        .flat_map(|(_, v)| v.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| (lo.min(t), hi.max(t)));
    let pad = ((max_t - min_t) * 0.05).max(1e-10);
    let y_range = (min_t - pad)..(max_t + pad);

    let output_path = output_path.as_ref();
    let ext = output_path.extension().and_then(|s| s.to_str()).unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, &profiles, spacing, config, max_x, y_range)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, &profiles, spacing, config, max_x, y_range)
        }
    }
}

/// Plot row `row` of each snapshot, labelled by its time.
pub fn plot_profile_evolution<P: AsRef<Path>>(
    snapshots: &[FieldSnapshot],
    row: usize,
    output_path: P,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let first = snapshots.first().ok_or("No snapshots provided")?;

    let mut rows = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        let values = snapshot
            .row(row)
            .ok_or_else(|| format!("Row {} out of range at step {}", row, snapshot.step))?;
        rows.push((format!("t={:.2}s", snapshot.time), values));
    }

    let profile_refs: Vec<(&str, &[f64])> = rows
        .iter()
        .map(|(label, values)| (label.as_str(), values.as_slice()))
        .collect();

    plot_profile_comparison(profile_refs, first.geometry.dy, output_path, config)
}

/// Implementation for profile plotting with concrete backend
fn plot_profiles_impl<DB: DrawingBackend>(
    backend: DB,
    profiles: &[(&str, &[f64])],
    spacing: f64,
    config: &PlotConfig,
    max_x: f64,
    y_range: std::ops::Range<f64>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_x, y_range)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .draw()?;
    }

    let single = profiles.len() == 1;
    for (idx, (label, values)) in profiles.iter().enumerate() {
        let color = if single { config.line_color } else { config.get_series_color(idx) };

        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(j, t)| (j as f64 * spacing, *t)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::GridGeometry;
    use nalgebra::DMatrix;
    use tempfile::TempDir;

    fn bump(n: usize, height: f64) -> Vec<f64> {
        (0..n)
            .map(|j| height * (-((j as f64 - n as f64 / 2.0) / 5.0).powi(2)).exp())
            .collect()
    }

    #[test]
    fn test_plot_profile_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("row.png");
        plot_profile(&bump(50, 10.0), 1.0, &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_profile_negative_values_svg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("row.svg");
        let values: Vec<f64> = bump(50, 3.0).iter().map(|t| t - 2.7).collect();
        plot_profile(&values, 0.5, &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_profile_comparison() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cmp.png");
        let a = bump(40, 5.0);
        let b = bump(40, 8.0);
        plot_profile_comparison(vec![("early", &a[..]), ("late", &b[..])], 1.0, &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_profile_comparison_empty_returns_error() {
        let dir = TempDir::new().unwrap();
        assert!(plot_profile_comparison(vec![], 1.0, dir.path().join("x.png"), None).is_err());
        assert!(plot_profile(&[1.0, f64::NAN], 1.0, dir.path().join("y.png"), None).is_err());
    }

    #[test]
    fn test_plot_profile_evolution() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("evolution.png");
        let geometry = GridGeometry { nx: 5, ny: 30, dx: 1.0, dy: 1.0 };
        let snapshots: Vec<FieldSnapshot> = (0..3)
            .map(|k| FieldSnapshot {
                step: k * 10,
                updates: k * 10 + 1,
                time: k as f64 * 0.1,
                field: DMatrix::from_fn(5, 30, |_, j| (j as f64 * 0.1 * (k + 1) as f64).sin()),
                geometry,
                t_cool: 0.0,
                t_hot: 1.0,
            })
            .collect();

        plot_profile_evolution(&snapshots, 2, &path, None).unwrap();
        assert!(path.exists());

        assert!(plot_profile_evolution(&snapshots, 9, dir.path().join("bad.png"), None).is_err());
        assert!(plot_profile_evolution(&[], 0, dir.path().join("none.png"), None).is_err());
    }
}
