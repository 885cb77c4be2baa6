//! Heat-map plotting of the plate temperature field
//!
//! Draws one filled cell per grid point, coloured by a [`Colormap`] over a
//! fixed or data-driven range, with an optional colour bar on the right.
//!
//! # Orientation
//!
//! The horizontal axis is the column index `j`, the vertical axis the row
//! index `i`, increasing upwards. With a [`ViewWindow`] only that
//! sub-rectangle is drawn.
//!
//! # Usage
//!
//! ```rust,no_run
//! use therm_rs::output::visualization::{plot_heatmap, PlotConfig, ViewWindow};
//! use nalgebra::DMatrix;
//!
//! let field = DMatrix::from_fn(305, 305, |i, j| ((i + j) % 15) as f64);
//! let config = PlotConfig::heatmap("demo")
//!     .with_color_range(0.0, 15.0)
//!     .with_view(ViewWindow::aluminum_reference());
//!
//! plot_heatmap(&field, "plate.png", Some(&config))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};

use log::debug;
use nalgebra::DMatrix;
use plotters::prelude::*;

use super::colormap::Colormap;
use super::config::{PlotConfig, ViewWindow, NO_TITLE};
use crate::solver::{Snapshot, SnapshotObserver};

/// Width reserved for the colour bar, in pixels.
const COLORBAR_WIDTH: u32 = 110;

/// Number of bands drawn in the colour bar.
const COLORBAR_STEPS: usize = 128;

// =================================================================================================
// Core Plotting Functions
// =================================================================================================

/// Plot a temperature field as a heat map.
///
/// # Arguments
///
/// * `field` - `nx × ny` temperatures
/// * `output_path` - Path to save the plot (PNG or SVG, chosen by extension)
/// * `config` - Optional plot configuration ([`PlotConfig::heatmap`] by default)
///
/// # Errors
///
/// - Empty field, or a view window that does not intersect it
/// - Backend failures (file creation, drawing)
pub fn plot_heatmap<P: AsRef<Path>>(
    field: &DMatrix<f64>,
    output_path: P,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if field.is_empty() {
        return Err("Empty field: nothing to plot".into());
    }

    let default_config = PlotConfig::heatmap(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let (nx, ny) = field.shape();
    let window = match &config.view {
        Some(view) => view.clipped(nx, ny).ok_or("View window does not intersect the field")?,
        None => ViewWindow::new(0..ny, 0..nx),
    };

    let range = config.color_range.unwrap_or_else(|| (field.min(), field.max()));

    let output_path = output_path.as_ref();
    let ext = output_path.extension().and_then(|s| s.to_str()).unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_heatmap_impl(backend, field, &window, range, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_heatmap_impl(backend, field, &window, range, config)
        }
    }
}

/// Plot a snapshot, with the snapshot time appended to the title.
///
/// The colour range is `(t_cool, t_hot)` of the snapshot unless the
/// configuration fixes one.
pub fn plot_snapshot<P: AsRef<Path>>(
    snapshot: &Snapshot<'_>,
    output_path: P,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let mut config = config.cloned().unwrap_or_else(|| PlotConfig::heatmap(NO_TITLE));
    config.title = format!("{} ({:.2} s)", config.title, snapshot.time);
    if config.color_range.is_none() {
        config.color_range = Some((snapshot.t_cool, snapshot.t_hot));
    }
    plot_heatmap(snapshot.field, output_path, Some(&config))
}

/// Implementation for heat-map plotting with concrete backend
fn plot_heatmap_impl<DB: DrawingBackend>(
    backend: DB,
    field: &DMatrix<f64>,
    window: &ViewWindow,
    range: (f64, f64),
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let (map_area, bar_area) = if config.show_colorbar {
        let (left, right) = root.split_horizontally(config.width.saturating_sub(COLORBAR_WIDTH));
        (left, Some(right))
    } else {
        (root.clone(), None)
    };

    let x_range = window.columns.start as f64..window.columns.end as f64;
    let y_range = window.rows.start as f64..window.rows.end as f64;

    let mut chart = ChartBuilder::on(&map_area)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, y_range)?;

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()?;

    let colormap = config.colormap;
    chart.draw_series(window.rows.clone().flat_map(|i| {
        window.columns.clone().map(move |j| {
            let color = colormap.map(field[(i, j)], range);
            Rectangle::new(
                [(j as f64, i as f64), ((j + 1) as f64, (i + 1) as f64)],
                color.filled(),
            )
        })
    }))?;

    if let Some(bar_area) = bar_area {
        draw_colorbar(&bar_area, colormap, range, config)?;
    }

    root.present()?;

    Ok(())
}

/// Vertical colour bar spanning `range`.
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    colormap: Colormap,
    (min, max): (f64, f64),
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    // Degenerate data range: widen so the axis can be built
    let (low, high) = if max > min { (min, max) } else { (min, min + 1.0) };

    let mut bar = ChartBuilder::on(area)
        .margin_top(60)
        .margin_bottom(60)
        .margin_right(10)
        .y_label_area_size(55)
        .build_cartesian_2d(0.0..1.0, low..high)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(&config.colorbar_label)
        .y_label_formatter(&|y| format!("{:.1}", y))
        .draw()?;

    let band = (high - low) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let y0 = low + k as f64 * band;
        let color = colormap.map(y0 + 0.5 * band, (low, high));
        Rectangle::new([(0.0, y0), (1.0, y0 + band)], color.filled())
    }))?;

    Ok(())
}

// =================================================================================================
// Snapshot observer
// =================================================================================================

/// Writes one heat-map image per scheduled snapshot into a directory.
///
/// Files are named `{stem}_step{m:05}.{extension}`; the extension selects
/// the backend (`png` or `svg`).
#[derive(Debug, Clone)]
pub struct HeatmapObserver {
    directory: PathBuf,
    stem: String,
    extension: String,
    config: PlotConfig,
    written: Vec<PathBuf>,
}

impl HeatmapObserver {
    /// PNG heat maps with the default heat-map configuration.
    pub fn new<P: Into<PathBuf>>(directory: P, stem: &str) -> Self {
        Self {
            directory: directory.into(),
            stem: stem.to_string(),
            extension: "png".to_string(),
            config: PlotConfig::heatmap(NO_TITLE),
            written: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Image format by extension (`png`, `svg`).
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    /// Path of the image for step `m`.
    pub fn path_for(&self, m: usize) -> PathBuf {
        self.directory.join(format!("{}_step{:05}.{}", self.stem, m, self.extension))
    }

    /// Images written so far, in step order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl SnapshotObserver for HeatmapObserver {
    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<(), Box<dyn Error>> {
        let path = self.path_for(snapshot.step);
        plot_snapshot(snapshot, &path, Some(&self.config))?;
        debug!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::GridGeometry;
    use tempfile::TempDir;

    fn hot_spot(n: usize) -> DMatrix<f64> {
        let c = n as f64 / 2.0;
        DMatrix::from_fn(n, n, |i, j| {
            let r2 = (i as f64 - c).powi(2) + (j as f64 - c).powi(2);
            15.0 * (-r2 / 50.0).exp()
        })
    }

    #[test]
    fn test_plot_heatmap_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("field.png");
        plot_heatmap(&hot_spot(40), &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_heatmap_svg_with_view() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("field.svg");
        let config = PlotConfig::heatmap("window")
            .with_color_range(0.0, 15.0)
            .with_view(ViewWindow::new(10..30, 5..35));
        plot_heatmap(&hot_spot(40), &path, Some(&config)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_heatmap_uniform_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flat.png");
        plot_heatmap(&DMatrix::zeros(10, 10), &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_heatmap_rejects_disjoint_view() {
        let dir = TempDir::new().unwrap();
        let config = PlotConfig::heatmap(NO_TITLE).with_view(ViewWindow::aluminum_reference());
        let result = plot_heatmap(&hot_spot(20), dir.path().join("x.png"), Some(&config));
        assert!(result.is_err());
    }

    #[test]
    fn test_heatmap_observer_names_files() {
        let dir = TempDir::new().unwrap();
        let field = hot_spot(30);
        let geometry = GridGeometry { nx: 30, ny: 30, dx: 1.0, dy: 1.0 };
        let mut observer = HeatmapObserver::new(dir.path(), "cu").with_extension("svg");

        let snapshot = Snapshot {
            step: 40,
            updates: 41,
            time: 0.08,
            field: &field,
            geometry: &geometry,
            t_cool: 0.0,
            t_hot: 15.0,
        };
        observer.on_snapshot(&snapshot).unwrap();

        let expected = dir.path().join("cu_step00040.svg");
        assert_eq!(observer.written(), &[expected.clone()]);
        assert!(expected.exists());
    }
}
