//! Plot configuration shared across visualization modules
//!
//! This module defines the configuration used by both heat-map and profile
//! plotting functions.

use std::ops::Range;

use plotters::prelude::*;

use super::colormap::Colormap;

/// Sub-rectangle of the grid shown by a heat map.
///
/// `columns` is the horizontal (y index `j`) range and `rows` the vertical
/// (x index `i`) range, both half-open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewWindow {
    pub columns: Range<usize>,
    pub rows: Range<usize>,
}

impl ViewWindow {
    pub fn new(columns: Range<usize>, rows: Range<usize>) -> Self {
        Self { columns, rows }
    }

    /// Window of the aluminum figures: columns 60..190, rows 65..185.
    pub fn aluminum_reference() -> Self {
        Self::new(60..190, 65..185)
    }

    /// Window of the copper animation: columns 90..170, rows 75..175.
    pub fn copper_reference() -> Self {
        Self::new(90..170, 75..175)
    }

    /// Intersection with an `nx × ny` grid, `None` when empty.
    pub(crate) fn clipped(&self, nx: usize, ny: usize) -> Option<Self> {
        let columns = self.columns.start.min(ny)..self.columns.end.min(ny);
        let rows = self.rows.start.min(nx)..self.rows.end.min(nx);
        (!columns.is_empty() && !rows.is_empty()).then_some(Self { columns, rows })
    }
}

/// Configuration for customizing plots
///
/// Used by both heat-map (field) and profile (line) plots.
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `line_color`: Line color for single-profile plots
/// - `series_colors`: Optional colors for multi-profile plots (one per series)
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
/// - `colormap`: Heat-map colormap
/// - `color_range`: Fixed `(min, max)` of the colour scale; `None` uses the data range
/// - `view`: Optional heat-map window
/// - `show_colorbar`: Draw a colour bar next to the heat map
/// - `colorbar_label`: Unit label of the colour bar
///
/// # Example
///
/// ```rust
/// use therm_rs::output::visualization::{PlotConfig, ViewWindow};
///
/// let mut config = PlotConfig::heatmap("Aluminum, t = 4.25 s");
/// config.color_range = Some((0.0, 15.0));
/// config.view = Some(ViewWindow::aluminum_reference());
/// config.width = 1920;
/// ```
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: auto-set by plot type)
    pub ylabel: String,

    /// Line color for single-profile plots (default: RED)
    pub line_color: RGBColor,

    /// Optional colors for multi-profile plots
    ///
    /// If None, uses default palette: [RED, BLUE, GREEN, MAGENTA, CYAN, ...]
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Heat-map colormap (default: hot)
    pub colormap: Colormap,

    /// Fixed colour scale (default: None, data range)
    pub color_range: Option<(f64, f64)>,

    /// Heat-map window (default: whole grid)
    pub view: Option<ViewWindow>,

    /// Draw a colour bar (default: true)
    pub show_colorbar: bool,

    /// Colour bar unit label (default: "K")
    pub colorbar_label: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            line_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
            colormap: Colormap::Hot,
            color_range: None,
            view: None,
            show_colorbar: true,
            colorbar_label: "K".to_string(),
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// # Example
///
/// ```rust
/// use therm_rs::output::visualization::{PlotConfig, NO_TITLE};
///
/// let config = PlotConfig::profile(NO_TITLE);
/// assert_eq!(config.title, "Temperature Profile");
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Create config for heat maps with optional custom title
    ///
    /// Square 900 × 800 image, axes labelled by cell index, no grid lines.
    pub fn heatmap(title: impl IntoOptionalTitle) -> Self {
        Self {
            width: 900,
            height: 800,
            xlabel: "j (column)".to_string(),
            ylabel: "i (row)".to_string(),
            show_grid: false,
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Plate Temperature".to_string()),
            ..Self::default()
        }
    }

    /// Create config for line profiles with optional custom title
    ///
    /// Sets xlabel to "Position (mm)" and ylabel to "Temperature (K)".
    pub fn profile(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "Position (mm)".to_string(),
            ylabel: "Temperature (K)".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Temperature Profile".to_string()),
            ..Self::default()
        }
    }

    /// Builder: fixed colour scale
    pub fn with_color_range(mut self, min: f64, max: f64) -> Self {
        self.color_range = Some((min, max));
        self
    }

    /// Builder: heat-map window
    pub fn with_view(mut self, view: ViewWindow) -> Self {
        self.view = Some(view);
        self
    }

    /// Create config for multi-profile plots with custom colors
    pub fn series_colors(colors: Vec<RGBColor>) -> Self {
        Self {
            series_colors: Some(colors),
            ..Self::profile(NO_TITLE)
        }
    }

    /// Get color for series at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_series_color(&self, series_index: usize) -> RGBColor {
        if let Some(color) = self.series_colors.as_ref().and_then(|c| c.get(series_index)) {
            return *color;
        }

        const DEFAULT_COLORS: [RGBColor; 10] = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),   // Orange
            RGBColor(128, 0, 128),   // Purple
            RGBColor(255, 192, 203), // Pink
            RGBColor(165, 42, 42),   // Brown
        ];

        DEFAULT_COLORS[series_index % DEFAULT_COLORS.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
