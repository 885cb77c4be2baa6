//! Time-dependent heat source (weld clamp)
//!
//! The welded region is modelled as an externally maintained hot spot: while
//! the heating lasts, every cell of a fixed region is **overwritten** with a
//! temperature given by a heating curve `f(t)`. This is a hard clamp on the
//! field, not a flux or an additive source term.
//!
//! ```text
//!  f(t)
//!   │            ........ plateau A
//!   │        .···
//!   │     .·
//!   │   .·
//!   │  ·
//!   │ ·                      clamp active        │ free diffusion
//!   ├─┼──────────────────────────────────────────┼─────────────── t
//!   │ 0                                  heating_duration
//!   │·  A + B   (B < 0)
//! ```
//!
//! After `heating_duration` the region is no longer touched and evolves by
//! diffusion like every other interior cell.
//!
//! # Example
//!
//! ```rust
//! use therm_rs::models::{HeatingCurve, HeatSource, ClampRegion};
//!
//! let source = HeatSource::new(
//!     HeatingCurve::saturation(7.94, -10.66, 1.49),
//!     ClampRegion::centered_square(130, 130, 9),
//!     2.0,
//! );
//!
//! assert!(source.clamp_value(1.0).is_some());
//! assert!(source.clamp_value(2.0).is_none()); // heating over
//! ```

use std::ops::Range;
use std::sync::Arc;

use crate::error::ConfigurationError;
use crate::physics::GridGeometry;

// =================================================================================================
// Heating curve
// =================================================================================================

/// Temperature imposed on the clamp region as a function of time.
///
/// # Types
///
/// - **Saturation**: phenomenological exponential ramp `A + B·exp(-k·t)`
/// - **Constant**: fixed temperature
/// - **Custom**: user-defined curve
pub enum HeatingCurve {
    /// Exponential-saturation ramp
    ///
    /// # Formula
    ///
    /// ```text
    /// f(t) = A + B · exp(-k · t)
    /// ```
    ///
    /// With `B < 0` and `k > 0` the curve rises monotonically from `A + B`
    /// towards the plateau `A`.
    Saturation {
        /// Plateau temperature A
        plateau: f64,
        /// Amplitude B (negative for a heating ramp)
        amplitude: f64,
        /// Rate k \[1/s\]
        rate: f64,
    },

    /// Constant clamp temperature
    Constant(f64),

    /// Custom curve from user function
    ///
    /// # Example
    ///
    /// ```rust
    /// use therm_rs::models::HeatingCurve;
    /// let curve = HeatingCurve::custom(|t| 9.6 - 10.66 * (-1.49 * t).exp());
    /// assert!(curve.evaluate(10.0) > 9.5);
    /// ```
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Clone for HeatingCurve {
    fn clone(&self) -> Self {
        match self {
            Self::Saturation { plateau, amplitude, rate } => Self::Saturation {
                plateau: *plateau,
                amplitude: *amplitude,
                rate: *rate,
            },
            Self::Constant(value) => Self::Constant(*value),
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl std::fmt::Debug for HeatingCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saturation { plateau, amplitude, rate } => f
                .debug_struct("Saturation")
                .field("plateau", plateau)
                .field("amplitude", amplitude)
                .field("rate", rate)
                .finish(),
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Custom(_) => f
                .debug_struct("Custom")
                .field("function", &"<user-defined>")
                .finish(),
        }
    }
}

impl HeatingCurve {
    /// Create an exponential-saturation curve `plateau + amplitude·exp(-rate·t)`.
    pub fn saturation(plateau: f64, amplitude: f64, rate: f64) -> Self {
        Self::Saturation { plateau, amplitude, rate }
    }

    /// Create a constant curve.
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Create a custom curve.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Fitted aluminum ramp: `11.22253 - 11.12797·exp(-1.03475·t)`.
    pub fn aluminum() -> Self {
        Self::saturation(11.22253, -11.12797, 1.03475)
    }

    /// Fitted copper ramp: `7.94 - 10.66·exp(-1.49·t)`.
    pub fn copper() -> Self {
        Self::saturation(7.94, -10.66, 1.49)
    }

    /// Evaluate the curve at time `t` \[s\].
    pub fn evaluate(&self, t: f64) -> f64 {
        match self {
            Self::Saturation { plateau, amplitude, rate } => plateau + amplitude * (-rate * t).exp(),
            Self::Constant(value) => *value,
            Self::Custom(f) => f(t),
        }
    }

    /// Evaluate at multiple time points.
    pub fn evaluate_series(&self, times: &[f64]) -> Vec<f64> {
        times.iter().map(|&t| self.evaluate(t)).collect()
    }

    /// Range `(min, max)` of the curve over `[0, until]`.
    ///
    /// Exact for saturation (monotone, so the extrema are the end points) and
    /// constant curves. `None` for custom curves, whose shape is unknown.
    pub fn range_over(&self, until: f64) -> Option<(f64, f64)> {
        match self {
            Self::Saturation { .. } => {
                let start = self.evaluate(0.0);
                let end = self.evaluate(until);
                Some((start.min(end), start.max(end)))
            }
            Self::Constant(value) => Some((*value, *value)),
            Self::Custom(_) => None,
        }
    }
}

// =================================================================================================
// Clamp region
// =================================================================================================

/// Set of grid cells overwritten by the heat source.
///
/// # Types
///
/// - **Square**: half-open index rectangle `x × y`. The reference weld uses
///   `[121, 139) × [121, 139)`, i.e. [`centered_square(130, 130, 9)`](Self::centered_square).
/// - **Disc**: cells whose physical position lies strictly inside a circle.
///   This follows the ring geometry `(r, cx, cy)` of the plate description,
///   which the reference weld does **not** use. Selecting it changes results
///   compared to the square clamp.
#[derive(Debug, Clone, PartialEq)]
pub enum ClampRegion {
    /// Index rectangle (half-open ranges)
    Square { x: Range<usize>, y: Range<usize> },

    /// Physical disc `(i·dx - cx)² + (j·dy - cy)² < r²` (all in mm)
    Disc { center: (f64, f64), radius: f64 },
}

impl ClampRegion {
    /// Square of side `2·half_width` starting at `c - half_width` on each axis.
    ///
    /// Centres closer than `half_width` to zero saturate at index 0, which is
    /// then rejected as touching the border when the region is resolved.
    pub fn centered_square(cx: usize, cy: usize, half_width: usize) -> Self {
        Self::Square {
            x: cx.saturating_sub(half_width)..cx + half_width,
            y: cy.saturating_sub(half_width)..cy + half_width,
        }
    }

    /// Disc of `radius` mm around `(cx, cy)` mm.
    pub fn disc(cx: f64, cy: f64, radius: f64) -> Self {
        Self::Disc { center: (cx, cy), radius }
    }

    /// Resolve the region against a grid into per-column spans.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::SourceOutOfBounds`] when a square exceeds the grid
    /// - [`ConfigurationError::SourceTouchesBoundary`] when a border cell is selected
    /// - [`ConfigurationError::EmptySourceRegion`] when no cell is selected
    pub fn resolve(&self, geometry: &GridGeometry) -> Result<ClampMask, ConfigurationError> {
        let spans: Vec<ClampSpan> = match self {
            Self::Square { x, y } => {
                if x.end > geometry.nx || y.end > geometry.ny {
                    return Err(ConfigurationError::SourceOutOfBounds {
                        x_start: x.start,
                        x_end: x.end,
                        y_start: y.start,
                        y_end: y.end,
                        nx: geometry.nx,
                        ny: geometry.ny,
                    });
                }
                if x.is_empty() {
                    Vec::new()
                } else {
                    y.clone()
                        .map(|column| ClampSpan { column, rows: x.clone() })
                        .collect()
                }
            }
            Self::Disc { center, radius } => {
                let r2 = radius * radius;
                // A disc is convex: its cells in one column form a single run
                (0..geometry.ny)
                    .filter_map(|column| {
                        let mut inside = (0..geometry.nx).filter(|&i| {
                            let (px, py) = geometry.position(i, column);
                            let p2 = (px - center.0).powi(2) + (py - center.1).powi(2);
                            p2 < r2
                        });
                        let first = inside.next()?;
                        let last = inside.last().unwrap_or(first);
                        Some(ClampSpan { column, rows: first..last + 1 })
                    })
                    .collect()
            }
        };

        if spans.is_empty() {
            return Err(ConfigurationError::EmptySourceRegion);
        }

        for span in &spans {
            let touching = [span.rows.start, span.rows.end - 1]
                .into_iter()
                .find(|&i| geometry.is_boundary(i, span.column));
            if let Some(i) = touching {
                return Err(ConfigurationError::SourceTouchesBoundary { i, j: span.column });
            }
        }

        Ok(ClampMask { spans })
    }
}

/// One contiguous run of clamped cells: rows `rows` of column `column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClampSpan {
    pub column: usize,
    pub rows: Range<usize>,
}

/// A [`ClampRegion`] resolved against a concrete grid.
///
/// Stored as column spans so that writing the clamp touches contiguous memory
/// of the column-major field.
#[derive(Debug, Clone, PartialEq)]
pub struct ClampMask {
    spans: Vec<ClampSpan>,
}

impl ClampMask {
    /// Column spans of the mask.
    pub fn spans(&self) -> &[ClampSpan] {
        &self.spans
    }

    /// Number of clamped cells.
    pub fn cell_count(&self) -> usize {
        self.spans.iter().map(|s| s.rows.len()).sum()
    }

    /// Whether `(i, j)` is clamped.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.spans.iter().any(|s| s.column == j && s.rows.contains(&i))
    }

    /// Overwrite every masked cell of `field` with `value`.
    pub fn fill(&self, field: &mut nalgebra::DMatrix<f64>, value: f64) {
        for span in &self.spans {
            field
                .view_mut((span.rows.start, span.column), (span.rows.len(), 1))
                .fill(value);
        }
    }
}

// =================================================================================================
// Heat source
// =================================================================================================

/// Heating curve + clamp region + heating duration.
#[derive(Debug, Clone)]
pub struct HeatSource {
    curve: HeatingCurve,
    region: ClampRegion,
    heating_duration: f64,
}

impl HeatSource {
    /// Create a heat source.
    ///
    /// # Arguments
    ///
    /// * `curve` - Clamp temperature as a function of time
    /// * `region` - Cells to overwrite
    /// * `heating_duration` - Clamp is active while `t < heating_duration` \[s\]
    pub fn new(curve: HeatingCurve, region: ClampRegion, heating_duration: f64) -> Self {
        Self { curve, region, heating_duration }
    }

    /// A source that never clamps (pure diffusion).
    pub fn inactive() -> Self {
        Self::new(HeatingCurve::constant(0.0), ClampRegion::centered_square(1, 1, 0), 0.0)
    }

    /// Replace the clamp region (builder style).
    pub fn with_region(mut self, region: ClampRegion) -> Self {
        self.region = region;
        self
    }

    /// Replace the heating duration (builder style).
    pub fn with_duration(mut self, heating_duration: f64) -> Self {
        self.heating_duration = heating_duration;
        self
    }

    pub fn curve(&self) -> &HeatingCurve {
        &self.curve
    }

    pub fn region(&self) -> &ClampRegion {
        &self.region
    }

    pub fn heating_duration(&self) -> f64 {
        self.heating_duration
    }

    /// Whether the clamp is applied at time `t`.
    pub fn is_active(&self, t: f64) -> bool {
        t < self.heating_duration
    }

    /// Clamp temperature at `t`, or `None` once heating has ended.
    pub fn clamp_value(&self, t: f64) -> Option<f64> {
        self.is_active(t).then(|| self.curve.evaluate(t))
    }

    /// Range of clamp temperatures over the heating window.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.curve.range_over(self.heating_duration.max(0.0))
    }

    /// Check the duration is usable (finite, not negative).
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.heating_duration.is_finite() && self.heating_duration >= 0.0 {
            Ok(())
        } else {
            Err(ConfigurationError::NonPositive {
                parameter: "heating_duration",
                value: self.heating_duration,
            })
        }
    }

    /// Resolve the clamp region, or `None` for a source that never heats.
    pub(crate) fn resolve(&self, geometry: &GridGeometry) -> Result<Option<ClampMask>, ConfigurationError> {
        self.validate()?;
        if self.heating_duration == 0.0 {
            return Ok(None);
        }
        self.region.resolve(geometry).map(Some)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
