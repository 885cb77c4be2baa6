//! Plate configuration
//!
//! [`PlateConfiguration`] gathers everything needed to build a stepper: plate
//! size and cell spacing (from which the grid dimensions follow), material
//! diffusivity, ambient and display temperatures, and the weld heat source.
//!
//! It is an immutable value passed to constructors. Changing a parameter
//! means building a new configuration, and therefore a new grid with a
//! freshly derived time step.
//!
//! # Example
//!
//! ```rust
//! use therm_rs::solver::PlateConfiguration;
//!
//! let config = PlateConfiguration::copper().with_grid_size(305, 305);
//! config.validate()?;
//! assert_eq!(config.grid_dimensions(), (305, 305));
//! # Ok::<(), therm_rs::ConfigurationError>(())
//! ```

use crate::error::ConfigurationError;
use crate::models::{HeatSource, Material, WELD_CENTER};
use crate::physics::grid::check_positive;

/// Plate side of the reference setup: 12 in. \[mm\]
pub const REFERENCE_PLATE_SIZE: f64 = 304.8;

/// Upper end of the display temperature range of the reference setup.
pub const REFERENCE_T_HOT: f64 = 15.0;

// =================================================================================================
// Ring geometry
// =================================================================================================

/// Circular weld footprint `(r, cx, cy)` in millimetres.
///
/// Kept as plate data. It only affects the run when the heat source uses
/// [`ClampRegion::Disc`](crate::models::ClampRegion::Disc) built from it via
/// [`RingGeometry::to_region`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub radius: f64,
    pub cx: f64,
    pub cy: f64,
}

impl RingGeometry {
    pub fn to_region(&self) -> crate::models::ClampRegion {
        crate::models::ClampRegion::disc(self.cx, self.cy, self.radius)
    }
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            radius: 8.8,
            cx: WELD_CENTER as f64,
            cy: WELD_CENTER as f64,
        }
    }
}

// =================================================================================================
// Plate configuration
// =================================================================================================

/// Immutable description of a plate simulation.
#[derive(Debug, Clone)]
pub struct PlateConfiguration {
    /// Plate extent along x \[mm\]
    pub plate_width: f64,
    /// Plate extent along y \[mm\]
    pub plate_height: f64,
    /// Cell spacing along x \[mm\]
    pub dx: f64,
    /// Cell spacing along y \[mm\]
    pub dy: f64,
    /// Thermal diffusivity \[mm²/s\]
    pub diffusivity: f64,
    /// Ambient and border temperature
    pub t_cool: f64,
    /// Upper end of the display range (plots only)
    pub t_hot: f64,
    /// Circular weld footprint
    pub ring: RingGeometry,
    /// Weld heat source
    pub source: HeatSource,
    /// Explicit cell counts, overriding the plate-size derivation
    pub grid_size: Option<(usize, usize)>,
    /// Explicit time step; `None` uses the largest stable step
    pub time_step: Option<f64>,
    /// Reject explicit time steps above the stability bound
    pub check_stability: bool,
}

impl PlateConfiguration {
    /// Reference setup for a material: 304.8 mm plate, 1 mm cells, `Tcool = 0`,
    /// `Thot = 15`, the material's weld on cells `[121, 139)²`.
    pub fn for_material(material: Material) -> Self {
        Self {
            plate_width: REFERENCE_PLATE_SIZE,
            plate_height: REFERENCE_PLATE_SIZE,
            dx: 1.0,
            dy: 1.0,
            diffusivity: material.diffusivity(),
            t_cool: 0.0,
            t_hot: REFERENCE_T_HOT,
            ring: RingGeometry::default(),
            source: material.heat_source(),
            grid_size: None,
            time_step: None,
            check_stability: true,
        }
    }

    /// Aluminum plate (D = 71 mm²/s, heating 4.3 s).
    pub fn aluminum() -> Self {
        Self::for_material(Material::Aluminum)
    }

    /// Copper plate (D = 123 mm²/s, heating 2 s).
    pub fn copper() -> Self {
        Self::for_material(Material::Copper)
    }

    // ====================================== Builders ======================================

    pub fn with_plate_size(mut self, width: f64, height: f64) -> Self {
        self.plate_width = width;
        self.plate_height = height;
        self
    }

    pub fn with_spacing(mut self, dx: f64, dy: f64) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    pub fn with_diffusivity(mut self, diffusivity: f64) -> Self {
        self.diffusivity = diffusivity;
        self
    }

    pub fn with_temperatures(mut self, t_cool: f64, t_hot: f64) -> Self {
        self.t_cool = t_cool;
        self.t_hot = t_hot;
        self
    }

    pub fn with_ring(mut self, ring: RingGeometry) -> Self {
        self.ring = ring;
        self
    }

    pub fn with_source(mut self, source: HeatSource) -> Self {
        self.source = source;
        self
    }

    /// Use explicit cell counts instead of `floor(size / spacing)`.
    pub fn with_grid_size(mut self, nx: usize, ny: usize) -> Self {
        self.grid_size = Some((nx, ny));
        self
    }

    /// Use an explicit time step instead of the largest stable one.
    pub fn with_time_step(mut self, dt: f64) -> Self {
        self.time_step = Some(dt);
        self
    }

    /// Enable or disable the stability check on explicit time steps.
    pub fn with_stability_check(mut self, check: bool) -> Self {
        self.check_stability = check;
        self
    }

    // ====================================== Derived ======================================

    /// Grid cell counts `(nx, ny)`.
    ///
    /// Explicit [`grid_size`](Self::grid_size) when set, else
    /// `(floor(w/dx), floor(h/dy))`. The reference 304.8 mm plate with 1 mm
    /// cells gives 304 × 304.
    pub fn grid_dimensions(&self) -> (usize, usize) {
        self.grid_size.unwrap_or_else(|| {
            (
                cells_along(self.plate_width, self.dx),
                cells_along(self.plate_height, self.dy),
            )
        })
    }

    /// Check every parameter that does not need a grid.
    ///
    /// Source-region fit and the stability bound are checked when the
    /// stepper is built.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::NonPositive`] for a bad size, spacing or
    /// diffusivity, [`ConfigurationError::InvalidDimensions`] when the grid
    /// would have no interior, and the heat-source checks of
    /// [`HeatSource::validate`].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_positive("dx", self.dx)?;
        check_positive("dy", self.dy)?;
        check_positive("diffusivity", self.diffusivity)?;

        if self.grid_size.is_none() {
            check_positive("plate_width", self.plate_width)?;
            check_positive("plate_height", self.plate_height)?;
        }

        let (nx, ny) = self.grid_dimensions();
        if nx < 3 || ny < 3 {
            return Err(ConfigurationError::InvalidDimensions { nx, ny });
        }

        if let Some(dt) = self.time_step {
            check_positive("dt", dt)?;
        }

        self.source.validate()
    }
}

impl Default for PlateConfiguration {
    fn default() -> Self {
        Self::aluminum()
    }
}

fn cells_along(extent: f64, spacing: f64) -> usize {
    let cells = (extent / spacing).floor();
    if cells.is_finite() && cells > 0.0 { cells as usize } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClampRegion;

    #[test]
    fn test_reference_plate_truncates_to_304() {
        let config = PlateConfiguration::aluminum();
        assert_eq!(config.grid_dimensions(), (304, 304));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_grid_size_wins() {
        let config = PlateConfiguration::copper().with_grid_size(305, 200);
        assert_eq!(config.grid_dimensions(), (305, 200));
    }

    #[test]
    fn test_anisotropic_spacing_dimensions() {
        let config = PlateConfiguration::aluminum()
            .with_plate_size(100.0, 60.0)
            .with_spacing(0.5, 2.0);
        assert_eq!(config.grid_dimensions(), (200, 30));
    }

    #[test]
    fn test_presets_differ_by_material() {
        let al = PlateConfiguration::aluminum();
        let cu = PlateConfiguration::copper();
        assert_eq!(al.diffusivity, 71.0);
        assert_eq!(cu.diffusivity, 123.0);
        assert_eq!(al.source.heating_duration(), 4.3);
        assert_eq!(cu.source.heating_duration(), 2.0);
        assert_eq!((al.t_cool, al.t_hot), (0.0, 15.0));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let bad_spacing = PlateConfiguration::aluminum().with_spacing(0.0, 1.0);
        assert!(matches!(
            bad_spacing.validate(),
            Err(ConfigurationError::NonPositive { parameter: "dx", .. })
        ));

        let bad_d = PlateConfiguration::aluminum().with_diffusivity(-3.0);
        assert!(bad_d.validate().is_err());

        let tiny = PlateConfiguration::aluminum().with_plate_size(2.0, 50.0);
        assert_eq!(
            tiny.validate(),
            Err(ConfigurationError::InvalidDimensions { nx: 2, ny: 50 })
        );

        let bad_dt = PlateConfiguration::aluminum().with_time_step(0.0);
        assert!(bad_dt.validate().is_err());
    }

    #[test]
    fn test_ring_region() {
        let ring = RingGeometry::default();
        assert_eq!(ring.radius, 8.8);
        assert_eq!(ring.to_region(), ClampRegion::disc(130.0, 130.0, 8.8));
    }
}
