//! Plate materials
//!
//! The two welded plates studied differ only by their thermal diffusivity and
//! by the fitted heating ramp of the weld region.
//!
//! | Material | D (mm²/s) | Heating curve                          | Duration |
//! |----------|-----------|----------------------------------------|----------|
//! | Aluminum | 71        | `11.22253 - 11.12797·exp(-1.03475·t)`  | 4.3 s    |
//! | Copper   | 123       | `7.94 - 10.66·exp(-1.49·t)`            | 2 s      |

use super::heat_source::{ClampRegion, HeatSource, HeatingCurve};

/// Centre cell of the reference weld (both axes).
pub const WELD_CENTER: usize = 130;

/// Half side of the reference square weld clamp, in cells.
pub const WELD_HALF_WIDTH: usize = 9;

/// Plate material preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Aluminum,
    Copper,
}

impl Material {
    /// Thermal diffusivity \[mm²/s\].
    pub fn diffusivity(&self) -> f64 {
        match self {
            Material::Aluminum => 71.0,
            Material::Copper => 123.0,
        }
    }

    /// Duration of the weld heating \[s\].
    pub fn heating_duration(&self) -> f64 {
        match self {
            Material::Aluminum => 4.3,
            Material::Copper => 2.0,
        }
    }

    /// Fitted weld heating curve.
    pub fn heating_curve(&self) -> HeatingCurve {
        match self {
            Material::Aluminum => HeatingCurve::aluminum(),
            Material::Copper => HeatingCurve::copper(),
        }
    }

    /// Reference weld: fitted curve on cells `[121, 139)²`.
    pub fn heat_source(&self) -> HeatSource {
        HeatSource::new(
            self.heating_curve(),
            ClampRegion::centered_square(WELD_CENTER, WELD_CENTER, WELD_HALF_WIDTH),
            self.heating_duration(),
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Material::Aluminum => "Aluminum",
            Material::Copper => "Copper",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_constants() {
        assert_eq!(Material::Aluminum.diffusivity(), 71.0);
        assert_eq!(Material::Copper.diffusivity(), 123.0);
        assert_eq!(Material::Aluminum.heating_duration(), 4.3);
        assert_eq!(Material::Copper.heating_duration(), 2.0);
        assert_eq!(Material::Copper.to_string(), "Copper");
    }

    #[test]
    fn test_reference_weld_region() {
        let source = Material::Aluminum.heat_source();
        assert_eq!(source.region(), &ClampRegion::Square { x: 121..139, y: 121..139 });
        assert_eq!(source.heating_duration(), 4.3);
        assert!(source.clamp_value(4.29).is_some());
        assert!(source.clamp_value(4.31).is_none());
    }
}
