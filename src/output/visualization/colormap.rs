//! Colormaps for heat maps
//!
//! `Hot` follows the piecewise-linear "hot" map of matplotlib: black through
//! red and yellow to white. Values are normalised against a `(min, max)`
//! range and clamped, so everything outside the range saturates.

use plotters::style::RGBColor;

/// Scalar-to-colour mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    /// Black → red → yellow → white
    #[default]
    Hot,
    /// Black → white
    Gray,
}

// Breakpoints of the hot map
const HOT_RED_END: f64 = 0.365079;
const HOT_GREEN_END: f64 = 0.746032;
const HOT_RED_START: f64 = 0.0416;

impl Colormap {
    /// Colour at normalised position `x ∈ [0, 1]` (clamped; NaN maps to 0).
    pub fn at(&self, x: f64) -> RGBColor {
        let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };

        match self {
            Colormap::Hot => {
                let r = HOT_RED_START + (1.0 - HOT_RED_START) * ramp(x, 0.0, HOT_RED_END);
                let g = ramp(x, HOT_RED_END, HOT_GREEN_END);
                let b = ramp(x, HOT_GREEN_END, 1.0);
                RGBColor(channel(r), channel(g), channel(b))
            }
            Colormap::Gray => {
                let v = channel(x);
                RGBColor(v, v, v)
            }
        }
    }

    /// Colour of `value` within `(min, max)`.
    ///
    /// A degenerate range (`max <= min`) maps everything to the low end.
    pub fn map(&self, value: f64, (min, max): (f64, f64)) -> RGBColor {
        if max > min {
            self.at((value - min) / (max - min))
        } else {
            self.at(0.0)
        }
    }
}

fn ramp(x: f64, start: f64, end: f64) -> f64 {
    ((x - start) / (end - start)).clamp(0.0, 1.0)
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hot_end_points() {
        assert_eq!(Colormap::Hot.at(0.0), RGBColor(11, 0, 0));
        assert_eq!(Colormap::Hot.at(1.0), RGBColor(255, 255, 255));
        assert_eq!(Colormap::Hot.at(HOT_RED_END), RGBColor(255, 0, 0));
        assert_eq!(Colormap::Hot.at(HOT_GREEN_END), RGBColor(255, 255, 0));
    }

    #[test]
    fn test_hot_is_monotone_in_brightness() {
        let brightness = |c: RGBColor| c.0 as u32 + c.1 as u32 + c.2 as u32;
        let mut previous = 0;
        for k in 0..=100 {
            let b = brightness(Colormap::Hot.at(k as f64 / 100.0));
            assert!(b >= previous);
            previous = b;
        }
    }

    #[test]
    fn test_map_clamps_out_of_range() {
        let range = (0.0, 15.0);
        assert_eq!(Colormap::Hot.map(-5.0, range), Colormap::Hot.at(0.0));
        assert_eq!(Colormap::Hot.map(40.0, range), Colormap::Hot.at(1.0));
        assert_eq!(Colormap::Gray.map(7.5, range), RGBColor(128, 128, 128));
        assert_eq!(Colormap::Gray.map(3.0, (1.0, 1.0)), RGBColor(0, 0, 0));
        assert_eq!(Colormap::Hot.at(f64::NAN), Colormap::Hot.at(0.0));
    }
}
