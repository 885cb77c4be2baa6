//! Plate and weld models
//!
//! - [`material`]: aluminum / copper presets (diffusivity, weld ramp, duration)
//! - [`heat_source`]: heating curves, clamp regions and the combined [`HeatSource`]

pub mod heat_source;
pub mod material;

pub use heat_source::{ClampMask, ClampRegion, ClampSpan, HeatSource, HeatingCurve};
pub use material::{Material, WELD_CENTER, WELD_HALF_WIDTH};
