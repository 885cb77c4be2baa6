//! Error types
//!
//! Two families of failure exist in a plate simulation:
//!
//! - **Configuration errors** ([`ConfigurationError`]): detected before the
//!   first step runs. Bad grid dimensions, mismatched buffers, non-positive
//!   spacing or diffusivity, a heat source that does not fit inside the grid
//!   interior, or a time step that violates the explicit stability bound.
//! - **Run errors** ([`SimulationError`]): raised by the simulation driver
//!   while stepping, either because an optional finiteness check tripped or
//!   because an output collaborator failed.
//!
//! The stencil update itself is pure and deterministic; nothing in it can
//! fail at runtime.

use thiserror::Error;

/// Invalid simulation setup, detected at construction time.
///
/// No step is ever executed with a configuration that produced one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Grid has no interior cells (`nx < 3` or `ny < 3`, including zero).
    #[error("invalid grid dimensions {nx}x{ny}: at least 3x3 cells are required")]
    InvalidDimensions { nx: usize, ny: usize },

    /// The two temperature buffers do not share the same shape.
    #[error("buffer shape mismatch: current is {current:?}, next is {next:?}")]
    ShapeMismatch {
        current: (usize, usize),
        next: (usize, usize),
    },

    /// A physical parameter that must be strictly positive and finite is not.
    #[error("parameter `{parameter}` must be positive and finite, got {value}")]
    NonPositive { parameter: &'static str, value: f64 },

    /// The heat-source clamp region extends past the grid.
    #[error(
        "heat source region x={x_start}..{x_end}, y={y_start}..{y_end} exceeds grid {nx}x{ny}"
    )]
    SourceOutOfBounds {
        x_start: usize,
        x_end: usize,
        y_start: usize,
        y_end: usize,
        nx: usize,
        ny: usize,
    },

    /// The heat-source clamp region covers a border cell.
    ///
    /// Border cells hold the fixed ambient temperature; clamping them would
    /// break the Dirichlet boundary.
    #[error("heat source region touches the grid border at cell ({i}, {j})")]
    SourceTouchesBoundary { i: usize, j: usize },

    /// The heat-source clamp region selects no cell at all.
    #[error("heat source region selects no grid cell")]
    EmptySourceRegion,

    /// Explicit time step exceeds the forward-Euler stability bound.
    ///
    /// `number` is `D·dt·(1/dx² + 1/dy²)`; the scheme is stable for
    /// `number <= limit`.
    #[error("unstable configuration: stability number {number} exceeds limit {limit}")]
    Unstable { number: f64, limit: f64 },
}

/// Failure while running a configured simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration rejected before stepping.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The temperature field contains NaN or infinite values.
    #[error("non-finite temperature at cell ({i}, {j}) after step {step}")]
    NonFinite { step: usize, i: usize, j: usize },

    /// A snapshot observer (export, plot, ...) failed.
    #[error("snapshot observer failed at step {step}: {message}")]
    Observer { step: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_messages() {
        let err = ConfigurationError::InvalidDimensions { nx: 0, ny: 10 };
        assert_eq!(
            err.to_string(),
            "invalid grid dimensions 0x10: at least 3x3 cells are required"
        );

        let err = ConfigurationError::NonPositive { parameter: "dx", value: -1.0 };
        assert!(err.to_string().contains("`dx`"));
    }

    #[test]
    fn test_simulation_error_from_configuration() {
        let err: SimulationError = ConfigurationError::EmptySourceRegion.into();
        assert!(matches!(err, SimulationError::Configuration(_)));
        assert_eq!(err.to_string(), "heat source region selects no grid cell");
    }
}
