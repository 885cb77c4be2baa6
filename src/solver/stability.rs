//! Time-step selection for the explicit scheme
//!
//! # Mathematical Background
//!
//! Forward Euler in time with the 5-point Laplacian in space is conditionally
//! stable. A von Neumann analysis of
//!
//! ```text
//! ∂T/∂t = D (∂²T/∂x² + ∂²T/∂y²)
//! ```
//!
//! gives the bound
//!
//! ```text
//! D · dt · (1/dx² + 1/dy²) ≤ 1/2
//! ```
//!
//! The solver takes the largest permitted step (equality):
//!
//! ```text
//! dt = dx² · dy² / (2 · D · (dx² + dy²))
//! ```
//!
//! Larger steps make the highest spatial frequency grow every step, visible as
//! checkerboard oscillations and eventual overflow.

use crate::error::ConfigurationError;

/// Upper bound of the stability number for the explicit 2-D scheme.
pub const STABILITY_LIMIT: f64 = 0.5;

/// Slack allowed above [`STABILITY_LIMIT`] for rounding in user-supplied steps.
pub const STABILITY_TOLERANCE: f64 = 1e-9;

/// Largest stable time step \[s\] for spacing `dx`, `dy` \[mm\] and diffusivity \[mm²/s\].
///
/// # Example
///
/// ```rust
/// use therm_rs::solver::stable_time_step;
///
/// // Copper, 1 mm cells: 1 / (4 · 123)
/// let dt = stable_time_step(1.0, 1.0, 123.0);
/// assert!((dt - 1.0 / 492.0).abs() < 1e-15);
/// ```
pub fn stable_time_step(dx: f64, dy: f64, diffusivity: f64) -> f64 {
    let dx2 = dx * dx;
    let dy2 = dy * dy;
    dx2 * dy2 / (2.0 * diffusivity * (dx2 + dy2))
}

/// Stability number `D·dt·(1/dx² + 1/dy²)`.
pub fn stability_number(dt: f64, dx: f64, dy: f64, diffusivity: f64) -> f64 {
    diffusivity * dt * (1.0 / (dx * dx) + 1.0 / (dy * dy))
}

/// Reject a time step whose stability number exceeds the limit.
///
/// # Errors
///
/// [`ConfigurationError::Unstable`] when the number is above
/// `STABILITY_LIMIT + STABILITY_TOLERANCE`, and
/// [`ConfigurationError::NonPositive`] for a zero, negative or non-finite `dt`.
pub fn check_stability(dt: f64, dx: f64, dy: f64, diffusivity: f64) -> Result<f64, ConfigurationError> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(ConfigurationError::NonPositive { parameter: "dt", value: dt });
    }
    let number = stability_number(dt, dx, dy, diffusivity);
    if number > STABILITY_LIMIT + STABILITY_TOLERANCE {
        return Err(ConfigurationError::Unstable { number, limit: STABILITY_LIMIT });
    }
    Ok(number)
}
