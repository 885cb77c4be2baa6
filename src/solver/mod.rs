//! Time marching of the plate temperature field
//!
//! This module turns a [`GridState`](crate::physics::GridState) and a
//! [`HeatSource`](crate::models::HeatSource) into a time series of
//! temperature fields.
//!
//! # Module Organization
//!
//! - **`stability`**: largest stable time step and the stability check
//! - **`clock`**: fixed-step clock (`t = m · dt`)
//! - **`stencil`**: five-point update, sequential and column-parallel
//! - **`stepper`**: [`DiffusionStepper`], one timestep = clamp + stencil + swap
//! - **`configuration`**: [`PlateConfiguration`], presets and builders
//! - **`snapshot`**: read-only [`Snapshot`] views and owned [`FieldSnapshot`]s
//! - **`simulation`**: [`Simulation`] driver, [`SnapshotSchedule`], observers
//!
//! # Workflow
//!
//! ```text
//! ┌──────────────────────┐
//! │ PlateConfiguration   │  plate, spacing, D, Tcool/Thot, heat source
//! └──────────┬───────────┘
//!            │ from_configuration
//! ┌──────────▼───────────┐
//! │ DiffusionStepper     │  dt = dx²dy² / (2D(dx²+dy²))
//! │  GridState + clamp   │
//! └──────────┬───────────┘
//!            │ step() × nsteps
//! ┌──────────▼───────────┐      ┌────────────────────┐
//! │ Simulation           │─────▶│ SnapshotObserver   │  CSV, heat maps, ...
//! │  SnapshotSchedule    │ &Snapshot                 │
//! └──────────────────────┘      └────────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use therm_rs::solver::{PlateConfiguration, Simulation, SnapshotSchedule};
//!
//! let config = PlateConfiguration::aluminum().with_grid_size(305, 305);
//! let mut simulation = Simulation::from_configuration(&config, SnapshotSchedule::Never)?;
//!
//! simulation.run(200, &mut [])?;
//!
//! let grid = simulation.stepper().grid();
//! assert!(grid.value(130, 130) > 0.0);
//! assert_eq!(grid.value(0, 0), 0.0);
//! # Ok::<(), therm_rs::SimulationError>(())
//! ```
//!
//! # Error Handling
//!
//! Everything that can be wrong with a setup is rejected at construction with
//! a [`ConfigurationError`](crate::ConfigurationError). Stepping itself cannot
//! fail; the driver only fails when an observer does or when the optional
//! finiteness check trips ([`SimulationError`](crate::SimulationError)).

// =================================================================================================
// Module Declarations
// =================================================================================================
mod clock;
mod configuration;
mod simulation;
mod snapshot;
pub mod stability;
pub mod stencil;
mod stepper;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (benchmarks, tests) without a mutex on every step. Relaxed ordering
// is sufficient: the value is a performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of grid cells from which the stencil runs on rayon.
///
/// Below roughly 128 × 128 cells the per-step dispatch overhead outweighs the
/// arithmetic of one stencil sweep.
const DEFAULT_PARALLEL_THRESHOLD: usize = 16_384;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold, in grid cells.
///
/// The stencil updates sequentially when the grid holds fewer cells than
/// this value, and column-parallel otherwise, but only when the crate is
/// compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use therm_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use therm_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(4096);
/// assert_eq!(parallel_threshold(), 4096);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds.
///
/// ```rust,ignore
/// let _guard = crate::solver::ThresholdGuard::save(50);
/// // threshold is now 50 …
/// // … and is automatically restored when _guard is dropped.
/// ```
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

/// Serialises tests that change the threshold.
#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the public setter so that restoring never panics
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use clock::SimulationClock;
pub use configuration::{PlateConfiguration, RingGeometry, REFERENCE_PLATE_SIZE, REFERENCE_T_HOT};
pub use simulation::{RunSummary, Simulation, SnapshotObserver, SnapshotRecorder, SnapshotSchedule};
pub use snapshot::{FieldSnapshot, Snapshot};
pub use stability::{check_stability, stability_number, stable_time_step, STABILITY_LIMIT};
pub use stencil::StencilCoefficients;
pub use stepper::DiffusionStepper;

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 128 * 128);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_threshold_guard_restores_previous_value() {
        // Every guard restores on drop, so a fresh guard always finds the default
        let guard = ThresholdGuard::save(42);
        assert_eq!(parallel_threshold(), 42);
        assert_eq!(guard.previous, DEFAULT_PARALLEL_THRESHOLD);
    }
}
