//! Explicit diffusion stepper
//!
//! [`DiffusionStepper`] advances a [`GridState`] one timestep at a time:
//!
//! 1. `t = m·dt` for the step index `m` about to run.
//! 2. While `t < heating_duration`, the clamp region of `current` is
//!    overwritten with `f(t)`. The clamp is a hard overwrite, not a source
//!    term.
//! 3. The five-point stencil writes the interior of `next` from `current`.
//! 4. `next` becomes `current` (buffer swap) and `m` advances.
//!
//! `dt` is fixed at construction from the grid's own spacing and
//! diffusivity, which never change afterwards.
//!
//! # Example
//!
//! ```rust
//! use therm_rs::models::Material;
//! use therm_rs::physics::GridState;
//! use therm_rs::solver::DiffusionStepper;
//!
//! let grid = GridState::new(305, 305, 1.0, 1.0, 123.0, 0.0)?;
//! let mut stepper = DiffusionStepper::new(grid, Material::Copper.heat_source())?;
//!
//! stepper.step_n(10);
//! assert_eq!(stepper.step_index(), 10);
//! assert_eq!(stepper.time(), 10.0 * stepper.dt());
//! assert_eq!(stepper.grid().value(0, 130), 0.0);
//! # Ok::<(), therm_rs::ConfigurationError>(())
//! ```

use log::{debug, info, warn};

use super::clock::SimulationClock;
use super::configuration::PlateConfiguration;
use super::stability::{check_stability, stability_number, stable_time_step};
use super::stencil::{self, StencilCoefficients};
use crate::error::ConfigurationError;
use crate::models::{ClampMask, HeatSource};
use crate::physics::GridState;

/// Single-step engine of the explicit scheme.
#[derive(Debug, Clone)]
pub struct DiffusionStepper {
    grid: GridState,
    source: HeatSource,
    mask: Option<ClampMask>,
    clock: SimulationClock,
    coefficients: StencilCoefficients,
}

impl DiffusionStepper {
    /// Build a stepper using the largest stable time step.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] when the heat-source region does not fit
    /// strictly inside the grid or its duration is invalid.
    pub fn new(grid: GridState, source: HeatSource) -> Result<Self, ConfigurationError> {
        let dt = stable_time_step(grid.dx(), grid.dy(), grid.diffusivity());
        Self::build(grid, source, dt)
    }

    /// Build a stepper with an explicit time step.
    ///
    /// With `check = true` a step above the stability bound is rejected with
    /// [`ConfigurationError::Unstable`]. With `check = false` it is accepted
    /// and a warning is logged.
    pub fn with_time_step(
        grid: GridState,
        source: HeatSource,
        dt: f64,
        check: bool,
    ) -> Result<Self, ConfigurationError> {
        if check {
            check_stability(dt, grid.dx(), grid.dy(), grid.diffusivity())?;
        } else {
            crate::physics::grid::check_positive("dt", dt)?;
            let number = stability_number(dt, grid.dx(), grid.dy(), grid.diffusivity());
            if number > super::stability::STABILITY_LIMIT {
                warn!(
                    "Stability check disabled: stability number {:.4} exceeds {}, expect divergence",
                    number,
                    super::stability::STABILITY_LIMIT
                );
            }
        }
        Self::build(grid, source, dt)
    }

    /// Build the grid and stepper described by a [`PlateConfiguration`].
    pub fn from_configuration(config: &PlateConfiguration) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let (nx, ny) = config.grid_dimensions();
        let grid = GridState::new(nx, ny, config.dx, config.dy, config.diffusivity, config.t_cool)?;

        match config.time_step {
            Some(dt) => Self::with_time_step(grid, config.source.clone(), dt, config.check_stability),
            None => Self::new(grid, config.source.clone()),
        }
    }

    fn build(grid: GridState, source: HeatSource, dt: f64) -> Result<Self, ConfigurationError> {
        let mask = source.resolve(grid.geometry())?;
        let coefficients = StencilCoefficients::new(grid.diffusivity(), dt, grid.dx(), grid.dy());

        debug!(
            "Stepper ready: {}x{} grid, dt = {:.6e} s, stability number {:.4}, {} clamped cells",
            grid.nx(),
            grid.ny(),
            dt,
            stability_number(dt, grid.dx(), grid.dy(), grid.diffusivity()),
            mask.as_ref().map_or(0, ClampMask::cell_count)
        );

        Ok(Self {
            grid,
            source,
            mask,
            clock: SimulationClock::new(dt),
            coefficients,
        })
    }

    // ====================================== Stepping ======================================

    /// Run one timestep: clamp, stencil, commit, advance.
    pub fn step(&mut self) {
        let t = self.clock.current_time();

        if let (Some(mask), Some(value)) = (&self.mask, self.source.clamp_value(t)) {
            mask.fill(self.grid.source_mut(), value);
        }

        let (current, next) = self.grid.buffers();
        stencil::apply(current, next, &self.coefficients);

        self.grid.commit_step();
        self.clock.advance();
    }

    /// Run `n` timesteps.
    pub fn step_n(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Reset the field to the ambient temperature and the clock to step 0.
    pub fn reset(&mut self) {
        let ambient = self.grid.ambient();
        self.grid.initialize(ambient);
        self.clock.reset();
        info!("Stepper reset to {} at step 0", ambient);
    }

    // ====================================== Queries ======================================

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn source(&self) -> &HeatSource {
        &self.source
    }

    /// Resolved clamp cells, `None` for a source that never heats.
    pub fn clamp_mask(&self) -> Option<&ClampMask> {
        self.mask.as_ref()
    }

    /// Time step \[s\].
    pub fn dt(&self) -> f64 {
        self.clock.dt()
    }

    /// Number of completed steps.
    pub fn step_index(&self) -> usize {
        self.clock.step_index()
    }

    /// Physical time of the committed field, `step_index · dt` \[s\].
    pub fn time(&self) -> f64 {
        self.clock.current_time()
    }

    /// Stability number of the configured step.
    pub fn stability_number(&self) -> f64 {
        stability_number(self.dt(), self.grid.dx(), self.grid.dy(), self.grid.diffusivity())
    }

    /// Give back the grid, dropping the stepper.
    pub fn into_grid(self) -> GridState {
        self.grid
    }
}

// =================================================================================================
// Tests
// =================================================================================================
