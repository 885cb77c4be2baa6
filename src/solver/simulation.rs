//! Simulation driver
//!
//! [`Simulation`] runs a [`DiffusionStepper`] for a fixed number of steps and,
//! after each step selected by its [`SnapshotSchedule`], hands a read-only
//! [`Snapshot`] of the committed field to every [`SnapshotObserver`].
//!
//! Observers own all I/O (CSV export, heat-map images, ...). The driver
//! itself only counts steps, optionally checks the field for NaN/Inf at
//! snapshot steps, and reports a [`RunSummary`].
//!
//! # Example
//!
//! ```rust
//! use therm_rs::solver::{PlateConfiguration, Simulation, SnapshotRecorder, SnapshotSchedule};
//!
//! let config = PlateConfiguration::copper().with_grid_size(305, 305);
//! let mut simulation = Simulation::from_configuration(&config, SnapshotSchedule::every(50))?;
//!
//! let mut recorder = SnapshotRecorder::default();
//! let summary = simulation.run(101, &mut [&mut recorder])?;
//!
//! assert_eq!(summary.steps, 101);
//! assert_eq!(recorder.snapshots().len(), 3); // steps 0, 50, 100
//! # Ok::<(), therm_rs::SimulationError>(())
//! ```

use std::collections::BTreeSet;
use std::error::Error;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use super::configuration::PlateConfiguration;
use super::snapshot::{FieldSnapshot, Snapshot};
use super::stepper::DiffusionStepper;
use crate::error::{ConfigurationError, SimulationError};

// =================================================================================================
// Snapshot schedule
// =================================================================================================

/// Which step indices produce a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SnapshotSchedule {
    /// Explicit set of step indices
    Steps(BTreeSet<usize>),
    /// Every step with `m % n == 0` (`n = 0` selects nothing)
    Every(usize),
    /// No snapshots
    #[default]
    Never,
}

impl SnapshotSchedule {
    pub fn steps<I: IntoIterator<Item = usize>>(steps: I) -> Self {
        Self::Steps(steps.into_iter().collect())
    }

    pub fn every(interval: usize) -> Self {
        Self::Every(interval)
    }

    /// Figure steps of the aluminum weld study: 1205, 1305, 2000, 3100.
    pub fn aluminum_reference() -> Self {
        Self::steps([1205, 1305, 2000, 3100])
    }

    /// Animation cadence of the copper weld study: every 20th step.
    pub fn copper_reference() -> Self {
        Self::Every(20)
    }

    /// Whether step index `m` is selected.
    pub fn selects(&self, m: usize) -> bool {
        match self {
            Self::Steps(steps) => steps.contains(&m),
            Self::Every(0) => false,
            Self::Every(n) => m % n == 0,
            Self::Never => false,
        }
    }

    /// Number of selected steps in `0..nsteps`.
    pub fn count_in(&self, nsteps: usize) -> usize {
        match self {
            Self::Steps(steps) => steps.range(..nsteps).count(),
            Self::Every(0) | Self::Never => 0,
            Self::Every(n) => nsteps.div_ceil(*n),
        }
    }
}

// =================================================================================================
// Observers
// =================================================================================================

/// Consumer of scheduled snapshots.
///
/// Errors abort the run and are reported as [`SimulationError::Observer`].
pub trait SnapshotObserver {
    /// Called after every scheduled step with the committed field.
    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<(), Box<dyn Error>>;

    /// Called once after the last step of a successful run.
    fn on_finish(&mut self, _summary: &RunSummary) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

/// Observer that keeps an owned copy of every snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRecorder {
    snapshots: Vec<FieldSnapshot>,
}

impl SnapshotRecorder {
    pub fn snapshots(&self) -> &[FieldSnapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<FieldSnapshot> {
        self.snapshots
    }

    /// Recorded snapshot of step `m`, if any.
    pub fn at_step(&self, m: usize) -> Option<&FieldSnapshot> {
        self.snapshots.iter().find(|s| s.step == m)
    }
}

impl SnapshotObserver for SnapshotRecorder {
    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<(), Box<dyn Error>> {
        self.snapshots.push(snapshot.capture());
        Ok(())
    }
}

// =================================================================================================
// Run summary
// =================================================================================================

/// Outcome of [`Simulation::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Steps executed by this call
    pub steps: usize,
    /// Total completed steps of the stepper
    pub step_index: usize,
    /// Physical time reached \[s\]
    pub final_time: f64,
    /// Snapshots delivered by this call
    pub snapshots: usize,
    /// Wall-clock duration of the call
    pub elapsed: Duration,
}

// =================================================================================================
// Simulation
// =================================================================================================

/// Stepper + schedule + run options.
#[derive(Debug, Clone)]
pub struct Simulation {
    stepper: DiffusionStepper,
    schedule: SnapshotSchedule,
    t_hot: f64,
    check_finite: bool,
}

impl Simulation {
    /// Wrap an existing stepper.
    ///
    /// The upper display bound defaults to the larger of the ambient
    /// temperature and the highest clamp temperature.
    pub fn new(stepper: DiffusionStepper, schedule: SnapshotSchedule) -> Self {
        let ambient = stepper.grid().ambient();
        let t_hot = stepper
            .source()
            .value_range()
            .map_or(ambient, |(_, max)| max.max(ambient));

        Self {
            stepper,
            schedule,
            t_hot,
            check_finite: false,
        }
    }

    /// Build stepper and driver from a configuration.
    pub fn from_configuration(
        config: &PlateConfiguration,
        schedule: SnapshotSchedule,
    ) -> Result<Self, ConfigurationError> {
        let stepper = DiffusionStepper::from_configuration(config)?;

        let source_max = config.source.value_range().map(|(_, max)| max);
        if let Some(max) = source_max.filter(|&max| max > config.t_hot) {
            warn!(
                "Heat source reaches {:.3}, above the display bound t_hot = {}; plots will saturate",
                max, config.t_hot
            );
        }

        Ok(Self::new(stepper, schedule).with_t_hot(config.t_hot))
    }

    /// Set the upper display bound carried by snapshots.
    pub fn with_t_hot(mut self, t_hot: f64) -> Self {
        self.t_hot = t_hot;
        self
    }

    /// Check the field for NaN/Inf at every snapshot step and after the run.
    pub fn with_finiteness_check(mut self, enabled: bool) -> Self {
        self.check_finite = enabled;
        self
    }

    pub fn with_schedule(mut self, schedule: SnapshotSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    // ====================================== Running ======================================

    /// Run `nsteps` steps, delivering scheduled snapshots to `observers`.
    ///
    /// Step indices continue from the stepper's current index, so two calls
    /// of `run(n)` are equivalent to one call of `run(2n)`.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::NonFinite`] when the finiteness check is on and trips
    /// - [`SimulationError::Observer`] when an observer fails
    ///
    /// The run stops at the first error; the stepper keeps the state reached.
    pub fn run(
        &mut self,
        nsteps: usize,
        observers: &mut [&mut dyn SnapshotObserver],
    ) -> Result<RunSummary, SimulationError> {
        let start = Instant::now();
        let first = self.stepper.step_index();

        info!(
            "Running {} steps from step {} on a {}x{} grid (dt = {:.6e} s, {} snapshots scheduled)",
            nsteps,
            first,
            self.stepper.grid().nx(),
            self.stepper.grid().ny(),
            self.stepper.dt(),
            self.scheduled_between(first, first + nsteps)
        );

        let mut delivered = 0;
        for m in first..first + nsteps {
            self.stepper.step();

            if self.schedule.selects(m) {
                self.deliver(m, observers)?;
                delivered += 1;
            }
        }

        if self.check_finite {
            self.check_field(self.stepper.step_index().saturating_sub(1))?;
        }

        let summary = RunSummary {
            steps: nsteps,
            step_index: self.stepper.step_index(),
            final_time: self.stepper.time(),
            snapshots: delivered,
            elapsed: start.elapsed(),
        };

        for observer in observers.iter_mut() {
            observer.on_finish(&summary).map_err(|e| SimulationError::Observer {
                step: summary.step_index.saturating_sub(1),
                message: e.to_string(),
            })?;
        }

        info!(
            "Completed {} steps in {:.2?}: t = {:.4} s, {} snapshots",
            summary.steps, summary.elapsed, summary.final_time, summary.snapshots
        );

        Ok(summary)
    }

    fn deliver(&self, m: usize, observers: &mut [&mut dyn SnapshotObserver]) -> Result<(), SimulationError> {
        if self.check_finite {
            self.check_field(m)?;
        }

        let Some(snapshot) = self.snapshot() else {
            return Ok(());
        };
        debug!("Snapshot at step {} (t = {:.4} s)", m, snapshot.time);

        for observer in observers.iter_mut() {
            observer.on_snapshot(&snapshot).map_err(|e| SimulationError::Observer {
                step: m,
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    fn check_field(&self, step: usize) -> Result<(), SimulationError> {
        match self.snapshot().and_then(|s| s.first_non_finite()) {
            Some((i, j)) => Err(SimulationError::NonFinite { step, i, j }),
            None => Ok(()),
        }
    }

    fn scheduled_between(&self, from: usize, to: usize) -> usize {
        self.schedule.count_in(to) - self.schedule.count_in(from)
    }

    // ====================================== Queries ======================================

    /// View of the committed field after the last completed step.
    ///
    /// `None` before the first step.
    pub fn snapshot(&self) -> Option<Snapshot<'_>> {
        let updates = self.stepper.step_index();
        let grid = self.stepper.grid();

        (updates > 0).then(|| Snapshot {
            step: updates - 1,
            updates,
            time: self.stepper.time(),
            field: grid.current(),
            geometry: grid.geometry(),
            t_cool: grid.ambient(),
            t_hot: self.t_hot,
        })
    }

    pub fn stepper(&self) -> &DiffusionStepper {
        &self.stepper
    }

    pub fn stepper_mut(&mut self) -> &mut DiffusionStepper {
        &mut self.stepper
    }

    pub fn schedule(&self) -> &SnapshotSchedule {
        &self.schedule
    }

    pub fn t_hot(&self) -> f64 {
        self.t_hot
    }

    pub fn into_stepper(self) -> DiffusionStepper {
        self.stepper
    }
}

// =================================================================================================
// Tests
// =================================================================================================
