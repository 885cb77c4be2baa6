//! therm-rs: Plate Heat Conduction Simulation
//!
//! Explicit finite-difference simulation of transient heat conduction in a
//! thin square plate heated by a weld. Built with Rust for performance and
//! safety.
//!
//! # Architecture
//!
//! therm-rs is built on two core principles:
//!
//! 1. **Separation of State, Models and Numerics**
//!    - The grid holds temperatures (what is evolved)
//!    - Materials and heat sources define the forcing (what drives it)
//!    - The stepper provides the update rule (how it evolves)
//!
//! 2. **Read-only Consumers**
//!    - Observers receive borrowed snapshots between timesteps
//!    - Plotting and CSV export never touch solver state
//!
//! # Quick Start
//!
//! ```rust
//! use therm_rs::prelude::*;
//!
//! # fn main() -> Result<(), therm_rs::SimulationError> {
//! // 1. Describe the plate: copper, 305 × 305 cells of 1 mm
//! let config = PlateConfiguration::copper().with_grid_size(305, 305);
//!
//! // 2. Collect a snapshot every 20 steps
//! let mut simulation = Simulation::from_configuration(&config, SnapshotSchedule::every(20))?;
//! let mut recorder = SnapshotRecorder::default();
//!
//! // 3. Run
//! let summary = simulation.run(100, &mut [&mut recorder])?;
//!
//! // 4. Access results
//! println!("Final time: {:.3} s", summary.final_time);
//! assert_eq!(recorder.snapshots().len(), 5);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Temperature grid and geometry
//! - [`models`]: Materials, heating curves, clamp regions
//! - [`solver`]: Time step, stencil, stepper and simulation driver
//! - [`output`]: Heat maps, profile plots and CSV export
//! - [`error`]: Configuration and run errors

// Core modules
pub mod error;
pub mod physics;

pub mod models;
pub mod solver;

pub mod output;

pub use error::{ConfigurationError, SimulationError};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use therm_rs::prelude::*;
    //! ```
    pub use crate::error::{ConfigurationError, SimulationError};
    pub use crate::models::{ClampRegion, HeatSource, HeatingCurve, Material};
    pub use crate::physics::{GridGeometry, GridState};
    pub use crate::solver::{DiffusionStepper,
                            FieldSnapshot,
                            PlateConfiguration,
                            RingGeometry,
                            RunSummary,
                            Simulation,
                            Snapshot,
                            SnapshotObserver,
                            SnapshotRecorder,
                            SnapshotSchedule};
}
