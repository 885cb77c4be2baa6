//! Output collaborators for simulation results
//!
//! This module turns temperature fields into files:
//! - **Visualization**: PNG/SVG heat maps and profile plots using plotters
//! - **Export**: CSV data export for external analysis
//!
//! Nothing here is called by the solver. Both sub-modules consume read-only
//! [`Snapshot`](crate::solver::Snapshot)s, either directly or through the
//! [`SnapshotObserver`](crate::solver::SnapshotObserver) implementations
//! [`RowCsvObserver`] and [`HeatmapObserver`].
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── config.rs
//! │   ├── colormap.rs
//! │   ├── heatmap.rs
//! │   └── profile.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use therm_rs::output::{HeatmapObserver, PlotConfig, RowCsvObserver, ViewWindow};
//! use therm_rs::solver::{PlateConfiguration, Simulation, SnapshotSchedule};
//!
//! let config = PlateConfiguration::aluminum();
//! let mut simulation = Simulation::from_configuration(&config, SnapshotSchedule::aluminum_reference())?;
//!
//! let mut csv = RowCsvObserver::new("out", "aluminum_row130", 130);
//! let mut images = HeatmapObserver::new("out", "aluminum")
//!     .with_config(PlotConfig::heatmap("Aluminum").with_view(ViewWindow::aluminum_reference()));
//!
//! simulation.run(3101, &mut [&mut csv, &mut images])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod export;
pub mod visualization;

pub use export::{export_field_csv, export_profile_csv, CsvConfig, CsvError, RowCsvObserver};

pub use visualization::{
    plot_heatmap, plot_profile, plot_profile_comparison, plot_snapshot, HeatmapObserver, PlotConfig,
    ViewWindow,
};
