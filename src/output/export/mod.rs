//! Export module for plate temperature data.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a
//! new format is a new file that leaves the existing ones untouched.
//!
//! # Available formats
//!
//! | Format  | Module   |
//! |---------|----------|
//! | CSV     | [`csv`]  |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use therm_rs::output::export::{CsvExporter, RowCsvObserver};
//! use therm_rs::solver::{PlateConfiguration, Simulation, SnapshotSchedule};
//!
//! let config = PlateConfiguration::aluminum();
//! let mut simulation = Simulation::from_configuration(&config, SnapshotSchedule::aluminum_reference())?;
//!
//! // Row 130 of the plate at every scheduled step
//! let mut rows = RowCsvObserver::new("out", "aluminum_row130", 130);
//! simulation.run(3101, &mut [&mut rows])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod csv;

pub use csv::{
    export_field_csv, export_profile_csv, CsvConfig, CsvError, CsvExporter, CsvLayout, CsvMetadata,
    RowCsvObserver,
};

use std::path::Path;

use crate::solver::Snapshot;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can react to the precise failure instead of a boxed error.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Write the data of one snapshot to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid, the snapshot does not hold
    /// the requested data, or the data contains NaN/Inf values.
    fn export_snapshot(&self, snapshot: &Snapshot<'_>, path: &Path) -> Result<(), Self::Error>;
}
