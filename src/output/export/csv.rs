//! CSV export of plate temperatures
//!
//! This module writes temperature data to CSV (Comma-Separated Values), which
//! opens directly in Excel, pandas, MATLAB and most analysis tools.
//!
//! # Features
//!
//! - **Profiles**: one row slice of the plate, two columns (`Column`, `Temperature`)
//! - **Fields**: the full `nx × ny` matrix, one CSV line per grid row
//! - **Metadata support**: optional `#` header with simulation parameters
//! - **Customizable**: delimiter, decimal separator, precision, headers
//! - **Validation**: rejects empty data, NaN/Inf and out-of-range rows
//!
//! # Quick Examples
//!
//! ## Profile Export
//!
//! ```rust,no_run
//! use therm_rs::output::export::export_profile_csv;
//!
//! let row = vec![0.0, 0.5, 1.0, 0.5, 0.0];
//! export_profile_csv(&row, "row130.csv", None)?;
//! # Ok::<(), therm_rs::output::export::CsvError>(())
//! ```
//!
//! **Output** (`row130.csv`):
//! ```csv
//! Column,Temperature
//! 0,0.000000
//! 1,0.500000
//! 2,1.000000
//! 3,0.500000
//! 4,0.000000
//! ```
//!
//! ## With Metadata
//!
//! ```csv
//! # Plate Heat Conduction Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Material: Aluminum
//! # Diffusivity: 71 mm^2/s
//! # Time Step: 0.0035211267605633804 s
//! # Step: 1205
//! # Time: 4.246478873239437 s
//! #
//! Column,Temperature
//! ...
//! ```
//!
//! ## Snapshot Files
//!
//! [`RowCsvObserver`] plugs into [`Simulation::run`](crate::solver::Simulation::run)
//! and writes one profile file per scheduled step, named
//! `{stem}_step{m:05}.csv`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use nalgebra::DMatrix;
use thiserror::Error;

use super::Exporter;
use crate::models::WELD_CENTER;
use crate::solver::{RunSummary, Snapshot, SnapshotObserver};

// =============================================================================
// Errors
// =============================================================================

/// Failure while writing a CSV file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Nothing to write.
    #[error("empty data: nothing to export")]
    EmptyData,

    /// A value is NaN or infinite.
    #[error("invalid data: NaN or Inf at index {index}")]
    NonFinite { index: usize },

    /// Requested row does not exist in the field.
    #[error("row {row} out of range for a field with {nrows} rows")]
    RowOutOfRange { row: usize, nrows: usize },

    /// File creation or write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `decimal_separator`: Decimal point character (default: '.')
/// - `precision`: Number of decimal places (default: 6)
/// - `include_metadata`: Add header comments with simulation info
/// - `metadata`: Simulation metadata to include
/// - `index_header`: Header of the cell-index column
/// - `value_header`: Header of the temperature column
///
/// # Example
///
/// ```rust
/// use therm_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.value_header, "Temperature");
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header for the index column (default: "Column")
    pub index_header: String,

    /// Header for the value column (default: "Temperature")
    pub value_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            index_header: "Column".to_string(),
            value_header: "Temperature".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// All fields are optional. Only non-None fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvMetadata {
    /// Plate material (e.g. "Aluminum")
    pub material: Option<String>,

    /// Thermal diffusivity (mm²/s)
    pub diffusivity: Option<f64>,

    /// Time step (s)
    pub time_step: Option<f64>,

    /// Grid dimensions `(nx, ny)`
    pub grid: Option<(usize, usize)>,

    /// Step index of the exported field
    pub step: Option<usize>,

    /// Physical time of the exported field (s)
    pub time: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Run-level metadata.
    ///
    /// # Example
    ///
    /// ```rust
    /// use therm_rs::output::export::CsvMetadata;
    ///
    /// let metadata = CsvMetadata::from_simulation("Copper", 123.0, 1.0 / 492.0);
    /// assert_eq!(metadata.diffusivity, Some(123.0));
    /// ```
    pub fn from_simulation(material: &str, diffusivity: f64, time_step: f64) -> Self {
        Self {
            material: Some(material.to_string()),
            diffusivity: Some(diffusivity),
            time_step: Some(time_step),
            ..Default::default()
        }
    }

    /// Copy with the step-dependent fields of `snapshot` filled in.
    pub fn for_snapshot(&self, snapshot: &Snapshot<'_>) -> Self {
        Self {
            grid: Some(snapshot.field.shape()),
            step: Some(snapshot.step),
            time: Some(snapshot.time),
            ..self.clone()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> Result<(), CsvError> {
    writeln!(out, "# Plate Heat Conduction Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(material) = &metadata.material {
        writeln!(out, "# Material: {}", material)?;
    }
    if let Some(d) = metadata.diffusivity {
        writeln!(out, "# Diffusivity: {} mm^2/s", d)?;
    }
    if let Some(dt) = metadata.time_step {
        writeln!(out, "# Time Step: {} s", dt)?;
    }
    if let Some((nx, ny)) = metadata.grid {
        writeln!(out, "# Grid: {}x{}", nx, ny)?;
    }
    if let Some(step) = metadata.step {
        writeln!(out, "# Step: {}", step)?;
    }
    if let Some(time) = metadata.time {
        writeln!(out, "# Time: {} s", time)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;

    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn check_finite<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Result<(), CsvError> {
    match values.into_iter().position(|v| !v.is_finite()) {
        Some(index) => Err(CsvError::NonFinite { index }),
        None => Ok(()),
    }
}

fn write_header<W: Write>(out: &mut W, config: &CsvConfig) -> Result<(), CsvError> {
    match &config.metadata {
        Some(metadata) if config.include_metadata => write_metadata_header(out, metadata),
        _ => Ok(()),
    }
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export one temperature profile (a row slice of the plate) to CSV.
///
/// Writes a header line then one `index, temperature` line per value.
///
/// # Errors
///
/// - [`CsvError::EmptyData`] for an empty slice
/// - [`CsvError::NonFinite`] when a value is NaN or infinite
/// - [`CsvError::Io`] on file errors
pub fn export_profile_csv<P: AsRef<Path>>(
    values: &[f64],
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    if values.is_empty() {
        return Err(CsvError::EmptyData);
    }
    check_finite(values)?;

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut out = BufWriter::new(File::create(output_path)?);
    write_header(&mut out, configuration)?;

    writeln!(
        out,
        "{}{}{}",
        configuration.index_header, configuration.delimiter, configuration.value_header
    )?;

    for (index, value) in values.iter().enumerate() {
        writeln!(
            out,
            "{}{}{}",
            index,
            configuration.delimiter,
            format_number(*value, configuration)
        )?;
    }

    out.flush()?;
    Ok(())
}

/// Export the full temperature field to CSV.
///
/// One line per grid row `i`, `ny` values per line, no column header.
///
/// # Errors
///
/// Same as [`export_profile_csv`].
pub fn export_field_csv<P: AsRef<Path>>(
    field: &DMatrix<f64>,
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    if field.is_empty() {
        return Err(CsvError::EmptyData);
    }
    check_finite(field.iter())?;

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut out = BufWriter::new(File::create(output_path)?);
    write_header(&mut out, configuration)?;

    for row in field.row_iter() {
        let line: Vec<String> = row.iter().map(|v| format_number(*v, configuration)).collect();
        writeln!(out, "{}", line.join(&configuration.delimiter.to_string()))?;
    }

    out.flush()?;
    Ok(())
}

// =============================================================================
// Exporter
// =============================================================================

/// What a [`CsvExporter`] writes for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    /// One row of the field (the reference output uses row 130)
    Row(usize),
    /// The whole field
    Field,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self::Row(WELD_CENTER)
    }
}

/// CSV implementation of [`Exporter`].
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
    pub layout: CsvLayout,
}

impl CsvExporter {
    pub fn new(config: CsvConfig, layout: CsvLayout) -> Self {
        Self { config, layout }
    }

    /// Exporter for one row slice.
    pub fn row(row: usize) -> Self {
        Self::new(CsvConfig::default(), CsvLayout::Row(row))
    }

    /// Exporter for the full field.
    pub fn field() -> Self {
        Self::new(CsvConfig::default(), CsvLayout::Field)
    }

    pub fn with_config(mut self, config: CsvConfig) -> Self {
        self.config = config;
        self
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export_snapshot(&self, snapshot: &Snapshot<'_>, path: &Path) -> Result<(), CsvError> {
        let mut config = self.config.clone();
        if config.include_metadata {
            let base = config.metadata.take().unwrap_or_default();
            config.metadata = Some(base.for_snapshot(snapshot));
        }

        match self.layout {
            CsvLayout::Row(row) => {
                let values = snapshot.row(row).ok_or(CsvError::RowOutOfRange {
                    row,
                    nrows: snapshot.field.nrows(),
                })?;
                export_profile_csv(&values, path, Some(&config))
            }
            CsvLayout::Field => export_field_csv(snapshot.field, path, Some(&config)),
        }
    }
}

// =============================================================================
// Snapshot observer
// =============================================================================

/// Writes one CSV file per scheduled snapshot into a directory.
///
/// Files are named `{stem}_step{m:05}.csv` where `m` is the step index.
#[derive(Debug, Clone)]
pub struct RowCsvObserver {
    exporter: CsvExporter,
    directory: PathBuf,
    stem: String,
    written: Vec<PathBuf>,
}

impl RowCsvObserver {
    /// Observer exporting `row` of every snapshot.
    pub fn new<P: Into<PathBuf>>(directory: P, stem: &str, row: usize) -> Self {
        Self::with_exporter(directory, stem, CsvExporter::row(row))
    }

    /// Observer driven by an arbitrary exporter (e.g. full-field layout).
    pub fn with_exporter<P: Into<PathBuf>>(directory: P, stem: &str, exporter: CsvExporter) -> Self {
        Self {
            exporter,
            directory: directory.into(),
            stem: stem.to_string(),
            written: Vec::new(),
        }
    }

    /// Path of the file for step `m`.
    pub fn path_for(&self, m: usize) -> PathBuf {
        self.directory.join(format!("{}_step{:05}.csv", self.stem, m))
    }

    /// Files written so far, in step order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl SnapshotObserver for RowCsvObserver {
    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.path_for(snapshot.step);
        self.exporter.export_snapshot(snapshot, &path)?;
        debug!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }

    fn on_finish(&mut self, summary: &RunSummary) -> Result<(), Box<dyn std::error::Error>> {
        debug!(
            "CSV export finished: {} files in {} after {} steps",
            self.written.len(),
            self.directory.display(),
            summary.step_index
        );
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
