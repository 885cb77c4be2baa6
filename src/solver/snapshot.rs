//! Read-only views of the committed field
//!
//! A [`Snapshot`] borrows the committed temperature buffer between two steps.
//! Observers receive it by shared reference, so they can never see (or
//! cause) a half-written field. [`FieldSnapshot`] is the owned copy for
//! callers that need to keep a state past the next step.

use nalgebra::DMatrix;

use crate::physics::GridGeometry;

/// Borrowed state after a completed step.
///
/// For step index `m` (0-based): `updates = m + 1` and `time = (m + 1)·dt`,
/// the time reached by the field after that many stencil updates.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Index of the step just completed
    pub step: usize,
    /// Number of stencil updates applied so far
    pub updates: usize,
    /// Physical time of the field \[s\]
    pub time: f64,
    /// Committed temperature field
    pub field: &'a DMatrix<f64>,
    /// Grid geometry
    pub geometry: &'a GridGeometry,
    /// Ambient temperature (lower display bound)
    pub t_cool: f64,
    /// Upper display bound
    pub t_hot: f64,
}

impl<'a> Snapshot<'a> {
    /// Temperature at cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// When `(i, j)` is outside the grid.
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.field[(i, j)]
    }

    /// Copy of row `i`, or `None` when out of range.
    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        (i < self.field.nrows()).then(|| self.field.row(i).iter().copied().collect())
    }

    /// Smallest and largest temperature in the field.
    pub fn extrema(&self) -> (f64, f64) {
        (self.field.min(), self.field.max())
    }

    /// First non-finite cell, if any.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        let nx = self.field.nrows();
        self.field
            .as_slice()
            .iter()
            .position(|t| !t.is_finite())
            .map(|k| (k % nx, k / nx))
    }

    /// Owned copy.
    pub fn capture(&self) -> FieldSnapshot {
        FieldSnapshot {
            step: self.step,
            updates: self.updates,
            time: self.time,
            field: self.field.clone(),
            geometry: *self.geometry,
            t_cool: self.t_cool,
            t_hot: self.t_hot,
        }
    }
}

/// Owned copy of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub step: usize,
    pub updates: usize,
    pub time: f64,
    pub field: DMatrix<f64>,
    pub geometry: GridGeometry,
    pub t_cool: f64,
    pub t_hot: f64,
}

impl FieldSnapshot {
    /// Borrow back as a [`Snapshot`].
    pub fn view(&self) -> Snapshot<'_> {
        Snapshot {
            step: self.step,
            updates: self.updates,
            time: self.time,
            field: &self.field,
            geometry: &self.geometry,
            t_cool: self.t_cool,
            t_hot: self.t_hot,
        }
    }

    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.field[(i, j)]
    }

    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        self.view().row(i)
    }
}
