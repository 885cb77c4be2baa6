//! Helper functions for integration tests

#![allow(dead_code)]

use nalgebra::DMatrix;
use therm_rs::models::HeatSource;
use therm_rs::physics::GridState;
use therm_rs::solver::PlateConfiguration;

/// Straightforward copy-based implementation of the plate update.
///
/// Two row-major `Vec<Vec<f64>>` buffers, the clamp written into the old
/// buffer, then a full copy of the new buffer back. Used as the regression
/// reference for the stepper: same arithmetic order, no swapping, no
/// column slices.
pub struct ReferencePlate {
    pub u0: Vec<Vec<f64>>,
    pub u: Vec<Vec<f64>>,
    pub dx2: f64,
    pub dy2: f64,
    pub d_dt: f64,
    pub dt: f64,
    pub x: std::ops::Range<usize>,
    pub y: std::ops::Range<usize>,
    pub source: HeatSource,
    pub step: usize,
}

impl ReferencePlate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        nx: usize,
        ny: usize,
        dx: f64,
        dy: f64,
        diffusivity: f64,
        dt: f64,
        t_cool: f64,
        x: std::ops::Range<usize>,
        y: std::ops::Range<usize>,
        source: HeatSource,
    ) -> Self {
        Self {
            u0: vec![vec![t_cool; ny]; nx],
            u: vec![vec![t_cool; ny]; nx],
            dx2: dx * dx,
            dy2: dy * dy,
            d_dt: diffusivity * dt,
            dt,
            x,
            y,
            source,
            step: 0,
        }
    }

    pub fn step(&mut self) {
        let t = self.step as f64 * self.dt;
        if t < self.source.heating_duration() {
            let value = self.source.curve().evaluate(t);
            for i in self.x.clone() {
                for j in self.y.clone() {
                    self.u0[i][j] = value;
                }
            }
        }

        let nx = self.u0.len();
        let ny = self.u0[0].len();
        for i in 1..nx - 1 {
            for j in 1..ny - 1 {
                let c = self.u0[i][j];
                let xx = (self.u0[i + 1][j] - 2.0 * c + self.u0[i - 1][j]) / self.dx2;
                let yy = (self.u0[i][j + 1] - 2.0 * c + self.u0[i][j - 1]) / self.dy2;
                self.u[i][j] = c + self.d_dt * (xx + yy);
            }
        }

        self.u0 = self.u.clone();
        self.step += 1;
    }

    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.u0.len(), self.u0[0].len(), |i, j| self.u0[i][j])
    }
}

/// Copper preset on a reduced 61 × 61 grid with the clamp square centred.
pub fn reduced_copper_configuration() -> PlateConfiguration {
    use therm_rs::models::{ClampRegion, Material};

    let source = Material::Copper
        .heat_source()
        .with_region(ClampRegion::centered_square(30, 30, 5));

    PlateConfiguration::copper()
        .with_grid_size(61, 61)
        .with_source(source)
}

/// Assert every border cell equals `value` exactly.
pub fn assert_border_at(grid: &GridState, value: f64, message: &str) {
    for (i, j, t) in grid.boundary_values() {
        assert_eq!(t, value, "{}: border cell ({}, {}) is {}", message, i, j, t);
    }
}

/// Assert two fields are bit-for-bit equal.
pub fn assert_fields_identical(a: &DMatrix<f64>, b: &DMatrix<f64>, message: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: shape mismatch", message);
    for (k, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!(
            x.to_bits() == y.to_bits(),
            "{}: element {} differs ({} vs {})",
            message, k, x, y
        );
    }
}

/// `(min, max)` over the interior of a field.
pub fn field_bounds(field: &DMatrix<f64>) -> (f64, f64) {
    let (nx, ny) = field.shape();
    let mut bounds = (f64::INFINITY, f64::NEG_INFINITY);
    for j in 1..ny - 1 {
        for i in 1..nx - 1 {
            let t = field[(i, j)];
            bounds = (bounds.0.min(t), bounds.1.max(t));
        }
    }
    bounds
}
