//! Five-point explicit stencil
//!
//! Computes one forward-Euler update of the interior of `next` from
//! `current`:
//!
//! ```text
//! next[i,j] = current[i,j] + D·dt · ( (current[i+1,j] - 2·current[i,j] + current[i-1,j]) / dx²
//!                                   + (current[i,j+1] - 2·current[i,j] + current[i,j-1]) / dy² )
//! ```
//!
//! for `1 ≤ i < nx-1`, `1 ≤ j < ny-1`. Border cells of `next` are left
//! untouched.
//!
//! # Parallelism
//!
//! With the `parallel` feature, grids whose cell count reaches
//! [`parallel_threshold()`](super::parallel_threshold) are updated column by
//! column on the rayon pool. `DMatrix` is column-major, so each column of
//! `next` is one contiguous `&mut [f64]` chunk and the chunks are disjoint;
//! `current` is only read. Both paths run the same per-column kernel, so the
//! result is bit-identical whichever path is taken.

use nalgebra::DMatrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Constants of the update, computed once per stepper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StencilCoefficients {
    /// `D · dt`
    pub d_dt: f64,
    /// `dx²`
    pub dx2: f64,
    /// `dy²`
    pub dy2: f64,
}

impl StencilCoefficients {
    pub fn new(diffusivity: f64, dt: f64, dx: f64, dy: f64) -> Self {
        Self {
            d_dt: diffusivity * dt,
            dx2: dx * dx,
            dy2: dy * dy,
        }
    }
}

/// Update the interior of `next` from `current`, choosing the sequential or
/// parallel path by grid size.
///
/// # Panics
///
/// In debug builds, when the two matrices differ in shape.
pub fn apply(current: &DMatrix<f64>, next: &mut DMatrix<f64>, coefficients: &StencilCoefficients) {
    debug_assert_eq!(current.shape(), next.shape());

    #[cfg(feature = "parallel")]
    {
        if current.len() >= super::parallel_threshold() {
            apply_parallel(current, next, coefficients);
            return;
        }
    }

    apply_sequential(current, next, coefficients);
}

/// Single-threaded update.
pub fn apply_sequential(current: &DMatrix<f64>, next: &mut DMatrix<f64>, coefficients: &StencilCoefficients) {
    let (nx, ny) = current.shape();
    let source = current.as_slice();

    for (j, column) in next.as_mut_slice().chunks_mut(nx).enumerate().take(ny - 1).skip(1) {
        update_column(source, nx, j, column, coefficients);
    }
}

/// Column-parallel update on the rayon pool.
#[cfg(feature = "parallel")]
pub fn apply_parallel(current: &DMatrix<f64>, next: &mut DMatrix<f64>, coefficients: &StencilCoefficients) {
    let (nx, ny) = current.shape();
    let source = current.as_slice();

    next.as_mut_slice()
        .par_chunks_mut(nx)
        .enumerate()
        .take(ny - 1)
        .skip(1)
        .for_each(|(j, column)| update_column(source, nx, j, column, coefficients));
}

/// Update rows `1..nx-1` of interior column `j`.
///
/// `source` is the whole column-major `current` buffer, `target` is column
/// `j` of `next`.
#[inline]
fn update_column(source: &[f64], nx: usize, j: usize, target: &mut [f64], coefficients: &StencilCoefficients) {
    let StencilCoefficients { d_dt, dx2, dy2 } = *coefficients;

    let left = &source[(j - 1) * nx..j * nx];
    let center = &source[j * nx..(j + 1) * nx];
    let right = &source[(j + 1) * nx..(j + 2) * nx];

    for i in 1..nx - 1 {
        let c = center[i];
        let xx = (center[i + 1] - 2.0 * c + center[i - 1]) / dx2;
        let yy = (right[i] - 2.0 * c + left[i]) / dy2;
        target[i] = c + d_dt * (xx + yy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn coefficients() -> StencilCoefficients {
        // Stability number 0.5 with dx = dy = 1
        StencilCoefficients::new(1.0, 0.25, 1.0, 1.0)
    }

    #[test]
    fn test_uniform_field_is_fixed_point() {
        let current = DMatrix::from_element(6, 7, 3.0);
        let mut next = DMatrix::from_element(6, 7, 3.0);

        apply_sequential(&current, &mut next, &coefficients());

        assert!(next.iter().all(|&t| t == 3.0));
    }

    #[test]
    fn test_single_hot_cell_spreads_to_neighbours() {
        let mut current = DMatrix::zeros(5, 5);
        current[(2, 2)] = 1.0;
        let mut next = DMatrix::zeros(5, 5);

        apply_sequential(&current, &mut next, &coefficients());

        // 1 + 0.25 · (-4) = 0
        assert_relative_eq!(next[(2, 2)], 0.0);
        for (i, j) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert_relative_eq!(next[(i, j)], 0.25);
        }
        assert_relative_eq!(next[(1, 1)], 0.0);
        assert_relative_eq!(next.sum(), 1.0);
    }

    #[test]
    fn test_border_of_next_untouched() {
        let current = DMatrix::from_fn(6, 5, |i, j| (i * 5 + j) as f64);
        let mut next = DMatrix::from_element(6, 5, -1.0);

        apply_sequential(&current, &mut next, &coefficients());

        for j in 0..5 {
            assert_eq!(next[(0, j)], -1.0);
            assert_eq!(next[(5, j)], -1.0);
        }
        for i in 0..6 {
            assert_eq!(next[(i, 0)], -1.0);
            assert_eq!(next[(i, 4)], -1.0);
        }
        assert!(next[(2, 2)] != -1.0);
    }

    #[test]
    fn test_anisotropic_spacing() {
        let mut current = DMatrix::zeros(5, 5);
        current[(2, 2)] = 1.0;
        let mut next = DMatrix::zeros(5, 5);
        let c = StencilCoefficients::new(1.0, 0.1, 1.0, 2.0);

        apply_sequential(&current, &mut next, &c);

        // x-neighbours get dt/dx², y-neighbours dt/dy²
        assert_relative_eq!(next[(1, 2)], 0.1);
        assert_relative_eq!(next[(2, 1)], 0.025);
    }

    #[test]
    fn test_linear_field_is_preserved() {
        // A linear profile has zero Laplacian
        let current = DMatrix::from_fn(8, 8, |i, j| 2.0 * i as f64 + 0.5 * j as f64);
        let mut next = current.clone();

        apply_sequential(&current, &mut next, &coefficients());

        for j in 1..7 {
            for i in 1..7 {
                assert_relative_eq!(next[(i, j)], current[(i, j)], epsilon = 1e-12);
            }
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential_bitwise() {
        let current = DMatrix::from_fn(37, 23, |i, j| ((i * 31 + j * 17) % 13) as f64 * 0.37);
        let mut sequential = DMatrix::zeros(37, 23);
        let mut parallel = DMatrix::zeros(37, 23);
        let c = StencilCoefficients::new(71.0, 1.0 / 284.0, 1.0, 1.0);

        apply_sequential(&current, &mut sequential, &c);
        apply_parallel(&current, &mut parallel, &c);

        assert_eq!(sequential, parallel);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_dispatch_uses_parallel_above_threshold() {
        let _guard = crate::solver::ThresholdGuard::save(1);
        let current = DMatrix::from_fn(10, 10, |i, j| (i + j) as f64);
        let mut dispatched = DMatrix::zeros(10, 10);
        let mut sequential = DMatrix::zeros(10, 10);

        apply(&current, &mut dispatched, &coefficients());
        apply_sequential(&current, &mut sequential, &coefficients());

        assert_eq!(dispatched, sequential);
    }
}
