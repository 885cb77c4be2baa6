//! Temperature grid storage
//!
//! [`GridState`] owns the two temperature buffers of the explicit scheme and
//! the constants that describe the plate: cell counts, cell spacing, thermal
//! diffusivity and ambient temperature. It has no numerical behaviour of its
//! own beyond initialisation and the buffer rotation performed after each
//! step.
//!
//! # Layout
//!
//! Both buffers are `nx × ny` [`DMatrix`] values. Entry `(i, j)` is the
//! temperature at the physical location `(i·dx, j·dy)`. `DMatrix` is
//! column-major, so a fixed `j` (one column) is contiguous in memory; the
//! parallel stencil relies on this to hand out disjoint columns.
//!
//! # Boundary
//!
//! Cells with `i ∈ {0, nx-1}` or `j ∈ {0, ny-1}` form a fixed-temperature
//! (Dirichlet) border. They are set to the ambient temperature at
//! initialisation in **both** buffers and are never written by the stencil,
//! so they keep that value for the whole run whichever buffer currently plays
//! the "current" role.
//!
//! ```text
//!   j →
//! i ┌───────────────┐
//! ↓ │ B B B B B B B │   B = Dirichlet border (ambient)
//!   │ B . . . . . B │   . = interior, updated every step
//!   │ B . . . . . B │
//!   │ B B B B B B B │
//!   └───────────────┘
//! ```

use nalgebra::DMatrix;

use crate::error::ConfigurationError;

// =================================================================================================
// Grid geometry
// =================================================================================================

/// Cell counts and spacing of a uniform rectangular grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Number of cells along x (rows of the matrices)
    pub nx: usize,
    /// Number of cells along y (columns of the matrices)
    pub ny: usize,
    /// Cell spacing along x \[mm\]
    pub dx: f64,
    /// Cell spacing along y \[mm\]
    pub dy: f64,
}

impl GridGeometry {
    /// Validate dimensions and spacing.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.nx < 3 || self.ny < 3 {
            return Err(ConfigurationError::InvalidDimensions { nx: self.nx, ny: self.ny });
        }
        check_positive("dx", self.dx)?;
        check_positive("dy", self.dy)?;
        Ok(())
    }

    /// Whether `(i, j)` lies on the fixed-temperature border.
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i == self.nx - 1 || j == self.ny - 1
    }

    /// Physical position of cell `(i, j)` \[mm\].
    pub fn position(&self, i: usize, j: usize) -> (f64, f64) {
        (i as f64 * self.dx, j as f64 * self.dy)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// Always false for a validated geometry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reject zero, negative and non-finite values for a named parameter.
pub(crate) fn check_positive(parameter: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { parameter, value })
    }
}

// =================================================================================================
// Grid state
// =================================================================================================

/// Double-buffered temperature field of the plate.
///
/// # Buffer roles
///
/// - `current`: the committed field, read by the stencil and by observers.
/// - `next`: scratch target of the stencil; promoted by [`commit_step`](Self::commit_step).
///
/// The roles rotate by swapping the two matrices (a pointer swap, no copy and
/// no allocation). The shapes never change after construction.
///
/// # Example
///
/// ```rust
/// use therm_rs::physics::GridState;
///
/// let grid = GridState::new(50, 40, 1.0, 1.0, 71.0, 20.0)?;
/// assert_eq!(grid.nx(), 50);
/// assert_eq!(grid.value(25, 20), 20.0);
/// assert!(grid.is_boundary(0, 10));
/// # Ok::<(), therm_rs::ConfigurationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GridState {
    geometry: GridGeometry,
    diffusivity: f64,
    ambient: f64,
    current: DMatrix<f64>,
    next: DMatrix<f64>,
}

impl GridState {
    /// Allocate a grid and fill both buffers with the ambient temperature.
    ///
    /// # Arguments
    ///
    /// * `nx`, `ny` - Cell counts (at least 3 each, so an interior exists)
    /// * `dx`, `dy` - Cell spacing \[mm\]
    /// * `diffusivity` - Thermal diffusivity D \[mm²/s\]
    /// * `t_cool` - Ambient temperature, also the border temperature
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] for too-small dimensions or non-positive
    /// spacing / diffusivity.
    pub fn new(
        nx: usize,
        ny: usize,
        dx: f64,
        dy: f64,
        diffusivity: f64,
        t_cool: f64,
    ) -> Result<Self, ConfigurationError> {
        let geometry = GridGeometry { nx, ny, dx, dy };
        geometry.validate()?;
        check_positive("diffusivity", diffusivity)?;

        Ok(Self {
            geometry,
            diffusivity,
            ambient: t_cool,
            current: DMatrix::from_element(nx, ny, t_cool),
            next: DMatrix::from_element(nx, ny, t_cool),
        })
    }

    /// Build a grid from caller-supplied buffers.
    ///
    /// Useful for non-uniform initial fields. The border of `current` is the
    /// fixed boundary for the whole run. `next` only donates its allocation:
    /// its contents are overwritten with `current` so the never-written border
    /// agrees in both buffers.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::ShapeMismatch`] when the buffers differ in shape,
    /// plus the checks of [`GridState::new`].
    pub fn with_buffers(
        current: DMatrix<f64>,
        next: DMatrix<f64>,
        dx: f64,
        dy: f64,
        diffusivity: f64,
        t_cool: f64,
    ) -> Result<Self, ConfigurationError> {
        if current.shape() != next.shape() {
            return Err(ConfigurationError::ShapeMismatch {
                current: current.shape(),
                next: next.shape(),
            });
        }

        let (nx, ny) = current.shape();
        let geometry = GridGeometry { nx, ny, dx, dy };
        geometry.validate()?;
        check_positive("diffusivity", diffusivity)?;

        let mut next = next;
        next.copy_from(&current);

        Ok(Self {
            geometry,
            diffusivity,
            ambient: t_cool,
            current,
            next,
        })
    }

    // ====================================== Lifecycle ======================================

    /// Reset the whole field to `t_cool`, wiping any prior state.
    ///
    /// Both buffers are filled so that the never-written border is equal to
    /// `t_cool` in each of them.
    pub fn initialize(&mut self, t_cool: f64) {
        self.ambient = t_cool;
        self.current.fill(t_cool);
        self.next.fill(t_cool);
    }

    /// Promote the freshly computed `next` buffer to `current`.
    ///
    /// Swaps the two matrices in place; dimensions are untouched.
    pub fn commit_step(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Mutable access to the buffer about to be read by the stencil.
    pub(crate) fn source_mut(&mut self) -> &mut DMatrix<f64> {
        &mut self.current
    }

    /// Split borrow: read-only `current`, writable `next`.
    pub(crate) fn buffers(&mut self) -> (&DMatrix<f64>, &mut DMatrix<f64>) {
        (&self.current, &mut self.next)
    }

    // ====================================== Queries ======================================

    /// Committed temperature field.
    pub fn current(&self) -> &DMatrix<f64> {
        &self.current
    }

    /// Temperature at cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// When `(i, j)` is outside the grid.
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.current[(i, j)]
    }

    /// Copy of row `i` (fixed x, all y).
    ///
    /// Returns `None` when `i >= nx`.
    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        (i < self.geometry.nx).then(|| self.current.row(i).iter().copied().collect())
    }

    /// Grid geometry.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn nx(&self) -> usize {
        self.geometry.nx
    }

    pub fn ny(&self) -> usize {
        self.geometry.ny
    }

    pub fn dx(&self) -> f64 {
        self.geometry.dx
    }

    pub fn dy(&self) -> f64 {
        self.geometry.dy
    }

    /// Thermal diffusivity D \[mm²/s\].
    pub fn diffusivity(&self) -> f64 {
        self.diffusivity
    }

    /// Ambient (and border) temperature.
    pub fn ambient(&self) -> f64 {
        self.ambient
    }

    /// Whether `(i, j)` is a fixed-temperature border cell.
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        self.geometry.is_boundary(i, j)
    }

    /// Iterate over the border cells as `(i, j, temperature)`.
    pub fn boundary_values(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let (nx, ny) = (self.geometry.nx, self.geometry.ny);
        (0..ny)
            .flat_map(move |j| (0..nx).map(move |i| (i, j)))
            .filter(move |&(i, j)| self.is_boundary(i, j))
            .map(move |(i, j)| (i, j, self.current[(i, j)]))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
