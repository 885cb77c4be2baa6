//! Plate physics state
//!
//! This module holds the discrete temperature field of the plate. It only
//! stores and initialises data; the time-marching rule that evolves it lives
//! in [`crate::solver`].
//!
//! # Example
//!
//! ```rust
//! use therm_rs::physics::GridState;
//!
//! // 305 × 305 cells of 1 mm, copper, ambient 0
//! let grid = GridState::new(305, 305, 1.0, 1.0, 123.0, 0.0)?;
//! assert_eq!(grid.current().shape(), (305, 305));
//! # Ok::<(), therm_rs::ConfigurationError>(())
//! ```

pub mod grid;

pub use grid::{GridGeometry, GridState};
