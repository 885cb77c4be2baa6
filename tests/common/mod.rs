//! Common utilities for integration tests

#![allow(unused_imports)]

pub mod test_helpers;

// Re-export commonly used items
pub use test_helpers::{
    assert_border_at,
    assert_fields_identical,
    field_bounds,
    reduced_copper_configuration,
    ReferencePlate,
};
