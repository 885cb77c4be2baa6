//! Performance benchmarks for the plate stepper
//!
//! # What We're Measuring
//!
//! 1. **Stencil kernels**: one sweep of the five-point update, sequential vs
//!    column-parallel, across grid sizes.
//! 2. **Full steps**: clamp + stencil + swap on the weld presets.
//!
//! # Expected Results
//!
//! - Time per sweep ∝ `nx · ny`
//! - The parallel kernel pays a fixed dispatch cost; it only wins from
//!   roughly 128 × 128 cells, which is where the default threshold sits.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all stepper benchmarks
//! cargo bench --bench stepper_performance
//!
//! # Only the kernel comparison
//! cargo bench --bench stepper_performance kernel
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nalgebra::DMatrix;
use std::hint::black_box;
use std::time::Duration;
use therm_rs::models::Material;
use therm_rs::solver::stencil::{self, StencilCoefficients};
use therm_rs::solver::{DiffusionStepper, PlateConfiguration};

// =================================================================================================
// Benchmark Functions
// =================================================================================================

/// Field with structure in both directions so nothing is a fixed point.
fn test_field(n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n, n, |i, j| ((i * 7 + j * 13) % 29) as f64 * 0.5)
}

/// One stencil sweep, sequential vs parallel, on square grids.
///
/// # Sizes
///
/// - **64**: fits in L2, dispatch overhead dominates the parallel path
/// - **128**: around the default threshold
/// - **305**: reference weld grid
/// - **1024**: large plate, memory bound
fn benchmark_stencil_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stencil kernel");
    let coefficients = StencilCoefficients::new(123.0, 1.0 / 492.0, 1.0, 1.0);

    for n in [64usize, 128, 305, 1024] {
        let current = test_field(n);
        let mut next = current.clone();
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_with_input(BenchmarkId::new("sequential", n), &n, |b, _| {
            b.iter(|| stencil::apply_sequential(black_box(&current), black_box(&mut next), &coefficients));
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |b, _| {
            b.iter(|| stencil::apply_parallel(black_box(&current), black_box(&mut next), &coefficients));
        });
    }

    group.finish();
}

/// 100 full steps of each weld preset on the 305 × 305 reference grid.
///
/// The stepper is cloned per iteration so every sample starts inside the
/// heating window.
fn benchmark_weld_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("Weld steps");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for material in [Material::Aluminum, Material::Copper] {
        let config = PlateConfiguration::for_material(material).with_grid_size(305, 305);
        let stepper = DiffusionStepper::from_configuration(&config).unwrap();

        group.throughput(Throughput::Elements(100 * 305 * 305));
        group.bench_function(format!("{} 100 steps", material), |b| {
            b.iter_batched(
                || stepper.clone(),
                |mut s| {
                    s.step_n(100);
                    black_box(s)
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =================================================================================================
// Criterion Configuration
// =================================================================================================

criterion_group!(benches, benchmark_stencil_kernels, benchmark_weld_steps);
criterion_main!(benches);
