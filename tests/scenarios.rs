//! Full-size weld scenarios
//!
//! The copper and aluminum presets on the 305 × 305 reference grid, run for
//! the step counts of the weld studies. Centre values are pinned from a
//! reference run of the copy-based update.

use approx::assert_relative_eq;
use therm_rs::prelude::*;

mod common;
use common::{assert_border_at, field_bounds};

const CENTRE: (usize, usize) = (130, 130);

/// Run `config` to `early` steps, then on to `total`, returning both centre values.
fn centre_at(config: &PlateConfiguration, early: usize, total: usize) -> (f64, f64, Simulation) {
    let mut simulation = Simulation::from_configuration(config, SnapshotSchedule::Never)
        .unwrap()
        .with_finiteness_check(true);

    simulation.run(early, &mut []).unwrap();
    let centre_early = simulation.stepper().grid().value(CENTRE.0, CENTRE.1);

    simulation.run(total - early, &mut []).unwrap();
    let centre_final = simulation.stepper().grid().value(CENTRE.0, CENTRE.1);

    (centre_early, centre_final, simulation)
}

#[test]
fn test_copper_weld_scenario() {
    let config = PlateConfiguration::copper().with_grid_size(305, 305);
    let (centre_100, centre_1100, simulation) = centre_at(&config, 100, 1100);

    let grid = simulation.stepper().grid();
    assert_eq!(simulation.stepper().step_index(), 1100);
    assert_border_at(grid, 0.0, "copper after 1100 steps");

    assert!(centre_1100 > 0.0);
    assert!(
        centre_1100 >= centre_100,
        "centre cooled below its early value: {} < {}",
        centre_1100,
        centre_100
    );

    assert_relative_eq!(centre_100, 0.041433039867, max_relative = 1e-9);
    assert_relative_eq!(centre_1100, 6.443853182593, max_relative = 1e-9);

    // Heating stops at 2 s, before step 1100
    assert!(simulation.stepper().time() > 2.0);
    let (_, max) = field_bounds(grid.current());
    assert_relative_eq!(max, centre_1100, max_relative = 1e-12);
}

#[test]
fn test_aluminum_weld_scenario() {
    let config = PlateConfiguration::aluminum().with_grid_size(305, 305);
    let (centre_100, centre_3101, simulation) = centre_at(&config, 100, 3101);

    let grid = simulation.stepper().grid();
    assert_eq!(simulation.stepper().step_index(), 3101);
    assert_border_at(grid, 0.0, "aluminum after 3101 steps");
    assert!(centre_3101 > 0.0);

    // Step 100 lies inside the 4.3 s heating window; by step 3101 the plate
    // has cooled for more than 6 s, so the centre ends below its step-100 value.
    assert_relative_eq!(centre_100, 3.464281087841, max_relative = 1e-9);
    assert_relative_eq!(centre_3101, 2.778638748271, max_relative = 1e-9);

    let (min, max) = field_bounds(grid.current());
    assert!(min >= 0.0);
    assert_relative_eq!(max, centre_3101, max_relative = 1e-12);
}

#[test]
fn test_aluminum_reference_snapshots() {
    let config = PlateConfiguration::aluminum().with_grid_size(305, 305);
    let mut simulation =
        Simulation::from_configuration(&config, SnapshotSchedule::aluminum_reference()).unwrap();
    let mut recorder = SnapshotRecorder::default();

    let summary = simulation.run(3101, &mut [&mut recorder]).unwrap();

    assert_eq!(summary.snapshots, 4);
    let steps: Vec<usize> = recorder.snapshots().iter().map(|s| s.step).collect();
    assert_eq!(steps, vec![1205, 1305, 2000, 3100]);

    let last = recorder.at_step(3100).unwrap();
    assert_eq!(last.updates, 3101);
    assert_relative_eq!(last.time, 3101.0 * simulation.stepper().dt(), max_relative = 1e-12);
    assert_eq!(last.t_hot, 15.0);
    assert_eq!(last.value(CENTRE.0, CENTRE.1), simulation.stepper().grid().value(CENTRE.0, CENTRE.1));

    // Row 130 exported by the study crosses the weld
    let row = last.row(130).unwrap();
    assert_eq!(row.len(), 305);
    assert!(row[130] > row[60]);
}
