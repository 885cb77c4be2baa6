//! Example: Aluminum plate heated by a weld
//!
//! Reproduces the aluminum weld study: a 304.8 mm plate on a 305 × 305 grid
//! of 1 mm cells, clamped by the aluminum weld ramp for 4.3 s, then left to
//! cool by diffusion.
//!
//! **Physical System**:
//! - Diffusivity D = 71 mm²/s
//! - Ambient (border) temperature 0
//! - Weld ramp f(t) = 11.22253 − 11.12797·exp(−1.03475 t)
//! - Clamped cells [121, 139) × [121, 139)
//!
//! **Outputs** (in the system temp directory):
//! - Heat maps at steps 1205, 1305, 2000 and 3100
//! - Row 130 as CSV at the same steps
//! - Evolution of row 130 over the four snapshots

use therm_rs::{
    output::{
        export::{CsvConfig, CsvExporter, CsvLayout, CsvMetadata},
        visualization::plot_profile_evolution,
        HeatmapObserver, PlotConfig, RowCsvObserver, ViewWindow,
    },
    solver::{PlateConfiguration, Simulation, SnapshotRecorder, SnapshotSchedule},
};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Aluminum Weld - Plate Heat Conduction");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Plate configuration ======

    let config = PlateConfiguration::aluminum().with_grid_size(305, 305);
    let nsteps = 3101;

    let mut simulation = Simulation::from_configuration(&config, SnapshotSchedule::aluminum_reference())?
        .with_finiteness_check(true);
    let dt = simulation.stepper().dt();

    println!("Plate:");
    println!("  Grid        : {} × {}", 305, 305);
    println!("  dx, dy      : {} mm, {} mm", config.dx, config.dy);
    println!("  D           : {} mm²/s", config.diffusivity);
    println!("  Tcool, Thot : {}, {}", config.t_cool, config.t_hot);
    println!("  Heating     : {} s", config.source.heating_duration());
    println!("Simulation:");
    println!("  dt          : {:.6} s", dt);
    println!("  Steps       : {} ({:.3} s)", nsteps, nsteps as f64 * dt);
    println!("  Stability   : {:.4}\n", simulation.stepper().stability_number());

    // ====== Output collaborators ======

    let out_dir = std::env::temp_dir().join("therm_rs_aluminum");
    std::fs::create_dir_all(&out_dir)?;

    let metadata = CsvMetadata::from_simulation("Aluminum", config.diffusivity, dt);
    let exporter = CsvExporter::new(CsvConfig::high_precision().with_metadata(metadata), CsvLayout::Row(130));
    let mut rows = RowCsvObserver::with_exporter(&out_dir, "aluminum_row130", exporter);

    let mut images = HeatmapObserver::new(&out_dir, "aluminum").with_config(
        PlotConfig::heatmap("Aluminum")
            .with_color_range(config.t_cool, config.t_hot)
            .with_view(ViewWindow::aluminum_reference()),
    );

    let mut recorder = SnapshotRecorder::default();

    // ====== Run ======

    let start = Instant::now();
    let summary = simulation.run(nsteps, &mut [&mut rows, &mut images, &mut recorder])?;
    let elapsed = start.elapsed();

    println!("Completed {} steps in {:.2?}", summary.steps, elapsed);
    println!("  Final time  : {:.4} s", summary.final_time);
    println!("  Centre T    : {:.6}\n", simulation.stepper().grid().value(130, 130));

    for snapshot in recorder.snapshots() {
        println!(
            "  step {:>5}  t = {:>7.4} s  T(130,130) = {:.6}",
            snapshot.step,
            snapshot.time,
            snapshot.value(130, 130)
        );
    }

    let evolution = out_dir.join("aluminum_row130_evolution.png");
    plot_profile_evolution(
        recorder.snapshots(),
        130,
        &evolution,
        Some(&PlotConfig::profile("Aluminum, row 130")),
    )?;

    println!("\nFiles written to {}:", out_dir.display());
    for path in rows.written().iter().chain(images.written()) {
        println!("  {}", path.display());
    }
    println!("  {}", evolution.display());

    Ok(())
}
