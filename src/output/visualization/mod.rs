//! Visualization of plate temperature fields
//!
//! This module renders temperature data with the `plotters` library. The
//! output format (PNG or SVG) follows the file extension.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`, `ViewWindow`)
//! - **colormap**: Scalar-to-colour maps (`Colormap::Hot` by default)
//! - **heatmap**: Full-field heat maps and the `HeatmapObserver`
//! - **profile**: Row profiles `T(j·dy)` and their comparison over time
//!
//! # When to Use Which Function
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | Field at one instant | `heatmap` | `plot_heatmap` |
//! | Field of a snapshot, `(Tcool, Thot)` scale | `heatmap` | `plot_snapshot` |
//! | Images during a run | `heatmap` | `HeatmapObserver` |
//! | One row of the plate | `profile` | `plot_profile` |
//! | Several rows / runs | `profile` | `plot_profile_comparison` |
//! | One row over time | `profile` | `plot_profile_evolution` |

pub mod colormap;
pub mod config;
pub mod heatmap;
pub mod profile;

pub use colormap::Colormap;
pub use config::{IntoOptionalTitle, PlotConfig, ViewWindow, NO_TITLE};
pub use heatmap::{plot_heatmap, plot_snapshot, HeatmapObserver};
pub use profile::{plot_profile, plot_profile_comparison, plot_profile_evolution};
