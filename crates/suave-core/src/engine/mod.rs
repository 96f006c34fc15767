//! # Engine Module
//!
//! The property-extraction engines that turn structured surface grids into
//! geometric and statistical quantities.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Tolerances, unit scale and histogram layouts, loaded from TOML
//! - **Coordinate Frames** ([`frame`]) - Cartesian and spherical readings of a grid behind one trait
//! - **Surface Metrics** ([`metrics`]) - Area, enclosed volume, order parameter, thickness,
//!   topography and moment of inertia
//! - **Density Profiles** ([`density`]) - Radial particle density between two reference surfaces
//! - **Fit Quality** ([`rmsd`]) - Deviation of raw points from the fitted grids
//! - **Statistics** ([`stats`]) - Moments, density histograms, percentiles and autocorrelation
//! - **Error Handling** ([`error`]) - The single error type every engine returns
//!
//! ## Conventions
//!
//! Cell-based metrics visit the interior cells `i ∈ [1, N)`, `j ∈ [1, M)` whose
//! corners are the nodes `(i-1, j-1), (i-1, j), (i, j-1), (i, j)`, and return
//! `(N-1) × (M-1)` maps. Degenerate cells and out-of-range density points are
//! skipped; points outside the fitted domain are an error for the RMSD engines.
//! With the `parallel` feature, rows of cells are evaluated on the rayon pool
//! and reduced in row order.

pub(crate) mod cells;
pub mod config;
pub mod density;
pub mod error;
pub mod frame;
pub mod metrics;
pub mod rmsd;
pub mod stats;

pub use cells::CellStats;
