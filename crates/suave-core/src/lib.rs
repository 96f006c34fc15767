//! # SUAVE Core Library
//!
//! Geometry and statistics of discretized molecular surfaces such as lipid
//! bilayers and vesicles, described as regular grids in either a planar
//! (Cartesian) or a spherical parameterization.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers, each depending only on the ones below it.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`SurfaceGrid`, `AtomRecord`,
//!   `SphericalPoint`), geometric primitives, Cartesian/spherical coordinate conversion and the
//!   grid parameter estimator used before a surface is fitted.
//!
//! - **[`engine`]: The Logic Core.** The property-extraction engines: surface area and
//!   enclosed volume, order parameter, thickness, topography, moment of inertia, radial density
//!   profiles, fit RMSD and the statistics engine. Every numeric convention they rely on is
//!   carried by an explicit `AnalysisConfig`, and both coordinate systems are served by the
//!   same engines through the `CoordinateFrame` trait.
//!
//! - **[`workflows`]: The Public API.** Complete analyses of a bilayer, a vesicle or a scalar
//!   series, built from the engines and returning plain result structs.
//!
//! Enable the `parallel` feature to evaluate grid cells and autocorrelation lags on the rayon
//! thread pool.

pub mod core;
pub mod engine;
pub mod workflows;
