//! # Core Module
//!
//! Stateless building blocks for the surface analyses: data models, vector
//! geometry, coordinate conversion and the grid parameter estimator.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Spherical points, atom records and the structured `SurfaceGrid`
//! - **Geometry and Conversion** ([`utils`]) - Heron areas, directional alignment factors, cell
//!   normals, and Cartesian/spherical conversion of points, clouds and grids
//! - **Grid Parameters** ([`grid_params`]) - Fitting radius, smoothing coefficient and bin count
//!   estimates consumed by the surface-fitting step that produces the grids
//!
//! Nothing in this layer keeps state between calls; every function takes its inputs by
//! reference and returns freshly allocated values.

pub mod grid_params;
pub mod models;
pub mod utils;
