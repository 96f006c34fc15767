//! # Core Models Module
//!
//! Plain data types shared by every engine: points in both coordinate systems,
//! the atom record handed over by structure readers, and the structured
//! surface grid produced by the surface-fitting step.
//!
//! - [`point`] - Spherical point type and the Cartesian/spherical point transforms
//! - [`atom`] - Atom record with position and bookkeeping fields
//! - [`grid`] - `(N, M)` grid of coordinate triples with shape validation
//!
//! Cartesian positions use [`nalgebra::Point3`] directly.
//!
//! ```ignore
//! use suave::core::models::grid::SurfaceGrid;
//! use nalgebra::Vector3;
//!
//! let flat = SurfaceGrid::from_fn(11, 11, |i, j| Vector3::new(i as f64, j as f64, 0.0));
//! assert_eq!(flat.shape(), (11, 11));
//! ```

pub mod atom;
pub mod grid;
pub mod point;
