//! Per-cell surface metrics: area and enclosed volume, order parameter,
//! thickness, topography, and the moment-of-inertia tensor.

pub mod area;
pub mod inertia;
pub mod order;
pub mod thickness;
pub mod topography;

pub use area::{AreaVolume, surface_area, surface_area_and_volume};
pub use inertia::{InertiaTensor, moment_of_inertia};
pub use order::{OrderParameter, order_parameter};
pub use thickness::{PlanarThickness, RadialThickness, thickness_cartesian, thickness_spherical};
pub use topography::{Topography, topography};
