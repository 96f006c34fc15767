use crate::core::models::atom::AtomRecord;
use crate::core::models::grid::SurfaceGrid;
use crate::core::models::point::SphericalPoint;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Cannot convert an empty point cloud to spherical coordinates")]
    EmptyCloud,
}

/// A point cloud in spherical coordinates together with its mean radius.
///
/// The mean radius is the reference sphere radius used by the spherical grid
/// parameter estimator and by density normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalCloud {
    pub points: Vec<SphericalPoint>,
    pub mean_radius: f64,
}

#[inline]
pub fn to_spherical(point: &Point3<f64>, center: &Point3<f64>) -> SphericalPoint {
    SphericalPoint::from_cartesian(point, center)
}

#[inline]
pub fn to_cartesian(point: &SphericalPoint, center: &Point3<f64>) -> Point3<f64> {
    point.to_cartesian(center)
}

pub fn points_to_spherical(
    points: &[Point3<f64>],
    center: &Point3<f64>,
) -> Result<SphericalCloud, ConversionError> {
    cloud_from_iter(points.iter().map(|p| to_spherical(p, center)))
}

pub fn atoms_to_spherical(
    atoms: &[AtomRecord],
    center: &Point3<f64>,
) -> Result<SphericalCloud, ConversionError> {
    cloud_from_iter(atoms.iter().map(|a| a.spherical(center)))
}

fn cloud_from_iter<I>(iter: I) -> Result<SphericalCloud, ConversionError>
where
    I: Iterator<Item = SphericalPoint>,
{
    let points: Vec<SphericalPoint> = iter.collect();
    if points.is_empty() {
        return Err(ConversionError::EmptyCloud);
    }
    let mean_radius = points.iter().map(|p| p.rho).sum::<f64>() / points.len() as f64;
    Ok(SphericalCloud {
        points,
        mean_radius,
    })
}

/// Converts every `(rho, phi, theta)` node of a grid to `(x, y, z)` about `center`.
pub fn grid_to_cartesian(grid: &SurfaceGrid, center: &Point3<f64>) -> SurfaceGrid {
    convert_nodes(grid, |node| {
        SphericalPoint::from_vector(node).to_cartesian(center).coords
    })
}

/// Converts every `(x, y, z)` node of a grid to `(rho, phi, theta)` about `center`.
pub fn grid_to_spherical(grid: &SurfaceGrid, center: &Point3<f64>) -> SurfaceGrid {
    convert_nodes(grid, |node| {
        SphericalPoint::from_cartesian(&Point3::from(*node), center).as_vector()
    })
}

fn convert_nodes<F>(grid: &SurfaceGrid, f: F) -> SurfaceGrid
where
    F: Fn(&Vector3<f64>) -> Vector3<f64> + Sync + Send,
{
    #[cfg(not(feature = "parallel"))]
    let iterator = grid.nodes().iter();

    #[cfg(feature = "parallel")]
    let iterator = grid.nodes().par_iter();

    let nodes: Vec<Vector3<f64>> = iterator.map(f).collect();
    SurfaceGrid::from_fn(grid.rows(), grid.cols(), |i, j| nodes[i * grid.cols() + j])
}
