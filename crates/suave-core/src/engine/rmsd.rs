use nalgebra::Point3;
use tracing::{info, instrument};

use crate::core::models::grid::SurfaceGrid;
use crate::core::models::point::SphericalPoint;
use crate::engine::error::AnalysisError;
use crate::engine::frame::{CartesianFrame, CoordinateFrame, SphericalFrame};

/// Sum of squared height deviations of `points` from `grid`.
///
/// `locate` yields the fractional grid coordinates and the observed height of
/// a point; they are rounded to the nearest node. A point whose node lies
/// outside the grid means the fit does not cover the data and is an error.
fn squared_deviation_sum<P, L>(
    points: &[P],
    grid: &SurfaceGrid,
    component: usize,
    index_offset: usize,
    locate: L,
) -> Result<f64, AnalysisError>
where
    L: Fn(&P) -> (f64, f64, f64),
{
    let (rows, cols) = grid.shape();
    let mut sum = 0.0;
    for (k, point) in points.iter().enumerate() {
        let (u, v, height) = locate(point);
        let (i, j) = (u.round_ties_even(), v.round_ties_even());
        if !(i >= 0.0 && j >= 0.0 && (i as usize) < rows && (j as usize) < cols) {
            return Err(AnalysisError::IndexOutOfDomain {
                point_index: index_offset + k,
                i: i as i64,
                j: j as i64,
                shape: (rows, cols),
            });
        }
        let delta = height - grid.node(i as usize, j as usize)[component];
        sum += delta * delta;
    }
    Ok(sum)
}

/// Fit quality of two planar leaflets.
///
/// A point `(x, y, z)` is compared with the `z` of node
/// `(round((x - x_min)/dx), round((y - y_min)/dy))` of its own leaflet's grid;
/// the mean runs over the points of both leaflets.
#[instrument(skip_all, name = "rmsd_cartesian")]
pub fn rmsd_cartesian(
    first_points: &[Point3<f64>],
    second_points: &[Point3<f64>],
    first_grid: &SurfaceGrid,
    second_grid: &SurfaceGrid,
    x_min: f64,
    y_min: f64,
    frame: &CartesianFrame,
) -> Result<f64, AnalysisError> {
    let total = first_points.len() + second_points.len();
    if total == 0 {
        return Err(AnalysisError::EmptyInput("RMSD needs at least one point"));
    }
    let component = frame.height_component();
    let locate = |p: &Point3<f64>| ((p.x - x_min) / frame.dx, (p.y - y_min) / frame.dy, p.z);

    let sum = squared_deviation_sum(first_points, first_grid, component, 0, locate)?
        + squared_deviation_sum(
            second_points,
            second_grid,
            component,
            first_points.len(),
            locate,
        )?;

    let rmsd = (sum / total as f64).sqrt();
    info!(rmsd, points = total, "Planar fit RMSD computed.");
    Ok(rmsd)
}

/// Fit quality of two spherical surfaces: `rho` against the `rho` of node
/// `(round(phi/dphi), round(theta/dtheta))`, averaged over both point sets.
#[instrument(skip_all, name = "rmsd_spherical")]
pub fn rmsd_spherical(
    first_points: &[SphericalPoint],
    second_points: &[SphericalPoint],
    first_grid: &SurfaceGrid,
    second_grid: &SurfaceGrid,
    frame: &SphericalFrame,
) -> Result<f64, AnalysisError> {
    let total = first_points.len() + second_points.len();
    if total == 0 {
        return Err(AnalysisError::EmptyInput("RMSD needs at least one point"));
    }
    let component = frame.height_component();
    let locate = |p: &SphericalPoint| (p.phi / frame.dphi, p.theta / frame.dtheta, p.rho);

    let sum = squared_deviation_sum(first_points, first_grid, component, 0, locate)?
        + squared_deviation_sum(
            second_points,
            second_grid,
            component,
            first_points.len(),
            locate,
        )?;

    let rmsd = (sum / total as f64).sqrt();
    info!(rmsd, points = total, "Spherical fit RMSD computed.");
    Ok(rmsd)
}

/// Fit quality of a single surface sampled uniformly in `cos(phi)`.
///
/// Rows are indexed by `round((cos(phi) + 1)/dz + 0.5)` and columns by
/// `round(theta/dtheta)`; the mean runs over this one point set.
#[instrument(skip_all, name = "rmsd_inertia")]
pub fn rmsd_inertia(
    points: &[SphericalPoint],
    grid: &SurfaceGrid,
    dz: f64,
    dtheta: f64,
) -> Result<f64, AnalysisError> {
    if points.is_empty() {
        return Err(AnalysisError::EmptyInput("RMSD needs at least one point"));
    }
    for (name, value) in [("dz", dz), ("dtheta", dtheta)] {
        if !(value > 0.0) {
            return Err(AnalysisError::InvalidParameter {
                name,
                value,
                reason: "grid spacing must be positive",
            });
        }
    }
    let locate = |p: &SphericalPoint| ((p.phi.cos() + 1.0) / dz + 0.5, p.theta / dtheta, p.rho);
    let sum = squared_deviation_sum(points, grid, 0, 0, locate)?;

    let rmsd = (sum / points.len() as f64).sqrt();
    info!(rmsd, points = points.len(), "Inertia-frame fit RMSD computed.");
    Ok(rmsd)
}
