use nalgebra::Point3;
use tracing::{info, instrument};

use crate::core::models::grid::SurfaceGrid;
use crate::core::utils::geometry::{solid_angle_factor, triangle_area};
use crate::engine::cells::map_cells;
use crate::engine::config::Tolerances;
use crate::engine::error::AnalysisError;
use crate::engine::frame::{CoordinateFrame, SphericalFrame};

/// Area of a closed surface and the volume it encloses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaVolume {
    /// Triangulated surface area, in squared input units.
    pub area: f64,
    /// Enclosed volume, in cubed input units.
    pub volume: f64,
}

/// Triangulated area of a surface grid read in `frame`.
///
/// Each cell is split into the triangles `{(i-1,j-1), (i-1,j), (i,j-1)}` and
/// `{(i-1,j), (i,j-1), (i,j)}` whose Heron areas are summed.
#[instrument(skip_all, name = "surface_area", fields(frame = frame.name()))]
pub fn surface_area<F: CoordinateFrame>(grid: &SurfaceGrid, frame: &F) -> Result<f64, AnalysisError> {
    grid.ensure_min_size(2)?;
    let embedded = frame.embed_grid(grid);

    let cell_areas = map_cells(embedded.shape(), |i, j| {
        let [p00, p01, p10, p11] = corner_points(&embedded, i, j);
        triangle_area(&p00, &p01, &p10) + triangle_area(&p01, &p10, &p11)
    });
    let area: f64 = cell_areas.iter().sum();

    info!(area, "Surface area computed.");
    Ok(area)
}

/// Area and enclosed volume of a spherical `(rho, phi, theta)` grid.
///
/// Each triangle adds `factor · area · rho / 3` to the volume, a cone from
/// the centre to the patch weighted by how squarely the patch faces the
/// radial direction at the cell centre. The first triangle takes `rho` from
/// node `(i-1, j-1)`, the second from node `(i, j)`.
#[instrument(skip_all, name = "surface_area_and_volume")]
pub fn surface_area_and_volume(
    grid: &SurfaceGrid,
    frame: &SphericalFrame,
    tolerances: &Tolerances,
) -> Result<AreaVolume, AnalysisError> {
    grid.ensure_min_size(2)?;
    let embedded = frame.embed_grid(grid);
    let min_normal_sq = tolerances.degenerate_triangle;

    let contributions = map_cells(embedded.shape(), |i, j| {
        let [p00, p01, p10, p11] = corner_points(&embedded, i, j);
        let (phi, theta) = frame.cell_center(i, j);

        let area1 = triangle_area(&p00, &p01, &p10);
        let factor1 = solid_angle_factor(&p00, &p01, &p10, phi, theta, min_normal_sq);
        let rho1 = grid.node(i - 1, j - 1)[0];

        let area2 = triangle_area(&p01, &p10, &p11);
        let factor2 = solid_angle_factor(&p01, &p10, &p11, phi, theta, min_normal_sq);
        let rho2 = grid.node(i, j)[0];

        (
            area1 + area2,
            factor1 * area1 * rho1 / 3.0 + factor2 * area2 * rho2 / 3.0,
        )
    });

    let (area, volume) = contributions
        .iter()
        .fold((0.0, 0.0), |(a, v), (da, dv)| (a + da, v + dv));

    info!(area, volume, "Surface area and enclosed volume computed.");
    Ok(AreaVolume { area, volume })
}

#[inline]
fn corner_points(grid: &SurfaceGrid, i: usize, j: usize) -> [Point3<f64>; 4] {
    grid.cell_corners(i, j).map(|node| Point3::from(*node))
}
