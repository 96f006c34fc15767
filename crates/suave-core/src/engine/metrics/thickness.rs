use nalgebra::DMatrix;
use tracing::{debug, info, instrument};

use crate::core::models::grid::SurfaceGrid;
use crate::engine::cells::{CellStats, RunningMoments, cell_map, cell_normal, map_cells};
use crate::engine::config::AnalysisConfig;
use crate::engine::error::AnalysisError;
use crate::engine::frame::CartesianFrame;

/// Separation between two planar leaflets.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarThickness {
    /// Thickness projected on the local normal, in input units.
    pub map: DMatrix<f64>,
    /// Statistics of the map values divided by the length scale.
    pub stats: CellStats,
    /// Volume between the two surfaces, in cubed input units.
    pub volume: f64,
}

/// Separation between two concentric spherical surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialThickness {
    /// Radial gap per cell, in input units.
    pub map: DMatrix<f64>,
    /// Statistics of the map values divided by the length scale.
    pub stats: CellStats,
}

/// Local thickness between two planar surfaces.
///
/// The normal of each cell comes from `average` (typically the midplane of
/// the two leaflets); cells where it degenerates are skipped. With `z1` and
/// `z2` the corner-averaged heights of the two surfaces, the map holds
/// `|n_z (z1 - z2)| / |n|` and the volume grows by `|z1 - z2|·dx·dy`.
#[instrument(skip_all, name = "thickness_cartesian")]
pub fn thickness_cartesian(
    upper: &SurfaceGrid,
    lower: &SurfaceGrid,
    average: &SurfaceGrid,
    frame: &CartesianFrame,
    config: &AnalysisConfig,
) -> Result<PlanarThickness, AnalysisError> {
    upper.ensure_same_shape(lower)?;
    upper.ensure_same_shape(average)?;
    upper.ensure_min_size(2)?;
    let min_normal = config.tolerances.degenerate_normal;
    let scale = config.units.length_scale;

    let cells = map_cells(upper.shape(), |i, j| {
        let normal = cell_normal(average, i, j);
        let norm = normal.norm();
        if norm < min_normal {
            return None;
        }
        let gap = upper.corner_mean(i, j, 2) - lower.corner_mean(i, j, 2);
        Some(((normal.z * gap).abs() / norm, (gap * frame.dx * frame.dy).abs()))
    });

    let mut values = Vec::with_capacity(cells.len());
    let mut moments = RunningMoments::default();
    let mut volume = 0.0;
    let mut skipped = 0usize;
    for cell in cells {
        match cell {
            Some((projected, element)) => {
                values.push(projected);
                volume += element;
                moments.push(projected / scale);
            }
            None => {
                skipped += 1;
                values.push(0.0);
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, "Degenerate cells left out of the thickness.");
    }
    let stats = moments.finish();
    info!(
        mean = stats.mean,
        std_dev = stats.std_dev,
        volume,
        "Planar thickness computed."
    );

    Ok(PlanarThickness {
        map: cell_map(upper.shape(), &values),
        stats,
        volume,
    })
}

/// Radial gap between two spherical `(rho, phi, theta)` grids: the difference
/// of their corner-averaged `rho` in every cell.
#[instrument(skip_all, name = "thickness_spherical")]
pub fn thickness_spherical(
    outer: &SurfaceGrid,
    inner: &SurfaceGrid,
    config: &AnalysisConfig,
) -> Result<RadialThickness, AnalysisError> {
    outer.ensure_same_shape(inner)?;
    outer.ensure_min_size(2)?;
    let scale = config.units.length_scale;

    let values = map_cells(outer.shape(), |i, j| {
        (outer.corner_mean(i, j, 0) - inner.corner_mean(i, j, 0)).abs()
    });

    let mut moments = RunningMoments::default();
    for &gap in &values {
        moments.push(gap / scale);
    }

    let stats = moments.finish();
    info!(
        mean = stats.mean,
        std_dev = stats.std_dev,
        "Radial thickness computed."
    );

    Ok(RadialThickness {
        map: cell_map(outer.shape(), &values),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn plane(n: usize, z: f64) -> SurfaceGrid {
        SurfaceGrid::from_fn(n, n, |i, j| Vector3::new(i as f64, j as f64, z))
    }

    fn shell(n: usize, rho: f64) -> SurfaceGrid {
        SurfaceGrid::from_fn(n, n, |i, j| Vector3::new(rho, i as f64 * 0.1, j as f64 * 0.1))
    }

    #[test]
    fn thickness_cartesian_of_parallel_planes_is_their_gap() {
        let upper = plane(5, 20.0);
        let lower = plane(5, -20.0);
        let average = upper.midplane(&lower).unwrap();
        let frame = CartesianFrame::new(1.0, 1.0).unwrap();
        let result =
            thickness_cartesian(&upper, &lower, &average, &frame, &AnalysisConfig::default())
                .unwrap();

        assert_eq!(result.map.shape(), (4, 4));
        assert!(result.map.iter().all(|&t| f64_approx_equal(t, 40.0)));
        assert!(f64_approx_equal(result.stats.mean, 4.0));
        assert!(result.stats.std_dev < 1e-6);
        assert_eq!(result.stats.count, 16);
        assert!(f64_approx_equal(result.volume, 16.0 * 40.0));
    }

    #[test]
    fn thickness_cartesian_volume_uses_frame_spacing() {
        let upper = plane(3, 5.0);
        let lower = plane(3, 1.0);
        let average = upper.midplane(&lower).unwrap();
        let frame = CartesianFrame::new(2.0, 0.5).unwrap();
        let result =
            thickness_cartesian(&upper, &lower, &average, &frame, &AnalysisConfig::default())
                .unwrap();
        assert!(f64_approx_equal(result.volume, 4.0 * 4.0 * 2.0 * 0.5));
    }

    #[test]
    fn thickness_cartesian_skips_cells_with_degenerate_average_normal() {
        let upper = plane(3, 5.0);
        let lower = plane(3, 1.0);
        let collapsed = SurfaceGrid::from_fn(3, 3, |_, _| Vector3::zeros());
        let frame = CartesianFrame::new(1.0, 1.0).unwrap();
        let result =
            thickness_cartesian(&upper, &lower, &collapsed, &frame, &AnalysisConfig::default())
                .unwrap();
        assert_eq!(result.stats.count, 0);
        assert_eq!(result.volume, 0.0);
    }

    #[test]
    fn thickness_cartesian_rejects_mismatched_grids() {
        let frame = CartesianFrame::new(1.0, 1.0).unwrap();
        let result = thickness_cartesian(
            &plane(4, 1.0),
            &plane(3, 0.0),
            &plane(4, 0.5),
            &frame,
            &AnalysisConfig::default(),
        );
        assert!(matches!(result, Err(AnalysisError::Grid { .. })));
    }

    #[test]
    fn thickness_spherical_is_difference_of_radii() {
        let result =
            thickness_spherical(&shell(4, 50.0), &shell(4, 10.0), &AnalysisConfig::default())
                .unwrap();
        assert!(result.map.iter().all(|&t| f64_approx_equal(t, 40.0)));
        assert!(f64_approx_equal(result.stats.mean, 4.0));
        assert_eq!(result.stats.count, 9);
    }

    #[test]
    fn thickness_spherical_is_symmetric_in_its_arguments() {
        let config = AnalysisConfig::default();
        let a = thickness_spherical(&shell(3, 12.0), &shell(3, 30.0), &config).unwrap();
        let b = thickness_spherical(&shell(3, 30.0), &shell(3, 12.0), &config).unwrap();
        assert_eq!(a, b);
    }
}
