use nalgebra::DMatrix;
use tracing::{info, instrument};

use crate::core::models::grid::SurfaceGrid;
use crate::engine::cells::{CellStats, RunningMoments, cell_map, map_cells};
use crate::engine::config::AnalysisConfig;
use crate::engine::error::AnalysisError;

#[derive(Debug, Clone, PartialEq)]
pub struct Topography {
    /// `(z1 + z2) / scale` per cell.
    pub map: DMatrix<f64>,
    pub stats: CellStats,
}

/// Midplane height of two planar surfaces.
///
/// For corner-averaged heights `z1`, `z2` and `topo = z1 + z2`, the map and
/// the mean use `topo / s` while the second moment accumulates `topo² / s²`
/// with `s` the length scale.
#[instrument(skip_all, name = "topography")]
pub fn topography(
    upper: &SurfaceGrid,
    lower: &SurfaceGrid,
    config: &AnalysisConfig,
) -> Result<Topography, AnalysisError> {
    upper.ensure_same_shape(lower)?;
    upper.ensure_min_size(2)?;
    let scale = config.units.length_scale;

    let sums = map_cells(upper.shape(), |i, j| {
        upper.corner_mean(i, j, 2) + lower.corner_mean(i, j, 2)
    });

    let mut values = Vec::with_capacity(sums.len());
    let mut moments = RunningMoments::default();
    for topo in sums {
        values.push(topo / scale);
        moments.push_with_square(topo / scale, topo * topo / (scale * scale));
    }

    let stats = moments.finish();
    info!(mean = stats.mean, std_dev = stats.std_dev, "Topography computed.");

    Ok(Topography {
        map: cell_map(upper.shape(), &values),
        stats,
    })
}
