use nalgebra::DMatrix;
use tracing::{debug, info, instrument, warn};

use crate::core::models::grid::SurfaceGrid;
use crate::core::utils::geometry::{cos_angle, legendre_p2};
use crate::engine::cells::{CellStats, RunningMoments, cell_map, cell_normal, map_cells};
use crate::engine::config::AnalysisConfig;
use crate::engine::error::AnalysisError;
use crate::engine::frame::CoordinateFrame;

/// Orientational order of a surface relative to its frame's reference direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderParameter {
    /// `P2` of every cell; cells that did not contribute hold zero.
    pub map: DMatrix<f64>,
    pub stats: CellStats,
    /// Count of cells per whole degree between normal and reference direction.
    pub angle_histogram: Vec<f64>,
}

enum CellOrder {
    Degenerate,
    Reversed,
    Counted { p2: f64, angle_bin: Option<usize> },
}

/// Second Legendre polynomial of the angle between each cell normal and the
/// frame's reference direction (the z axis, or the radial direction at the
/// cell centre).
///
/// Cells whose normal is shorter than the degenerate-normal tolerance are
/// skipped. A normal more than 90 degrees away from the reference never
/// enters the angle histogram; whether it still enters the map and the
/// statistics is decided by [`CoordinateFrame::counts_reversed_normals`].
#[instrument(skip_all, name = "order_parameter", fields(frame = frame.name()))]
pub fn order_parameter<F: CoordinateFrame>(
    grid: &SurfaceGrid,
    frame: &F,
    config: &AnalysisConfig,
) -> Result<OrderParameter, AnalysisError> {
    grid.ensure_min_size(2)?;
    let embedded = frame.embed_grid(grid);
    let bins = frame.angle_bins(&config.order);
    let min_normal = config.tolerances.degenerate_normal;
    let keep_reversed = frame.counts_reversed_normals();

    let cells = map_cells(embedded.shape(), |i, j| {
        let normal = cell_normal(&embedded, i, j);
        if normal.norm() < min_normal {
            return CellOrder::Degenerate;
        }
        let cos = cos_angle(&normal, &frame.reference_direction(i, j));
        let degrees = cos.acos().to_degrees();
        let reversed = degrees > 90.0;
        if reversed && !keep_reversed {
            return CellOrder::Reversed;
        }
        let angle_bin = if reversed {
            None
        } else {
            Some(degrees.round_ties_even() as usize).filter(|&b| b < bins)
        };
        CellOrder::Counted {
            p2: legendre_p2(cos),
            angle_bin,
        }
    });

    let mut values = Vec::with_capacity(cells.len());
    let mut angle_histogram = vec![0.0; bins];
    let mut moments = RunningMoments::default();
    let (mut degenerate, mut reversed) = (0usize, 0usize);

    for cell in cells {
        match cell {
            CellOrder::Degenerate => {
                degenerate += 1;
                values.push(0.0);
            }
            CellOrder::Reversed => {
                reversed += 1;
                values.push(0.0);
            }
            CellOrder::Counted { p2, angle_bin } => {
                moments.push(p2);
                values.push(p2);
                if let Some(bin) = angle_bin {
                    angle_histogram[bin] += 1.0;
                }
            }
        }
    }

    let stats = moments.finish();
    if degenerate > 0 || reversed > 0 {
        debug!(degenerate, reversed, "Cells left out of the order parameter.");
    }
    if stats.count == 0 {
        warn!("No cell contributed to the order parameter; reporting zeros.");
    }
    info!(
        mean = stats.mean,
        std_dev = stats.std_dev,
        cells = stats.count,
        "Order parameter computed."
    );

    Ok(OrderParameter {
        map: cell_map(embedded.shape(), &values),
        stats,
        angle_histogram,
    })
}
