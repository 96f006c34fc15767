use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use tracing::{info, instrument};

use crate::core::models::grid::SurfaceGrid;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::AnalysisError;
use crate::engine::frame::CoordinateFrame;

/// Moment-of-inertia tensor of the nodes of a surface about their centroid,
/// per node and in scaled length units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaTensor {
    pub tensor: Matrix3<f64>,
    pub center_of_mass: Vector3<f64>,
}

impl InertiaTensor {
    /// Eigenvalues of the tensor in ascending order.
    pub fn principal_moments(&self) -> Vector3<f64> {
        let eigen = SymmetricEigen::new(self.tensor);
        let mut moments = [
            eigen.eigenvalues[0],
            eigen.eigenvalues[1],
            eigen.eigenvalues[2],
        ];
        moments.sort_by(|a, b| a.total_cmp(b));
        Vector3::from(moments)
    }
}

#[instrument(skip_all, name = "moment_of_inertia", fields(frame = frame.name()))]
pub fn moment_of_inertia<F: CoordinateFrame>(
    grid: &SurfaceGrid,
    frame: &F,
    config: &AnalysisConfig,
) -> Result<InertiaTensor, AnalysisError> {
    grid.ensure_min_size(2)?;
    let scale = config.units.length_scale;

    let positions: Vec<Vector3<f64>> = grid
        .nodes()
        .iter()
        .map(|node| frame.embed(node).coords / scale)
        .collect();
    let count = positions.len() as f64;
    let center_of_mass = positions.iter().sum::<Vector3<f64>>() / count;

    let mut tensor = Matrix3::zeros();
    for position in &positions {
        let d = position - center_of_mass;
        tensor[(0, 0)] += d.y * d.y + d.z * d.z;
        tensor[(1, 1)] += d.x * d.x + d.z * d.z;
        tensor[(2, 2)] += d.x * d.x + d.y * d.y;
        tensor[(0, 1)] -= d.x * d.y;
        tensor[(0, 2)] -= d.x * d.z;
        tensor[(1, 2)] -= d.y * d.z;
    }
    tensor /= count;
    tensor[(1, 0)] = tensor[(0, 1)];
    tensor[(2, 0)] = tensor[(0, 2)];
    tensor[(2, 1)] = tensor[(1, 2)];

    info!(
        i_xx = tensor[(0, 0)],
        i_yy = tensor[(1, 1)],
        i_zz = tensor[(2, 2)],
        "Moment of inertia computed."
    );
    Ok(InertiaTensor {
        tensor,
        center_of_mass,
    })
}
