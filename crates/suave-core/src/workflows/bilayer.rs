use crate::core::models::grid::SurfaceGrid;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::AnalysisError;
use crate::engine::frame::CartesianFrame;
use crate::engine::metrics::{
    OrderParameter, PlanarThickness, Topography, order_parameter, surface_area,
    thickness_cartesian, topography,
};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct LeafletAnalysis {
    pub area: f64,
    pub order: OrderParameter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BilayerAnalysis {
    pub upper: LeafletAnalysis,
    pub lower: LeafletAnalysis,
    pub thickness: PlanarThickness,
    pub topography: Topography,
}

/// Full geometric analysis of a planar bilayer from the fitted grids of its
/// two leaflets. Thickness normals are taken from the node-wise midplane.
#[instrument(skip_all, name = "bilayer_workflow")]
pub fn analyze(
    upper: &SurfaceGrid,
    lower: &SurfaceGrid,
    frame: &CartesianFrame,
    config: &AnalysisConfig,
) -> Result<BilayerAnalysis, AnalysisError> {
    let midplane = upper.midplane(lower)?;
    midplane.ensure_min_size(2)?;

    let upper_leaflet = LeafletAnalysis {
        area: surface_area(upper, frame)?,
        order: order_parameter(upper, frame, config)?,
    };
    let lower_leaflet = LeafletAnalysis {
        area: surface_area(lower, frame)?,
        order: order_parameter(lower, frame, config)?,
    };
    let thickness = thickness_cartesian(upper, lower, &midplane, frame, config)?;
    let topography = topography(upper, lower, config)?;

    info!(
        upper_area = upper_leaflet.area,
        lower_area = lower_leaflet.area,
        thickness = thickness.stats.mean,
        "Bilayer analysis complete."
    );

    Ok(BilayerAnalysis {
        upper: upper_leaflet,
        lower: lower_leaflet,
        thickness,
        topography,
    })
}
