use crate::core::models::grid::SurfaceGrid;
use crate::core::models::point::SphericalPoint;
use crate::engine::config::AnalysisConfig;
use crate::engine::density::{DensityProfile, density_profile_from_grids};
use crate::engine::error::AnalysisError;
use crate::engine::frame::SphericalFrame;
use crate::engine::metrics::{
    AreaVolume, InertiaTensor, OrderParameter, RadialThickness, moment_of_inertia,
    order_parameter, surface_area_and_volume, thickness_spherical,
};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct ShellAnalysis {
    pub geometry: AreaVolume,
    pub order: OrderParameter,
    pub inertia: InertiaTensor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VesicleAnalysis {
    pub outer: ShellAnalysis,
    pub inner: ShellAnalysis,
    pub thickness: RadialThickness,
    pub density: Option<DensityProfile>,
}

/// Geometric analysis of a vesicle from the `(rho, phi, theta)` grids of its
/// outer and inner leaflets.
#[instrument(skip_all, name = "vesicle_workflow")]
pub fn analyze(
    outer: &SurfaceGrid,
    inner: &SurfaceGrid,
    frame: &SphericalFrame,
    config: &AnalysisConfig,
) -> Result<VesicleAnalysis, AnalysisError> {
    outer.ensure_same_shape(inner)?;

    let outer_shell = analyze_shell(outer, frame, config)?;
    let inner_shell = analyze_shell(inner, frame, config)?;
    let thickness = thickness_spherical(outer, inner, config)?;

    info!(
        outer_area = outer_shell.geometry.area,
        inner_area = inner_shell.geometry.area,
        outer_volume = outer_shell.geometry.volume,
        thickness = thickness.stats.mean,
        "Vesicle analysis complete."
    );

    Ok(VesicleAnalysis {
        outer: outer_shell,
        inner: inner_shell,
        thickness,
        density: None,
    })
}

/// [`analyze`] plus the radial density of `points` between the two leaflets.
///
/// `points` must already be expressed about the frame centre. `divisions`
/// defaults to the configured value.
pub fn analyze_with_density(
    outer: &SurfaceGrid,
    inner: &SurfaceGrid,
    frame: &SphericalFrame,
    points: &[SphericalPoint],
    divisions: Option<usize>,
    config: &AnalysisConfig,
) -> Result<VesicleAnalysis, AnalysisError> {
    let mut analysis = analyze(outer, inner, frame, config)?;
    let divisions = divisions.unwrap_or(config.density.divisions);
    analysis.density = Some(density_profile_from_grids(
        points,
        outer,
        inner,
        frame,
        divisions,
        &config.density,
    )?);
    Ok(analysis)
}

fn analyze_shell(
    grid: &SurfaceGrid,
    frame: &SphericalFrame,
    config: &AnalysisConfig,
) -> Result<ShellAnalysis, AnalysisError> {
    Ok(ShellAnalysis {
        geometry: surface_area_and_volume(grid, frame, &config.tolerances)?,
        order: order_parameter(grid, frame, config)?,
        inertia: moment_of_inertia(grid, frame, config)?,
    })
}
