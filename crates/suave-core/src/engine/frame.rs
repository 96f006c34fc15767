use super::config::OrderConfig;
use super::error::AnalysisError;
use crate::core::models::grid::SurfaceGrid;
use crate::core::models::point::{SphericalPoint, unit_radial};
use nalgebra::{Point3, Vector3};

/// How the nodes of a [`SurfaceGrid`] are to be read.
///
/// A grid only stores triples; the frame decides whether they are `(x, y, z)`
/// or `(rho, phi, theta)`, how they embed into Cartesian space, and which
/// direction a surface normal is compared against. Engines that work the same
/// way in both parameterisations (area, order parameter, inertia, RMSD lookup)
/// are written once against this trait.
pub trait CoordinateFrame: Sync {
    /// Short label used in log events.
    fn name(&self) -> &'static str;

    /// Cartesian position of a grid node.
    fn embed(&self, node: &Vector3<f64>) -> Point3<f64>;

    /// Component of a node that carries the surface height (z or rho).
    fn height_component(&self) -> usize;

    /// Direction the normal of cell `(i, j)` is compared against.
    fn reference_direction(&self, i: usize, j: usize) -> Vector3<f64>;

    /// Length of the order-parameter angle histogram.
    fn angle_bins(&self, config: &OrderConfig) -> usize;

    /// Whether a cell whose normal is more than 90 degrees from the reference
    /// direction still contributes to the order-parameter map and statistics.
    fn counts_reversed_normals(&self) -> bool;

    /// Embeds every node of `grid`, keeping its shape.
    fn embed_grid(&self, grid: &SurfaceGrid) -> SurfaceGrid {
        grid.map_nodes(|node| self.embed(node).coords)
    }
}

/// Planar parameterisation: nodes are `(x, y, z)` on a regular `dx × dy` lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianFrame {
    pub dx: f64,
    pub dy: f64,
}

impl CartesianFrame {
    pub fn new(dx: f64, dy: f64) -> Result<Self, AnalysisError> {
        ensure_spacing("dx", dx)?;
        ensure_spacing("dy", dy)?;
        Ok(Self { dx, dy })
    }
}

impl CoordinateFrame for CartesianFrame {
    fn name(&self) -> &'static str {
        "cartesian"
    }

    #[inline]
    fn embed(&self, node: &Vector3<f64>) -> Point3<f64> {
        Point3::from(*node)
    }

    fn height_component(&self) -> usize {
        2
    }

    fn reference_direction(&self, _i: usize, _j: usize) -> Vector3<f64> {
        Vector3::z()
    }

    fn angle_bins(&self, config: &OrderConfig) -> usize {
        config.cartesian_angle_bins
    }

    fn counts_reversed_normals(&self) -> bool {
        false
    }

    fn embed_grid(&self, grid: &SurfaceGrid) -> SurfaceGrid {
        grid.clone()
    }
}

/// Spherical parameterisation: nodes are `(rho, phi, theta)` about `center`,
/// sampled every `dphi` in the polar and `dtheta` in the azimuthal angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalFrame {
    pub dphi: f64,
    pub dtheta: f64,
    pub center: Point3<f64>,
}

impl SphericalFrame {
    pub fn new(dphi: f64, dtheta: f64, center: Point3<f64>) -> Result<Self, AnalysisError> {
        ensure_spacing("dphi", dphi)?;
        ensure_spacing("dtheta", dtheta)?;
        Ok(Self {
            dphi,
            dtheta,
            center,
        })
    }

    /// Frame for an `n_phi × n_theta` grid covering `phi ∈ [0, π]` and `theta ∈ [0, 2π]`.
    pub fn covering_sphere(
        n_phi: usize,
        n_theta: usize,
        center: Point3<f64>,
    ) -> Result<Self, AnalysisError> {
        if n_phi < 2 || n_theta < 2 {
            return Err(AnalysisError::InvalidParameter {
                name: "angular divisions",
                value: n_phi.min(n_theta) as f64,
                reason: "at least 2 nodes per axis are required",
            });
        }
        Self::new(
            std::f64::consts::PI / (n_phi - 1) as f64,
            std::f64::consts::TAU / (n_theta - 1) as f64,
            center,
        )
    }

    /// Angular coordinates assigned to cell `(i, j)`: `((i - 1.5)·dphi, (j - 1.5)·dtheta)`.
    #[inline]
    pub fn cell_center(&self, i: usize, j: usize) -> (f64, f64) {
        (
            (i as f64 - 1.5) * self.dphi,
            (j as f64 - 1.5) * self.dtheta,
        )
    }
}

impl CoordinateFrame for SphericalFrame {
    fn name(&self) -> &'static str {
        "spherical"
    }

    #[inline]
    fn embed(&self, node: &Vector3<f64>) -> Point3<f64> {
        SphericalPoint::from_vector(node).to_cartesian(&self.center)
    }

    fn height_component(&self) -> usize {
        0
    }

    fn reference_direction(&self, i: usize, j: usize) -> Vector3<f64> {
        let (phi, theta) = self.cell_center(i, j);
        unit_radial(phi, theta)
    }

    fn angle_bins(&self, config: &OrderConfig) -> usize {
        config.spherical_angle_bins
    }

    fn counts_reversed_normals(&self) -> bool {
        true
    }
}

fn ensure_spacing(name: &'static str, value: f64) -> Result<(), AnalysisError> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(AnalysisError::InvalidParameter {
            name,
            value,
            reason: "grid spacing must be positive and finite",
        });
    }
    Ok(())
}
