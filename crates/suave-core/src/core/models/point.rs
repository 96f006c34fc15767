use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

/// Radial distances below this are treated as the coordinate origin.
pub const ORIGIN_TOLERANCE: f64 = 1e-10;

/// A point expressed in spherical coordinates about some centre.
///
/// `phi` is the polar angle measured from the +z axis, conventionally in
/// `[0, π]`; `theta` is the azimuthal angle in the xy-plane, conventionally in
/// `[0, 2π)`. Distances are in Angstroms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphericalPoint {
    /// Radial distance from the centre (ρ ≥ 0).
    pub rho: f64,
    /// Polar angle from the reference axis, in radians.
    pub phi: f64,
    /// Azimuthal angle, in radians.
    pub theta: f64,
}

impl SphericalPoint {
    pub fn new(rho: f64, phi: f64, theta: f64) -> Self {
        Self { rho, phi, theta }
    }

    /// Converts a Cartesian point to spherical coordinates about `center`.
    ///
    /// The centre itself maps to `(0, 0, 0)`: both angles are undefined there
    /// and are fixed to zero by convention. `theta` is folded into `[0, 2π)`.
    pub fn from_cartesian(point: &Point3<f64>, center: &Point3<f64>) -> Self {
        let delta = point - center;
        let rho = delta.norm();
        if rho < ORIGIN_TOLERANCE {
            return Self::default();
        }

        let phi = (delta.z / rho).clamp(-1.0, 1.0).acos();
        let mut theta = delta.y.atan2(delta.x);
        if theta < 0.0 {
            theta += TAU;
        }
        // A tiny negative angle plus TAU can round up to TAU.
        if theta >= TAU {
            theta -= TAU;
        }

        Self { rho, phi, theta }
    }

    /// Converts back to Cartesian coordinates about `center`.
    pub fn to_cartesian(&self, center: &Point3<f64>) -> Point3<f64> {
        center + self.rho * unit_radial(self.phi, self.theta)
    }

    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.rho, self.phi, self.theta)
    }

    pub fn from_vector(v: &Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Unit vector pointing along the direction `(phi, theta)`.
#[inline]
pub fn unit_radial(phi: f64, theta: f64) -> Vector3<f64> {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vector3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi)
}
