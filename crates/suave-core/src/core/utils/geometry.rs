use crate::core::models::point::unit_radial;
use nalgebra::{Point3, Vector3};

#[inline]
pub fn cross(v1: &Vector3<f64>, v2: &Vector3<f64>) -> Vector3<f64> {
    v1.cross(v2)
}

#[inline]
pub fn dot(v1: &Vector3<f64>, v2: &Vector3<f64>) -> f64 {
    v1.dot(v2)
}

#[inline]
pub fn magnitude(v: &Vector3<f64>) -> f64 {
    v.norm()
}

/// Area of the triangle `p1 p2 p3` by Heron's formula.
///
/// Rounding in the side lengths can push the radicand slightly below zero for
/// near-degenerate triangles, so it is clamped at zero: collinear or
/// coincident vertices give an area of exactly `0.0`.
pub fn triangle_area(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> f64 {
    let a = nalgebra::distance(p1, p2);
    let b = nalgebra::distance(p1, p3);
    let c = nalgebra::distance(p2, p3);
    let s = (a + b + c) / 2.0;
    (s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt()
}

/// Directional alignment between a triangle's normal and the radial direction
/// `(phi, theta)`, used as a volume-integration weight.
///
/// The normal is `(p2 - p1) × (p3 - p2)`. Returns `|cos|` of the angle between
/// normal and radial direction, a dimensionless value in `[0, 1]`. A triangle
/// whose squared normal length is below `min_normal_sq` has no area and
/// contributes no directional bias, so the neutral weight `1.0` is returned.
pub fn solid_angle_factor(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    phi: f64,
    theta: f64,
    min_normal_sq: f64,
) -> f64 {
    let normal = (p2 - p1).cross(&(p3 - p2));
    let normal_sq = normal.norm_squared();
    if normal_sq < min_normal_sq {
        return 1.0;
    }
    let radial = unit_radial(phi, theta);
    (normal.dot(&radial) / (normal_sq.sqrt() * radial.norm()))
        .abs()
        .min(1.0)
}

/// Normal of a grid cell from its two diagonals.
///
/// Corners are given as `(i-1, j-1), (i-1, j), (i, j-1), (i, j)`; the normal is
/// `(P[i,j] - P[i-1,j-1]) × (P[i-1,j] - P[i,j-1])` and is not normalised.
#[inline]
pub fn diagonal_normal(corners: &[Point3<f64>; 4]) -> Vector3<f64> {
    let [p00, p01, p10, p11] = corners;
    (p11 - p00).cross(&(p01 - p10))
}

/// Cosine of the angle between `v` and `axis`, clamped to `[-1, 1]`.
#[inline]
pub fn cos_angle(v: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    (v.dot(axis) / (v.norm() * axis.norm())).clamp(-1.0, 1.0)
}

/// Second Legendre polynomial `P2(x) = (3x² - 1) / 2`.
#[inline]
pub fn legendre_p2(cos: f64) -> f64 {
    0.5 * (3.0 * cos * cos - 1.0)
}
