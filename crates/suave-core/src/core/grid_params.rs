use std::f64::consts::PI;
use thiserror::Error;
use tracing::info;

const PLANAR_ALPHA_SLOPE: f64 = 0.4247;
const PLANAR_ALPHA_OFFSET: f64 = 1.3501;
const SPHERICAL_ALPHA_SLOPE: f64 = 0.4984;
const SPHERICAL_ALPHA_OFFSET: f64 = 1.06016110229;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("At least 2 surface points are required, got {0}")]
    TooFewPoints(usize),
    #[error("Surface extent must be positive: x range = {x_range}, y range = {y_range}")]
    NonPositiveExtent { x_range: f64, y_range: f64 },
    #[error("Mean radius must be positive, got {0}")]
    NonPositiveRadius(f64),
    #[error("Roughness must lie in (0, 1], got {0}")]
    RoughnessOutOfRange(f64),
}

/// Lateral bounds of a planar surface, in Angstroms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarExtent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlanarExtent {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[inline]
    pub fn x_range(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn y_range(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Parameters handed to the surface-fitting step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParameters {
    /// Radius of the local neighbourhood used for fitting, in Angstroms.
    pub fit_radius: f64,
    /// Smoothing coefficient (dimensionless).
    pub alpha: f64,
}

/// Number of grid divisions per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinCount {
    /// Estimate derived from the number of surface points.
    pub coarse: usize,
    /// Count actually used: the user override when given, else `coarse`.
    pub grid: usize,
}

fn validate_common(num_points: usize, roughness: f64) -> Result<(), ParamError> {
    if num_points < 2 {
        return Err(ParamError::TooFewPoints(num_points));
    }
    if !(roughness > 0.0 && roughness <= 1.0) {
        return Err(ParamError::RoughnessOutOfRange(roughness));
    }
    Ok(())
}

/// Fitting radius and smoothing for a planar surface.
///
/// `r_fit = 3·diag/√(n-1)` with `diag` the extent diagonal, and
/// `alpha = exp(0.4247·roughness·ln(density) − 1.3501/roughness)` with
/// `density = (n-1)·100/(Δx·Δy)`. `roughness = 1` keeps the full surface
/// roughness, smaller values smooth the surface.
pub fn planar_fit_parameters(
    extent: &PlanarExtent,
    num_points: usize,
    roughness: f64,
) -> Result<FitParameters, ParamError> {
    validate_common(num_points, roughness)?;
    let (x_range, y_range) = (extent.x_range(), extent.y_range());
    if !(x_range > 0.0 && y_range > 0.0) {
        return Err(ParamError::NonPositiveExtent { x_range, y_range });
    }

    let intervals = (num_points - 1) as f64;
    let diagonal = x_range.hypot(y_range);
    let fit_radius = 3.0 * diagonal / intervals.sqrt();

    let density = intervals * 100.0 / (x_range * y_range);
    let alpha = (PLANAR_ALPHA_SLOPE * roughness * density.ln() - PLANAR_ALPHA_OFFSET / roughness).exp();

    Ok(FitParameters { fit_radius, alpha })
}

/// Fitting radius and smoothing for a closed, roughly spherical surface.
///
/// `r_fit = 6π·r̄/√(n-1)` and
/// `alpha = exp(0.4984·roughness·ln(density) − 1.06016110229/roughness)` with
/// `density = (n-1)·100/(4π r̄²)`.
pub fn spherical_fit_parameters(
    mean_radius: f64,
    num_points: usize,
    roughness: f64,
) -> Result<FitParameters, ParamError> {
    validate_common(num_points, roughness)?;
    if !(mean_radius > 0.0) {
        return Err(ParamError::NonPositiveRadius(mean_radius));
    }

    let intervals = (num_points - 1) as f64;
    let fit_radius = 6.0 * PI * mean_radius / intervals.sqrt();

    let density = intervals * 100.0 / (4.0 * PI * mean_radius * mean_radius);
    let alpha =
        (SPHERICAL_ALPHA_SLOPE * roughness * density.ln() - SPHERICAL_ALPHA_OFFSET / roughness).exp();

    Ok(FitParameters { fit_radius, alpha })
}

/// Grid divisions for a planar surface: `round(√(n-1) − 1)`.
pub fn planar_bin_count(num_points: usize, user_bins: Option<usize>) -> Result<BinCount, ParamError> {
    if num_points < 2 {
        return Err(ParamError::TooFewPoints(num_points));
    }
    let coarse = (((num_points - 1) as f64).sqrt() - 1.0).round_ties_even() as usize;
    Ok(resolve_bins(coarse, user_bins))
}

/// Grid divisions for a spherical surface: `round(√(2(n-1)))`.
pub fn spherical_bin_count(
    num_points: usize,
    user_bins: Option<usize>,
) -> Result<BinCount, ParamError> {
    if num_points < 2 {
        return Err(ParamError::TooFewPoints(num_points));
    }
    let coarse = (2.0 * (num_points - 1) as f64).sqrt().round_ties_even() as usize;
    Ok(resolve_bins(coarse, user_bins))
}

fn resolve_bins(coarse: usize, user_bins: Option<usize>) -> BinCount {
    match user_bins {
        Some(grid) => BinCount { coarse, grid },
        None => {
            info!(bins = coarse, "Using estimated grid bin count.");
            BinCount {
                coarse,
                grid: coarse,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE * a.abs().max(1.0)
    }

    #[test]
    fn planar_fit_parameters_match_closed_form() {
        let extent = PlanarExtent::new(0.0, 100.0, 0.0, 100.0);
        let params = planar_fit_parameters(&extent, 1001, 1.0).unwrap();

        let expected_radius = 3.0 * (2.0_f64 * 100.0 * 100.0).sqrt() / 1000.0_f64.sqrt();
        let density: f64 = 1000.0 * 100.0 / 10_000.0;
        let expected_alpha = (0.4247 * density.ln() - 1.3501).exp();

        assert!(f64_approx_equal(params.fit_radius, expected_radius));
        assert!(f64_approx_equal(params.alpha, expected_alpha));
    }

    #[test]
    fn planar_fit_parameters_lower_roughness_changes_alpha() {
        let extent = PlanarExtent::new(-20.0, 30.0, 5.0, 45.0);
        let rough = planar_fit_parameters(&extent, 500, 1.0).unwrap();
        let smooth = planar_fit_parameters(&extent, 500, 0.5).unwrap();
        assert!(f64_approx_equal(rough.fit_radius, smooth.fit_radius));
        assert!(rough.alpha != smooth.alpha);
    }

    #[test]
    fn planar_fit_parameters_reject_non_positive_extent() {
        let extent = PlanarExtent::new(10.0, 10.0, 0.0, 5.0);
        assert!(matches!(
            planar_fit_parameters(&extent, 100, 1.0),
            Err(ParamError::NonPositiveExtent { .. })
        ));
        let inverted = PlanarExtent::new(0.0, 5.0, 5.0, 0.0);
        assert!(matches!(
            planar_fit_parameters(&inverted, 100, 1.0),
            Err(ParamError::NonPositiveExtent { .. })
        ));
    }

    #[test]
    fn fit_parameters_reject_too_few_points() {
        let extent = PlanarExtent::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(
            planar_fit_parameters(&extent, 1, 1.0),
            Err(ParamError::TooFewPoints(1))
        );
        assert_eq!(
            spherical_fit_parameters(10.0, 0, 1.0),
            Err(ParamError::TooFewPoints(0))
        );
    }

    #[test]
    fn fit_parameters_reject_roughness_outside_unit_interval() {
        let extent = PlanarExtent::new(0.0, 1.0, 0.0, 1.0);
        for roughness in [0.0, -0.2, 1.01, f64::NAN] {
            assert!(matches!(
                planar_fit_parameters(&extent, 10, roughness),
                Err(ParamError::RoughnessOutOfRange(_))
            ));
            assert!(matches!(
                spherical_fit_parameters(5.0, 10, roughness),
                Err(ParamError::RoughnessOutOfRange(_))
            ));
        }
    }

    #[test]
    fn spherical_fit_parameters_match_closed_form() {
        let params = spherical_fit_parameters(50.0, 1001, 1.0).unwrap();
        let expected_radius = 6.0 * 50.0 * PI / 1000.0_f64.sqrt();
        let density = 1000.0 * 100.0 / (4.0 * PI * 2500.0);
        let expected_alpha = (0.4984 * density.ln() - 1.06016110229).exp();
        assert!(f64_approx_equal(params.fit_radius, expected_radius));
        assert!(f64_approx_equal(params.alpha, expected_alpha));
    }

    #[test]
    fn spherical_fit_parameters_reject_non_positive_radius() {
        assert_eq!(
            spherical_fit_parameters(0.0, 100, 1.0),
            Err(ParamError::NonPositiveRadius(0.0))
        );
    }

    #[test]
    fn planar_bin_count_uses_square_root_estimate() {
        let bins = planar_bin_count(1001, None).unwrap();
        // sqrt(1000) - 1 = 30.62...
        assert_eq!(bins, BinCount { coarse: 31, grid: 31 });
    }

    #[test]
    fn spherical_bin_count_uses_doubled_estimate() {
        let bins = spherical_bin_count(51, None).unwrap();
        assert_eq!(bins, BinCount { coarse: 10, grid: 10 });
    }

    #[test]
    fn user_override_keeps_coarse_estimate_alongside() {
        let bins = planar_bin_count(101, Some(64)).unwrap();
        assert_eq!(bins.coarse, 9);
        assert_eq!(bins.grid, 64);
        let bins = spherical_bin_count(201, Some(12)).unwrap();
        assert_eq!(bins, BinCount { coarse: 20, grid: 12 });
    }

    #[test]
    fn bin_counts_reject_too_few_points() {
        assert_eq!(planar_bin_count(1, None), Err(ParamError::TooFewPoints(1)));
        assert_eq!(spherical_bin_count(0, Some(4)), Err(ParamError::TooFewPoints(0)));
    }
}
