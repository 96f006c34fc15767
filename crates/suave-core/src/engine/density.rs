use std::f64::consts::PI;
use tracing::{debug, info, instrument, warn};

use crate::core::models::grid::SurfaceGrid;
use crate::core::models::point::SphericalPoint;
use crate::engine::config::DensityConfig;
use crate::engine::error::AnalysisError;
use crate::engine::frame::SphericalFrame;

/// Radial number density of particles, normalised by the local radius of a
/// pair of reference surfaces.
///
/// A particle at radius `rho` beneath a surface pair whose mean radius there is
/// `r_avg` falls in bin `floor((rho / r_avg) / w)` with `w = 2 / divisions`.
/// Bin `b` lives in slot `b + center`; every hit adds `scale / shell_volume`
/// where `shell_volume = V·((b+1)³ - b³)·w³`. Slots are never reset, so
/// calling [`DensityProfile::accumulate`] repeatedly sums several frames.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityProfile {
    values: Vec<f64>,
    bin_width: f64,
    center: usize,
    scale: f64,
    binned: usize,
    skipped: usize,
}

impl DensityProfile {
    pub fn new(divisions: usize, config: &DensityConfig) -> Result<Self, AnalysisError> {
        if divisions == 0 {
            return Err(AnalysisError::InvalidParameter {
                name: "divisions",
                value: 0.0,
                reason: "the normalised radius range needs at least one division",
            });
        }
        Ok(Self {
            values: vec![0.0; config.slots],
            bin_width: 2.0 / divisions as f64,
            center: config.center,
            scale: config.scale,
            binned: 0,
            skipped: 0,
        })
    }

    /// Bins `points` against the surfaces `first` and `second`.
    ///
    /// Points whose angles map outside the grids, whose local mean radius is
    /// not positive, or whose bin lands outside the slots are skipped.
    pub fn accumulate(
        &mut self,
        points: &[SphericalPoint],
        first: &SurfaceGrid,
        second: &SurfaceGrid,
        frame: &SphericalFrame,
        total_volume: f64,
    ) -> Result<(), AnalysisError> {
        if points.is_empty() {
            return Err(AnalysisError::EmptyInput("density profile needs at least one point"));
        }
        first.ensure_same_shape(second)?;
        if !(total_volume > 0.0) {
            return Err(AnalysisError::InvalidParameter {
                name: "total_volume",
                value: total_volume,
                reason: "shell volumes are scaled by a positive total volume",
            });
        }

        let (rows, cols) = first.shape();
        let w = self.bin_width;
        let (binned_before, skipped_before) = (self.binned, self.skipped);

        for point in points {
            let a = (point.phi / frame.dphi).round_ties_even();
            let b = (point.theta / frame.dtheta).round_ties_even();
            if !(a >= 0.0 && b >= 0.0 && (a as usize) < rows && (b as usize) < cols) {
                self.skipped += 1;
                continue;
            }
            let (a, b) = (a as usize, b as usize);

            let r_avg = (first.node(a, b)[0] + second.node(a, b)[0]) / 2.0;
            if r_avg <= 0.0 {
                self.skipped += 1;
                continue;
            }

            let bin = (point.rho / r_avg / w).floor();
            let inner = bin * w;
            let outer = (bin + 1.0) * w;
            let shell_volume = total_volume * (outer.powi(3) - inner.powi(3));
            if shell_volume <= 0.0 {
                self.skipped += 1;
                continue;
            }

            let slot = bin + self.center as f64;
            if slot >= 0.0 && (slot as usize) < self.values.len() {
                self.values[slot as usize] += self.scale / shell_volume;
                self.binned += 1;
            } else {
                self.skipped += 1;
            }
        }

        debug!(
            binned = self.binned - binned_before,
            skipped = self.skipped - skipped_before,
            "Density points accumulated."
        );
        Ok(())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Normalised radius at the middle of every slot, `(i - center)·w + w/2`.
    pub fn bin_centers(&self) -> Vec<f64> {
        (0..self.values.len())
            .map(|i| (i as f64 - self.center as f64) * self.bin_width + self.bin_width / 2.0)
            .collect()
    }

    pub fn binned(&self) -> usize {
        self.binned
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Fresh density profile of `points` between two surfaces enclosing `total_volume`.
#[instrument(skip_all, name = "density_profile", fields(points = points.len()))]
pub fn density_profile(
    points: &[SphericalPoint],
    first: &SurfaceGrid,
    second: &SurfaceGrid,
    frame: &SphericalFrame,
    divisions: usize,
    total_volume: f64,
    config: &DensityConfig,
) -> Result<DensityProfile, AnalysisError> {
    let mut profile = DensityProfile::new(divisions, config)?;
    profile.accumulate(points, first, second, frame, total_volume)?;
    if profile.binned() == 0 {
        warn!("No point fell inside the density profile.");
    }
    info!(
        binned = profile.binned(),
        skipped = profile.skipped(),
        "Density profile computed."
    );
    Ok(profile)
}

/// Volume of the spherical shell between two `(rho, phi, theta)` grids,
/// `|4/3·π·(r̄₁³ - r̄₂³)|` from their mean radii.
pub fn shell_volume(first: &SurfaceGrid, second: &SurfaceGrid) -> f64 {
    let r1 = first.channel_mean(0);
    let r2 = second.channel_mean(0);
    (4.0 / 3.0 * PI * (r1.powi(3) - r2.powi(3))).abs()
}

/// Density profile with the total volume taken from the surfaces themselves.
pub fn density_profile_from_grids(
    points: &[SphericalPoint],
    first: &SurfaceGrid,
    second: &SurfaceGrid,
    frame: &SphericalFrame,
    divisions: usize,
    config: &DensityConfig,
) -> Result<DensityProfile, AnalysisError> {
    first.ensure_same_shape(second)?;
    let volume = shell_volume(first, second);
    density_profile(points, first, second, frame, divisions, volume, config)
}
