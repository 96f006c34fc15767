use std::f64::consts::PI;

use crate::engine::config::HistogramConfig;

/// Probability density estimate of a scalar series on a fixed grid of bins.
///
/// The data range `[min, max]` is spread over `bins - 2·offset` widths and
/// bin `i` is centred on `(i - offset)·width + min`, leaving `offset` empty
/// bins on either side. Each sample adds `1 / (N·width)`, so the values
/// integrate to one.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub values: Vec<f64>,
    pub min: f64,
    pub width: f64,
    /// Number of samples the density was built from.
    pub samples: usize,
    pub offset: usize,
}

impl Histogram {
    /// Bins `data`; an empty series gives an empty histogram of width zero and
    /// a series without spread uses a width of one.
    pub fn build(data: &[f64], config: &HistogramConfig) -> Self {
        if data.is_empty() {
            return Self {
                values: Vec::new(),
                min: 0.0,
                width: 0.0,
                samples: 0,
                offset: config.offset,
            };
        }

        let (min, max) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        let spread_bins = config.bins.saturating_sub(2 * config.offset).max(1);
        let mut width = (max - min) / spread_bins as f64;
        if width == 0.0 {
            width = 1.0;
        }

        let increment = 1.0 / (data.len() as f64 * width);
        let mut values = vec![0.0; config.bins];
        for &x in data {
            let index = ((x - min) / width).round_ties_even() + config.offset as f64;
            if index >= 0.0 && (index as usize) < config.bins {
                values[index as usize] += increment;
            }
        }

        Self {
            values,
            min,
            width,
            samples: data.len(),
            offset: config.offset,
        }
    }

    #[inline]
    pub fn bin_center(&self, index: usize) -> f64 {
        (index as f64 - self.offset as f64) * self.width + self.min
    }

    pub fn bin_centers(&self) -> Vec<f64> {
        (0..self.values.len()).map(|i| self.bin_center(i)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Normal density with the given mean and standard deviation at each of
/// `centers`; all zeros when `std_dev` is zero.
pub fn gaussian_overlay(centers: &[f64], mean: f64, std_dev: f64) -> Vec<f64> {
    if std_dev == 0.0 {
        return vec![0.0; centers.len()];
    }
    let norm = std_dev * (2.0 * PI).sqrt();
    centers
        .iter()
        .map(|x| (-(x - mean).powi(2) / (2.0 * std_dev * std_dev)).exp() / norm)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn histogram_integrates_to_one() {
        let data: Vec<f64> = (0..250).map(|k| (k as f64 * 0.37).sin() * 5.0).collect();
        let hist = Histogram::build(&data, &HistogramConfig::default());
        assert_eq!(hist.values.len(), 1000);
        let integral: f64 = hist.values.iter().map(|v| v * hist.width).sum();
        assert!(f64_approx_equal(integral, 1.0));
    }

    #[test]
    fn histogram_places_extremes_at_offset_bins() {
        let data = [2.0, 10.0];
        let hist = Histogram::build(&data, &HistogramConfig::default());
        assert!(f64_approx_equal(hist.width, 8.0 / 800.0));
        assert!(hist.values[100] > 0.0);
        assert!(hist.values[900] > 0.0);
        assert!(f64_approx_equal(hist.bin_center(100), 2.0));
        assert!(f64_approx_equal(hist.bin_center(900), 10.0));
        assert_eq!(hist.values.iter().filter(|&&v| v > 0.0).count(), 2);
    }

    #[test]
    fn histogram_of_constant_series_uses_unit_width() {
        let hist = Histogram::build(&[3.0, 3.0, 3.0], &HistogramConfig::default());
        assert_eq!(hist.width, 1.0);
        assert!(f64_approx_equal(hist.values[100], 1.0));
        assert_eq!(hist.min, 3.0);
    }

    #[test]
    fn histogram_of_empty_series_is_empty() {
        let hist = Histogram::build(&[], &HistogramConfig::default());
        assert!(hist.is_empty());
        assert_eq!(hist.width, 0.0);
        assert!(hist.bin_centers().is_empty());
    }

    #[test]
    fn histogram_honours_configured_layout() {
        let config = HistogramConfig {
            bins: 20,
            offset: 5,
        };
        let hist = Histogram::build(&[0.0, 1.0], &config);
        assert_eq!(hist.values.len(), 20);
        assert!(f64_approx_equal(hist.width, 0.1));
        assert!(hist.values[5] > 0.0);
        assert!(hist.values[15] > 0.0);
    }

    #[test]
    fn gaussian_overlay_peaks_at_mean() {
        let centers = [-1.0, 0.0, 1.0];
        let g = gaussian_overlay(&centers, 0.0, 1.0);
        assert!(f64_approx_equal(g[1], 1.0 / (2.0 * PI).sqrt()));
        assert!(f64_approx_equal(g[0], g[2]));
        assert!(g[0] < g[1]);
    }

    #[test]
    fn gaussian_overlay_without_spread_is_zero() {
        assert_eq!(gaussian_overlay(&[1.0, 2.0], 1.0, 0.0), vec![0.0, 0.0]);
    }
}
