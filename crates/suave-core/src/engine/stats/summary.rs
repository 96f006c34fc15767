use tracing::warn;

use super::histogram::Histogram;
use super::moments::Moments;
use super::percentiles::Percentiles;
use crate::engine::config::HistogramConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatisticalSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub median: f64,
    pub mode: f64,
    pub q1: f64,
    pub q3: f64,
    pub d1: f64,
    pub d9: f64,
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

/// Moments, extremes and histogram-based order statistics of `data`.
pub fn summarize(data: &[f64], config: &HistogramConfig) -> StatisticalSummary {
    if data.is_empty() {
        return StatisticalSummary::default();
    }
    let moments = Moments::of(data);
    if moments.std_dev == 0.0 {
        warn!(samples = data.len(), "Series has no spread.");
    }
    let histogram = Histogram::build(data, config);
    summary_from_parts(data, &moments, &histogram)
}

pub(crate) fn summary_from_parts(
    data: &[f64],
    moments: &Moments,
    histogram: &Histogram,
) -> StatisticalSummary {
    let percentiles = Percentiles::from_histogram(histogram);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    StatisticalSummary {
        mean: moments.mean,
        std_dev: moments.std_dev,
        skewness: moments.skewness,
        kurtosis: moments.kurtosis,
        median: percentiles.median,
        mode: percentiles.mode,
        q1: percentiles.q1,
        q3: percentiles.q3,
        d1: percentiles.d1,
        d9: percentiles.d9,
        min: histogram.min,
        max,
        samples: data.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_reports_extremes_and_count() {
        let data = [4.0, -1.0, 2.5, 9.0, 3.0];
        let summary = summarize(&data, &HistogramConfig::default());
        assert_eq!(summary.samples, 5);
        assert_eq!(summary.min, -1.0);
        assert_eq!(summary.max, 9.0);
        assert!((summary.mean - 3.5).abs() < 1e-12);
        assert!(summary.d1 <= summary.median && summary.median <= summary.d9);
    }

    #[test]
    fn summarize_of_empty_series_is_all_zero() {
        assert_eq!(
            summarize(&[], &HistogramConfig::default()),
            StatisticalSummary::default()
        );
    }

    #[test]
    fn summarize_of_constant_series_centres_everything_on_the_value() {
        let summary = summarize(&[7.0; 4], &HistogramConfig::default());
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.median, 7.0);
        assert_eq!(summary.mode, 7.0);
        assert_eq!(summary.q1, 7.0);
    }
}
