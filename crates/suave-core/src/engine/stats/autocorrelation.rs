use super::moments::Moments;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Autocorrelation of a series for lags `0..max_lag` (default `N/2`).
///
/// Only the first half of the series is used as the lag origin:
/// `acf[lag] = Σ_{i < N/2, i + lag < N} (x_i - μ)(x_{i+lag} - μ) / ((N/2)·σ²)`.
/// An empty series gives an empty result; a series without spread gives zeros.
pub fn autocorrelation(data: &[f64], max_lag: Option<usize>) -> Vec<f64> {
    let n = data.len();
    if n == 0 {
        return Vec::new();
    }
    let half = n / 2;
    let max_lag = max_lag.unwrap_or(half);

    let moments = Moments::of(data);
    let variance = moments.variance();
    if variance == 0.0 || half == 0 {
        return vec![0.0; max_lag];
    }
    let mean = moments.mean;
    let norm = half as f64 * variance;

    let lags: Vec<usize> = (0..max_lag).collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = lags.iter();

    #[cfg(feature = "parallel")]
    let iterator = lags.par_iter();

    iterator
        .map(|&lag| {
            let end = half.min(n.saturating_sub(lag));
            let correlation: f64 = (0..end)
                .map(|i| (data[i] - mean) * (data[i + lag] - mean))
                .sum();
            correlation / norm
        })
        .collect()
}
