use super::histogram::Histogram;

/// Order statistics read off a density histogram.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Percentiles {
    pub median: f64,
    pub mode: f64,
    pub q1: f64,
    pub q3: f64,
    pub d1: f64,
    pub d9: f64,
}

impl Percentiles {
    /// Walks the bins in order accumulating `value·width·N` samples; each
    /// statistic is the centre of the first bin where the running count
    /// reaches its fraction of `N`. The mode is the centre of the tallest bin,
    /// the lowest one on ties.
    pub fn from_histogram(histogram: &Histogram) -> Self {
        if histogram.is_empty() {
            return Self::default();
        }
        let n = histogram.samples as f64;

        let mut mode_index = 0;
        for (i, &value) in histogram.values.iter().enumerate() {
            if value > histogram.values[mode_index] {
                mode_index = i;
            }
        }

        let thresholds = [n / 10.0, n / 4.0, n / 2.0, 3.0 * n / 4.0, 9.0 * n / 10.0];
        let mut found: [Option<f64>; 5] = [None; 5];
        let mut cumulative = 0.0;
        for (i, &value) in histogram.values.iter().enumerate() {
            cumulative += value * histogram.width * n;
            for (slot, &threshold) in found.iter_mut().zip(&thresholds) {
                if slot.is_none() && cumulative >= threshold {
                    *slot = Some(histogram.bin_center(i));
                }
            }
            if found[4].is_some() {
                break;
            }
        }
        let [d1, q1, median, q3, d9] = found.map(|v| v.unwrap_or(0.0));

        Self {
            median,
            mode: histogram.bin_center(mode_index),
            q1,
            q3,
            d1,
            d9,
        }
    }

    pub fn interquartile_range(&self) -> f64 {
        self.q3 - self.q1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::HistogramConfig;
    use crate::engine::stats::moments::Moments;

    fn uniform_samples(n: usize) -> Vec<f64> {
        (0..n).map(|k| k as f64 / (n - 1) as f64).collect()
    }

    /// Deterministic normal deviates by inverting the CDF at evenly spaced
    /// probabilities (Acklam's rational approximation).
    fn normal_quantile(p: f64) -> f64 {
        const A: [f64; 6] = [
            -3.969683028665376e+01,
            2.209460984245205e+02,
            -2.759285104469687e+02,
            1.383577518672690e+02,
            -3.066479806614716e+01,
            2.506628277459239e+00,
        ];
        const B: [f64; 5] = [
            -5.447609879822406e+01,
            1.615858368580409e+02,
            -1.556989798598866e+02,
            6.680131188771972e+01,
            -1.328068155288572e+01,
        ];
        const C: [f64; 6] = [
            -7.784894002430293e-03,
            -3.223964580411365e-01,
            -2.400758277161838e+00,
            -2.549671010610950e+00,
            4.374664141464968e+00,
            2.938163982698783e+00,
        ];
        const D: [f64; 4] = [
            7.784695709041462e-03,
            3.224671290700398e-01,
            2.445134137142996e+00,
            3.754408661907416e+00,
        ];
        let p_low = 0.02425;
        if p < p_low {
            let q = (-2.0 * p.ln()).sqrt();
            (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
                / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
        } else if p <= 1.0 - p_low {
            let q = p - 0.5;
            let r = q * q;
            (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
                / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
        } else {
            -normal_quantile(1.0 - p)
        }
    }

    #[test]
    fn percentiles_of_uniform_series_match_fractions() {
        let data = uniform_samples(1001);
        let hist = Histogram::build(&data, &HistogramConfig::default());
        let p = Percentiles::from_histogram(&hist);
        assert!((p.median - 0.5).abs() < 0.01);
        assert!((p.q1 - 0.25).abs() < 0.01);
        assert!((p.q3 - 0.75).abs() < 0.01);
        assert!((p.d1 - 0.1).abs() < 0.01);
        assert!((p.d9 - 0.9).abs() < 0.01);
        assert!(p.d1 <= p.q1 && p.q1 <= p.median && p.median <= p.q3 && p.q3 <= p.d9);
    }

    #[test]
    fn percentiles_of_gaussian_series_recover_median_and_iqr() {
        let n = 20_000;
        let data: Vec<f64> = (0..n)
            .map(|k| 5.0 + 2.0 * normal_quantile((k as f64 + 0.5) / n as f64))
            .collect();
        let hist = Histogram::build(&data, &HistogramConfig::default());
        let p = Percentiles::from_histogram(&hist);
        let m = Moments::of(&data);

        assert!((p.median - m.mean).abs() < 3.0 * hist.width);
        // The interquartile range of a normal distribution is 1.349 σ.
        assert!((p.interquartile_range() - 1.349 * m.std_dev).abs() < 4.0 * hist.width);
    }

    #[test]
    fn mode_prefers_the_lowest_of_tied_bins() {
        let hist = Histogram::build(&[0.0, 1.0], &HistogramConfig::default());
        let p = Percentiles::from_histogram(&hist);
        assert_eq!(p.mode, 0.0);
    }

    #[test]
    fn percentiles_of_empty_histogram_are_zero() {
        let hist = Histogram::build(&[], &HistogramConfig::default());
        assert_eq!(Percentiles::from_histogram(&hist), Percentiles::default());
    }
}
