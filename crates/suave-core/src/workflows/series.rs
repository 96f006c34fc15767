use crate::engine::config::HistogramConfig;
use crate::engine::error::AnalysisError;
use crate::engine::stats::summary::summary_from_parts;
use crate::engine::stats::{Histogram, Moments, StatisticalSummary, autocorrelation, gaussian_overlay};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesAnalysis {
    pub summary: StatisticalSummary,
    pub histogram: Histogram,
    pub bin_centers: Vec<f64>,
    /// Normal density with the series' mean and standard deviation, evaluated
    /// at `bin_centers`.
    pub gaussian: Vec<f64>,
    pub autocorrelation: Option<Vec<f64>>,
}

impl SeriesAnalysis {
    /// `(centre, pdf, gaussian)` rows in bin order.
    pub fn pdf_rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.bin_centers
            .iter()
            .zip(&self.histogram.values)
            .zip(&self.gaussian)
            .map(|((&c, &p), &g)| (c, p, g))
    }
}

/// Summarizes a scalar series: moments, histogram percentiles, the density
/// histogram with a Gaussian overlay and, when requested, the autocorrelation.
#[instrument(skip_all, name = "series_workflow")]
pub fn analyze(
    series: &[f64],
    config: &HistogramConfig,
    include_acf: bool,
) -> Result<SeriesAnalysis, AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::EmptyInput("series"));
    }

    let moments = Moments::of(series);
    if moments.std_dev == 0.0 {
        warn!(samples = series.len(), "Series has no spread.");
    }
    let histogram = Histogram::build(series, config);
    let summary = summary_from_parts(series, &moments, &histogram);
    let bin_centers = histogram.bin_centers();
    let gaussian = gaussian_overlay(&bin_centers, moments.mean, moments.std_dev);
    let autocorrelation = include_acf.then(|| autocorrelation(series, None));

    info!(
        samples = summary.samples,
        mean = summary.mean,
        std_dev = summary.std_dev,
        median = summary.median,
        "Series analysis complete."
    );

    Ok(SeriesAnalysis {
        summary,
        histogram,
        bin_centers,
        gaussian,
        autocorrelation,
    })
}
