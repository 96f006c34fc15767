//! Descriptive statistics for scalar series: population moments, the
//! offset-centred density histogram, histogram percentiles, a Gaussian
//! overlay and the half-series autocorrelation.

pub mod autocorrelation;
pub mod histogram;
pub mod moments;
pub mod percentiles;
pub mod summary;

pub use autocorrelation::autocorrelation;
pub use histogram::{Histogram, gaussian_overlay};
pub use moments::Moments;
pub use percentiles::Percentiles;
pub use summary::{StatisticalSummary, summarize};
