use thiserror::Error;

use super::config::ConfigError;
use crate::core::grid_params::ParamError;
use crate::core::models::grid::GridError;
use crate::core::utils::coords::ConversionError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid surface grid: {source}")]
    Grid {
        #[from]
        source: GridError,
    },

    #[error("Grid parameter estimation failed: {source}")]
    Param {
        #[from]
        source: ParamError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Coordinate conversion failed: {source}")]
    Conversion {
        #[from]
        source: ConversionError,
    },

    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error(
        "Point {point_index} maps to grid index ({i}, {j}) outside the fitted domain of shape {shape:?}"
    )]
    IndexOutOfDomain {
        point_index: usize,
        i: i64,
        j: i64,
        shape: (usize, usize),
    },

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),
}
