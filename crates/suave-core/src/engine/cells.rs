use nalgebra::{DMatrix, Point3};

use crate::core::models::grid::SurfaceGrid;
use crate::core::utils::geometry::diagonal_normal;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Mean, spread and population of a per-cell quantity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellStats {
    pub mean: f64,
    pub std_dev: f64,
    /// Number of cells that contributed.
    pub count: usize,
}

/// Running first and second moments of a stream of cell values.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RunningMoments {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl RunningMoments {
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.push_with_square(value, value * value);
    }

    /// Records `value` for the mean and `square` for the second moment.
    #[inline]
    pub fn push_with_square(&mut self, value: f64, square: f64) {
        self.sum += value;
        self.sum_sq += square;
        self.count += 1;
    }

    /// `std = sqrt(|<v²> - <v>²|)`; all zeros when nothing was pushed.
    pub fn finish(&self) -> CellStats {
        if self.count == 0 {
            return CellStats::default();
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        let mean_sq = self.sum_sq / n;
        CellStats {
            mean,
            std_dev: (mean_sq - mean * mean).abs().sqrt(),
            count: self.count,
        }
    }
}

/// Evaluates `f(i, j)` for every interior cell `i ∈ [1, rows)`, `j ∈ [1, cols)`.
///
/// Rows are dispatched independently; the results come back in row-major cell
/// order regardless of how they were scheduled.
pub(crate) fn map_cells<T, F>(shape: (usize, usize), f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, usize) -> T + Sync + Send,
{
    let (rows, cols) = shape;
    let row_indices: Vec<usize> = (1..rows).collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = row_indices.iter();

    #[cfg(feature = "parallel")]
    let iterator = row_indices.par_iter();

    let per_row: Vec<Vec<T>> = iterator
        .map(|&i| (1..cols).map(|j| f(i, j)).collect())
        .collect();

    per_row.into_iter().flatten().collect()
}

/// Builds the `(rows-1) × (cols-1)` map from row-major cell values.
pub(crate) fn cell_map(shape: (usize, usize), values: &[f64]) -> DMatrix<f64> {
    let (rows, cols) = (shape.0.saturating_sub(1), shape.1.saturating_sub(1));
    DMatrix::from_fn(rows, cols, |r, c| values[r * cols + c])
}

/// Diagonal cross-product normal of cell `(i, j)` of an embedded grid.
#[inline]
pub(crate) fn cell_normal(grid: &SurfaceGrid, i: usize, j: usize) -> nalgebra::Vector3<f64> {
    let [a, b, c, d] = grid.cell_corners(i, j);
    diagonal_normal(&[
        Point3::from(*a),
        Point3::from(*b),
        Point3::from(*c),
        Point3::from(*d),
    ])
}
