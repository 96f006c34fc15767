use nalgebra::{DMatrix, Vector3};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("Grid of shape {shape:?} is too small: at least {min} nodes per axis are required")]
    TooSmall { shape: (usize, usize), min: usize },
    #[error("Expected {expected} values for a ({rows}, {cols}, 3) grid, got {actual}")]
    Dimensionality {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },
}

/// A structured `(N, M)` array of surface nodes.
///
/// Each node is a triple holding either Cartesian `(x, y, z)` or spherical
/// `(rho, phi, theta)` coordinates; which one is decided by the frame the
/// grid is analysed in, never by the grid itself. Nodes are stored row-major,
/// row `i` running along the first axis (x or phi) and column `j` along the
/// second (y or theta).
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    rows: usize,
    cols: usize,
    nodes: Vec<Vector3<f64>>,
}

impl SurfaceGrid {
    pub fn from_nodes(
        rows: usize,
        cols: usize,
        nodes: Vec<Vector3<f64>>,
    ) -> Result<Self, GridError> {
        if nodes.len() != rows * cols {
            return Err(GridError::Dimensionality {
                rows,
                cols,
                expected: rows * cols * 3,
                actual: nodes.len() * 3,
            });
        }
        Ok(Self { rows, cols, nodes })
    }

    /// Builds a grid from a flat `(N, M, 3)` buffer in C order.
    pub fn from_flat(rows: usize, cols: usize, values: &[f64]) -> Result<Self, GridError> {
        if values.len() != rows * cols * 3 {
            return Err(GridError::Dimensionality {
                rows,
                cols,
                expected: rows * cols * 3,
                actual: values.len(),
            });
        }
        let nodes = values
            .chunks_exact(3)
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self { rows, cols, nodes })
    }

    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Vector3<f64>,
    {
        let mut nodes = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                nodes.push(f(i, j));
            }
        }
        Self { rows, cols, nodes }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at `(i, j)`. Callers iterate within `shape()`; use [`get`](Self::get)
    /// for indices that may fall outside the grid.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows()`. A column `j >= cols()` panics in debug builds;
    /// release builds only check the flattened index.
    #[inline]
    pub fn node(&self, i: usize, j: usize) -> &Vector3<f64> {
        debug_assert!(j < self.cols, "column {j} outside grid with {} columns", self.cols);
        &self.nodes[i * self.cols + j]
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&Vector3<f64>> {
        if i < self.rows && j < self.cols {
            Some(self.node(i, j))
        } else {
            None
        }
    }

    pub fn nodes(&self) -> &[Vector3<f64>] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Vector3<f64>> {
        self.nodes
    }

    /// Applies `f` to every node, keeping the shape.
    pub fn map_nodes<F>(&self, f: F) -> Self
    where
        F: Fn(&Vector3<f64>) -> Vector3<f64>,
    {
        Self {
            rows: self.rows,
            cols: self.cols,
            nodes: self.nodes.iter().map(f).collect(),
        }
    }

    /// Extracts one component (0, 1 or 2) of every node as an `N×M` matrix.
    pub fn channel(&self, component: usize) -> DMatrix<f64> {
        DMatrix::from_fn(self.rows, self.cols, |i, j| self.node(i, j)[component])
    }

    /// The four corners of cell `(i, j)` in the order
    /// `(i-1, j-1), (i-1, j), (i, j-1), (i, j)`. Requires `i, j >= 1`.
    #[inline]
    pub fn cell_corners(&self, i: usize, j: usize) -> [&Vector3<f64>; 4] {
        [
            self.node(i - 1, j - 1),
            self.node(i - 1, j),
            self.node(i, j - 1),
            self.node(i, j),
        ]
    }

    /// Mean of one component over the four corners of cell `(i, j)`.
    #[inline]
    pub fn corner_mean(&self, i: usize, j: usize, component: usize) -> f64 {
        let [a, b, c, d] = self.cell_corners(i, j);
        (a[component] + b[component] + c[component] + d[component]) / 4.0
    }

    /// Mean of one component over all nodes; zero for an empty grid.
    pub fn channel_mean(&self, component: usize) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        self.nodes.iter().map(|n| n[component]).sum::<f64>() / self.nodes.len() as f64
    }

    /// Node-wise average of two co-indexed grids.
    pub fn midplane(&self, other: &Self) -> Result<Self, GridError> {
        self.ensure_same_shape(other)?;
        let nodes = self
            .nodes
            .iter()
            .zip(&other.nodes)
            .map(|(a, b)| (a + b) * 0.5)
            .collect();
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            nodes,
        })
    }

    pub fn ensure_same_shape(&self, other: &Self) -> Result<(), GridError> {
        if self.shape() != other.shape() {
            return Err(GridError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    pub fn ensure_min_size(&self, min: usize) -> Result<(), GridError> {
        if self.rows < min || self.cols < min {
            return Err(GridError::TooSmall {
                shape: self.shape(),
                min,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> SurfaceGrid {
        SurfaceGrid::from_fn(3, 4, |i, j| Vector3::new(i as f64, j as f64, (i * 10 + j) as f64))
    }

    #[test]
    fn from_fn_stores_nodes_row_major() {
        let grid = sample_grid();
        assert_eq!(grid.shape(), (3, 4));
        assert_eq!(grid.len(), 12);
        assert_eq!(*grid.node(2, 3), Vector3::new(2.0, 3.0, 23.0));
        assert_eq!(grid.nodes()[5], Vector3::new(1.0, 1.0, 11.0));
    }

    #[test]
    fn from_nodes_rejects_wrong_node_count() {
        let result = SurfaceGrid::from_nodes(2, 2, vec![Vector3::zeros(); 3]);
        assert!(matches!(
            result,
            Err(GridError::Dimensionality {
                expected: 12,
                actual: 9,
                ..
            })
        ));
    }

    #[test]
    fn from_flat_reads_triples_in_c_order() {
        let values: Vec<f64> = (0..12).map(|v| v as f64).collect();
        let grid = SurfaceGrid::from_flat(2, 2, &values).unwrap();
        assert_eq!(*grid.node(0, 1), Vector3::new(3.0, 4.0, 5.0));
        assert_eq!(*grid.node(1, 1), Vector3::new(9.0, 10.0, 11.0));
    }

    #[test]
    fn from_flat_rejects_buffer_that_is_not_a_multiple_of_three() {
        let result = SurfaceGrid::from_flat(2, 2, &[0.0; 11]);
        assert!(matches!(result, Err(GridError::Dimensionality { .. })));
    }

    #[test]
    fn get_returns_none_outside_the_grid() {
        let grid = sample_grid();
        assert!(grid.get(2, 3).is_some());
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 4).is_none());
    }

    #[test]
    #[should_panic]
    fn node_outside_the_grid_panics() {
        let grid = sample_grid();
        let _ = grid.node(3, 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn node_past_the_last_column_panics_in_debug_builds() {
        let grid = sample_grid();
        let _ = grid.node(0, 4);
    }

    #[test]
    fn cell_corners_follow_the_documented_order() {
        let grid = sample_grid();
        let corners = grid.cell_corners(1, 2);
        assert_eq!(corners[0].z, 1.0);
        assert_eq!(corners[1].z, 2.0);
        assert_eq!(corners[2].z, 11.0);
        assert_eq!(corners[3].z, 12.0);
    }

    #[test]
    fn corner_mean_averages_the_four_corners() {
        let grid = sample_grid();
        assert_eq!(grid.corner_mean(1, 1, 2), (0.0 + 1.0 + 10.0 + 11.0) / 4.0);
    }

    #[test]
    fn channel_extracts_one_component() {
        let grid = sample_grid();
        let z = grid.channel(2);
        assert_eq!(z.shape(), (3, 4));
        assert_eq!(z[(2, 1)], 21.0);
    }

    #[test]
    fn midplane_averages_nodes_of_two_grids() {
        let a = SurfaceGrid::from_fn(2, 2, |_, _| Vector3::new(0.0, 0.0, 4.0));
        let b = SurfaceGrid::from_fn(2, 2, |_, _| Vector3::new(2.0, 0.0, -2.0));
        let mid = a.midplane(&b).unwrap();
        assert_eq!(*mid.node(1, 1), Vector3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn midplane_rejects_mismatched_shapes() {
        let a = SurfaceGrid::from_fn(2, 2, |_, _| Vector3::zeros());
        let b = SurfaceGrid::from_fn(2, 3, |_, _| Vector3::zeros());
        assert_eq!(
            a.midplane(&b),
            Err(GridError::ShapeMismatch {
                left: (2, 2),
                right: (2, 3)
            })
        );
    }

    #[test]
    fn ensure_min_size_rejects_single_row_grid() {
        let grid = SurfaceGrid::from_fn(1, 5, |_, _| Vector3::zeros());
        assert!(matches!(
            grid.ensure_min_size(2),
            Err(GridError::TooSmall { min: 2, .. })
        ));
        assert!(sample_grid().ensure_min_size(2).is_ok());
    }

    #[test]
    fn channel_mean_of_empty_grid_is_zero() {
        let grid = SurfaceGrid::from_fn(0, 0, |_, _| Vector3::zeros());
        assert!(grid.is_empty());
        assert_eq!(grid.channel_mean(0), 0.0);
    }
}
