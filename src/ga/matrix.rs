//! Pairwise distance matrix.
//!
//! [`DistanceMatrix`] is validated once at construction and is read-only
//! afterwards, so it can be shared freely across evaluation workers.

use crate::error::{Result, TspGaError};

/// Square matrix of non-negative, finite distances indexed by node id.
///
/// Stored row-major in a flat buffer. Symmetry is not enforced: `get(a, b)`
/// is the cost of travelling from `a` to `b`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from rows.
    ///
    /// # Errors
    /// [`TspGaError::Configuration`] if the rows do not form a square matrix
    /// or any entry is negative, NaN or infinite.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(TspGaError::Configuration(format!(
                    "distance matrix is not square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Self::from_flat(n, data)
    }

    /// Builds a matrix from a row-major buffer of `n * n` entries.
    pub fn from_flat(n: usize, data: Vec<f64>) -> Result<Self> {
        if n == 0 {
            return Err(TspGaError::Configuration(
                "distance matrix must not be empty".into(),
            ));
        }
        if data.len() != n * n {
            return Err(TspGaError::Configuration(format!(
                "distance matrix buffer has {} entries, expected {}",
                data.len(),
                n * n
            )));
        }
        if let Some(pos) = data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(TspGaError::Configuration(format!(
                "distance matrix entry ({}, {}) = {} is not a finite non-negative number",
                pos / n,
                pos % n,
                data[pos]
            )));
        }
        Ok(Self { n, data })
    }

    /// Builds the Euclidean distance matrix of planar points.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let n = points.len();
        let mut data = Vec::with_capacity(n * n);
        for &(xa, ya) in points {
            for &(xb, yb) in points {
                data.push((xa - xb).hypot(ya - yb));
            }
        }
        Self::from_flat(n, data)
    }

    /// Number of nodes (rows).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Distance from node `from` to node `to`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        assert!(from < self.n && to < self.n, "node index out of range");
        self.data[from * self.n + to]
    }
}
