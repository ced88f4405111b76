//! Dense pairwise cost matrix.

use thiserror::Error;

/// Travel cost of a single directed waypoint pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cost {
    /// Path length in metres.
    pub distance_m: f64,
    /// Travel time in seconds.
    pub time_s: f64,
}

impl Cost {
    /// Cost of staying in place.
    pub const ZERO: Self = Self {
        distance_m: 0.0,
        time_s: 0.0,
    };

    /// Construct a cost from distance and time.
    #[must_use]
    pub const fn new(distance_m: f64, time_s: f64) -> Self {
        Self { distance_m, time_s }
    }

    /// Whether both components are finite and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_component(self.distance_m) && is_valid_component(self.time_s)
    }
}

fn is_valid_component(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Errors returned when constructing a [`CostMatrix`] from explicit rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostMatrixError {
    /// A row length differs from the number of rows.
    #[error("row {row} has {actual} cells but the matrix has {expected} rows")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Number of rows in the matrix.
        expected: usize,
        /// Number of cells in the row.
        actual: usize,
    },
    /// A diagonal cell was not zero.
    #[error("diagonal cell {index} must be zero")]
    NonZeroDiagonal {
        /// Row and column of the cell.
        index: usize,
    },
    /// A cell was negative or not finite.
    #[error("cell ({from}, {to}) must be finite and non-negative")]
    InvalidCell {
        /// Row of the cell.
        from: usize,
        /// Column of the cell.
        to: usize,
    },
}

/// `N×N` matrix of travel costs between waypoints.
///
/// `get(i, j)` is the cost of travelling from waypoint `i` to waypoint `j`.
/// Every cell is populated; the diagonal is zero.
///
/// # Examples
/// ```
/// use waypath_core::CostMatrix;
///
/// let matrix = CostMatrix::from_distances(vec![
///     vec![0.0, 5.0],
///     vec![7.0, 0.0],
/// ])?;
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.distance(1, 0), Some(7.0));
/// # Ok::<(), waypath_core::CostMatrixError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    size: usize,
    cells: Vec<Cost>,
}

impl CostMatrix {
    /// Wrap a row-major cell buffer produced by the builder.
    pub(crate) fn from_cells(size: usize, cells: Vec<Cost>) -> Self {
        debug_assert_eq!(cells.len(), size * size, "cell buffer must be N×N");
        Self { size, cells }
    }

    /// Validate and construct a matrix from explicit rows.
    ///
    /// # Errors
    ///
    /// Fails when the rows are not square, a diagonal cell is non-zero, or a
    /// cell is negative or not finite.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, CostMatrixError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(CostMatrixError::NotSquare {
                    row: from,
                    expected: size,
                    actual: row.len(),
                });
            }
            for (to, cost) in row.into_iter().enumerate() {
                if !cost.is_valid() {
                    return Err(CostMatrixError::InvalidCell { from, to });
                }
                if from == to && cost != Cost::ZERO {
                    return Err(CostMatrixError::NonZeroDiagonal { index: from });
                }
                cells.push(cost);
            }
        }
        Ok(Self::from_cells(size, cells))
    }

    /// Construct a matrix from distances alone, leaving times at zero.
    ///
    /// # Errors
    ///
    /// Same as [`CostMatrix::from_rows`].
    pub fn from_distances(rows: Vec<Vec<f64>>) -> Result<Self, CostMatrixError> {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(|d| Cost::new(d, 0.0)).collect())
                .collect(),
        )
    }

    /// Number of waypoints covered by the matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether the matrix covers no waypoints.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Cost from `from` to `to`, or `None` when either index is out of range.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<Cost> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.cells.get(from * self.size + to).copied()
    }

    /// Distance in metres from `from` to `to`.
    #[must_use]
    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        self.get(from, to).map(|cost| cost.distance_m)
    }

    /// Travel time in seconds from `from` to `to`.
    #[must_use]
    pub fn time(&self, from: usize, to: usize) -> Option<f64> {
        self.get(from, to).map(|cost| cost.time_s)
    }

    /// Iterate over rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &[Cost]> {
        self.cells.chunks(self.size.max(1))
    }
}
