//! Distance matrix construction and lookup.

use crate::error::{Error, Result};

/// Tolerance used when checking a supplied matrix for symmetry.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Allocates an n×n `f64` buffer, surfacing allocation failure instead of
/// aborting the process.
pub(crate) fn alloc_square(n: usize) -> Result<Vec<f64>> {
    let cells = n.checked_mul(n).ok_or_else(|| {
        Error::ResourceExhausted(format!("{n}x{n} matrix exceeds addressable memory"))
    })?;
    let mut data = Vec::new();
    data.try_reserve_exact(cells)
        .map_err(|_| Error::ResourceExhausted(format!("cannot allocate {n}x{n} matrix")))?;
    Ok(data)
}

/// Symmetric pairwise distances between `n` cities.
///
/// Stored as a flat row-major `n * n` buffer for O(1) lookup. The matrix is
/// immutable once built: symmetric, non-negative, zero diagonal.
///
/// # Examples
///
/// ```
/// use u_antcolony::matrix::DistanceMatrix;
///
/// let points = vec![vec![0.0, 0.0], vec![3.0, 4.0]];
/// let matrix = DistanceMatrix::from_points(&points).unwrap();
/// assert_eq!(matrix.size(), 2);
/// assert!((matrix.distance(0, 1) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Builds the matrix from d-dimensional city coordinates.
    ///
    /// Computes the Euclidean distance for every unordered pair and mirrors
    /// it. Fails with [`Error::InvalidInput`] when fewer than two points are
    /// supplied, when dimensionality is inconsistent, or when a point has no
    /// coordinates.
    pub fn from_points(points: &[Vec<f64>]) -> Result<Self> {
        let n = points.len();
        if n < 2 {
            return Err(Error::InvalidInput(format!(
                "at least two cities are required, got {n}"
            )));
        }
        let dimension = points[0].len();
        if dimension == 0 {
            return Err(Error::InvalidInput(
                "city coordinates must have at least one dimension".into(),
            ));
        }
        for (i, point) in points.iter().enumerate() {
            if point.len() != dimension {
                return Err(Error::InvalidInput(format!(
                    "city {i} has {} coordinates, expected {dimension}",
                    point.len()
                )));
            }
            if point.iter().any(|c| !c.is_finite()) {
                return Err(Error::InvalidInput(format!(
                    "city {i} has a non-finite coordinate"
                )));
            }
        }

        let mut data = alloc_square(n)?;
        data.resize(n * n, 0.0);
        for i in 0..n {
            for j in (i + 1)..n {
                let squared: f64 = points[i]
                    .iter()
                    .zip(points[j].iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                let dist = squared.sqrt();
                data[i * n + j] = dist;
                data[j * n + i] = dist;
            }
        }

        Ok(Self { data, size: n })
    }

    /// Builds the matrix from a caller-supplied square matrix, used verbatim.
    ///
    /// Fails with [`Error::InvalidInput`] when the matrix is smaller than
    /// 2×2, not square, asymmetric beyond float tolerance, has a nonzero
    /// diagonal, or contains negative or non-finite entries.
    pub fn from_matrix(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        if n < 2 {
            return Err(Error::InvalidInput(format!(
                "distance matrix must be at least 2x2, got {n}x{n}"
            )));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::InvalidInput(format!(
                    "matrix is not square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
        }
        for i in 0..n {
            if rows[i][i] != 0.0 {
                return Err(Error::InvalidInput(format!(
                    "diagonal entry ({i}, {i}) must be zero, got {}",
                    rows[i][i]
                )));
            }
            for j in 0..n {
                let value = rows[i][j];
                if !value.is_finite() {
                    return Err(Error::InvalidInput(format!(
                        "entry ({i}, {j}) is not finite"
                    )));
                }
                if value < 0.0 {
                    return Err(Error::InvalidInput(format!(
                        "entry ({i}, {j}) is negative: {value}"
                    )));
                }
                let mirrored = rows[j][i];
                let scale = value.abs().max(mirrored.abs()).max(1.0);
                if (value - mirrored).abs() > SYMMETRY_TOLERANCE * scale {
                    return Err(Error::InvalidInput(format!(
                        "matrix is not symmetric at ({i}, {j}): {value} vs {mirrored}"
                    )));
                }
            }
        }

        let mut data = alloc_square(n)?;
        for row in rows {
            data.extend_from_slice(row);
        }

        Ok(Self { data, size: n })
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance between cities `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.size && j < self.size, "city index out of range");
        self.data[i * self.size + j]
    }

    /// Total length of a closed tour, including the edge from the last city
    /// back to the first.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }
        let consecutive: f64 = tour
            .windows(2)
            .map(|pair| self.distance(pair[0], pair[1]))
            .sum();
        consecutive + self.distance(tour[tour.len() - 1], tour[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_euclidean() {
        let points = vec![vec![0.0, 0.0], vec![3.0, 4.0], vec![0.0, 4.0]];
        let matrix = DistanceMatrix::from_points(&points).unwrap();

        assert_eq!(matrix.size(), 3);
        assert!((matrix.distance(0, 1) - 5.0).abs() < 1e-12);
        assert!((matrix.distance(0, 2) - 4.0).abs() < 1e-12);
        assert!((matrix.distance(1, 2) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_points_is_symmetric_with_zero_diagonal() {
        let points = vec![vec![1.0, 2.0, 3.0], vec![4.0, 6.0, 8.0], vec![0.0, 0.0, 1.0]];
        let matrix = DistanceMatrix::from_points(&points).unwrap();

        for i in 0..3 {
            assert_eq!(matrix.distance(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(matrix.distance(i, j), matrix.distance(j, i));
            }
        }
    }

    #[test]
    fn test_from_points_too_few() {
        let err = DistanceMatrix::from_points(&[vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = DistanceMatrix::from_points(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_points_inconsistent_dimensions() {
        let points = vec![vec![0.0, 0.0], vec![1.0]];
        let err = DistanceMatrix::from_points(&points).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_points_zero_dimensional() {
        let points = vec![vec![], vec![]];
        let err = DistanceMatrix::from_points(&points).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_matrix_verbatim() {
        let rows = vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ];
        let matrix = DistanceMatrix::from_matrix(&rows).unwrap();

        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.distance(0, 1), 1.0);
        assert_eq!(matrix.distance(1, 2), 3.0);
        assert_eq!(matrix.distance(2, 0), 2.0);
    }

    #[test]
    fn test_from_matrix_undersized() {
        let err = DistanceMatrix::from_matrix(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = DistanceMatrix::from_matrix(&[vec![0.0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_matrix_not_square() {
        let rows = vec![vec![0.0, 1.0], vec![1.0, 0.0, 2.0]];
        let err = DistanceMatrix::from_matrix(&rows).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_matrix_asymmetric() {
        let rows = vec![vec![0.0, 1.0], vec![2.0, 0.0]];
        let err = DistanceMatrix::from_matrix(&rows).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_matrix_negative_entry() {
        let rows = vec![vec![0.0, -1.0], vec![-1.0, 0.0]];
        let err = DistanceMatrix::from_matrix(&rows).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_matrix_nonzero_diagonal() {
        let rows = vec![vec![0.5, 1.0], vec![1.0, 0.0]];
        let err = DistanceMatrix::from_matrix(&rows).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_matrix_non_finite() {
        let rows = vec![vec![0.0, f64::NAN], vec![f64::NAN, 0.0]];
        let err = DistanceMatrix::from_matrix(&rows).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_alloc_square_overflow_is_surfaced() {
        let err = alloc_square(usize::MAX).unwrap_err();
        assert!(matches!(err, Error::ResourceExhausted(_)));
    }

    #[test]
    fn test_tour_length_includes_closing_edge() {
        let rows = vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ];
        let matrix = DistanceMatrix::from_matrix(&rows).unwrap();

        // 0 -> 1 -> 2 -> 0 = 1 + 3 + 2
        assert!((matrix.tour_length(&[0, 1, 2]) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_tour_length_rotation_invariant() {
        let points = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0]];
        let matrix = DistanceMatrix::from_points(&points).unwrap();

        let a = matrix.tour_length(&[0, 1, 2, 3]);
        let b = matrix.tour_length(&[2, 3, 0, 1]);
        assert!((a - b).abs() < 1e-12);
    }
}
