//! Bottom-percentile thresholding of distance matrices.
//!
//! Zero distances mean "not measured" and never take part in the percentile. The
//! threshold is applied to the whole matrix, so zeros always survive unchanged.

use crate::libs::matrix::Matrix;

/// Keep the shortest 1% of the measured distances
pub const DEFAULT_PERCENTILE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Entries above `threshold` zeroed
    Kept { matrix: Matrix<f64>, threshold: f64 },
    /// No strictly positive entry to take a percentile of
    Skip,
}

/// Percentile of already sorted values, `pct` in `[0, 100]`.
///
/// Linear interpolation between the order statistics bracketing the rank
/// `pct / 100 * (n - 1)`.
///
/// ```
/// use schic::libs::threshold::percentile;
/// assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0, 5.0], 50.0), 3.0);
/// assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 50.0), 2.5);
/// assert_eq!(percentile(&[7.0], 1.0), 7.0);
/// ```
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile of an empty set");

    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = (rank.floor() as usize).min(sorted.len() - 1);
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = rank - lo as f64;

    let (a, b) = (sorted[lo], sorted[hi]);
    let diff = b - a;
    // evaluate from the nearer end so that exact order statistics come back exactly
    if frac >= 0.5 {
        b - diff * (1.0 - frac)
    } else {
        a + diff * frac
    }
}

/// Strictly positive entries, sorted ascending
pub fn positive_values(matrix: &Matrix<f64>) -> Vec<f64> {
    let mut values: Vec<f64> = matrix.values().filter(|&v| v > 0.0).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

/// ```
/// use schic::libs::matrix::Matrix;
/// use schic::libs::threshold::{extract, Extraction};
///
/// let m = Matrix::from_rows(vec![
///     vec![0.0, 5.0, 9.0],
///     vec![5.0, 0.0, 1.0],
///     vec![9.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// match extract(&m, 1.0) {
///     Extraction::Kept { matrix, threshold } => {
///         assert_eq!(threshold, 1.0);
///         assert_eq!(matrix.get(1, 2), 1.0);
///         assert_eq!(matrix.get(0, 1), 0.0);
///     }
///     Extraction::Skip => unreachable!(),
/// }
/// ```
pub fn extract(matrix: &Matrix<f64>, pct: f64) -> Extraction {
    let positives = positive_values(matrix);
    if positives.is_empty() {
        return Extraction::Skip;
    }

    let threshold = percentile(&positives, pct);
    let matrix = matrix.map(|v| if v <= threshold { v } else { 0.0 });

    Extraction::Kept { matrix, threshold }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(rows: Vec<Vec<f64>>) -> Matrix<f64> {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_percentile_interpolation() {
        // rank = 0.01 * 99 = 0.99
        let values: Vec<f64> = (1..=100).map(|v| v as f64).collect();
        assert_relative_eq!(percentile(&values, 1.0), 1.99, epsilon = 1e-12);

        // rank = 0.01 * 4 = 0.04
        assert_relative_eq!(
            percentile(&[2.0, 4.0, 6.0, 8.0, 10.0], 1.0),
            2.08,
            epsilon = 1e-12
        );

        assert_eq!(percentile(&[2.0, 4.0, 6.0], 0.0), 2.0);
        assert_eq!(percentile(&[2.0, 4.0, 6.0], 100.0), 6.0);
    }

    #[test]
    fn test_extract_skip() {
        let m = square(vec![vec![0.0; 3]; 3]);
        assert_eq!(extract(&m, DEFAULT_PERCENTILE), Extraction::Skip);
    }

    #[test]
    fn test_extract_example() {
        let m = square(vec![
            vec![0.0, 5.0, 9.0],
            vec![5.0, 0.0, 1.0],
            vec![9.0, 1.0, 0.0],
        ]);
        let Extraction::Kept { matrix, threshold } = extract(&m, DEFAULT_PERCENTILE) else {
            panic!("expected a thresholded matrix");
        };

        // sorted {1, 1, 5, 5, 9, 9}, rank 0.05 between two 1s
        assert_eq!(threshold, 1.0);
        let kept: Vec<_> = matrix.cells().filter(|c| c.2 > 0.0).collect();
        assert_eq!(kept, vec![(1, 2, 1.0), (2, 1, 1.0)]);
    }

    #[test]
    fn test_extract_single_positive() {
        let m = square(vec![vec![0.0, 3.0], vec![0.0, 0.0]]);
        let Extraction::Kept { matrix, threshold } = extract(&m, DEFAULT_PERCENTILE) else {
            panic!("expected a thresholded matrix");
        };
        assert_eq!(threshold, 3.0);
        assert_eq!(matrix, m);
    }

    #[test]
    fn test_extract_threshold_between_values() {
        // sorted {2, 2, 4, 4}, p50 = 3: both 2s admitted, no cell equals the threshold
        let m = square(vec![vec![0.0, 2.0, 4.0], vec![2.0, 0.0, 0.0], vec![4.0, 0.0, 0.0]]);
        let Extraction::Kept { matrix, threshold } = extract(&m, 50.0) else {
            panic!("expected a thresholded matrix");
        };
        assert_eq!(threshold, 3.0);
        assert_eq!(matrix.values().filter(|&v| v > 0.0).count(), 2);

        // interpolated threshold below every value but the minimum admits the minimum only
        let m = square(vec![vec![0.0, 1.0, 2.0], vec![3.0, 0.0, 4.0], vec![5.0, 6.0, 0.0]]);
        let Extraction::Kept { matrix, threshold } = extract(&m, 1.0) else {
            panic!("expected a thresholded matrix");
        };
        assert_relative_eq!(threshold, 1.05, epsilon = 1e-12);
        assert_eq!(matrix.values().filter(|&v| v > 0.0).collect::<Vec<_>>(), vec![1.0]);
    }

    #[test]
    fn test_extract_laws() {
        let m = square(vec![
            vec![0.0, 3.5, 1.25, 8.0],
            vec![3.5, 0.0, 2.0, 0.5],
            vec![1.25, 2.0, 0.0, 7.0],
            vec![8.0, 0.5, 7.0, 0.0],
        ]);

        for pct in [0.0, 1.0, 25.0, 50.0, 99.0, 100.0] {
            let Extraction::Kept { matrix, threshold } = extract(&m, pct) else {
                panic!("expected a thresholded matrix");
            };

            // every output entry is the input entry or zero
            for ((_, _, before), (_, _, after)) in m.cells().zip(matrix.cells()) {
                assert!(after == before || after == 0.0);
            }

            // positive output entries are exactly the positive inputs under the threshold
            let expected: Vec<f64> = m
                .values()
                .filter(|&v| v > 0.0 && v <= threshold)
                .collect();
            let found: Vec<f64> = matrix.values().filter(|&v| v > 0.0).collect();
            assert_eq!(found, expected);
        }
    }
}
