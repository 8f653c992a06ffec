use crate::libs::matrix::{Matrix, MatrixCell};

/// Presence/absence indicator: 1 where the entry is strictly positive, 0 elsewhere.
///
/// ```
/// use schic::libs::binary::binarize;
/// use schic::libs::matrix::Matrix;
///
/// let m = Matrix::from_rows(vec![vec![0.0, 0.75], vec![0.75, 0.0]]).unwrap();
/// let b = binarize(&m);
/// assert_eq!(b.rows().collect::<Vec<_>>(), vec![&[0u8, 1][..], &[1, 0][..]]);
/// ```
pub fn binarize<T: MatrixCell>(matrix: &Matrix<T>) -> Matrix<u8> {
    matrix.map(|v| if v > T::zero() { 1 } else { 0 })
}
