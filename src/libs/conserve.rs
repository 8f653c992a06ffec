//! Counting, across many indicator matrices, how often each cell location is set.
//!
//! Only locations that are 1 in at least one matrix are stored. The map keeps
//! insertion order, which is the order locations were first seen: row-major within a
//! matrix, matrices in the order they were added. Reports use that order to break ties.

use crate::libs::error::ConserveError;
use crate::libs::matrix::{Matrix, MatrixCell};
use indexmap::IndexMap;
use num_traits::One;
use std::fmt;
use std::io::Write;

pub const REPORT_HEADER: &str = "Row,Column,ConservedInFiles";

/// One record of the conservation report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConservedCell {
    pub row: usize,
    pub col: usize,
    pub count: u32,
}

impl fmt::Display for ConservedCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.row, self.col, self.count)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Conservation {
    size: Option<usize>,
    files: usize,
    counts: IndexMap<(usize, usize), u32>,
}

impl Conservation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of matrices added so far
    pub fn files(&self) -> usize {
        self.files
    }

    /// Number of locations seen set at least once
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Size fixed by the first matrix
    pub fn size(&self) -> Option<usize> {
        self.size
    }

    pub fn count(&self, row: usize, col: usize) -> u32 {
        self.counts.get(&(row, col)).copied().unwrap_or(0)
    }

    fn check_size(&self, found: usize) -> Result<(), ConserveError> {
        match self.size {
            Some(expected) if expected != found => {
                Err(ConserveError::ShapeMismatch { expected, found })
            }
            _ => Ok(()),
        }
    }

    /// Counts every location holding exactly 1.
    ///
    /// A matrix whose size differs from the first one is rejected and leaves the
    /// counts untouched.
    pub fn add<T: MatrixCell + One>(&mut self, matrix: &Matrix<T>) -> Result<(), ConserveError> {
        self.check_size(matrix.size())?;
        self.size = Some(matrix.size());

        for (row, col, v) in matrix.cells() {
            if v.is_one() {
                *self.counts.entry((row, col)).or_insert(0) += 1;
            }
        }
        self.files += 1;

        Ok(())
    }

    /// Point-wise sum with a partial accumulator built over other matrices.
    ///
    /// Locations only `other` has seen are appended after the ones of `self`.
    pub fn merge(&mut self, other: &Conservation) -> Result<(), ConserveError> {
        if let Some(found) = other.size {
            self.check_size(found)?;
            self.size = Some(found);
        }

        for (&loc, &n) in &other.counts {
            *self.counts.entry(loc).or_insert(0) += n;
        }
        self.files += other.files;

        Ok(())
    }

    /// Records sorted by count, descending; equal counts stay in first-seen order.
    pub fn report(&self) -> Result<Vec<ConservedCell>, ConserveError> {
        if self.files == 0 {
            return Err(ConserveError::NoFilesProcessed);
        }

        let mut cells: Vec<ConservedCell> = self
            .counts
            .iter()
            .map(|(&(row, col), &count)| ConservedCell { row, col, count })
            .collect();
        cells.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(cells)
    }
}

/// Adds every matrix in turn, then reports.
///
/// ```
/// use schic::libs::conserve::{aggregate, ConservedCell};
/// use schic::libs::error::ConserveError;
/// use schic::libs::matrix::Matrix;
///
/// let m = Matrix::from_rows(vec![vec![0u8, 1], vec![1, 0]]).unwrap();
/// let report = aggregate(vec![m.clone(), m]).unwrap();
/// assert_eq!(report[0], ConservedCell { row: 0, col: 1, count: 2 });
///
/// assert_eq!(aggregate(vec![]), Err(ConserveError::NoFilesProcessed));
/// ```
pub fn aggregate<I>(matrices: I) -> Result<Vec<ConservedCell>, ConserveError>
where
    I: IntoIterator<Item = Matrix<u8>>,
{
    let mut conservation = Conservation::new();
    for matrix in matrices {
        conservation.add(&matrix)?;
    }
    conservation.report()
}

/// Comma separated table with a header line; records below `min_count` are dropped.
pub fn write_report<W: Write>(
    writer: &mut W,
    cells: &[ConservedCell],
    min_count: u32,
) -> std::io::Result<()> {
    writeln!(writer, "{}", REPORT_HEADER)?;
    for cell in cells.iter().filter(|c| c.count >= min_count) {
        writeln!(writer, "{}", cell)?;
    }
    Ok(())
}
