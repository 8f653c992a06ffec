//! Dense square matrices as read from and written to whitespace-delimited text.
//!
//! One row per line, cells separated by any whitespace, no header. Blank lines and
//! anything after a `#` are ignored when reading.

use crate::libs::error::MatrixError;
use anyhow::Context;
use itertools::Itertools;
use num_traits::Zero;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// A value that can live in a [`Matrix`] read from or written to text.
pub trait MatrixCell: Copy + PartialOrd + Zero + FromStr {
    fn format(&self) -> String;
}

/// Distances and thresholded distances, written as `%f`
impl MatrixCell for f64 {
    fn format(&self) -> String {
        format!("{:.6}", self)
    }
}

/// Indicators, written as `%d`
impl MatrixCell for u8 {
    fn format(&self) -> String {
        format!("{}", self)
    }
}

/// Integer cells of indicator files read back for counting
impl MatrixCell for i64 {
    fn format(&self) -> String {
        format!("{}", self)
    }
}

/// Row-major N x N matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    size: usize,
    data: Vec<T>,
}

impl<T: MatrixCell> Matrix<T> {
    /// ```
    /// use schic::libs::matrix::Matrix;
    /// let m = Matrix::from_rows(vec![vec![0.0, 1.5], vec![1.5, 0.0]]).unwrap();
    /// assert_eq!(m.size(), 2);
    /// assert_eq!(m.get(0, 1), 1.5);
    ///
    /// assert!(Matrix::<f64>::from_rows(vec![vec![0.0, 1.5]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        if rows.is_empty() {
            return Err(MatrixError::Empty);
        }

        let cols = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::Ragged {
                    line: i + 1,
                    expected: cols,
                    found: row.len(),
                });
            }
        }
        if rows.len() != cols {
            return Err(MatrixError::NotSquare {
                rows: rows.len(),
                cols,
            });
        }

        Ok(Self {
            size: cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, MatrixError> {
        let mut rows: Vec<Vec<T>> = vec![];

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(|e| MatrixError::Io {
                line: line_no,
                message: e.to_string(),
            })?;

            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line.as_str(),
            };
            if content.trim().is_empty() {
                continue;
            }

            let mut row = vec![];
            for (j, token) in content.split_whitespace().enumerate() {
                let value = token.parse::<T>().map_err(|_| MatrixError::Parse {
                    line: line_no,
                    column: j + 1,
                    token: token.to_string(),
                })?;
                row.push(value);
            }

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(MatrixError::Ragged {
                        line: line_no,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        Self::from_rows(rows)
    }

    /// Reads a matrix file, `.gz` included
    pub fn from_path(infile: &str) -> anyhow::Result<Self> {
        let reader = crate::reader(infile)?;
        let matrix = Self::from_reader(reader).with_context(|| format!("reading {}", infile))?;
        Ok(matrix)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.rows() {
            writeln!(writer, "{}", row.iter().map(|v| v.format()).join(" "))?;
        }
        Ok(())
    }

    pub fn to_path(&self, outfile: &str) -> anyhow::Result<()> {
        let mut writer = crate::writer(outfile)?;
        self.write_to(&mut writer)
            .with_context(|| format!("writing {}", outfile))?;
        writer.flush()?;
        Ok(())
    }
}

impl<T: Copy> Matrix<T> {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.size + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.size)
    }

    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.data.iter().copied()
    }

    /// Row-major `(row, col, value)` triples
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let size = self.size;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i / size, i % size, v))
    }

    /// Element-wise transform keeping the shape
    pub fn map<U, F: FnMut(T) -> U>(&self, f: F) -> Matrix<U> {
        Matrix {
            size: self.size,
            data: self.data.iter().copied().map(f).collect(),
        }
    }
}
