use std::fmt;

/// Failures while turning text into a square matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A token could not be parsed as a cell value
    Parse {
        /// The line number (1-based)
        line: usize,
        /// The column number (1-based, counted in tokens)
        column: usize,
        /// The offending token
        token: String,
    },
    /// A row has a different number of cells than the first one
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Rows and columns disagree
    NotSquare { rows: usize, cols: usize },
    /// No data rows at all
    Empty,
    /// The underlying reader failed
    Io { line: usize, message: String },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Parse {
                line,
                column,
                token,
            } => write!(
                f,
                "Parse error at line {}, column {}: invalid value \"{}\"",
                line, column, token
            ),
            MatrixError::Ragged {
                line,
                expected,
                found,
            } => write!(
                f,
                "Ragged row at line {}: expected {} values, found {}",
                line, expected, found
            ),
            MatrixError::NotSquare { rows, cols } => {
                write!(f, "Matrix is not square: {} rows x {} columns", rows, cols)
            }
            MatrixError::Empty => write!(f, "Matrix is empty"),
            MatrixError::Io { line, message } => {
                write!(f, "Read error at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// Outcomes of the aggregation that are not a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConserveError {
    /// `report` was asked for before any matrix was added
    NoFilesProcessed,
    /// A matrix disagrees with the size fixed by the first one
    ShapeMismatch { expected: usize, found: usize },
}

impl fmt::Display for ConserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConserveError::NoFilesProcessed => write!(f, "No files processed"),
            ConserveError::ShapeMismatch { expected, found } => write!(
                f,
                "Shape mismatch: expected {}x{}, found {}x{}",
                expected, expected, found, found
            ),
        }
    }
}

impl std::error::Error for ConserveError {}
