use thiserror::Error;

/// Error type returned when wrapping a data slice as a dense matrix.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixViewError {
    /// Leading dimension is smaller than the number of rows
    #[error("Leading dimension {ld} is smaller than the row count {rows}")]
    BadStride { rows: usize, ld: usize },
    /// Data slice cannot hold every column at the given stride
    #[error("Data of length {found} is too short for a matrix requiring {required} entries")]
    BufferTooShort { required: usize, found: usize },
}
