/// Matrix orientation marker
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum MatrixShape {
    /// Normal matrix orientation
    N,
    /// Transposed matrix orientation
    T,
}

/// Matrix shape marker for triangular matrices
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum MatrixTriangle {
    /// Upper triangular matrix
    Triu,
    /// Lower triangular matrix
    Tril,
}

impl MatrixTriangle {
    /// true if the entry `(row, col)` lies in this triangle (diagonal included)
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        match self {
            MatrixTriangle::Triu => row <= col,
            MatrixTriangle::Tril => row >= col,
        }
    }
}

/// Transposed view of a matrix.  Read only.
#[derive(Debug, Clone, Copy)]
pub struct Adjoint<'a, M> {
    pub src: &'a M,
}
