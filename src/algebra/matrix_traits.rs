#![allow(non_snake_case)]

use crate::algebra::MatrixShape;

/// Common dimension queries for dense matrices and their views
pub trait ShapedMatrix {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn shape(&self) -> MatrixShape;
    fn size(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}

//NB: the concrete dense type is just called "Matrix".  The "DenseMatrix" trait
//is implemented on Matrix, its borrowed views and their Adjoints so that any
//of them can be read elementwise by the multiplication routines.

/// Read access to the entries of a dense matrix
pub trait DenseMatrix<T>: ShapedMatrix {
    /// Entry at `(row, col)`, honoring any triangle tag.  Entries
    /// outside of a tagged triangle read as zero.
    fn get(&self, idx: (usize, usize)) -> T;
}

/// Dense matrix-matrix multiplication
pub trait MultiplyGEMM<T> {
    /// computes `self = α*A*B + β*self`
    fn mul<MATA, MATB>(&mut self, A: &MATA, B: &MATB, α: T, β: T) -> &Self
    where
        MATA: DenseMatrix<T>,
        MATB: DenseMatrix<T>;
}

/// Weighted symmetric rank-k products
pub trait MultiplySYRK<T> {
    /// computes `self = α*A*diag(S)*Aᵀ + β*self`.  Both triangles
    /// of `self` are written.
    fn syrk_weighted<MATA>(&mut self, A: &MATA, S: &[T], α: T, β: T) -> &Self
    where
        MATA: DenseMatrix<T>;
}
