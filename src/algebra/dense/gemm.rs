#![allow(non_snake_case)]

use crate::algebra::{DenseMatrix, DenseStorageMatrix, FloatT, MultiplyGEMM, ShapedMatrix};

impl<S, T> MultiplyGEMM<T> for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]> + AsMut<[T]>,
    T: FloatT,
{
    // implements self = C = αA*B + βC
    fn mul<MATA, MATB>(&mut self, A: &MATA, B: &MATB, α: T, β: T) -> &Self
    where
        MATA: DenseMatrix<T>,
        MATB: DenseMatrix<T>,
    {
        assert!(A.ncols() == B.nrows() && self.nrows() == A.nrows() && self.ncols() == B.ncols());

        for c in 0..self.ncols() {
            for r in 0..self.nrows() {
                let mut acc = T::zero();
                for k in 0..A.ncols() {
                    acc += A.get((r, k)) * B.get((k, c));
                }
                // β = 0 must ignore whatever is in C, NaN included
                self[(r, c)] = if β == T::zero() {
                    α * acc
                } else {
                    α * acc + β * self[(r, c)]
                };
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::algebra::*;

    #[test]
    fn test_gemm() {
        let (m, n, k) = (2, 4, 3);
        let a = vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
        let b = vec![
            1.0, 5.0, 9.0, 2.0, 6.0, 10.0, 3.0, 7.0, 11.0, 4.0, 8.0, 12.0,
        ];
        let c = vec![2.0, 7.0, 6.0, 2.0, 0.0, 7.0, 4.0, 2.0];

        let A = Matrix::new_from_slice((m, k), &a);
        let B = Matrix::new_from_slice((k, n), &b);
        let mut C = Matrix::<f64>::new_from_slice((m, n), &c);
        C.mul(&A, &B, 1.0, 1.0);

        assert_eq!(C.data(), &[40.0, 90.0, 50.0, 100.0, 50.0, 120.0, 60.0, 130.0]);

        // transposed multiply
        let mut C = Matrix::<f64>::zeros((n, m));
        C.mul(&B.t(), &A.t(), 1.0, 0.0);

        assert_eq!(C.data(), &[38.0, 44.0, 50.0, 56.0, 83.0, 98.0, 113.0, 128.0]);
    }

    #[test]
    fn test_gemm_triangular_operand() {
        // the upper triangle of a Tril tagged operand is ignored
        let L = Matrix::from(&[[2., 9.], [1., 3.]]).with_triangle(Some(MatrixTriangle::Tril));
        let mut C = Matrix::<f64>::zeros((2, 2));
        C.mul(&L, &L.t(), 1.0, 0.0);

        assert_eq!(C, Matrix::from(&[[4., 2.], [2., 10.]]));
    }
}
