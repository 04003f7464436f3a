#![allow(non_snake_case)]

use crate::algebra::{DenseMatrix, DenseStorageMatrix, FloatT, MultiplySYRK, ShapedMatrix};

impl<S, T> MultiplySYRK<T> for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]> + AsMut<[T]>,
    T: FloatT,
{
    // implements self = C = αA*diag(S)*Aᵀ + βC
    fn syrk_weighted<MATA>(&mut self, A: &MATA, S: &[T], α: T, β: T) -> &Self
    where
        MATA: DenseMatrix<T>,
    {
        let n = A.nrows();
        assert!(self.nrows() == n && self.ncols() == n);
        assert_eq!(S.len(), A.ncols());

        // compute the lower triangle, then reflect
        for c in 0..n {
            for r in c..n {
                let mut acc = T::zero();
                for (k, &s) in S.iter().enumerate() {
                    acc += A.get((r, k)) * s * A.get((c, k));
                }
                let val = if β == T::zero() {
                    α * acc
                } else {
                    α * acc + β * self[(r, c)]
                };
                self[(r, c)] = val;
            }
        }
        for c in 0..n {
            for r in 0..c {
                self[(r, c)] = self[(c, r)];
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::algebra::*;

    #[test]
    fn test_syrk_weighted() {
        let A = Matrix::from(&[[1., 1.], [1., -1.], [1., 1.]]);
        let S = [2., -1.];
        let mut C = Matrix::<f64>::identity(3);
        C.syrk_weighted(&A, &S, 1.0, 1.0);

        #[rustfmt::skip]
        let target = Matrix::from(
            &[[2., 3., 1.],
              [3., 2., 3.],
              [1., 3., 2.]]);

        assert_eq!(C, target);
    }
}
