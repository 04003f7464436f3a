use super::{FloatT, VectorMath};
use std::iter::zip;

impl<T: FloatT> VectorMath for [T] {
    type T = T;
    fn copy_from(&mut self, src: &[T]) -> &mut Self {
        self.copy_from_slice(src);
        self
    }

    fn set(&mut self, c: T) -> &mut Self {
        self.fill(c);
        self
    }

    fn norm_inf(&self) -> T {
        let mut out = T::zero();
        for v in self.iter().map(|v| v.abs()) {
            if v.is_nan() {
                return T::nan();
            }
            out = if v > out { v } else { out };
        }
        out
    }

    fn norm_inf_diff(&self, b: &[T]) -> T {
        assert_eq!(self.len(), b.len());
        zip(self, b).fold(T::zero(), |acc, (x, y)| T::max(acc, T::abs(*x - *y)))
    }
}

#[cfg(test)]
mod tests {
    use crate::algebra::*;

    #[test]
    fn test_copy_from() {
        let x = vec![3., 0., 2., 1.];
        let mut y = vec![0.; 4];
        y.copy_from(&x);
        assert_eq!(x, y);
    }

    #[test]
    fn test_set() {
        let mut x = vec![3., 0., 2., 1.];
        x.set(-4.);
        assert_eq!(x, vec![-4.; 4]);
    }

    #[test]
    fn test_norm_inf() {
        let x = [-3., 0., 2., 1.];
        assert_eq!(x.norm_inf(), 3.);

        let x = [1., f64::NAN, 7.];
        assert!(x.norm_inf().is_nan());
    }

    #[test]
    fn test_norm_inf_diff() {
        let x = [1., 2., 3.];
        let y = [1.5, 2., -1.];
        assert_eq!(x.norm_inf_diff(&y), 4.);
    }
}
