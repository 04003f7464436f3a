// All slice math used by the kernels and their tests should go
// through this trait, which is implemented generically for
// floats of type FloatT.

/// Vector operations on slices of [`FloatT`](crate::algebra::FloatT)

pub trait VectorMath {
    type T;

    /// Copy values from `src` to `self`
    fn copy_from(&mut self, src: &Self) -> &mut Self;

    /// set all elements to the same value
    fn set(&mut self, c: Self::T) -> &mut Self;

    /// Infinity norm
    fn norm_inf(&self) -> Self::T;

    /// Infinity norm of the elementwise difference `self - b`
    fn norm_inf_diff(&self, b: &Self) -> Self::T;
}
