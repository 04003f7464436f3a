//! Rank-k updates and downdates of dense Cholesky factors.
//!
//! Given a lower triangular factor `L` with `L·Lᵀ = H`, a perturbation
//! matrix `A` (n × m) and column weights `S`, the routines in this module
//! overwrite `L` with the factor of
//!
//! ```text
//! H̃ = H + A·diag(S)·Aᵀ
//! ```
//!
//! Positive weights add a column (an update), negative weights remove
//! one (a downdate).  Each row of `L` is processed with a single
//! Householder reflector that treats every column of `A` jointly.  The
//! reflector is orthogonal when the row only carries updates and
//! hyperbolic when at least one downdate is active, in which case the
//! new diagonal is checked before anything in the row is written.
//!
//! The free functions [`update`], [`update_cholesky`] and
//! [`update_cholesky_with`] perform a single update.  The
//! [`CholeskyUpdater`] type keeps scratch memory, settings, timing and
//! summary information across repeated updates.

#![allow(non_snake_case)]

mod driver;
mod engine;
mod error;
mod info;
mod reflector;
mod settings;
mod step;

#[cfg(feature = "serde")]
mod json;

pub use driver::*;
pub use engine::*;
pub use error::*;
pub use info::*;
pub use settings::*;

use crate::algebra::FloatT;

/// Column weights for a rank-k modification.
///
/// The weight of a column decides whether it is added to or removed
/// from the factored matrix.  A zero weight makes the column inert.
#[derive(Debug, Clone, Copy)]
pub enum UpDowndate<'a, T> {
    /// every column has weight +1
    Update,
    /// every column has weight -1
    Downdate,
    /// column `k` has weight `sign(S[k])`
    Signs(&'a [i8]),
    /// column `k` has weight `S[k]`
    Diagonal(&'a [T]),
}

impl<'a, T> UpDowndate<'a, T>
where
    T: FloatT,
{
    /// Number of weights carried, or `None` for the uniform variants
    /// that apply to any number of columns.
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            UpDowndate::Update | UpDowndate::Downdate => None,
            UpDowndate::Signs(s) => Some(s.len()),
            UpDowndate::Diagonal(s) => Some(s.len()),
        }
    }

    /// Weight applied to column `k`.
    #[inline]
    pub fn weight(&self, k: usize) -> T {
        match self {
            UpDowndate::Update => T::one(),
            UpDowndate::Downdate => -T::one(),
            UpDowndate::Signs(s) => match s[k].signum() {
                1 => T::one(),
                -1 => -T::one(),
                _ => T::zero(),
            },
            UpDowndate::Diagonal(s) => s[k],
        }
    }

    /// Number of (update, downdate) columns among the first `m`.
    pub fn count(&self, m: usize) -> (usize, usize) {
        (0..m).fold((0, 0), |(up, down), k| {
            let σ = self.weight(k);
            if σ > T::zero() {
                (up + 1, down)
            } else if σ < T::zero() {
                (up, down + 1)
            } else {
                (up, down)
            }
        })
    }
}
