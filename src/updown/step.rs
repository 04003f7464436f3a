#![allow(non_snake_case)]

// Column update steps.  Each step absorbs row j of A into column j
// of L and deflates the remaining rows of A.  Steps must be applied
// for j = 0, 1, …, n-1 in that order, since row j reads values
// written by the steps for all earlier rows.

use super::reflector::*;
use super::{UpDowndate, UpdateError};
use crate::algebra::*;
use itertools::izip;

type Storage<S, T> = DenseStorageMatrix<S, T>;

// copy row j of A into the scratch buffer
fn gather_row<S, T>(A: &Storage<S, T>, j: usize, work: &mut [T])
where
    S: AsRef<[T]>,
    T: FloatT,
{
    for (k, wk) in work.iter_mut().enumerate() {
        *wk = A[(j, k)];
    }
}

/// Applies one joint (Householder) reflector for row `j`, treating every
/// column of `A` at once.  Returns true if the reflector was hyperbolic.
///
/// On failure nothing in row `j` or below has been written.
pub(crate) fn joint_step<SL, SA, T>(
    j: usize,
    L: &mut Storage<SL, T>,
    A: &mut Storage<SA, T>,
    ud: &UpDowndate<T>,
    tolerance: T,
    work: &mut [T],
) -> Result<bool, UpdateError>
where
    SL: AsRef<[T]> + AsMut<[T]>,
    SA: AsRef<[T]> + AsMut<[T]>,
    T: FloatT,
{
    let n = L.nrows();
    let a = &mut work[..A.ncols()];
    gather_row(A, j, a);

    let kind = RotationKind::select(a, ud, tolerance);
    let flip = L[(j, j)] < T::zero();
    let Reflector { l, r, u } = kind
        .reflector(L[(j, j)].abs(), a, ud)
        .ok_or(UpdateError::NotPositiveDefinite { row: j })?;

    L[(j, j)] = r;
    for k in 0..a.len() {
        A[(j, k)] = T::zero();
    }

    // trailing rows.  With p = L(i,j), w = A(i,:) and d = Σ S_k a_k w_k
    // the reflected (and sign flipped) values are
    //   L(i,j) = (l p + d) / r
    //   A(i,k) = w_k - τ a_k,   τ = (p + L(i,j)) / u
    // evaluated through l/r, a/r and r/u so that no product leaves the
    // range of the inputs.
    let c = l / r;
    let ν = r / u;
    for ak in a.iter_mut() {
        *ak = *ak / r;
    }
    for i in (j + 1)..n {
        let mut d = T::zero();
        for (k, &bk) in a.iter().enumerate() {
            d += ud.weight(k) * bk * A[(i, k)];
        }
        let p = if flip { -L[(i, j)] } else { L[(i, j)] };
        let lij = c * p + d;
        let τ = (p + lij) * ν;
        L[(i, j)] = lij;
        for (k, &bk) in a.iter().enumerate() {
            A[(i, k)] -= τ * bk;
        }
    }

    Ok(kind.is_hyperbolic())
}

/// Applies a chain of rank one rotations for row `j`, one per column of `A`.
/// Update columns are applied before downdate columns.  Returns true if
/// any downdate column was active in this row.
///
/// The joint positivity check runs before the first write, so a row
/// that cannot be factored is never modified.
pub(crate) fn sequential_step<SL, SA, T>(
    j: usize,
    L: &mut Storage<SL, T>,
    A: &mut Storage<SA, T>,
    ud: &UpDowndate<T>,
    tolerance: T,
    work: &mut [T],
) -> Result<bool, UpdateError>
where
    SL: AsRef<[T]> + AsMut<[T]>,
    SA: AsRef<[T]> + AsMut<[T]>,
    T: FloatT,
{
    let a = &mut work[..A.ncols()];
    gather_row(A, j, a);

    let kind = RotationKind::select(a, ud, tolerance);
    let mut l = L[(j, j)];
    if kind.diagonal(l.abs(), a, ud).is_none() {
        return Err(UpdateError::NotPositiveDefinite { row: j });
    }
    if l < T::zero() {
        for Lij in L.col_slice_mut(j)[j..].iter_mut() {
            *Lij = -*Lij;
        }
        l = -l;
    }

    for downdates in [false, true] {
        for (k, &w) in a.iter().enumerate() {
            let σ = ud.weight(k);
            if w == T::zero() || σ == T::zero() || (σ < T::zero()) != downdates {
                continue;
            }
            let Rotation { r, c, s } = RotationKind::for_weight(σ, tolerance)
                .rotation(l, w, σ)
                .ok_or(UpdateError::NotPositiveDefinite { row: j })?;

            L[(j, j)] = r;
            A[(j, k)] = T::zero();

            let Lcol = &mut L.col_slice_mut(j)[(j + 1)..];
            let Acol = &mut A.col_slice_mut(k)[(j + 1)..];
            for (Lij, Aik) in izip!(Lcol, Acol) {
                *Lij = (*Lij + σ * s * *Aik) / c;
                *Aik = c * *Aik - s * *Lij;
            }
            l = r;
        }
    }

    Ok(kind.is_hyperbolic())
}
