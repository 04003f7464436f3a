#![allow(non_snake_case)]

// Elementary transformations that fold one row of the perturbation
// matrix into the diagonal of the Cholesky factor.
//
// For row j with diagonal l = L(j,j) and perturbation row a = A(j,:),
// the new diagonal is r = sqrt(l² + Σ S_k a_k²).  When every column
// carrying a nonzero a_k has S_k > 0 this is a norm and always exists.
// Otherwise the quadratic form is indefinite and r may fail to exist,
// which is a genuine loss of positive definiteness.
//
// Callers pass l >= 0.  A negative diagonal is handled by flipping the
// sign of its column first, which leaves L·Lᵀ unchanged.

use super::UpDowndate;
use crate::algebra::FloatT;
use enum_dispatch::*;

/// Householder-type reflector acting jointly on L(:,j) and every column of A.
///
/// The reflector maps `[l, a]` to `[-r, 0, …, 0]`.  The caller flips the
/// sign of the L column afterwards so that the new diagonal is `+r`.
/// Reflecting onto `-r` keeps `u = l + r` free of cancellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Reflector<T> {
    /// diagonal before the update
    pub l: T,
    /// diagonal after the update
    pub r: T,
    /// l + r
    pub u: T,
}

/// Rank one rotation acting on L(:,j) and a single column of A
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rotation<T> {
    pub r: T,
    /// r / l
    pub c: T,
    /// w / l
    pub s: T,
}

#[enum_dispatch]
pub(crate) trait ReflectorGenerator<T>
where
    T: FloatT,
{
    /// New diagonal entry for the row `[l, a]` weighted by `ud`,
    /// or `None` if it does not exist as a positive real number.
    fn diagonal(&self, l: T, a: &[T], ud: &UpDowndate<T>) -> Option<T>;

    /// New diagonal entry for `[l, w]` with the single weight σ
    fn diagonal_rank_one(&self, l: T, w: T, σ: T) -> Option<T>;

    fn is_hyperbolic(&self) -> bool;

    fn reflector(&self, l: T, a: &[T], ud: &UpDowndate<T>) -> Option<Reflector<T>> {
        let r = self.diagonal(l, a, ud)?;
        Some(Reflector { l, r, u: l + r })
    }

    fn rotation(&self, l: T, w: T, σ: T) -> Option<Rotation<T>> {
        let r = self.diagonal_rank_one(l, w, σ)?;
        Some(Rotation {
            r,
            c: r / l,
            s: w / l,
        })
    }
}

/// Energy preserving reflection, used when every relevant weight is positive
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Orthogonal;

/// Hyperbolic reflection, used when some relevant weight is negative
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Hyperbolic<T> {
    /// r² must exceed this value
    pub tolerance: T,
}

impl<T> ReflectorGenerator<T> for Orthogonal
where
    T: FloatT,
{
    fn diagonal(&self, l: T, a: &[T], ud: &UpDowndate<T>) -> Option<T> {
        // hypot chain avoids overflow in l² + Σ S_k a_k²
        let mut r = l.abs();
        for (k, &ak) in a.iter().enumerate() {
            let σ = ud.weight(k);
            if ak == T::zero() || σ == T::zero() {
                continue;
            }
            debug_assert!(σ > T::zero());
            r = r.hypot(σ.sqrt() * ak);
        }
        (r > T::zero() && r.is_finite()).then_some(r)
    }

    fn diagonal_rank_one(&self, l: T, w: T, σ: T) -> Option<T> {
        debug_assert!(σ >= T::zero());
        let r = l.abs().hypot(σ.sqrt() * w);
        (r > T::zero() && r.is_finite()).then_some(r)
    }

    fn is_hyperbolic(&self) -> bool {
        false
    }
}

impl<T> Hyperbolic<T>
where
    T: FloatT,
{
    // r = μ·sqrt(ρ) with ρ = r²/μ².  Fails on r² <= tolerance and on NaN.
    fn checked_root(&self, μ: T, ρ: T) -> Option<T> {
        if !(ρ > T::zero() && ρ.is_finite()) {
            return None;
        }
        let r = μ * ρ.sqrt();
        (r.is_finite() && r > self.tolerance.sqrt()).then_some(r)
    }
}

impl<T> ReflectorGenerator<T> for Hyperbolic<T>
where
    T: FloatT,
{
    fn diagonal(&self, l: T, a: &[T], ud: &UpDowndate<T>) -> Option<T> {
        // scale by the largest entry so that no square over- or underflows
        let μ = a.iter().fold(l.abs(), |μ, &ak| T::max(μ, ak.abs()));
        let x = l / μ;
        let mut ρ = x * x;
        for (k, &ak) in a.iter().enumerate() {
            let x = ak / μ;
            ρ += ud.weight(k) * x * x;
        }
        self.checked_root(μ, ρ)
    }

    fn diagonal_rank_one(&self, l: T, w: T, σ: T) -> Option<T> {
        let μ = T::max(l.abs(), w.abs());
        let (x, y) = (l / μ, w / μ);
        self.checked_root(μ, x * x + σ * y * y)
    }

    fn is_hyperbolic(&self) -> bool {
        true
    }
}

/// Closed set of rotation strategies, selected per row
#[enum_dispatch(ReflectorGenerator<T>)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum RotationKind<T>
where
    T: FloatT,
{
    Orthogonal(Orthogonal),
    Hyperbolic(Hyperbolic<T>),
}

impl<T> RotationKind<T>
where
    T: FloatT,
{
    /// Hyperbolic iff some column with a negative weight has a
    /// nonzero entry in the row `a`.
    pub(crate) fn select(a: &[T], ud: &UpDowndate<T>, tolerance: T) -> Self {
        let hyperbolic = a
            .iter()
            .enumerate()
            .any(|(k, &ak)| ak != T::zero() && ud.weight(k) < T::zero());
        Self::choose(hyperbolic, tolerance)
    }

    /// strategy for a single column with weight σ
    pub(crate) fn for_weight(σ: T, tolerance: T) -> Self {
        Self::choose(σ < T::zero(), tolerance)
    }

    fn choose(hyperbolic: bool, tolerance: T) -> Self {
        if hyperbolic {
            Hyperbolic { tolerance }.into()
        } else {
            Orthogonal.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        let S = [2., -1.];
        let ud = UpDowndate::Diagonal(&S);

        let kind = RotationKind::select(&[1., 1.], &ud, 0.);
        assert!(kind.is_hyperbolic());

        // negative weight on a zero entry stays orthogonal
        let kind = RotationKind::select(&[1., 0.], &ud, 0.);
        assert!(!kind.is_hyperbolic());

        let kind = RotationKind::select(&[3., 4.], &UpDowndate::<f64>::Update, 0.);
        assert_eq!(kind, RotationKind::Orthogonal(Orthogonal));
    }

    #[test]
    fn test_orthogonal_diagonal() {
        let kind = RotationKind::<f64>::Orthogonal(Orthogonal);
        let r = kind.diagonal(3., &[4., 12.], &UpDowndate::Update).unwrap();
        assert!((r - 13.).abs() < 1e-14);

        // weights scale the squared entries
        let S = [4.];
        let r = kind.diagonal(3., &[2.], &UpDowndate::Diagonal(&S)).unwrap();
        assert!((r - 5.).abs() < 1e-14);

        // no overflow where l² would overflow
        let r = kind.diagonal(1e200, &[1e200], &UpDowndate::Update).unwrap();
        assert!((r / 1e200 - f64::sqrt(2.)).abs() < 1e-14);
    }

    #[test]
    fn test_hyperbolic_diagonal() {
        let kind = RotationKind::select(&[3.], &UpDowndate::<f64>::Downdate, 0.);
        let refl = kind.reflector(5., &[3.], &UpDowndate::Downdate).unwrap();
        assert_eq!(refl.l, 5.);
        assert!((refl.r - 4.).abs() < 1e-14);
        assert!((refl.u - 9.).abs() < 1e-14);

        // exactly singular and indefinite results both fail
        assert!(kind.diagonal(3., &[3.], &UpDowndate::Downdate).is_none());
        assert!(kind.diagonal(3., &[4.], &UpDowndate::Downdate).is_none());
        assert!(kind.diagonal(f64::NAN, &[4.], &UpDowndate::Downdate).is_none());
        assert!(kind.diagonal(0., &[0.], &UpDowndate::Downdate).is_none());
    }

    #[test]
    fn test_hyperbolic_extreme_scales() {
        let kind = RotationKind::<f64>::for_weight(-1., 0.);

        // l² overflows but r = 0.8 l is representable
        let r = kind.diagonal(5e300, &[3e300], &UpDowndate::Downdate).unwrap();
        assert!((r / 4e300 - 1.).abs() < 1e-14);
        let r = kind.diagonal_rank_one(5e300, 3e300, -1.).unwrap();
        assert!((r / 4e300 - 1.).abs() < 1e-14);

        // l² underflows to zero
        let r = kind.diagonal(5e-300, &[3e-300], &UpDowndate::Downdate).unwrap();
        assert!((r / 4e-300 - 1.).abs() < 1e-14);

        // a tiny downdate of a huge f32 diagonal
        let kind = RotationKind::<f32>::for_weight(-1., 0.);
        let r = kind.diagonal(2e19, &[1.], &UpDowndate::Downdate).unwrap();
        assert_eq!(r, 2e19);
        assert!(kind.diagonal(2e19, &[2e19], &UpDowndate::Downdate).is_none());
    }

    #[test]
    fn test_hyperbolic_tolerance() {
        let strict = RotationKind::for_weight(-1., 0.25);
        assert!(strict.is_hyperbolic());
        // r² = 2.25 - 0.5*4 = 0.25 does not exceed the tolerance
        assert!(strict.diagonal_rank_one(1.5, 2., -0.5).is_none());
        assert!(strict.diagonal_rank_one(1.5, 1., -0.5).is_some());
        assert!(strict.diagonal_rank_one(2.0, 2., -0.5).is_some());
    }

    #[test]
    fn test_rotation() {
        let kind = RotationKind::<f64>::for_weight(1., 0.);
        let rot = kind.rotation(3., 4., 1.).unwrap();
        assert!((rot.r - 5.).abs() < 1e-14);
        assert!((rot.c - 5. / 3.).abs() < 1e-14);
        assert!((rot.s - 4. / 3.).abs() < 1e-14);
    }
}
