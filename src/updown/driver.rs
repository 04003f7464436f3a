#![allow(non_snake_case)]

use super::settings::ColumnProcessing;
use super::step::{joint_step, sequential_step};
use super::*;
use crate::algebra::*;

// number of rows handled by each rotation strategy
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowTally {
    pub orthogonal: usize,
    pub hyperbolic: usize,
}

/// Updates the Cholesky factor `L` in place so that on success
///
/// ```text
/// L̃·L̃ᵀ = L·Lᵀ + A·diag(S)·Aᵀ
/// ```
///
/// where `S` holds the column weights described by `ud`.  `A` is used as
/// working storage and holds no useful data afterwards.  Only the lower
/// triangle of `L` is referenced.
///
/// Uses default [`UpdateSettings`] and allocates a scratch buffer with
/// one entry per column of `A`.  See [`update_cholesky_with`] for the
/// allocation free version.
///
/// # Errors
///
/// Shape mismatches and non-positive diagonal entries in `L` are reported
/// before anything is modified.  If a downdate destroys positive
/// definiteness, [`UpdateError::NotPositiveDefinite`] is returned and `L`
/// and `A` are left partially updated.
pub fn update_cholesky<SL, SA, T>(
    L: &mut DenseStorageMatrix<SL, T>,
    A: &mut DenseStorageMatrix<SA, T>,
    ud: UpDowndate<T>,
) -> Result<(), UpdateError>
where
    SL: AsRef<[T]> + AsMut<[T]>,
    SA: AsRef<[T]> + AsMut<[T]>,
    T: FloatT,
{
    let settings = UpdateSettings::<T>::default();
    let mut work = vec![T::zero(); A.ncols()];
    update_cholesky_with(L, A, ud, &settings, &mut work)
}

/// Rank-k update of `L` with arbitrary nonzero column weights `S`.
///
/// Shorthand for [`update_cholesky`] with [`UpDowndate::Diagonal`].
pub fn update<SL, SA, T>(
    L: &mut DenseStorageMatrix<SL, T>,
    A: &mut DenseStorageMatrix<SA, T>,
    S: &[T],
) -> Result<(), UpdateError>
where
    SL: AsRef<[T]> + AsMut<[T]>,
    SA: AsRef<[T]> + AsMut<[T]>,
    T: FloatT,
{
    update_cholesky(L, A, UpDowndate::Diagonal(S))
}

/// Same as [`update_cholesky`], with explicit settings and a caller
/// supplied scratch buffer `work` of length at least `A.ncols()`.
/// No memory is allocated.
pub fn update_cholesky_with<SL, SA, T>(
    L: &mut DenseStorageMatrix<SL, T>,
    A: &mut DenseStorageMatrix<SA, T>,
    ud: UpDowndate<T>,
    settings: &UpdateSettings<T>,
    work: &mut [T],
) -> Result<(), UpdateError>
where
    SL: AsRef<[T]> + AsMut<[T]>,
    SA: AsRef<[T]> + AsMut<[T]>,
    T: FloatT,
{
    let mut tally = RowTally::default();
    _update_cholesky(L, A, &ud, settings, work, &mut tally)
}

pub(crate) fn check_dimensions<SL, SA, T>(
    L: &DenseStorageMatrix<SL, T>,
    A: &DenseStorageMatrix<SA, T>,
    ud: &UpDowndate<T>,
    work: &[T],
) -> Result<(), UpdateError>
where
    SL: AsRef<[T]>,
    SA: AsRef<[T]>,
    T: FloatT,
{
    let (n, m) = (L.nrows(), A.ncols());

    if !L.is_square() {
        return Err(UpdateError::IncompatibleDimension {
            what: "factor columns",
            expected: n,
            found: L.ncols(),
        });
    }
    let checks = [
        ("perturbation rows", n, A.nrows()),
        ("weight count", m, ud.fixed_len().unwrap_or(m)),
    ];
    for (what, expected, found) in checks {
        if expected != found {
            return Err(UpdateError::IncompatibleDimension {
                what,
                expected,
                found,
            });
        }
    }
    if work.len() < m {
        return Err(UpdateError::IncompatibleDimension {
            what: "workspace length",
            expected: m,
            found: work.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_factor<S, T>(L: &DenseStorageMatrix<S, T>) -> Result<(), UpdateError>
where
    S: AsRef<[T]>,
    T: FloatT,
{
    for j in 0..L.nrows() {
        let d = L[(j, j)];
        if !(d > T::zero() && d.is_finite()) {
            return Err(UpdateError::NonPositiveDiagonal { row: j });
        }
    }
    Ok(())
}

pub(crate) fn _update_cholesky<SL, SA, T>(
    L: &mut DenseStorageMatrix<SL, T>,
    A: &mut DenseStorageMatrix<SA, T>,
    ud: &UpDowndate<T>,
    settings: &UpdateSettings<T>,
    work: &mut [T],
    tally: &mut RowTally,
) -> Result<(), UpdateError>
where
    SL: AsRef<[T]> + AsMut<[T]>,
    SA: AsRef<[T]> + AsMut<[T]>,
    T: FloatT,
{
    settings.validate()?;
    let processing = settings.column_processing()?;

    check_dimensions(L, A, ud, work)?;
    if settings.check_factor {
        check_factor(L)?;
    }

    if A.ncols() == 0 {
        return Ok(());
    }

    let tol = settings.pd_tolerance;

    // rows must be processed in increasing order
    for j in 0..L.nrows() {
        let hyperbolic = match processing {
            ColumnProcessing::Joint => joint_step(j, L, A, ud, tol, work)?,
            ColumnProcessing::Sequential => sequential_step(j, L, A, ud, tol, work)?,
        };
        if hyperbolic {
            tally.hyperbolic += 1;
        } else {
            tally.orthogonal += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // reference scenario: L is lower triangular with every stored
    // entry equal to 4, A is all ones except A(1,1) = -1, S = [2, -1]
    fn reference_data() -> (Matrix<f64>, Matrix<f64>, [f64; 2]) {
        let mut L = Matrix::zeros((3, 3)).with_triangle(Some(MatrixTriangle::Tril));
        L.set_constant(4., Some(MatrixTriangle::Tril));
        let mut A = Matrix::zeros((3, 2));
        A.set_constant(1., None);
        A[(1, 1)] = -1.;
        (L, A, [2., -1.])
    }

    fn residual(L0: &Matrix<f64>, A0: &Matrix<f64>, S: &[f64], L: &Matrix<f64>) -> f64 {
        let mut C = Matrix::zeros((3, 3));
        C.mul(L0, &L0.t(), 1.0, 0.0);
        C.syrk_weighted(A0, S, 1.0, 1.0);
        C.mul(L, &L.t(), -1.0, 1.0);
        C.data().norm_inf()
    }

    #[test]
    fn test_reference_scenario() {
        let (mut L, mut A, S) = reference_data();
        let (L0, A0) = (L.clone(), A.clone());

        assert!(update(&mut L, &mut A, &S).is_ok());
        assert!(residual(&L0, &A0, &S, &L) < 1e-9);

        // the strict upper triangle is never written
        assert_eq!(L[(0, 1)], 0.);
        assert_eq!(L[(0, 2)], 0.);
        assert_eq!(L[(1, 2)], 0.);
    }

    #[test]
    fn test_reference_scenario_sequential() {
        let (mut L, mut A, S) = reference_data();
        let (L0, A0) = (L.clone(), A.clone());
        let settings = UpdateSettingsBuilder::default()
            .column_processing("sequential".to_string())
            .build()
            .unwrap();
        let mut work = [0.; 2];

        let mut tally = RowTally::default();
        _update_cholesky(&mut L, &mut A, &UpDowndate::Diagonal(&S), &settings, &mut work, &mut tally)
            .unwrap();
        assert!(residual(&L0, &A0, &S, &L) < 1e-9);
        assert_eq!(tally.orthogonal + tally.hyperbolic, 3);
        assert!(tally.hyperbolic >= 1);
    }

    #[test]
    fn test_dimension_checks() {
        let (mut L, mut A, S) = reference_data();

        let mut B = Matrix::<f64>::zeros((2, 2));
        let err = update(&mut L, &mut B, &S).unwrap_err();
        assert_eq!(
            err,
            UpdateError::IncompatibleDimension {
                what: "perturbation rows",
                expected: 3,
                found: 2
            }
        );
        assert!(err.is_recoverable());

        let err = update(&mut L, &mut A, &S[..1]).unwrap_err();
        assert_eq!(
            err,
            UpdateError::IncompatibleDimension {
                what: "weight count",
                expected: 2,
                found: 1
            }
        );

        let mut R = Matrix::<f64>::zeros((3, 2));
        let err = update(&mut R, &mut A, &S).unwrap_err();
        assert!(matches!(
            err,
            UpdateError::IncompatibleDimension {
                what: "factor columns",
                ..
            }
        ));

        let settings = UpdateSettings::default();
        let mut work = [0.; 1];
        let err = update_cholesky_with(&mut L, &mut A, UpDowndate::Update, &settings, &mut work);
        assert!(matches!(
            err,
            Err(UpdateError::IncompatibleDimension {
                what: "workspace length",
                ..
            })
        ));
    }

    #[test]
    fn test_check_factor() {
        let (mut L, mut A, S) = reference_data();
        L[(1, 1)] = -4.;
        let (L0, A0) = (L.clone(), A.clone());

        let err = update(&mut L, &mut A, &S).unwrap_err();
        assert_eq!(err, UpdateError::NonPositiveDiagonal { row: 1 });
        assert!(err.is_recoverable());
        assert_eq!(L, L0);
        assert_eq!(A, A0);
    }

    #[test]
    fn test_empty_inputs() {
        let mut L = Matrix::<f64>::zeros((0, 0));
        let mut A = Matrix::<f64>::zeros((0, 3));
        assert!(update_cholesky(&mut L, &mut A, UpDowndate::Downdate).is_ok());

        let (mut L, _, _) = reference_data();
        let L0 = L.clone();
        let mut A = Matrix::<f64>::zeros((3, 0));
        assert!(update_cholesky(&mut L, &mut A, UpDowndate::Update).is_ok());
        assert_eq!(L, L0);
    }

    #[test]
    fn test_bad_settings() {
        let (mut L, mut A, S) = reference_data();
        let mut settings = UpdateSettings::default();
        settings.column_processing = "blocked".to_string();
        let mut work = [0.; 2];
        let err = update_cholesky_with(&mut L, &mut A, UpDowndate::Diagonal(&S), &settings, &mut work);
        assert_eq!(
            err,
            Err(UpdateError::BadSettings(SettingsError::BadFieldValue(
                "column_processing"
            )))
        );
    }
}
