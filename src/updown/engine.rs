#![allow(non_snake_case)]

use super::driver::{RowTally, _update_cholesky};
use super::*;
use crate::algebra::*;
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::timers::*;
use std::io::Write;

/// Reusable engine for repeated rank-k updates.
///
/// Keeps settings, a scratch buffer that only grows, timing and an
/// [`UpdateInfo`] describing the most recent call.  When
/// `settings.verbose` is set, a summary of every call is written to the
/// configured print target.
///
/// # Example
///
/// ```
/// use hyhound::algebra::*;
/// use hyhound::updown::*;
///
/// // L·Lᵀ = 4·I
/// let mut L = Matrix::from(&[
///     [2., 0.],
///     [0., 2.],
/// ]);
/// let mut A = Matrix::from(&[
///     [1.],
///     [1.],
/// ]);
///
/// let mut updater = CholeskyUpdater::<f64>::new(UpdateSettings::default()).unwrap();
/// updater.update(&mut L, &mut A, UpDowndate::Update).unwrap();
/// assert_eq!(updater.info.status, UpdateStatus::Success);
/// assert!((L[(0, 0)] - 5f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct CholeskyUpdater<T: FloatT> {
    pub settings: UpdateSettings<T>,
    pub info: UpdateInfo<T>,
    pub timers: Option<Timers>,
    work: Vec<T>,
    stream: PrintTarget,
}

impl<T> CholeskyUpdater<T>
where
    T: FloatT,
{
    /// Creates an updater.  Fails if `settings` do not validate.
    pub fn new(settings: UpdateSettings<T>) -> Result<Self, UpdateError> {
        settings.validate()?;
        Ok(Self {
            settings,
            info: UpdateInfo::new(),
            timers: Some(Timers::default()),
            work: Vec::new(),
            stream: PrintTarget::default(),
        })
    }

    /// Updates `L` in place to the factor of `L·Lᵀ + A·diag(S)·Aᵀ`.
    ///
    /// Behaves as [`update_cholesky_with`], using scratch memory owned by
    /// the updater.  On `NotPositiveDefinite` the inputs are left
    /// partially updated; see [`update_or_restore`](Self::update_or_restore).
    pub fn update<SL, SA>(
        &mut self,
        L: &mut DenseStorageMatrix<SL, T>,
        A: &mut DenseStorageMatrix<SA, T>,
        ud: UpDowndate<T>,
    ) -> Result<(), UpdateError>
    where
        SL: AsRef<[T]> + AsMut<[T]>,
        SA: AsRef<[T]> + AsMut<[T]>,
    {
        self.execute(L, A, ud, false)
    }

    /// Same as [`update`](Self::update), but if a downdate destroys
    /// positive definiteness, `L` and `A` are restored bit for bit to
    /// their values on entry before the error is returned.
    ///
    /// The entry values are copied into owned storage first, so this
    /// allocates on every call.
    pub fn update_or_restore<SL, SA>(
        &mut self,
        L: &mut DenseStorageMatrix<SL, T>,
        A: &mut DenseStorageMatrix<SA, T>,
        ud: UpDowndate<T>,
    ) -> Result<(), UpdateError>
    where
        SL: AsRef<[T]> + AsMut<[T]>,
        SA: AsRef<[T]> + AsMut<[T]>,
    {
        self.execute(L, A, ud, true)
    }

    fn execute<SL, SA>(
        &mut self,
        L: &mut DenseStorageMatrix<SL, T>,
        A: &mut DenseStorageMatrix<SA, T>,
        ud: UpDowndate<T>,
        restore: bool,
    ) -> Result<(), UpdateError>
    where
        SL: AsRef<[T]> + AsMut<[T]>,
        SA: AsRef<[T]> + AsMut<[T]>,
    {
        //timers is stored as an option so that
        //we can take it out while we are using it
        let mut timers = self.timers.take().unwrap_or_default();

        self.info.reset(&mut timers);
        self.info.record_dimensions(L.nrows(), A.ncols(), &ud);

        let m = A.ncols();
        if self.work.len() < m {
            self.work.resize(m, T::zero());
        }

        let mut tally = RowTally::default();
        let result;

        timeit! {timers => "update"; {

            // print failures are not update failures
            notimeit! {timers; {
                let _ = self.info.print_header(&mut self.stream, &self.settings);
            }}

            let mut snapshot = None;
            if restore {
                timeit! {timers => "snapshot"; {
                    snapshot = Some((raw_copy(L), raw_copy(A)));
                }}
            }

            timeit! {timers => "kernel"; {
                result = _update_cholesky(L, A, &ud, &self.settings, &mut self.work, &mut tally);
            }}

            if let (Err(UpdateError::NotPositiveDefinite { .. }), Some((L0, A0))) = (&result, snapshot) {
                timeit! {timers => "restore"; {
                    L.copy_from(&L0);
                    A.copy_from(&A0);
                }}
                self.info.restored = true;
            }
        }}

        self.info.finalize(&result, tally, L, &timers);

        let _ = self.info.print_footer(&mut self.stream, &self.settings);
        let _ = self.print_timers(&timers);

        //stow the timers back into Option in the updater struct
        self.timers.replace(timers);
        result
    }

    fn print_timers(&mut self, timers: &Timers) -> std::io::Result<()> {
        if !self.settings.verbose {
            return Ok(());
        }
        writeln!(self.stream, "timers:")?;
        timers.print(&mut self.stream)?;
        self.stream.flush()
    }
}

// copy of the raw storage, ignoring any triangle tag
fn raw_copy<S, T>(M: &DenseStorageMatrix<S, T>) -> Matrix<T>
where
    S: AsRef<[T]>,
    T: FloatT,
{
    let mut out = Matrix::zeros(M.size());
    out.copy_from(M);
    out
}

impl<T> ConfigurablePrintTarget for CholeskyUpdater<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}
