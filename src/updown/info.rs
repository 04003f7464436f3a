#![allow(non_snake_case)]

use super::driver::RowTally;
use super::*;
use crate::algebra::*;
use crate::timers::Timers;
use std::io::Write;
use std::time::Duration;

/// Outcome of the most recent call on a [`CholeskyUpdater`]
#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
pub enum UpdateStatus {
    /// No update has been attempted.
    #[default]
    Unsolved,
    /// The factor was updated.
    Success,
    /// Input shapes disagree.  Nothing was modified.
    DimensionError,
    /// Bad settings or a factor with a non-positive diagonal.
    /// Nothing was modified.
    InvalidInput,
    /// A downdate destroyed positive definiteness.
    NotPositiveDefinite,
}

impl std::fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<&UpdateError> for UpdateStatus {
    fn from(e: &UpdateError) -> Self {
        match e {
            UpdateError::IncompatibleDimension { .. } => UpdateStatus::DimensionError,
            UpdateError::NonPositiveDiagonal { .. } | UpdateError::BadSettings(_) => {
                UpdateStatus::InvalidInput
            }
            UpdateError::NotPositiveDefinite { .. } => UpdateStatus::NotPositiveDefinite,
        }
    }
}

/// Summary of the most recent call on a [`CholeskyUpdater`]
#[derive(Default, Debug, Clone)]
pub struct UpdateInfo<T> {
    pub status: UpdateStatus,
    /// order of the factor
    pub n: usize,
    /// columns in the perturbation
    pub m: usize,
    /// columns with positive weight
    pub updates: usize,
    /// columns with negative weight
    pub downdates: usize,
    pub rows_processed: usize,
    pub failed_row: Option<usize>,
    pub orthogonal_rows: usize,
    pub hyperbolic_rows: usize,
    pub min_diagonal: T,
    pub max_diagonal: T,
    /// true if the inputs were restored after a failure
    pub restored: bool,
    pub solve_time: f64,
}

impl<T> UpdateInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self, timers: &mut Timers) {
        *self = Self::default();
        timers.reset_timer("update");
    }

    pub(crate) fn record_dimensions(&mut self, n: usize, m: usize, ud: &UpDowndate<T>) {
        self.n = n;
        self.m = m;
        if ud.fixed_len().map_or(true, |len| len == m) {
            (self.updates, self.downdates) = ud.count(m);
        }
    }

    pub(crate) fn finalize<S>(
        &mut self,
        result: &Result<(), UpdateError>,
        tally: RowTally,
        L: &DenseStorageMatrix<S, T>,
        timers: &Timers,
    ) where
        S: AsRef<[T]>,
    {
        self.orthogonal_rows = tally.orthogonal;
        self.hyperbolic_rows = tally.hyperbolic;
        self.rows_processed = tally.orthogonal + tally.hyperbolic;

        match result {
            Ok(()) => {
                self.status = UpdateStatus::Success;
                if self.n > 0 {
                    let (lo, hi) = (0..self.n)
                        .map(|j| L[(j, j)])
                        .fold((T::infinity(), T::neg_infinity()), |(lo, hi), d| {
                            (T::min(lo, d), T::max(hi, d))
                        });
                    self.min_diagonal = lo;
                    self.max_diagonal = hi;
                }
            }
            Err(e) => {
                self.status = e.into();
                if let UpdateError::NotPositiveDefinite { row } = e {
                    self.failed_row = Some(*row);
                }
            }
        }

        self.solve_time = timers.total_time().as_secs_f64();
    }

    pub(crate) fn print_header(
        &self,
        out: &mut dyn Write,
        settings: &UpdateSettings<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        writeln!(
            out,
            "-------------------------------------------------------------"
        )?;
        writeln!(
            out,
            "           hyhound v{}  -  Cholesky up/downdates",
            crate::VERSION
        )?;
        writeln!(
            out,
            "-------------------------------------------------------------"
        )?;
        writeln!(out, "\nproblem:")?;
        writeln!(out, "  order (n)     = {}", self.n)?;
        writeln!(out, "  columns (m)   = {}", self.m)?;
        writeln!(out, "  updates       = {}", self.updates)?;
        writeln!(out, "  downdates     = {}", self.downdates)?;
        writeln!(out)?;
        writeln!(out, "settings:")?;
        writeln!(
            out,
            "  processing = {}, precision: {} bit",
            settings.column_processing,
            _get_precision_string::<T>()
        )?;
        writeln!(
            out,
            "  check factor = {}, pd tolerance = {:.1e}",
            settings.check_factor, settings.pd_tolerance
        )?;
        writeln!(out)?;
        out.flush()?;
        std::io::Result::Ok(())
    }

    pub(crate) fn print_footer(
        &self,
        out: &mut dyn Write,
        settings: &UpdateSettings<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return std::io::Result::Ok(());
        }

        writeln!(
            out,
            "rows: {} processed ({} orthogonal, {} hyperbolic)",
            self.rows_processed, self.orthogonal_rows, self.hyperbolic_rows
        )?;
        if let Some(row) = self.failed_row {
            writeln!(out, "failed at row {}", row)?;
        }
        if self.status == UpdateStatus::Success && self.n > 0 {
            writeln!(
                out,
                "diagonal range = [{:.4e}, {:.4e}]",
                self.min_diagonal, self.max_diagonal
            )?;
        }
        if self.restored {
            writeln!(out, "inputs restored")?;
        }
        writeln!(
            out,
            "-------------------------------------------------------------"
        )?;
        writeln!(out, "Terminated with status = {}", self.status)?;
        writeln!(
            out,
            "update time = {:?}",
            Duration::from_secs_f64(self.solve_time)
        )?;
        out.flush()?;
        std::io::Result::Ok(())
    }
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}
