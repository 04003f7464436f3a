use super::SettingsError;
use thiserror::Error;

/// Error codes returnable from the Cholesky up/downdate routines

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// The factor, perturbation matrix, weights or workspace have
    /// incompatible sizes.  Raised before any data is modified.
    #[error("Incompatible dimension for {what}: expected {expected}, found {found}")]
    IncompatibleDimension {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// The factor has a diagonal entry that is not strictly positive.
    /// Raised before any data is modified.
    #[error("Factor has a non-positive diagonal entry in row {row}")]
    NonPositiveDiagonal { row: usize },
    /// A downdate would make the matrix indefinite.  Rows before `row`
    /// have been updated, so the factor and perturbation matrix are in
    /// an unspecified state.
    #[error("Downdate is not positive definite (failed at row {row})")]
    NotPositiveDefinite { row: usize },
    /// The settings passed to the update are invalid
    #[error("Bad settings: {0}")]
    BadSettings(#[from] SettingsError),
}

impl UpdateError {
    /// True if the error was raised before the factor or the
    /// perturbation matrix were modified, so that the call can be
    /// retried with corrected inputs.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, UpdateError::NotPositiveDefinite { .. })
    }
}
