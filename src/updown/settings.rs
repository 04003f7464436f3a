use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Settings for [`CholeskyUpdater`](crate::updown::CholeskyUpdater) and
/// [`update_cholesky_with`](crate::updown::update_cholesky_with)

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UpdateSettings<T: FloatT> {
    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,

    ///column processing method ("joint" or "sequential")
    #[builder(default = r#""joint".to_string()"#)]
    pub column_processing: String,

    ///check that the factor diagonal is strictly positive before updating
    #[builder(default = "true")]
    pub check_factor: bool,

    ///a downdate fails if the squared new diagonal does not exceed this value
    #[builder(default = "(0.0).as_T()")]
    pub pd_tolerance: T,
}

impl<T> Default for UpdateSettings<T>
where
    T: FloatT,
{
    fn default() -> UpdateSettings<T> {
        UpdateSettingsBuilder::<T>::default().build().unwrap()
    }
}

/// Strategy for combining the columns of the perturbation matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnProcessing {
    /// one reflector per row covering every column
    Joint,
    /// one rank one rotation per row and column
    Sequential,
}

impl<T> UpdateSettings<T>
where
    T: FloatT,
{
    /// Checks that the settings are valid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        parse_column_processing(&self.column_processing)?;
        validate_pd_tolerance(self.pd_tolerance)?;
        Ok(())
    }

    pub(crate) fn column_processing(&self) -> Result<ColumnProcessing, SettingsError> {
        parse_column_processing(&self.column_processing)
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for UpdateSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        UpdateSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> UpdateSettingsBuilder<T>
where
    T: FloatT,
{
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(ref column_processing) = self.column_processing {
            parse_column_processing(column_processing)?;
        }
        if let Some(pd_tolerance) = self.pd_tolerance {
            validate_pd_tolerance(pd_tolerance)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn parse_column_processing(method: &str) -> Result<ColumnProcessing, SettingsError> {
    match method {
        "joint" => Ok(ColumnProcessing::Joint),
        "sequential" => Ok(ColumnProcessing::Sequential),
        _ => Err(SettingsError::BadFieldValue("column_processing")),
    }
}

fn validate_pd_tolerance<T: FloatT>(tol: T) -> Result<(), SettingsError> {
    // NaN fails here too
    if tol >= T::zero() && tol.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("pd_tolerance"))
    }
}
