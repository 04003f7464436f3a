//! Dense linear algebra substrate for the up/downdate kernels.
//!
//! All internal math for the kernels goes through the traits defined here,
//! which are implemented generically for floats of type
//! [`FloatT`](crate::algebra::FloatT).  Matrices are dense and column-major,
//! and may be owned ([`Matrix`]) or borrowed from caller storage
//! ([`MatrixRef`], [`MatrixView`]) with an arbitrary leading dimension.

mod dense;
mod error_types;
mod floats;
mod math_traits;
mod matrix_traits;
mod matrix_types;
mod vecmath;

pub use dense::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use matrix_traits::*;
pub use matrix_types::*;
