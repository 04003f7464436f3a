//! __hyhound__ updates and downdates dense Cholesky factors using
//! hyperbolic Householder reflectors.  Given a lower triangular factor
//! $L$ of a symmetric positive definite matrix $H = L L^\top$, it computes
//! the factor $\tilde L$ of
//!
//! $$
//! \tilde H = H + A \,\mathrm{diag}(S)\, A^\top
//! $$
//!
//! in place, in $O(n^2 m)$ operations, where $A \in \mathbb{R}^{n \times m}$
//! and the weights $S$ may be positive (updates) or negative (downdates).
//! The new matrix is never formed.
//!
//! ## Features
//!
//! * __Joint reflectors__: each row of the factor is processed with a
//!   single reflector covering all $m$ columns.  Rows that only carry
//!   updates use an orthogonal reflector, rows with an active downdate a
//!   hyperbolic one.
//!
//! * __Strided views__: factors and perturbations are column-major views
//!   with an arbitrary leading dimension, so they can live inside larger
//!   buffers.  No copies are made.
//!
//! * __Checked downdates__: a downdate that would make the result
//!   indefinite is reported with the offending row.  The
//!   [`CholeskyUpdater`](updown::CholeskyUpdater) can optionally restore
//!   its inputs when that happens.
//!
//! * __Generic precision__: all routines are generic over `f32` and `f64`
//!   through the [`FloatT`](algebra::FloatT) trait.
//!
//! ## Example
//!
//! ```
//! use hyhound::algebra::*;
//! use hyhound::updown::update;
//!
//! let mut L = Matrix::zeros((3, 3)).with_triangle(Some(MatrixTriangle::Tril));
//! L.set_constant(4., Some(MatrixTriangle::Tril));
//!
//! let mut A = Matrix::from(&[
//!     [1., 1.],
//!     [1., -1.],
//!     [1., 1.],
//! ]);
//!
//! update(&mut L, &mut A, &[2., -1.]).unwrap();
//! assert!(L[(0, 0)] > 0.);
//! ```

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod io;
pub mod timers;
pub mod updown;
