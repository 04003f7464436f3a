#![allow(non_snake_case)]

use crate::algebra::*;
use std::ops::{Index, IndexMut};

/// Core dense matrix type for owned and borrowed column-major data.
///
/// Entry `(r, c)` lives at `data[r + ld*c]`.  The leading dimension `ld`
/// may exceed the row count, in which case the trailing `ld - nrows` entries
/// of each column are padding and are never read or written.  An optional
/// triangle tag marks the matrix as upper or lower triangular.  Tagged
/// matrices read as zero outside of their triangle via [`DenseMatrix::get`],
/// but raw indexing always goes to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
{
    pub(crate) size: (usize, usize),
    pub(crate) ld: usize,
    pub(crate) uplo: Option<MatrixTriangle>,
    pub(crate) data: S,
    pub(crate) phantom: std::marker::PhantomData<T>,
}

/// Dense matrix owning its data
pub type Matrix<T> = DenseStorageMatrix<Vec<T>, T>;
/// Read-only matrix view over a borrowed slice
pub type MatrixRef<'a, T> = DenseStorageMatrix<&'a [T], T>;
/// Mutable matrix view over a borrowed slice
pub type MatrixView<'a, T> = DenseStorageMatrix<&'a mut [T], T>;

// storage needed for an m x n matrix with leading dimension ld
fn required_len(m: usize, n: usize, ld: usize) -> usize {
    if n == 0 {
        0
    } else {
        ld * (n - 1) + m
    }
}

fn check_layout(len: usize, size: (usize, usize), ld: usize) -> Result<(), MatrixViewError> {
    let (m, n) = size;
    if ld < usize::max(1, m) {
        return Err(MatrixViewError::BadStride { rows: m, ld });
    }
    let required = required_len(m, n, ld);
    if len < required {
        return Err(MatrixViewError::BufferTooShort {
            required,
            found: len,
        });
    }
    Ok(())
}

impl<S, T> DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
{
    /// Wraps `data` as an `m x n` matrix with leading dimension `ld`.
    /// No data is copied.
    pub fn new(
        data: S,
        size: (usize, usize),
        ld: usize,
        uplo: Option<MatrixTriangle>,
    ) -> Result<Self, MatrixViewError> {
        check_layout(data.as_ref().len(), size, ld)?;
        Ok(Self {
            size,
            ld,
            uplo,
            data,
            phantom: std::marker::PhantomData::<T>,
        })
    }

    /// Replaces the triangle tag
    pub fn with_triangle(mut self, uplo: Option<MatrixTriangle>) -> Self {
        self.uplo = uplo;
        self
    }

    pub fn ld(&self) -> usize {
        self.ld
    }

    pub fn uplo(&self) -> Option<MatrixTriangle> {
        self.uplo
    }

    pub fn data(&self) -> &[T] {
        self.data.as_ref()
    }

    #[inline]
    pub fn index_linear(&self, idx: (usize, usize)) -> usize {
        debug_assert!(idx.0 < self.size.0 && idx.1 < self.size.1);
        idx.0 + self.ld * idx.1
    }

    /// the `nrows` live entries of column `col`
    pub fn col_slice(&self, col: usize) -> &[T] {
        let (m, n) = self.size;
        assert!(col < n);
        if m == 0 {
            return &[];
        }
        &self.data()[(col * self.ld)..(col * self.ld + m)]
    }

    /// true if columns are stored back to back without padding
    pub fn is_contiguous(&self) -> bool {
        self.ld == self.size.0 || self.size.1 <= 1
    }

    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }
}

impl<S, T> DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
    T: FloatT,
{
    /// Packed (`ld = nrows`) copy with the same triangle tag.  Entries
    /// outside of a tagged triangle are copied as zero.
    pub fn to_packed(&self) -> Matrix<T> {
        let mut out = Matrix::zeros(self.size);
        out.uplo = self.uplo;
        for c in 0..self.ncols() {
            for r in 0..self.nrows() {
                out[(r, c)] = self.get((r, c));
            }
        }
        out
    }

    /// true if every entry strictly above the diagonal is zero
    pub fn is_tril(&self) -> bool {
        for c in 0..self.ncols() {
            for r in 0..usize::min(c, self.nrows()) {
                if self[(r, c)] != T::zero() {
                    return false;
                }
            }
        }
        true
    }
}

impl<S, T> DenseStorageMatrix<S, T>
where
    S: AsMut<[T]> + AsRef<[T]>,
{
    pub fn data_mut(&mut self) -> &mut [T] {
        self.data.as_mut()
    }

    pub fn col_slice_mut(&mut self, col: usize) -> &mut [T] {
        let (m, n) = self.size;
        let ld = self.ld;
        assert!(col < n);
        if m == 0 {
            return &mut [];
        }
        &mut self.data_mut()[(col * ld)..(col * ld + m)]
    }
}

impl<S, T> DenseStorageMatrix<S, T>
where
    S: AsMut<[T]> + AsRef<[T]>,
    T: FloatT,
{
    /// Sets every entry to `value`, or only the entries of one
    /// triangle (diagonal included) if `uplo` is given.  Entries
    /// outside of that triangle are left untouched.
    pub fn set_constant(&mut self, value: T, uplo: Option<MatrixTriangle>) -> &mut Self {
        let m = self.nrows();
        for c in 0..self.ncols() {
            let col = self.col_slice_mut(c);
            match uplo {
                None => col.set(value),
                Some(MatrixTriangle::Tril) => col[usize::min(c, m)..].set(value),
                Some(MatrixTriangle::Triu) => col[..usize::min(c + 1, m)].set(value),
            };
        }
        self
    }

    /// Copies every live entry of `src`, which must have the same size.
    /// Strides may differ.  The triangle tag of `self` is not changed.
    pub fn copy_from<S2>(&mut self, src: &DenseStorageMatrix<S2, T>) -> &mut Self
    where
        S2: AsRef<[T]>,
    {
        assert_eq!(self.size, src.size);
        if self.is_contiguous() && src.is_contiguous() {
            let len = self.nrows() * self.ncols();
            self.data_mut()[..len].copy_from(&src.data()[..len]);
        } else {
            for c in 0..self.ncols() {
                self.col_slice_mut(c).copy_from(src.col_slice(c));
            }
        }
        self
    }
}

// ------------------------------------------------
// owned Matrix implementation

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        Self {
            size,
            ld: usize::max(1, m),
            uplo: None,
            data: vec![T::zero(); m * n],
            phantom: std::marker::PhantomData::<T>,
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Matrix::zeros((n, n));
        for i in 0..n {
            mat[(i, i)] = T::one();
        }
        mat
    }

    /// Copies column-major data from `src`
    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        let mut mat = Matrix::zeros(size);
        mat.data.copy_from_slice(src);
        mat
    }
}

// Builds a matrix from row-major array literals, e.g.
// Matrix::from(&[[1., 2.], [3., 4.]])
impl<T, const R: usize, const C: usize> From<&[[T; C]; R]> for Matrix<T>
where
    T: FloatT,
{
    fn from(rows: &[[T; C]; R]) -> Self {
        let mut mat = Matrix::zeros((R, C));
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                mat[(r, c)] = v;
            }
        }
        mat
    }
}

// ------------------------------------------------
// borrowed view construction

impl<'a, T> MatrixRef<'a, T>
where
    T: FloatT,
{
    /// Wraps exactly `m*n` column-major entries
    pub fn from_slice(data: &'a [T], m: usize, n: usize) -> Self {
        assert_eq!(data.len(), m * n);
        Self {
            size: (m, n),
            ld: usize::max(1, m),
            uplo: None,
            data,
            phantom: std::marker::PhantomData::<T>,
        }
    }
}

impl<'a, T> MatrixView<'a, T>
where
    T: FloatT,
{
    /// Wraps exactly `m*n` column-major entries
    pub fn from_slice_mut(data: &'a mut [T], m: usize, n: usize) -> Self {
        assert_eq!(data.len(), m * n);
        Self {
            size: (m, n),
            ld: usize::max(1, m),
            uplo: None,
            data,
            phantom: std::marker::PhantomData::<T>,
        }
    }
}

// ------------------------------------------------
// indexing and shape

impl<S, T> ShapedMatrix for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
{
    fn nrows(&self) -> usize {
        self.size.0
    }
    fn ncols(&self) -> usize {
        self.size.1
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::N
    }
}

impl<S, T> Index<(usize, usize)> for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
{
    type Output = T;
    #[inline]
    fn index(&self, idx: (usize, usize)) -> &T {
        let lidx = self.index_linear(idx);
        &self.data()[lidx]
    }
}

impl<S, T> IndexMut<(usize, usize)> for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]> + AsMut<[T]>,
{
    #[inline]
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut T {
        let lidx = self.index_linear(idx);
        &mut self.data_mut()[lidx]
    }
}

impl<S, T> DenseMatrix<T> for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
    T: FloatT,
{
    #[inline]
    fn get(&self, idx: (usize, usize)) -> T {
        match self.uplo {
            Some(uplo) if !uplo.contains(idx.0, idx.1) => T::zero(),
            _ => self[idx],
        }
    }
}

// ------------------------------------------------
// Adjoint views.  Read only, with reversed indices.

impl<M> ShapedMatrix for Adjoint<'_, M>
where
    M: ShapedMatrix,
{
    fn nrows(&self) -> usize {
        self.src.ncols()
    }
    fn ncols(&self) -> usize {
        self.src.nrows()
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::T
    }
}

impl<M, T> DenseMatrix<T> for Adjoint<'_, M>
where
    M: DenseMatrix<T>,
{
    #[inline]
    fn get(&self, idx: (usize, usize)) -> T {
        self.src.get((idx.1, idx.0))
    }
}

impl<S, T> std::fmt::Display for DenseStorageMatrix<S, T>
where
    S: AsRef<[T]>,
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f)?;
        for r in 0..self.nrows() {
            write!(f, "[ ")?;
            for c in 0..self.ncols() {
                match self.uplo {
                    Some(uplo) if !uplo.contains(r, c) => write!(f, " {:>12}", "⋅")?,
                    _ => write!(f, " {:>12.5e}", self[(r, c)])?,
                }
            }
            writeln!(f, " ]")?;
        }
        Ok(())
    }
}
