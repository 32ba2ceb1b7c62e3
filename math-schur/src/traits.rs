//! Core traits for dense linear algebra providers
//!
//! The elimination kernel is written against [`DenseLinalg`], which bundles the
//! three primitives it consumes:
//! - LU factorization with partial pivoting (LAPACK `getrf`)
//! - Solve against a factored matrix for one or more columns (LAPACK `getrs`)
//! - Scaled multiply-accumulate, matrix-matrix and matrix-vector (BLAS `gemm`/`gemv`)
//!
//! All views are column-major friendly but any strides are accepted.

use crate::blas_helpers;
use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2};
use thiserror::Error;

/// Errors reported by a dense linear algebra provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    #[error("zero pivot in column {column}: matrix is singular")]
    SingularMatrix { column: usize },
    #[error("Matrix dimensions mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("workspace size overflows usize")]
    WorkspaceOverflow,
    #[cfg(feature = "ndarray-linalg")]
    #[error("LAPACK error: {0}")]
    Lapack(String),
}

/// Dense linear algebra provider.
///
/// Implementations only have to supply the factorization and the solve; the
/// multiply-accumulate operations default to ndarray's general products, which
/// dispatch to BLAS when the `blas` feature is enabled.
pub trait DenseLinalg {
    /// Byproducts of a factorization needed by [`DenseLinalg::lu_solve`]
    /// besides the factored matrix itself (row interchanges, for instance).
    type Factors;

    /// Factorize the square matrix `a` in place as `P·A = L·U`.
    ///
    /// On success `a` holds `L` (unit diagonal not stored) below the diagonal
    /// and `U` on and above it. An exactly-zero pivot is reported as
    /// [`LinalgError::SingularMatrix`].
    fn lu_factor(&self, a: &mut ArrayViewMut2<'_, f64>) -> Result<Self::Factors, LinalgError>;

    /// Solve `A·X = B` for every column of `b`, overwriting `b` with `X`.
    ///
    /// `lu` must be the matrix produced by [`DenseLinalg::lu_factor`] and
    /// `factors` its companion output.
    fn lu_solve(
        &self,
        lu: &ArrayView2<'_, f64>,
        factors: &Self::Factors,
        b: &mut ArrayViewMut2<'_, f64>,
    ) -> Result<(), LinalgError>;

    /// `c = alpha * a * b + beta * c`
    fn gemm(
        &self,
        alpha: f64,
        a: &ArrayView2<'_, f64>,
        b: &ArrayView2<'_, f64>,
        beta: f64,
        c: &mut ArrayViewMut2<'_, f64>,
    ) {
        blas_helpers::gemm(alpha, a, b, beta, c);
    }

    /// `y = alpha * a * x + beta * y`
    fn gemv(
        &self,
        alpha: f64,
        a: &ArrayView2<'_, f64>,
        x: &ArrayView1<'_, f64>,
        beta: f64,
        y: &mut ArrayViewMut1<'_, f64>,
    ) {
        blas_helpers::gemv(alpha, a, x, beta, y);
    }
}
