//! BLAS-accelerated multiply-accumulate operations
//!
//! Thin wrappers over ndarray's `general_mat_mul` and `general_mat_vec_mul`.
//!
//! # Features
//!
//! - With the `blas` feature, ndarray forwards these products to `dgemm`/`dgemv`
//! - Without it, the `matrixmultiply` kernels bundled with ndarray are used
//!
//! Both paths accept arbitrary strides, so blocks of a larger column-major
//! buffer can be passed directly without copying.

use ndarray::linalg::{general_mat_mul, general_mat_vec_mul};
use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2};

/// Compute general matrix product: c = α * a * b + β * c
///
/// # Panics
///
/// Panics if the shapes of `a`, `b` and `c` are not compatible.
#[inline]
pub fn gemm(
    alpha: f64,
    a: &ArrayView2<'_, f64>,
    b: &ArrayView2<'_, f64>,
    beta: f64,
    c: &mut ArrayViewMut2<'_, f64>,
) {
    assert_eq!(a.ncols(), b.nrows(), "Inner dimensions must match for gemm");
    assert_eq!(
        (a.nrows(), b.ncols()),
        c.dim(),
        "Output shape must match for gemm"
    );
    general_mat_mul(alpha, a, b, beta, c);
}

/// Compute general matrix-vector product: y = α * a * x + β * y
///
/// # Panics
///
/// Panics if the shapes of `a`, `x` and `y` are not compatible.
#[inline]
pub fn gemv(
    alpha: f64,
    a: &ArrayView2<'_, f64>,
    x: &ArrayView1<'_, f64>,
    beta: f64,
    y: &mut ArrayViewMut1<'_, f64>,
) {
    assert_eq!(a.ncols(), x.len(), "Vector length must match for gemv");
    assert_eq!(a.nrows(), y.len(), "Output length must match for gemv");
    general_mat_vec_mul(alpha, a, x, beta, y);
}
