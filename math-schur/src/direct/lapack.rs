//! LAPACK-backed provider
//!
//! Uses `ndarray-linalg` (`dgetrf`/`dgetrs`). LAPACK wants a contiguous
//! matrix, so the block is factored in a Fortran-order scratch copy and the
//! factors are written back to keep the in-place contract of
//! [`DenseLinalg::lu_factor`].

use crate::traits::{DenseLinalg, LinalgError};
use ndarray::{Array2, ArrayView2, ArrayViewMut2, OwnedRepr, ShapeBuilder};
use ndarray_linalg::{FactorizeInto, LUFactorized, Solve};

/// Dense linear algebra provider backed by the system LAPACK
#[derive(Debug, Clone, Copy, Default)]
pub struct LapackLinalg;

impl DenseLinalg for LapackLinalg {
    type Factors = LUFactorized<OwnedRepr<f64>>;

    fn lu_factor(&self, a: &mut ArrayViewMut2<'_, f64>) -> Result<Self::Factors, LinalgError> {
        if a.nrows() != a.ncols() {
            return Err(LinalgError::DimensionMismatch {
                expected: a.nrows(),
                got: a.ncols(),
            });
        }
        // Fortran-order scratch so the factors share A's element order
        let mut scratch = Array2::<f64>::zeros(a.raw_dim().f());
        scratch.assign(a);
        let factorized = scratch
            .factorize_into()
            .map_err(|e| LinalgError::Lapack(e.to_string()))?;
        a.assign(&factorized.a);
        Ok(factorized)
    }

    fn lu_solve(
        &self,
        lu: &ArrayView2<'_, f64>,
        factors: &Self::Factors,
        b: &mut ArrayViewMut2<'_, f64>,
    ) -> Result<(), LinalgError> {
        let n = lu.nrows();
        if b.nrows() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: b.nrows(),
            });
        }

        for mut column in b.columns_mut() {
            // getrs needs a contiguous right-hand side
            let mut x = column.to_owned();
            factors
                .solve_inplace(&mut x)
                .map_err(|e| LinalgError::Lapack(e.to_string()))?;
            column.assign(&x);
        }
        Ok(())
    }
}
