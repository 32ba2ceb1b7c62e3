//! faer-backed provider
//!
//! Partial-pivoting LU and the matching solve from `faer`, run directly on the
//! caller's strided ndarray views. faer does not stop on a zero pivot, so the
//! diagonal of `U` is scanned afterwards and the first exact zero is reported,
//! as `dgetrf` does through `info > 0`.

use crate::traits::{DenseLinalg, LinalgError};
use faer::dyn_stack::{GlobalPodBuffer, PodStack};
use faer::linalg::lu::partial_pivoting::{compute, solve};
use faer::perm::PermRef;
use faer::{Conj, MatMut, MatRef, Parallelism};
use ndarray::{ArrayView2, ArrayViewMut2};

/// Row permutation of a faer LU factorization, forward and inverse
#[derive(Debug, Clone, PartialEq)]
pub struct FaerPivots {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl FaerPivots {
    /// Row order after pivoting: row `i` of `L·U` is row `forward[i]` of `A`
    pub fn forward(&self) -> &[usize] {
        &self.forward
    }
}

/// Dense linear algebra provider backed by faer
#[derive(Debug, Clone, Copy, Default)]
pub struct FaerLinalg;

fn parallelism() -> Parallelism<'static> {
    faer::get_global_parallelism()
}

fn as_faer<'a>(view: &'a ArrayView2<'_, f64>) -> MatRef<'a, f64> {
    let (nrows, ncols) = view.dim();
    let (row_stride, col_stride) = (view.strides()[0], view.strides()[1]);
    // SAFETY: `view` describes nrows x ncols valid elements at these strides
    // and stays borrowed for 'a.
    unsafe { faer::mat::from_raw_parts(view.as_ptr(), nrows, ncols, row_stride, col_stride) }
}

fn as_faer_mut<'a>(view: &'a mut ArrayViewMut2<'_, f64>) -> MatMut<'a, f64> {
    let (nrows, ncols) = view.dim();
    let (row_stride, col_stride) = (view.strides()[0], view.strides()[1]);
    // SAFETY: ndarray mutable views never alias, and `view` is uniquely
    // borrowed for 'a.
    unsafe {
        faer::mat::from_raw_parts_mut(view.as_mut_ptr(), nrows, ncols, row_stride, col_stride)
    }
}

impl DenseLinalg for FaerLinalg {
    type Factors = FaerPivots;

    fn lu_factor(&self, a: &mut ArrayViewMut2<'_, f64>) -> Result<FaerPivots, LinalgError> {
        let n = a.nrows();
        if n != a.ncols() {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: a.ncols(),
            });
        }

        let par = parallelism();
        let req = compute::lu_in_place_req::<usize, f64>(n, n, par, Default::default())
            .map_err(|_| LinalgError::WorkspaceOverflow)?;
        let mut mem = GlobalPodBuffer::new(req);

        let mut forward = vec![0usize; n];
        let mut inverse = vec![0usize; n];
        compute::lu_in_place(
            as_faer_mut(a),
            &mut forward,
            &mut inverse,
            par,
            PodStack::new(&mut mem),
            Default::default(),
        );

        if let Some(column) = (0..n).find(|&k| a[[k, k]] == 0.0) {
            return Err(LinalgError::SingularMatrix { column });
        }

        Ok(FaerPivots { forward, inverse })
    }

    fn lu_solve(
        &self,
        lu: &ArrayView2<'_, f64>,
        pivots: &FaerPivots,
        b: &mut ArrayViewMut2<'_, f64>,
    ) -> Result<(), LinalgError> {
        let n = lu.nrows();
        if lu.ncols() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: lu.ncols(),
            });
        }
        if pivots.forward.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: pivots.forward.len(),
            });
        }
        if b.nrows() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: b.nrows(),
            });
        }
        if b.ncols() == 0 {
            return Ok(());
        }

        let par = parallelism();
        let req = solve::solve_in_place_req::<usize, f64>(n, n, b.ncols(), par)
            .map_err(|_| LinalgError::WorkspaceOverflow)?;
        let mut mem = GlobalPodBuffer::new(req);

        let perm = PermRef::new_checked(&pivots.forward, &pivots.inverse, n);
        solve::solve_in_place(
            as_faer(lu),
            Conj::No,
            perm,
            as_faer_mut(b),
            par,
            PodStack::new(&mut mem),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direct::NativeLinalg;
    use approx::assert_relative_eq;
    use ndarray::{Array2, ShapeBuilder, array, s};

    #[test]
    fn test_faer_matches_native() {
        let a = array![[0.0_f64, 2.0, 1.0], [1.0, 1.0, 0.0], [3.0, 0.0, 1.0]];
        let b = array![[3.0_f64, 1.0], [2.0, 0.0], [4.0, -1.0]];

        let mut lu = a.clone();
        let mut x = b.clone();
        let pivots = FaerLinalg.lu_factor(&mut lu.view_mut()).unwrap();
        FaerLinalg
            .lu_solve(&lu.view(), &pivots, &mut x.view_mut())
            .unwrap();

        let mut lu_native = a.clone();
        let mut x_native = b.clone();
        let native_pivots = NativeLinalg.lu_factor(&mut lu_native.view_mut()).unwrap();
        NativeLinalg
            .lu_solve(&lu_native.view(), &native_pivots, &mut x_native.view_mut())
            .unwrap();

        for (got, expected) in x.iter().zip(x_native.iter()) {
            assert_relative_eq!(*got, *expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_faer_factors_strided_block_in_place() {
        // Leading 2x2 block of a 3x3 column-major buffer
        let mut m = Array2::<f64>::from_elem((3, 3).f(), 7.0);
        m[[0, 0]] = 1.0;
        m[[1, 0]] = 4.0;
        m[[0, 1]] = 2.0;
        m[[1, 1]] = 3.0;

        let pivots = {
            let mut a = m.slice_mut(s![..2, ..2]);
            FaerLinalg.lu_factor(&mut a).unwrap()
        };

        // P·A = [[4, 3], [1, 2]] = [[1, 0], [0.25, 1]] · [[4, 3], [0, 1.25]]
        assert_eq!(pivots.forward(), &[1, 0]);
        assert_relative_eq!(m[[0, 0]], 4.0, epsilon = 1e-15);
        assert_relative_eq!(m[[0, 1]], 3.0, epsilon = 1e-15);
        assert_relative_eq!(m[[1, 0]], 0.25, epsilon = 1e-15);
        assert_relative_eq!(m[[1, 1]], 1.25, epsilon = 1e-15);
        for i in 0..3 {
            assert_eq!(m[[i, 2]], 7.0);
            assert_eq!(m[[2, i]], 7.0);
        }
    }

    #[test]
    fn test_faer_singular() {
        let mut a = array![[1.0_f64, 2.0], [2.0, 4.0]];
        let result = FaerLinalg.lu_factor(&mut a.view_mut());
        assert_eq!(result, Err(LinalgError::SingularMatrix { column: 1 }));
    }

    #[test]
    fn test_faer_zero_row() {
        let mut a = array![[2.0_f64, 1.0, 0.0], [0.0, 0.0, 0.0], [1.0, 3.0, 1.0]];
        let result = FaerLinalg.lu_factor(&mut a.view_mut());
        assert!(matches!(result, Err(LinalgError::SingularMatrix { .. })));
    }

    #[test]
    fn test_faer_solve_rhs_mismatch() {
        let mut lu = array![[2.0_f64, 0.0], [0.0, 2.0]];
        let pivots = FaerLinalg.lu_factor(&mut lu.view_mut()).unwrap();
        let mut b = Array2::<f64>::zeros((3, 1));

        let result = FaerLinalg.lu_solve(&lu.view(), &pivots, &mut b.view_mut());
        assert_eq!(
            result,
            Err(LinalgError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        );
    }
}
