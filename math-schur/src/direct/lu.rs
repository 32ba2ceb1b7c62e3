//! LU decomposition provider
//!
//! Pure-Rust LU factorization with partial pivoting and the matching solve,
//! following the LAPACK `dgetrf`/`dgetrs` conventions: the factors overwrite
//! the input in place and row interchanges are recorded as a pivot sequence
//! (`pivots[k]` is the row swapped with row `k` at step `k`).
//!
//! Loops run down columns so that column-major views are traversed with unit
//! stride.

use crate::traits::{DenseLinalg, LinalgError};
use ndarray::{ArrayView2, ArrayViewMut2};

/// Row interchanges produced by [`NativeLinalg::lu_factor`]
pub type Pivots = Vec<usize>;

/// Pure-Rust dense linear algebra provider
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeLinalg;

impl DenseLinalg for NativeLinalg {
    type Factors = Pivots;

    fn lu_factor(&self, a: &mut ArrayViewMut2<'_, f64>) -> Result<Pivots, LinalgError> {
        let n = a.nrows();
        if n != a.ncols() {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: a.ncols(),
            });
        }

        let mut pivots = Vec::with_capacity(n);

        for k in 0..n {
            // Find pivot: first entry of largest magnitude, as idamax does
            let mut max_val = a[[k, k]].abs();
            let mut max_row = k;
            for i in (k + 1)..n {
                let val = a[[i, k]].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }
            pivots.push(max_row);

            // Exactly zero, no tolerance
            if max_val == 0.0 {
                return Err(LinalgError::SingularMatrix { column: k });
            }

            if max_row != k {
                for j in 0..n {
                    a.swap([k, j], [max_row, j]);
                }
            }

            // Multipliers go into the L part
            let pivot = a[[k, k]];
            for i in (k + 1)..n {
                a[[i, k]] /= pivot;
            }

            // Rank-1 update of the trailing submatrix
            for j in (k + 1)..n {
                let u_kj = a[[k, j]];
                if u_kj == 0.0 {
                    continue;
                }
                for i in (k + 1)..n {
                    let l_ik = a[[i, k]];
                    a[[i, j]] -= l_ik * u_kj;
                }
            }
        }

        Ok(pivots)
    }

    fn lu_solve(
        &self,
        lu: &ArrayView2<'_, f64>,
        pivots: &Pivots,
        b: &mut ArrayViewMut2<'_, f64>,
    ) -> Result<(), LinalgError> {
        let n = lu.nrows();
        if lu.ncols() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: lu.ncols(),
            });
        }
        if pivots.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: pivots.len(),
            });
        }
        if b.nrows() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: b.nrows(),
            });
        }

        for mut x in b.columns_mut() {
            // Apply row interchanges in factorization order
            for (k, &p) in pivots.iter().enumerate() {
                if p != k {
                    x.swap(k, p);
                }
            }

            // Forward substitution: L y = P b (unit diagonal)
            for k in 0..n {
                let x_k = x[k];
                if x_k == 0.0 {
                    continue;
                }
                for i in (k + 1)..n {
                    x[i] -= lu[[i, k]] * x_k;
                }
            }

            // Backward substitution: U x = y
            for k in (0..n).rev() {
                x[k] /= lu[[k, k]];
                let x_k = x[k];
                if x_k == 0.0 {
                    continue;
                }
                for i in 0..k {
                    x[i] -= lu[[i, k]] * x_k;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, ShapeBuilder, array, s};

    fn factor_and_solve(a: &Array2<f64>, b: &Array2<f64>) -> Result<Array2<f64>, LinalgError> {
        let mut lu = a.clone();
        let mut x = b.clone();
        let pivots = NativeLinalg.lu_factor(&mut lu.view_mut())?;
        NativeLinalg.lu_solve(&lu.view(), &pivots, &mut x.view_mut())?;
        Ok(x)
    }

    #[test]
    fn test_lu_solve_real() {
        let a = array![[4.0_f64, 1.0], [1.0, 3.0]];
        let b = array![[1.0_f64], [2.0]];

        let x = factor_and_solve(&a, &b).expect("LU solve should succeed");

        // Verify: Ax = b
        let ax = a.dot(&x);
        for i in 0..2 {
            assert_relative_eq!(ax[[i, 0]], b[[i, 0]], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lu_requires_pivoting() {
        // Zero on the leading diagonal, still non-singular
        let a = array![[0.0_f64, 2.0, 1.0], [1.0, 1.0, 0.0], [3.0, 0.0, 1.0]];
        let b = array![[3.0_f64], [2.0], [4.0]];

        let x = factor_and_solve(&a, &b).expect("LU solve should succeed");

        for i in 0..3 {
            assert_relative_eq!(x[[i, 0]], 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lu_pivot_sequence() {
        let a = array![[1.0_f64, 0.0], [5.0, 1.0]];
        let mut lu = a.clone();

        let pivots = NativeLinalg.lu_factor(&mut lu.view_mut()).unwrap();

        assert_eq!(pivots, vec![1, 1]);
        assert_relative_eq!(lu[[0, 0]], 5.0, epsilon = 1e-15);
        assert_relative_eq!(lu[[1, 0]], 0.2, epsilon = 1e-15);
        assert_relative_eq!(lu[[1, 1]], -0.2, epsilon = 1e-15);
    }

    #[test]
    fn test_lu_multiple_rhs() {
        let a = array![[4.0_f64, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
        let b = array![[1.0_f64, 4.0], [2.0, 5.0], [3.0, 6.0]];

        let x = factor_and_solve(&a, &b).expect("LU solve should succeed");

        let ax = a.dot(&x);
        for i in 0..3 {
            for j in 0..2 {
                assert_relative_eq!(ax[[i, j]], b[[i, j]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_lu_singular() {
        let a = array![[1.0_f64, 2.0], [2.0, 4.0]]; // Singular matrix
        let mut lu = a.clone();

        let result = NativeLinalg.lu_factor(&mut lu.view_mut());
        assert_eq!(result, Err(LinalgError::SingularMatrix { column: 1 }));
    }

    #[test]
    fn test_lu_zero_column() {
        let a = array![[0.0_f64, 1.0], [0.0, 3.0]];
        let mut lu = a.clone();

        let result = NativeLinalg.lu_factor(&mut lu.view_mut());
        assert_eq!(result, Err(LinalgError::SingularMatrix { column: 0 }));
    }

    #[test]
    fn test_lu_not_square() {
        let mut a = Array2::<f64>::zeros((2, 3));
        let result = NativeLinalg.lu_factor(&mut a.view_mut());
        assert_eq!(
            result,
            Err(LinalgError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn test_lu_solve_rhs_mismatch() {
        let mut lu = array![[2.0_f64, 0.0], [0.0, 2.0]];
        let pivots = NativeLinalg.lu_factor(&mut lu.view_mut()).unwrap();
        let mut b = Array2::<f64>::zeros((3, 1));

        let result = NativeLinalg.lu_solve(&lu.view(), &pivots, &mut b.view_mut());
        assert!(matches!(
            result,
            Err(LinalgError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        ));
    }

    #[test]
    fn test_lu_strided_block_leaves_surroundings() {
        // Factor the leading 2x2 block of a 3x3 column-major buffer
        let mut m = Array2::<f64>::from_elem((3, 3).f(), 7.0);
        m[[0, 0]] = 2.0;
        m[[1, 0]] = 1.0;
        m[[0, 1]] = 1.0;
        m[[1, 1]] = 3.0;

        let pivots = {
            let mut a = m.slice_mut(s![..2, ..2]);
            NativeLinalg.lu_factor(&mut a).unwrap()
        };

        assert_eq!(pivots, vec![0, 1]);
        assert_relative_eq!(m[[1, 0]], 0.5, epsilon = 1e-15);
        assert_relative_eq!(m[[1, 1]], 2.5, epsilon = 1e-15);
        for i in 0..3 {
            assert_eq!(m[[i, 2]], 7.0);
            assert_eq!(m[[2, i]], 7.0);
        }
    }
}
