//! Operations on an eliminated system
//!
//! After [`eliminate_with`] the trailing unknowns satisfy `D'·x_k = F'` on
//! their own, and the leading ones follow from `x_m = E' - B'·x_k`.

use crate::blas_helpers;
use crate::partition::PartitionedSystem;
use crate::schur::eliminate_with;
use crate::traits::DenseLinalg;
use crate::{DefaultLinalg, EliminationError, Result};
use ndarray::{Array2, ArrayView2};

/// Recover the leading unknowns of an eliminated system.
///
/// `x_trailing` is the `k x nrhs` solution of the reduced system. Returns the
/// `m x nrhs` leading unknowns `E' - B'·x_trailing`; `system` is not modified.
pub fn back_substitute(
    system: &PartitionedSystem<'_>,
    x_trailing: &ArrayView2<'_, f64>,
) -> Result<Array2<f64>> {
    let expected = (system.trailing(), system.nrhs());
    if x_trailing.dim() != expected {
        return Err(EliminationError::InvalidLayout(format!(
            "trailing solution is {:?}, expected {:?}",
            x_trailing.dim(),
            expected
        )));
    }

    let (b, e) = system.leading_blocks();
    let mut x = e.to_owned();
    blas_helpers::gemm(-1.0, &b, x_trailing, 1.0, &mut x.view_mut());
    Ok(x)
}

/// Solve a packed column-major system through Schur elimination.
///
/// On success `rhs` holds the solution of the original system. `matrix` is
/// left with the identity stamp, the reduced `B`, zeroed `C`, and the LU
/// factors of the Schur complement in the trailing block.
pub fn solve_in_place(matrix: &mut [f64], rhs: &mut [f64], n: usize, m: usize) -> Result<()> {
    let mut system = PartitionedSystem::new(matrix, rhs, n, m)?;
    solve_in_place_with(&DefaultLinalg::default(), &mut system)
}

/// Eliminate, solve the Schur complement, then back-substitute, all in place.
pub fn solve_in_place_with<L: DenseLinalg>(
    linalg: &L,
    system: &mut PartitionedSystem<'_>,
) -> Result<()> {
    eliminate_with(linalg, system)?;
    if system.trailing() == 0 {
        return Ok(());
    }

    let mut blocks = system.blocks_mut();

    let factors = linalg.lu_factor(&mut blocks.d).map_err(|e| {
        log::debug!("Schur solve: factorization of the Schur complement failed: {e}");
        EliminationError::SchurFactorization(e)
    })?;

    // F = D'^-1 * F
    linalg
        .lu_solve(&blocks.d.view(), &factors, &mut blocks.f)
        .map_err(|e| {
            log::debug!("Schur solve: trailing solve failed: {e}");
            EliminationError::Solve {
                target: "F",
                source: e,
            }
        })?;

    // E = E - B * F
    if blocks.f.ncols() == 1 {
        linalg.gemv(
            -1.0,
            &blocks.b.view(),
            &blocks.f.column(0),
            1.0,
            &mut blocks.e.column_mut(0),
        );
    } else {
        linalg.gemm(-1.0, &blocks.b.view(), &blocks.f.view(), 1.0, &mut blocks.e);
    }

    Ok(())
}
