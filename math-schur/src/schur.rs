//! Schur complement elimination of the leading block
//!
//! The pipeline runs in a fixed order, each step consuming the previous one:
//!
//! 1. `A = P·L·U` in place
//! 2. `B ← A⁻¹B`
//! 3. `E ← A⁻¹E`
//! 4. `D ← D - C·B` (with the reduced `B`)
//! 5. `F ← F - C·E` (with the reduced `E`)
//! 6. `A ← I`
//! 7. `C ← 0`
//!
//! The first failing step aborts the call. Buffers are then left partially
//! overwritten up to that step and must be re-initialized by the caller.

use crate::partition::PartitionedSystem;
use crate::traits::DenseLinalg;
use crate::{DefaultLinalg, EliminationError, Result};

/// Eliminate the leading `m x m` block of a packed column-major `n x n` system.
///
/// `matrix` holds `n * n` values with leading dimension `n`, `rhs` holds `n`
/// values. On success the leading block is the identity, the `k x m` block
/// below it is zero, and the trailing `k x k` block and last `k` entries of
/// `rhs` form the reduced system on the trailing unknowns.
///
/// # Errors
///
/// [`EliminationError::Factorization`] when the leading block is singular,
/// [`EliminationError::Solve`] when a reduction against it fails, and the
/// layout errors of [`PartitionedSystem::new`].
pub fn eliminate(matrix: &mut [f64], rhs: &mut [f64], n: usize, m: usize) -> Result<()> {
    let mut system = PartitionedSystem::new(matrix, rhs, n, m)?;
    eliminate_with(&DefaultLinalg::default(), &mut system)
}

/// Same as [`eliminate`] with `nrhs` right-hand side columns (`n x nrhs`,
/// column-major, leading dimension `n`).
pub fn eliminate_multi(
    matrix: &mut [f64],
    rhs: &mut [f64],
    n: usize,
    nrhs: usize,
    m: usize,
) -> Result<()> {
    let mut system = PartitionedSystem::with_layout(matrix, n, rhs, n, n, nrhs, m)?;
    eliminate_with(&DefaultLinalg::default(), &mut system)
}

/// Run the elimination pipeline on `system` with the given provider.
pub fn eliminate_with<L: DenseLinalg>(
    linalg: &L,
    system: &mut PartitionedSystem<'_>,
) -> Result<()> {
    log::trace!(
        "Schur elimination: n = {}, m = {}, k = {}, nrhs = {}",
        system.size(),
        system.split(),
        system.trailing(),
        system.nrhs()
    );

    let mut blocks = system.blocks_mut();

    // 1: LU factorize A
    let factors = linalg.lu_factor(&mut blocks.a).map_err(|e| {
        log::debug!("Schur elimination: factorization of A failed: {e}");
        EliminationError::Factorization(e)
    })?;

    // 2: B = A^-1 * B
    linalg
        .lu_solve(&blocks.a.view(), &factors, &mut blocks.b)
        .map_err(|e| {
            log::debug!("Schur elimination: reduction of B failed: {e}");
            EliminationError::Solve {
                target: "B",
                source: e,
            }
        })?;

    // 3: E = A^-1 * E
    linalg
        .lu_solve(&blocks.a.view(), &factors, &mut blocks.e)
        .map_err(|e| {
            log::debug!("Schur elimination: reduction of E failed: {e}");
            EliminationError::Solve {
                target: "E",
                source: e,
            }
        })?;

    // 4: D = D - C * B
    linalg.gemm(-1.0, &blocks.c.view(), &blocks.b.view(), 1.0, &mut blocks.d);

    // 5: F = F - C * E
    if blocks.e.ncols() == 1 {
        linalg.gemv(
            -1.0,
            &blocks.c.view(),
            &blocks.e.column(0),
            1.0,
            &mut blocks.f.column_mut(0),
        );
    } else {
        linalg.gemm(-1.0, &blocks.c.view(), &blocks.e.view(), 1.0, &mut blocks.f);
    }

    // 6: A = I
    blocks.a.fill(0.0);
    blocks.a.diag_mut().fill(1.0);

    // 7: C = 0
    blocks.c.fill(0.0);

    Ok(())
}
