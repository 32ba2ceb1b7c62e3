//! Partitioned view over a caller-owned linear system
//!
//! ```text
//!   +---+---+        +---+
//!   | A | B |}m      | E |}m
//!   +---+---+  * x = +---+
//!   | C | D |}k      | F |}k
//!   +---+---+        +---+
//!     m   k
//! ```
//!
//! The matrix is `n x n` and the right-hand side `n x nrhs`, both column-major:
//! element `(row, col)` lives at `col * ld + row`. [`PartitionedSystem`] borrows
//! the buffers mutably and never copies them.

use crate::{EliminationError, Result};
use ndarray::{ArrayView2, ArrayViewMut2, ShapeBuilder, s};

/// Mutable view of a square system split at `m`
#[derive(Debug)]
pub struct PartitionedSystem<'a> {
    matrix: ArrayViewMut2<'a, f64>,
    rhs: ArrayViewMut2<'a, f64>,
    split: usize,
}

/// Disjoint mutable views of the six blocks
pub(crate) struct Blocks<'s> {
    pub a: ArrayViewMut2<'s, f64>,
    pub b: ArrayViewMut2<'s, f64>,
    pub c: ArrayViewMut2<'s, f64>,
    pub d: ArrayViewMut2<'s, f64>,
    pub e: ArrayViewMut2<'s, f64>,
    pub f: ArrayViewMut2<'s, f64>,
}

impl<'a> PartitionedSystem<'a> {
    /// View a packed system: leading dimension `n` and a single right-hand side.
    pub fn new(matrix: &'a mut [f64], rhs: &'a mut [f64], n: usize, m: usize) -> Result<Self> {
        Self::with_layout(matrix, n, rhs, n, n, 1, m)
    }

    /// View a system with explicit leading dimensions and `nrhs` right-hand sides.
    ///
    /// `lda` and `ldb` may exceed `n` when the system is a sub-view of a larger
    /// allocation; entries outside the logical `n x n` and `n x nrhs` regions are
    /// never read or written.
    pub fn with_layout(
        matrix: &'a mut [f64],
        lda: usize,
        rhs: &'a mut [f64],
        ldb: usize,
        n: usize,
        nrhs: usize,
        m: usize,
    ) -> Result<Self> {
        check_split(n, m)?;
        if nrhs == 0 {
            return Err(EliminationError::InvalidLayout(
                "at least one right-hand side column is required".to_string(),
            ));
        }
        let matrix = column_major_view(matrix, "matrix", lda, n, n)?;
        let rhs = column_major_view(rhs, "right-hand side", ldb, n, nrhs)?;
        Ok(Self {
            matrix,
            rhs,
            split: m,
        })
    }

    /// Wrap existing ndarray views of any strides.
    pub fn from_views(
        matrix: ArrayViewMut2<'a, f64>,
        rhs: ArrayViewMut2<'a, f64>,
        m: usize,
    ) -> Result<Self> {
        let (n, cols) = matrix.dim();
        if n != cols {
            return Err(EliminationError::InvalidLayout(format!(
                "matrix must be square, got {n}x{cols}"
            )));
        }
        check_split(n, m)?;
        if rhs.nrows() != n {
            return Err(EliminationError::InvalidLayout(format!(
                "right-hand side has {} rows, expected {n}",
                rhs.nrows()
            )));
        }
        if rhs.ncols() == 0 {
            return Err(EliminationError::InvalidLayout(
                "at least one right-hand side column is required".to_string(),
            ));
        }
        Ok(Self {
            matrix,
            rhs,
            split: m,
        })
    }

    /// System dimension `n`
    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    /// Size `m` of the leading block
    pub fn split(&self) -> usize {
        self.split
    }

    /// Size `k = n - m` of the trailing block
    pub fn trailing(&self) -> usize {
        self.size() - self.split
    }

    /// Number of right-hand side columns
    pub fn nrhs(&self) -> usize {
        self.rhs.ncols()
    }

    /// Read-only view of the whole `n x n` matrix
    pub fn matrix(&self) -> ArrayView2<'_, f64> {
        self.matrix.view()
    }

    /// Read-only view of the whole `n x nrhs` right-hand side
    pub fn rhs(&self) -> ArrayView2<'_, f64> {
        self.rhs.view()
    }

    /// Read-only views `(B, E)` of the upper blocks
    pub fn leading_blocks(&self) -> (ArrayView2<'_, f64>, ArrayView2<'_, f64>) {
        let m = self.split;
        (
            self.matrix.slice(s![..m, m..]),
            self.rhs.slice(s![..m, ..]),
        )
    }

    /// Read-only views `(D, F)` of the trailing blocks
    pub fn trailing_blocks(&self) -> (ArrayView2<'_, f64>, ArrayView2<'_, f64>) {
        let m = self.split;
        (
            self.matrix.slice(s![m.., m..]),
            self.rhs.slice(s![m.., ..]),
        )
    }

    pub(crate) fn blocks_mut(&mut self) -> Blocks<'_> {
        let m = self.split;
        let (a, b, c, d) = self.matrix.multi_slice_mut((
            s![..m, ..m],
            s![..m, m..],
            s![m.., ..m],
            s![m.., m..],
        ));
        let (e, f) = self.rhs.multi_slice_mut((s![..m, ..], s![m.., ..]));
        Blocks { a, b, c, d, e, f }
    }
}

fn check_split(n: usize, m: usize) -> Result<()> {
    if m == 0 || m > n {
        return Err(EliminationError::InvalidSplit { n, m });
    }
    Ok(())
}

/// Build an `rows x cols` column-major view with leading dimension `ld`.
fn column_major_view<'a>(
    data: &'a mut [f64],
    what: &str,
    ld: usize,
    rows: usize,
    cols: usize,
) -> Result<ArrayViewMut2<'a, f64>> {
    if ld < rows {
        return Err(EliminationError::InvalidLayout(format!(
            "{what} leading dimension {ld} is smaller than {rows} rows"
        )));
    }
    // Last element sits at (cols - 1) * ld + rows - 1
    let required = (cols - 1)
        .checked_mul(ld)
        .and_then(|last_col| last_col.checked_add(rows))
        .ok_or_else(|| {
            EliminationError::InvalidLayout(format!(
                "{what} extent with leading dimension {ld} and {cols} columns overflows usize"
            ))
        })?;
    if data.len() < required {
        return Err(EliminationError::InvalidLayout(format!(
            "{what} buffer holds {} values, expected at least {required}",
            data.len()
        )));
    }
    ArrayViewMut2::from_shape((rows, cols).strides((1, ld)), &mut data[..required])
        .map_err(|e| EliminationError::InvalidLayout(format!("{what}: {e}")))
}
