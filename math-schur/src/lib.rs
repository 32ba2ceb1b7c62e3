//! Block Gaussian elimination for dense partitioned linear systems
//!
//! This crate eliminates the leading block of a column-major linear system
//! by forming its Schur complement in place:
//!
//! ```text
//!   +---+---+        +---+             +---+----------+        +-------------+
//!   | A | B |}m      | E |}m           | I |  A⁻¹B    |}m      |    A⁻¹E     |}m
//!   +---+---+  * x = +---+       =>    +---+----------+  * x = +-------------+
//!   | C | D |}k      | F |}k           | 0 | D - CA⁻¹B|}k      | F - C·A⁻¹E  |}k
//!   +---+---+        +---+             +---+----------+        +-------------+
//! ```
//!
//! # Features
//!
//! - **Elimination**: [`eliminate`], [`eliminate_multi`] and the provider-generic
//!   [`eliminate_with`]
//! - **Follow-on solves**: [`back_substitute`] and [`solve_in_place`] recover the full solution
//! - **Providers**: [`FaerLinalg`] by default, LAPACK through `ndarray-linalg`
//!   (feature `ndarray-linalg`), or the unblocked [`NativeLinalg`]; products go
//!   to BLAS with the `blas` feature
//! - **Layouts**: packed buffers, explicit leading dimensions, or ndarray views
//!   through [`PartitionedSystem`]
//!
//! # Example
//!
//! ```
//! use math_schur::eliminate;
//!
//! // 2x2 system, column-major: [[2, 1], [4, 5]] * x = [3, 9]
//! let mut matrix = vec![2.0, 4.0, 1.0, 5.0];
//! let mut rhs = vec![3.0, 9.0];
//!
//! eliminate(&mut matrix, &mut rhs, 2, 1).unwrap();
//!
//! // Reduced trailing equation: 3 * x1 = 3
//! assert_eq!(matrix, vec![1.0, 0.0, 0.5, 3.0]);
//! assert_eq!(rhs, vec![1.5, 3.0]);
//! ```

pub mod blas_helpers;
pub mod direct;
pub mod partition;
pub mod reduced;
pub mod schur;
pub mod traits;

pub use direct::{FaerLinalg, FaerPivots, NativeLinalg, Pivots};
pub use partition::PartitionedSystem;
pub use reduced::{back_substitute, solve_in_place, solve_in_place_with};
pub use schur::{eliminate, eliminate_multi, eliminate_with};
pub use traits::{DenseLinalg, LinalgError};

#[cfg(feature = "ndarray-linalg")]
pub use direct::LapackLinalg;

/// Provider used by the slice-based entry points
#[cfg(feature = "ndarray-linalg")]
pub type DefaultLinalg = LapackLinalg;

/// Provider used by the slice-based entry points
#[cfg(not(feature = "ndarray-linalg"))]
pub type DefaultLinalg = FaerLinalg;

/// Error types for elimination
#[derive(Debug, thiserror::Error)]
pub enum EliminationError {
    #[error("DGETRF failed: LU decomposition not possible ({0})")]
    Factorization(#[source] LinalgError),

    #[error("DGETRS failed while reducing block {target} ({source})")]
    Solve {
        target: &'static str,
        #[source]
        source: LinalgError,
    },

    #[error("DGETRF failed on the Schur complement: reduced system not solvable ({0})")]
    SchurFactorization(#[source] LinalgError),

    #[error("Invalid split m = {m} for a system of size {n} (require 0 < m <= n)")]
    InvalidSplit { n: usize, m: usize },

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, EliminationError>;
