//! Direct solver providers for dense linear systems
//!
//! This module provides the implementations of [`DenseLinalg`](crate::DenseLinalg):
//! - [`FaerLinalg`]: faer's blocked LU with partial pivoting (default)
//! - [`NativeLinalg`]: unblocked LU decomposition with partial pivoting in pure Rust
//! - [`LapackLinalg`]: LAPACK `getrf`/`getrs` via `ndarray-linalg` (feature `ndarray-linalg`)

mod faer_lu;
mod lu;

#[cfg(feature = "ndarray-linalg")]
mod lapack;

pub use faer_lu::{FaerLinalg, FaerPivots};
pub use lu::{NativeLinalg, Pivots};

#[cfg(feature = "ndarray-linalg")]
pub use lapack::LapackLinalg;
