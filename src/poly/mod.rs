//! Polynomial arithmetic over the scalar field: radix-2 FFT domains and the
//! QAP operations the prover needs.

pub mod domain;
pub mod qap;

pub use domain::Domain;
pub use qap::{SignalCoeffs, compute_h, linear_combination};
