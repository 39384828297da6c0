//! Utility functions and helpers

pub mod formats;

pub use formats::{from_sprs, sprs_spmv, to_sprs_csr};
