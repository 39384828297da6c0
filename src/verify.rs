//! Verification of kernel output against a sequential reference

use num_traits::Float;
use std::fmt;
use thiserror::Error;

/// Why two result vectors were judged different
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerificationError {
    /// The vectors do not have the same number of entries
    #[error("result length {computed} differs from reference length {reference}")]
    LengthMismatch { reference: usize, computed: usize },

    /// The first entry whose error exceeds the tolerance
    #[error("{0}")]
    Mismatch(Mismatch),
}

/// Details of the first out-of-tolerance entry
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub index: usize,
    pub reference: f64,
    pub computed: f64,
    /// Relative error, or absolute error where the reference is zero
    pub error: f64,
    pub tolerance: f64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry {}: computed {} vs reference {} (error {:e} > tolerance {:e})",
            self.index, self.computed, self.reference, self.error, self.tolerance
        )
    }
}

/// Error of `computed` relative to `reference`
///
/// `|computed - reference| / |reference|`, or the absolute error
/// `|computed|` when the reference is exactly zero. Equal values have zero
/// error, including matching infinities.
pub fn relative_error<T: Float>(reference: T, computed: T) -> T {
    if computed == reference {
        return T::zero();
    }
    let diff = (computed - reference).abs();
    if reference == T::zero() {
        diff
    } else {
        diff / reference.abs()
    }
}

/// Checks every entry of `computed` against `reference`
///
/// An entry passes when its [`relative_error`] is `<= tolerance`. A NaN
/// error never passes. Stops at the first failing entry and reports it.
pub fn verify<T>(reference: &[T], computed: &[T], tolerance: T) -> Result<(), VerificationError>
where
    T: Float,
{
    if reference.len() != computed.len() {
        return Err(VerificationError::LengthMismatch {
            reference: reference.len(),
            computed: computed.len(),
        });
    }

    for (index, (&r, &c)) in reference.iter().zip(computed).enumerate() {
        let error = relative_error(r, c);
        if error.is_nan() || error > tolerance {
            return Err(VerificationError::Mismatch(Mismatch {
                index,
                reference: r.to_f64().unwrap_or(f64::NAN),
                computed: c.to_f64().unwrap_or(f64::NAN),
                error: error.to_f64().unwrap_or(f64::NAN),
                tolerance: tolerance.to_f64().unwrap_or(f64::NAN),
            }));
        }
    }

    Ok(())
}

/// Boolean form of [`verify`]
pub fn check_error<T: Float>(reference: &[T], computed: &[T], tolerance: T) -> bool {
    verify(reference, computed, tolerance).is_ok()
}
