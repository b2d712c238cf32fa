//! Shared error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers conversions
//! of caller-facing values into core identifiers.

use thiserror::Error;

use crate::SectionId;

/// The base error type for `il-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("section number {0} is out of range")]
    SectionOutOfRange(i64),
}

/// Shorthand result type for `il-core`.
pub type CoreResult<T> = Result<T, CoreError>;

impl SectionId {
    /// Convert a caller-facing integer section number.
    ///
    /// Negative numbers and numbers that collide with the `INVALID` sentinel
    /// are rejected.
    pub fn from_number(n: i64) -> CoreResult<SectionId> {
        match u32::try_from(n) {
            Ok(v) if v != u32::MAX => Ok(SectionId(v)),
            _ => Err(CoreError::SectionOutOfRange(n)),
        }
    }
}
